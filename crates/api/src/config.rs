use std::path::PathBuf;

use axum::http::HeaderValue;
use clipmark_store::CatalogConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `10200`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding unfinished media and their annotation documents.
    pub pending_dir: PathBuf,
    /// Directory holding promoted media and their annotation documents.
    pub finished_dir: PathBuf,
    /// Taxonomy document path.
    pub taxonomy_file: PathBuf,
    /// Promotion journal directory.
    pub promotion_journal_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                               |
    /// |-------------------------|---------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                             |
    /// | `PORT`                  | `10200`                               |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`               |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                  |
    /// | `PENDING_DIR`           | `data`                                |
    /// | `FINISHED_DIR`          | `<PENDING_DIR>/Done_annotations`      |
    /// | `TAXONOMY_FILE`         | `annotation_classes.json`             |
    /// | `PROMOTION_JOURNAL_DIR` | `<FINISHED_DIR>/.promotion-journal`   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "10200".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_cors_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        )
        .unwrap_or_else(|e| panic!("CORS_ORIGINS is invalid: {e}"));

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let pending_dir = PathBuf::from(std::env::var("PENDING_DIR").unwrap_or_else(|_| "data".into()));

        let finished_dir = std::env::var("FINISHED_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| pending_dir.join("Done_annotations"));

        let taxonomy_file = PathBuf::from(
            std::env::var("TAXONOMY_FILE").unwrap_or_else(|_| "annotation_classes.json".into()),
        );

        let promotion_journal_dir = std::env::var("PROMOTION_JOURNAL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                finished_dir.join(clipmark_store::catalog::DEFAULT_JOURNAL_DIR_NAME)
            });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            pending_dir,
            finished_dir,
            taxonomy_file,
            promotion_journal_dir,
        }
    }

    /// Storage locations for [`clipmark_store::Catalog::open`].
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            pending_dir: self.pending_dir.clone(),
            finished_dir: self.finished_dir.clone(),
            taxonomy_file: self.taxonomy_file.clone(),
            journal_dir: self.promotion_journal_dir.clone(),
        }
    }
}

/// Split a comma-separated origin list. Blank entries are skipped.
pub fn parse_cors_origins(raw: &str) -> Result<Vec<HeaderValue>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| format!("origin '{origin}': {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blanks_skipped() {
        let origins = parse_cors_origins(" http://a.test , ,http://b.test").unwrap();
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn origin_with_control_character_rejected() {
        let err = parse_cors_origins("http://a.test,http://b\n.test").unwrap_err();
        assert!(err.contains("http://b"));
    }
}
