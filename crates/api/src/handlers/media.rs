//! Media streaming with HTTP range request support.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{self, HeaderMap};
use axum::http::StatusCode;
use axum::response::Response;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use clipmark_core::error::CoreError;
use clipmark_core::media::content_type_for;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_pool;
use crate::state::AppState;

/// Maximum bytes served for an open-ended range (1 MiB).
const MAX_CHUNK_SIZE: u64 = 1024 * 1024;

/// Parse a `Range: bytes=START-END` header value.
/// Returns `(start, optional_end)`.
fn parse_range_header(range: &str) -> Option<(u64, Option<u64>)> {
    let range = range.strip_prefix("bytes=")?;
    let (start, end) = range.split_once('-')?;
    let start = start.trim().parse::<u64>().ok()?;
    let end = match end.trim() {
        "" => None,
        e => Some(e.parse::<u64>().ok()?),
    };
    Some((start, end))
}

fn build(builder: axum::http::response::Builder, body: Body) -> AppResult<Response> {
    builder
        .body(body)
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// GET /pools/{pool}/items/{item_id}/media
///
/// Streams the item's media file. Honors a single `Range: bytes=` header.
pub async fn stream_media(
    State(state): State<AppState>,
    Path((pool, item_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let kind = parse_pool(&pool)?;
    let path = state.catalog.pool(kind).media_path(&item_id).await?;

    let file_size = tokio::fs::metadata(&path)
        .await
        .map_err(|e| CoreError::storage(&path, e))?
        .len();
    let content_type = content_type_for(&item_id);

    if let Some(range_value) = headers.get(header::RANGE) {
        let range_str = range_value
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Range header".into()))?;

        if let Some((start, end)) = parse_range_header(range_str) {
            if start >= file_size {
                return build(
                    Response::builder()
                        .status(StatusCode::RANGE_NOT_SATISFIABLE)
                        .header(header::CONTENT_RANGE, format!("bytes */{file_size}")),
                    Body::empty(),
                );
            }

            let end = end
                .map(|e| e.min(file_size - 1))
                .unwrap_or_else(|| (start + MAX_CHUNK_SIZE - 1).min(file_size - 1));
            if start > end {
                return build(
                    Response::builder()
                        .status(StatusCode::RANGE_NOT_SATISFIABLE)
                        .header(header::CONTENT_RANGE, format!("bytes */{file_size}")),
                    Body::empty(),
                );
            }

            let length = end - start + 1;
            let mut file = tokio::fs::File::open(&path)
                .await
                .map_err(|e| CoreError::storage(&path, e))?;
            file.seek(std::io::SeekFrom::Start(start))
                .await
                .map_err(|e| CoreError::storage(&path, e))?;

            let stream = ReaderStream::new(file.take(length));

            return build(
                Response::builder()
                    .status(StatusCode::PARTIAL_CONTENT)
                    .header(header::CONTENT_TYPE, content_type)
                    .header(header::CONTENT_LENGTH, length.to_string())
                    .header(
                        header::CONTENT_RANGE,
                        format!("bytes {start}-{end}/{file_size}"),
                    )
                    .header(header::ACCEPT_RANGES, "bytes"),
                Body::from_stream(stream),
            );
        }
    }

    // No usable Range header: serve the full file.
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| CoreError::storage(&path, e))?;

    build(
        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, file_size.to_string())
            .header(header::ACCEPT_RANGES, "bytes"),
        Body::from_stream(ReaderStream::new(file)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_with_start_and_end() {
        assert_eq!(parse_range_header("bytes=0-99"), Some((0, Some(99))));
    }

    #[test]
    fn open_ended_range() {
        assert_eq!(parse_range_header("bytes=100-"), Some((100, None)));
    }

    #[test]
    fn malformed_ranges_ignored() {
        assert_eq!(parse_range_header("items=0-1"), None);
        assert_eq!(parse_range_header("bytes=abc-"), None);
        assert_eq!(parse_range_header("bytes=5"), None);
    }
}
