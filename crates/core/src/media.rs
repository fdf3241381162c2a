//! Media file naming rules.
//!
//! Items are identified by the basename of their media file. Pool membership
//! is decided by the file suffix alone.

use crate::error::CoreError;

/// Recognized media suffixes. Matching is case-sensitive.
pub const MEDIA_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mov", ".mkv"];

/// Suffix of the sidecar annotation document.
pub const ANNOTATION_SUFFIX: &str = ".json";

/// Whether `file_name` ends with one of [`MEDIA_EXTENSIONS`].
pub fn is_media_file(file_name: &str) -> bool {
    MEDIA_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

/// Validate that `item_id` is a plain file name.
///
/// Rejects empty names, `.` and `..`, and anything containing a path
/// separator or NUL, so an item id can never address a file outside its pool
/// directory.
pub fn validate_item_id(item_id: &str) -> Result<(), CoreError> {
    if item_id.trim().is_empty() {
        return Err(CoreError::Validation("Missing video name".to_string()));
    }
    if item_id == "." || item_id == ".." {
        return Err(CoreError::Validation(format!(
            "Invalid video name '{item_id}'"
        )));
    }
    if item_id.contains(['/', '\\', '\0']) {
        return Err(CoreError::Validation(format!(
            "Invalid video name '{item_id}'. Must not contain path separators"
        )));
    }
    Ok(())
}

/// File name of the annotation document for `item_id`.
pub fn annotation_document_name(item_id: &str) -> String {
    format!("{item_id}{ANNOTATION_SUFFIX}")
}

/// Guess a Content-Type from a media file name.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}
