//! Promotion results and the write-ahead intent record.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Suffix of intent records in the promotion journal.
pub const INTENT_SUFFIX: &str = ".intent.json";

/// Written before a promotion touches any file and removed once both files
/// have moved. A leftover intent marks a promotion interrupted mid-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionIntent {
    pub item_id: String,
    pub started_at: Timestamp,
}

impl PromotionIntent {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            started_at: chrono::Utc::now(),
        }
    }
}

/// Journal file name for the intent of `item_id`.
pub fn intent_file_name(item_id: &str) -> String {
    format!("{item_id}{INTENT_SUFFIX}")
}

/// Identity of an item after a successful promotion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotedItem {
    pub item_id: String,
    /// Whether an annotation document travelled with the media file.
    pub annotations_moved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_file_name_appends_suffix() {
        assert_eq!(intent_file_name("clip.mp4"), "clip.mp4.intent.json");
    }

    #[test]
    fn intent_serializes_item_and_timestamp() {
        let intent = PromotionIntent::new("clip.mp4");
        let value = serde_json::to_value(&intent).unwrap();
        assert_eq!(value["item_id"], "clip.mp4");
        assert!(value["started_at"].is_string());

        let back: PromotionIntent = serde_json::from_value(value).unwrap();
        assert_eq!(back, intent);
    }
}
