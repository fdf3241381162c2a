//! Label-class taxonomy defaults.

/// Classes written on first access when no taxonomy document exists.
pub const DEFAULT_CLASSES: &[&str] = &[
    "Safe driving",
    "Texting on phone",
    "Drinking",
    "Reaching Behind",
    "Talking to passenger",
    "Adjusting Radio",
];

/// [`DEFAULT_CLASSES`] as an owned list.
pub fn default_classes() -> Vec<String> {
    DEFAULT_CLASSES.iter().map(|c| c.to_string()).collect()
}
