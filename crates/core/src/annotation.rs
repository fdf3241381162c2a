//! Annotation records and per-item annotation sets.
//!
//! A record is an opaque JSON object describing one labeled interval. The
//! only field the store interprets is the numeric `start_frame`, which is the
//! ordering key for index-based deletion.

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::CoreError;

/// Field holding the ordering key inside every record.
pub const START_FRAME_KEY: &str = "start_frame";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One labeled interval on an item. Everything except `start_frame` is
/// passthrough payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationRecord(Value);

impl AnnotationRecord {
    /// Wrap a JSON value after checking it with [`validate_record`].
    pub fn new(value: Value) -> Result<Self, CoreError> {
        validate_record(&value)?;
        Ok(Self(value))
    }

    /// The numeric `start_frame`, if the record carries one.
    pub fn start_frame(&self) -> Option<f64> {
        self.0.get(START_FRAME_KEY).and_then(Value::as_f64)
    }

    /// The `start_frame` as stored, without lossy conversion.
    pub fn start_frame_number(&self) -> Option<&Number> {
        match self.0.get(START_FRAME_KEY) {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// The persisted annotation document for a single item.
///
/// Serialized as `{ "video": <item_id>, "annotations": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    #[serde(rename = "video")]
    pub item_id: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
}

impl AnnotationSet {
    /// The "no annotations yet" set for `item_id`.
    pub fn empty(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            annotations: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an incoming annotation payload.
///
/// The payload must be a non-empty JSON object with a numeric `start_frame`.
pub fn validate_record(value: &Value) -> Result<(), CoreError> {
    let obj = match value {
        Value::Null => {
            return Err(CoreError::Validation("annotation is required".to_string()));
        }
        Value::Object(obj) => obj,
        _ => {
            return Err(CoreError::Validation(
                "annotation must be a JSON object".to_string(),
            ));
        }
    };

    if obj.is_empty() {
        return Err(CoreError::Validation(
            "annotation must not be empty".to_string(),
        ));
    }

    match obj.get(START_FRAME_KEY) {
        Some(v) if v.is_number() => Ok(()),
        Some(_) => Err(CoreError::Validation(format!(
            "annotation '{START_FRAME_KEY}' must be a number"
        ))),
        None => Err(CoreError::Validation(format!(
            "annotation is missing required key '{START_FRAME_KEY}'"
        ))),
    }
}

/// Coerce a client-supplied index into an integer.
///
/// Accepts JSON integers, finite floats (truncated toward zero) and strings
/// that parse as an integer once trimmed.
pub fn coerce_index(value: &Value) -> Result<i64, CoreError> {
    let invalid = || CoreError::Validation("Annotation index must be an integer".to_string());

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
                    _ => Err(invalid()),
                }
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Numeric comparison of two JSON numbers.
///
/// Integers compare exactly at any magnitude; `-0.0` and `0` are equal.
pub fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    match (as_integer(a), as_integer(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(x), None) => compare_integer_to_float(x, b.as_f64().unwrap_or(0.0)),
        (None, Some(y)) => compare_integer_to_float(y, a.as_f64().unwrap_or(0.0)).reverse(),
        (None, None) => {
            let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn compare_integer_to_float(int: i128, float: f64) -> Ordering {
    // A coarse tie means `float` is integral (past 2^53 every f64 is), so
    // settle it exactly in i128.
    match (int as f64).partial_cmp(&float).unwrap_or(Ordering::Equal) {
        Ordering::Equal => int.cmp(&(float as i128)),
        ord => ord,
    }
}

/// Stable sort of `records` by ascending `start_frame`.
///
/// Equal keys keep their relative order. A record without a numeric key
/// means the document at `document` was written by something other than this
/// store, and is reported as [`CoreError::Corrupt`].
pub fn sorted_by_start_frame(
    records: Vec<AnnotationRecord>,
    document: &Path,
) -> Result<Vec<AnnotationRecord>, CoreError> {
    let mut keyed = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        let key = record.start_frame_number().cloned().ok_or_else(|| {
            CoreError::corrupt(
                document,
                format!("annotations[{i}] has no numeric '{START_FRAME_KEY}'"),
            )
        })?;
        keyed.push((key, record));
    }

    keyed.sort_by(|a, b| compare_numbers(&a.0, &b.0));
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
