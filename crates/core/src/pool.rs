//! Lifecycle stage of an item.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The two pools an item can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    Pending,
    Finished,
}

/// All valid pool name strings.
const VALID_POOL_STRINGS: &[&str] = &["pending", "finished"];

impl PoolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Finished => "finished",
        }
    }

    /// Parse a pool name as used in request paths.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "finished" => Ok(Self::Finished),
            _ => Err(CoreError::Validation(format!(
                "Invalid pool '{s}'. Must be one of: {}",
                VALID_POOL_STRINGS.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
