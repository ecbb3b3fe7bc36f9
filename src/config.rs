//! Configuration for huffpack

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompressError, Result};

/// What `compress` does with input made of one repeated byte value.
///
/// Such input yields a tree whose root is a leaf, so the natural code for
/// that byte is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleSymbolPolicy {
    /// Encode every occurrence with the 1-bit code `0`.
    #[default]
    ForceOneBit,
    /// Fail with `CompressError::DegenerateSingleSymbol`.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub max_input_size: usize,
    pub single_symbol: SingleSymbolPolicy,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_input_size: 100 * 1024 * 1024, // 100 MB
            single_symbol: SingleSymbolPolicy::ForceOneBit,
        }
    }
}

impl CompressionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CompressError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CompressError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }
}
