//! compression/options.rs
//! Static engine configuration: block size and the fixed per-codec levels.
use serde::{Deserialize, Serialize};

use crate::buffer::check_block_size;
use crate::compression::constants::*;
use crate::compression::types::CompressionError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Capacity of each output block.
    pub block_size: usize,
    /// zlib level (0..=9) shared by deflate and gzip.
    pub deflate_level: u32,
    /// zstd level (1..=22).
    pub zstd_level: i32,
    /// Emit the zstd frame checksum so corrupted payloads fail to decode.
    pub zstd_checksum: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            deflate_level: DEFAULT_LEVEL_DEFLATE,
            zstd_level: DEFAULT_LEVEL_ZSTD,
            zstd_checksum: true,
        }
    }
}

impl CodecOptions {
    pub fn validate(&self) -> Result<(), CompressionError> {
        check_block_size(self.block_size)?;
        if self.deflate_level > 9 {
            return Err(CompressionError::InvalidOptions(format!(
                "deflate_level {} outside 0..=9",
                self.deflate_level
            )));
        }
        if !(1..=22).contains(&self.zstd_level) {
            return Err(CompressionError::InvalidOptions(format!(
                "zstd_level {} outside 1..=22",
                self.zstd_level
            )));
        }
        Ok(())
    }

    /// Parse and validate options from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, CompressionError> {
        let options: CodecOptions = serde_json::from_str(json)
            .map_err(|e| CompressionError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }
}
