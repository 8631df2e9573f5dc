//! compression/registry.rs
//! Algorithm metadata and driver factory.

use crate::compression::codecs::{DeflateDriver, ZstdDriver};
use crate::compression::constants::{DEFAULT_LEVEL_DEFLATE, DEFAULT_LEVEL_ZSTD};
use crate::compression::options::CodecOptions;
use crate::compression::types::{CompressionAlgorithm, CompressionError, Direction, StreamDriver};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecInfo {
    pub name: &'static str,
    /// False for the identity algorithm, which has no driver.
    pub streaming: bool,
    pub default_level: i32,
}

pub fn resolve(algorithm: CompressionAlgorithm) -> CodecInfo {
    match algorithm {
        CompressionAlgorithm::None =>
            CodecInfo { name: "identity", streaming: false, default_level: 0 },
        CompressionAlgorithm::Deflate =>
            CodecInfo { name: "deflate", streaming: true, default_level: DEFAULT_LEVEL_DEFLATE as i32 },
        CompressionAlgorithm::Gzip =>
            CodecInfo { name: "gzip", streaming: true, default_level: DEFAULT_LEVEL_DEFLATE as i32 },
        CompressionAlgorithm::Zstd =>
            CodecInfo { name: "zstd", streaming: true, default_level: DEFAULT_LEVEL_ZSTD },
    }
}

/// Build the driver for `algorithm` in `direction`.
///
/// `None` has no driver; callers handle identity themselves.
pub fn create_driver(
    algorithm: CompressionAlgorithm,
    direction: Direction,
    options: &CodecOptions,
) -> Result<Box<dyn StreamDriver>, CompressionError> {
    match algorithm {
        CompressionAlgorithm::Deflate => Ok(Box::new(DeflateDriver::new(direction, false, options)?)),
        CompressionAlgorithm::Gzip => Ok(Box::new(DeflateDriver::new(direction, true, options)?)),
        CompressionAlgorithm::Zstd => Ok(Box::new(ZstdDriver::new(direction, options)?)),
        CompressionAlgorithm::None => Err(CompressionError::UnsupportedAlgorithm { raw: algorithm.id() }),
    }
}
