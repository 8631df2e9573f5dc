//! message-compress-core
//!
//! Streaming compression engine for chunked byte messages.
//! Deflate, gzip and zstd; synchronous, no I/O.

#![forbid(unsafe_code)]

pub mod buffer;
pub mod compression;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::buffer::{BlockAllocator, ChunkedMessage, HeapBlocks, OutputBlock};
    pub use crate::compression::{
        compress, compress_raw, decompress, decompress_raw, CodecOptions, CompressionAlgorithm,
        CompressionError, Direction, Engine, Step, StreamDriver,
    };
    pub use crate::telemetry::TransformCounters;
}
