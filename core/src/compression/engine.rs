//! compression/engine.rs
//! Algorithm dispatch and the compress/decompress contracts.
//!
//! - Compression never fails outward: anything short of a strictly smaller
//!   result falls back to an identity copy and reports `false`.
//! - Decompression fails hard: `false` means corruption or an algorithm
//!   mismatch, and the output message is left untouched.
use log::{debug, error, info, trace};

use crate::buffer::{BlockAllocator, ChunkedMessage, HeapBlocks};
use crate::compression::codecs::identity;
use crate::compression::options::CodecOptions;
use crate::compression::registry::create_driver;
use crate::compression::stream::transform;
use crate::compression::types::{CompressionAlgorithm, CompressionError, Direction};
use crate::telemetry::TransformCounters;

#[derive(Clone, Debug)]
pub struct Engine<A = HeapBlocks> {
    options: CodecOptions,
    blocks: A,
}

impl Default for Engine<HeapBlocks> {
    fn default() -> Self {
        Self { options: CodecOptions::default(), blocks: HeapBlocks::default() }
    }
}

impl Engine<HeapBlocks> {
    pub fn new(options: CodecOptions) -> Result<Self, CompressionError> {
        options.validate()?;
        let blocks = HeapBlocks::new(options.block_size)?;
        Ok(Self { options, blocks })
    }
}

impl<A: BlockAllocator> Engine<A> {
    /// Use `blocks` for output blocks; `options.block_size` is then unused.
    /// Blocks smaller than `MIN_BLOCK_SIZE` make every transform fail with
    /// `InvalidOptions`.
    pub fn with_allocator(options: CodecOptions, blocks: A) -> Result<Self, CompressionError> {
        options.validate()?;
        Ok(Self { options, blocks })
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Compress `input` into `output` without any fallback.
    ///
    /// On error `output` is unchanged. `NoGain` is returned when the result
    /// would not be strictly smaller than the input.
    pub fn try_compress(
        &self,
        algorithm: CompressionAlgorithm,
        input: &ChunkedMessage,
        output: &mut ChunkedMessage,
    ) -> Result<TransformCounters, CompressionError> {
        self.run(algorithm, Direction::Compress, input, output)
    }

    /// Decompress `input` into `output`. On error `output` is unchanged.
    pub fn try_decompress(
        &self,
        algorithm: CompressionAlgorithm,
        input: &ChunkedMessage,
        output: &mut ChunkedMessage,
    ) -> Result<TransformCounters, CompressionError> {
        if algorithm == CompressionAlgorithm::None {
            identity::copy(input, output);
            let mut counters = TransformCounters::default();
            for chunk in input {
                counters.add_input(chunk.len());
                counters.add_block(chunk.len());
            }
            return Ok(counters);
        }
        self.run(algorithm, Direction::Decompress, input, output)
    }

    /// Returns whether `output` received compressed bytes. When it did not,
    /// `output` received an identity copy of `input` instead.
    pub fn compress(
        &self,
        algorithm: CompressionAlgorithm,
        input: &ChunkedMessage,
        output: &mut ChunkedMessage,
    ) -> bool {
        // Identity never attempts compression; the fallback copy is the answer.
        let compressed = algorithm != CompressionAlgorithm::None
            && match self.try_compress(algorithm, input, output) {
                Ok(counters) => {
                    trace!("{}: compressed ratio {:.3}", algorithm, counters.ratio());
                    true
                }
                Err(e) if !e.is_fault() => {
                    debug!("{}: {}", algorithm, e);
                    false
                }
                Err(e) => {
                    info!("{}: compression failed, sending uncompressed: {}", algorithm, e);
                    false
                }
            };

        if !compressed {
            identity::copy(input, output);
        }
        compressed
    }

    /// Same as `compress` but for an id straight off the wire.
    pub fn compress_raw(&self, raw: u8, input: &ChunkedMessage, output: &mut ChunkedMessage) -> bool {
        match CompressionAlgorithm::verify(raw) {
            Ok(algorithm) => self.compress(algorithm, input, output),
            Err(e) => {
                error!("invalid compression algorithm {}: {}", raw, e);
                identity::copy(input, output);
                false
            }
        }
    }

    /// Returns `false` on corruption or algorithm mismatch; `output` is only
    /// populated when `true`.
    pub fn decompress(
        &self,
        algorithm: CompressionAlgorithm,
        input: &ChunkedMessage,
        output: &mut ChunkedMessage,
    ) -> bool {
        match self.try_decompress(algorithm, input, output) {
            Ok(_) => true,
            Err(e) => {
                info!("{}: decompression failed: {}", algorithm, e);
                false
            }
        }
    }

    pub fn decompress_raw(&self, raw: u8, input: &ChunkedMessage, output: &mut ChunkedMessage) -> bool {
        match CompressionAlgorithm::verify(raw) {
            Ok(algorithm) => self.decompress(algorithm, input, output),
            Err(e) => {
                error!("invalid compression algorithm {}: {}", raw, e);
                false
            }
        }
    }

    fn run(
        &self,
        algorithm: CompressionAlgorithm,
        direction: Direction,
        input: &ChunkedMessage,
        output: &mut ChunkedMessage,
    ) -> Result<TransformCounters, CompressionError> {
        let mut driver = create_driver(algorithm, direction, &self.options)?;
        transform(&mut *driver, input, output, &self.blocks)
    }
}

/// `Engine::compress` with default options.
pub fn compress(algorithm: CompressionAlgorithm, input: &ChunkedMessage, output: &mut ChunkedMessage) -> bool {
    Engine::<HeapBlocks>::default().compress(algorithm, input, output)
}

/// `Engine::decompress` with default options.
pub fn decompress(algorithm: CompressionAlgorithm, input: &ChunkedMessage, output: &mut ChunkedMessage) -> bool {
    Engine::<HeapBlocks>::default().decompress(algorithm, input, output)
}

pub fn compress_raw(raw: u8, input: &ChunkedMessage, output: &mut ChunkedMessage) -> bool {
    Engine::<HeapBlocks>::default().compress_raw(raw, input, output)
}

pub fn decompress_raw(raw: u8, input: &ChunkedMessage, output: &mut ChunkedMessage) -> bool {
    Engine::<HeapBlocks>::default().decompress_raw(raw, input, output)
}
