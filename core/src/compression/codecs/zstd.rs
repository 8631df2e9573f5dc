//! src/compression/codecs/zstd.rs
//!
//! Zstd stream driver.
//!
//! Design notes:
//! - Wraps the raw zstd streaming contexts (`zstd::stream::raw`) behind `StreamDriver`.
//! - Compression feeds the range first, then flushes (or ends the frame on the final range).
//! - Decompression accepts concatenated frames; the stream is done once the last frame closed.
//! - Errors are mapped into `CompressionError` variants with codec context.

use zstd::stream::raw::{CParameter, Decoder, Encoder, InBuffer, Operation, OutBuffer};

use crate::compression::options::CodecOptions;
use crate::compression::types::{CompressionError, Direction, Step, StreamDriver};

const CODEC: &str = "zstd";

enum Context {
    Encode(Encoder<'static>),
    Decode(Decoder<'static>),
}

pub struct ZstdDriver {
    context: Context,
    /// Compress: frame epilogue written. Decompress: last frame seen closed.
    finished: bool,
}

impl ZstdDriver {
    /// Create a new zstd driver.
    ///
    /// # Errors
    /// - Returns `CompressionError::CodecInitFailed` if the context rejects the configuration.
    pub fn new(direction: Direction, options: &CodecOptions) -> Result<Self, CompressionError> {
        let context = match direction {
            Direction::Compress => {
                let mut encoder = Encoder::new(options.zstd_level)
                    .map_err(|e| CompressionError::init(CODEC, e))?;
                encoder
                    .set_parameter(CParameter::ChecksumFlag(options.zstd_checksum))
                    .map_err(|e| CompressionError::init(CODEC, e))?;
                Context::Encode(encoder)
            }
            Direction::Decompress => {
                Context::Decode(Decoder::new().map_err(|e| CompressionError::init(CODEC, e))?)
            }
        };
        Ok(Self { context, finished: false })
    }

    fn compress(
        encoder: &mut Encoder<'static>,
        input: &[u8],
        is_last: bool,
        output: &mut [u8],
    ) -> Result<Step, CompressionError> {
        let out_len = output.len();
        let mut src = InBuffer::around(input);
        let mut dst = OutBuffer::around(output);

        while src.pos < input.len() && dst.pos() < out_len {
            let before = (src.pos, dst.pos());
            encoder.run(&mut src, &mut dst).map_err(|e| CompressionError::stream(CODEC, e))?;
            if (src.pos, dst.pos()) == before {
                break;
            }
        }

        let mut done = false;
        if src.pos == input.len() && dst.pos() < out_len {
            let pending = if is_last {
                encoder.finish(&mut dst, false)
            } else {
                encoder.flush(&mut dst)
            }
            .map_err(|e| CompressionError::stream(CODEC, e))?;
            done = is_last && pending == 0;
        }

        Ok(Step { consumed: src.pos, written: dst.pos(), done })
    }

    fn decompress(
        decoder: &mut Decoder<'static>,
        frame_closed: &mut bool,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<Step, CompressionError> {
        let out_len = output.len();
        let mut src = InBuffer::around(input);
        let mut dst = OutBuffer::around(output);

        // Runs at least once so buffered output drains even with no new input.
        loop {
            let before = (src.pos, dst.pos());
            let hint = decoder
                .run(&mut src, &mut dst)
                .map_err(|e| CompressionError::stream(CODEC, e))?;
            let progressed = (src.pos, dst.pos()) != before;

            if hint == 0 {
                *frame_closed = true;
            } else if progressed {
                *frame_closed = false;
            }

            if !progressed || dst.pos() == out_len || src.pos == input.len() {
                break;
            }
        }

        Ok(Step { consumed: src.pos, written: dst.pos(), done: *frame_closed })
    }
}

impl StreamDriver for ZstdDriver {
    fn codec(&self) -> &'static str {
        CODEC
    }

    fn direction(&self) -> Direction {
        match self.context {
            Context::Encode(_) => Direction::Compress,
            Context::Decode(_) => Direction::Decompress,
        }
    }

    fn process(&mut self, input: &[u8], is_last: bool, output: &mut [u8]) -> Result<Step, CompressionError> {
        match &mut self.context {
            Context::Encode(encoder) => {
                if self.finished {
                    return Ok(Step::finished());
                }
                let step = Self::compress(encoder, input, is_last, output)?;
                self.finished = step.done;
                Ok(step)
            }
            Context::Decode(decoder) => Self::decompress(decoder, &mut self.finished, input, output),
        }
    }
}
