//! Deflate (zlib framing) and gzip stream drivers over flate2's low-level state machines.
//!
//! Each `process` call is a single `compress`/`decompress` step; the
//! orchestrator repeats it while the output block keeps filling up.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::compression::constants::DEFLATE_WINDOW_BITS;
use crate::compression::options::CodecOptions;
use crate::compression::types::{CompressionError, Direction, Step, StreamDriver};

enum Flate {
    Deflate(Compress),
    Inflate(Decompress),
}

pub struct DeflateDriver {
    flate: Flate,
    codec: &'static str,
    finished: bool,
    /// Last sync flush took all its input and fit in the output.
    flushed: bool,
}

impl DeflateDriver {
    /// `gzip` selects gzip framing; otherwise the stream carries a zlib header.
    /// The same flag must be used on both sides.
    pub fn new(direction: Direction, gzip: bool, options: &CodecOptions) -> Result<Self, CompressionError> {
        let codec = if gzip { "gzip" } else { "deflate" };
        if options.deflate_level > 9 {
            return Err(CompressionError::init(
                codec,
                format!("level {} outside 0..=9", options.deflate_level),
            ));
        }

        let flate = match direction {
            Direction::Compress => {
                let level = Compression::new(options.deflate_level);
                let c = if gzip {
                    Compress::new_gzip(level, DEFLATE_WINDOW_BITS)
                } else {
                    Compress::new(level, true)
                };
                Flate::Deflate(c)
            }
            Direction::Decompress => {
                let d = if gzip {
                    Decompress::new_gzip(DEFLATE_WINDOW_BITS)
                } else {
                    Decompress::new(true)
                };
                Flate::Inflate(d)
            }
        };

        Ok(Self { flate, codec, finished: false, flushed: false })
    }
}

impl StreamDriver for DeflateDriver {
    fn codec(&self) -> &'static str {
        self.codec
    }

    fn direction(&self) -> Direction {
        match self.flate {
            Flate::Deflate(_) => Direction::Compress,
            Flate::Inflate(_) => Direction::Decompress,
        }
    }

    fn process(&mut self, input: &[u8], is_last: bool, output: &mut [u8]) -> Result<Step, CompressionError> {
        if self.finished {
            return Ok(Step::finished());
        }

        let codec = self.codec;
        let (consumed, written, status) = match &mut self.flate {
            Flate::Deflate(c) => {
                // A completed flush followed by no new input has nothing to add.
                if self.flushed && input.is_empty() && !is_last {
                    return Ok(Step::default());
                }
                let flush = if is_last { FlushCompress::Finish } else { FlushCompress::Sync };
                let (in0, out0) = (c.total_in(), c.total_out());
                let status = c
                    .compress(input, output, flush)
                    .map_err(|e| CompressionError::stream(codec, e))?;
                let (consumed, written) = (c.total_in() - in0, c.total_out() - out0);
                self.flushed = !is_last
                    && consumed as usize == input.len()
                    && (written as usize) < output.len();
                (consumed, written, status)
            }
            Flate::Inflate(d) => {
                let (in0, out0) = (d.total_in(), d.total_out());
                let status = d
                    .decompress(input, output, FlushDecompress::None)
                    .map_err(|e| CompressionError::stream(codec, e))?;
                (d.total_in() - in0, d.total_out() - out0, status)
            }
        };

        // BufError only means no progress was possible this step; not fatal.
        self.finished = status == Status::StreamEnd;

        Ok(Step {
            consumed: consumed as usize,
            written: written as usize,
            done: self.finished,
        })
    }
}
