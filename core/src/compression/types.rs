//! compression/types.rs
//! Algorithm identifiers, the driver contract, and the crate error type.
use std::fmt;
use std::str::FromStr;

use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::compression::constants::algorithm_ids;

/// Message compression algorithm, as negotiated by the caller.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum CompressionAlgorithm {
    None    = algorithm_ids::NONE,
    Deflate = algorithm_ids::DEFLATE,
    Gzip    = algorithm_ids::GZIP,
    Zstd    = algorithm_ids::ZSTD,
}

impl CompressionAlgorithm {
    /// Number of valid ids; also the first out-of-range one.
    pub const COUNT: u8 = algorithm_ids::COUNT;

    pub const ALL: [CompressionAlgorithm; 4] = [
        CompressionAlgorithm::None,
        CompressionAlgorithm::Deflate,
        CompressionAlgorithm::Gzip,
        CompressionAlgorithm::Zstd,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompressionAlgorithm::None    => "identity",
            CompressionAlgorithm::Deflate => "deflate",
            CompressionAlgorithm::Gzip    => "gzip",
            CompressionAlgorithm::Zstd    => "zstd",
        }
    }

    pub fn verify(raw: u8) -> Result<Self, CompressionError> {
        Self::try_from_primitive(raw).map_err(|_| CompressionError::UnsupportedAlgorithm { raw })
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| CompressionError::UnknownAlgorithmName(s.to_string()))
    }
}

/// Which way a driver moves bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Compress,
    Decompress,
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("codec {codec} init failed: {msg}")]
    CodecInitFailed { codec: String, msg: String },

    #[error("codec {codec} stream failed: {msg}")]
    CodecStreamFailed { codec: String, msg: String },

    #[error("codec {codec}: {remaining} bytes of input range {range} not consumed")]
    IncompleteConsumption { codec: String, range: usize, remaining: usize },

    #[error("codec {codec}: stream ended before completion")]
    TruncatedStream { codec: String },

    #[error("compression gained nothing: {output} bytes out for {input} bytes in")]
    NoGain { input: usize, output: usize },

    #[error("unsupported compression algorithm: {}", enum_name_or_hex::<CompressionAlgorithm>(*raw))]
    UnsupportedAlgorithm { raw: u8 },

    #[error("unknown compression algorithm name: {0:?}")]
    UnknownAlgorithmName(String),

    #[error("invalid codec options: {0}")]
    InvalidOptions(String),
}

impl CompressionError {
    pub fn init(codec: &str, e: impl fmt::Display) -> Self {
        CompressionError::CodecInitFailed { codec: codec.into(), msg: e.to_string() }
    }

    pub fn stream(codec: &str, e: impl fmt::Display) -> Self {
        CompressionError::CodecStreamFailed { codec: codec.into(), msg: e.to_string() }
    }

    /// `NoGain` is an expected outcome of compression; everything else is a failure.
    pub fn is_fault(&self) -> bool {
        !matches!(self, CompressionError::NoGain { .. })
    }
}

/// Result of one `StreamDriver::process` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Step {
    /// Input bytes taken from the front of the range.
    pub consumed: usize,
    /// Output bytes written to the front of the output slice.
    pub written: usize,
    /// The codec stream has ended; nothing more will be produced.
    pub done: bool,
}

impl Step {
    pub fn finished() -> Self {
        Step { consumed: 0, written: 0, done: true }
    }
}

/// One streaming (de)compression state machine.
///
/// `process` is called once or more per input range. When the output slice
/// fills up, the caller supplies a fresh one and calls again with whatever
/// part of the range is still unconsumed. Compressors flush on every
/// non-final range and finish on the final one. Resources are released on drop.
pub trait StreamDriver: Send {
    fn codec(&self) -> &'static str;

    fn direction(&self) -> Direction;

    fn process(&mut self, input: &[u8], is_last: bool, output: &mut [u8]) -> Result<Step, CompressionError>;
}

impl<D: StreamDriver + ?Sized> StreamDriver for Box<D> {
    fn codec(&self) -> &'static str {
        (**self).codec()
    }

    fn direction(&self) -> Direction {
        (**self).direction()
    }

    fn process(&mut self, input: &[u8], is_last: bool, output: &mut [u8]) -> Result<Step, CompressionError> {
        (**self).process(input, is_last, output)
    }
}
