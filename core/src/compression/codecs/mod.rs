//! compression/codecs/mod.rs
//! Stream drivers for each algorithm family, plus the identity fallback.

pub mod deflate;
pub mod identity;
pub mod zstd;

pub use self::deflate::DeflateDriver;
pub use self::zstd::ZstdDriver;
