//! compression/mod.rs
//! Streaming message compression and decompression.
//!
//! Notes:
//! - Each algorithm family is a `StreamDriver`; the orchestrator in `stream` is written once against it.
//! - Registry resolves algorithm ids to drivers.
//! - `Engine` owns the policy: compress degrades to identity, decompress fails hard.

pub mod codecs;
pub mod constants;
pub mod engine;
pub mod options;
pub mod registry;
pub mod stream;
pub mod types;

pub use constants::*;
pub use engine::*;
pub use options::*;
pub use registry::*;
pub use stream::*;
pub use types::*;
