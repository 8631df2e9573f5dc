//! buffer/mod.rs
//! Chunked messages and the output blocks the engine writes into.
//!
//! Notes:
//! - A message is an ordered list of immutable `Bytes` chunks plus a cached length.
//! - Output blocks are allocated through an explicit `BlockAllocator`, never a global hook.
//! - Rollback is a watermark (chunk count + length) and a transaction guard over it.

pub mod block;
pub mod message;

pub use block::*;
pub use message::*;
