//! buffer/block.rs
//! Fixed-capacity output blocks and the allocator that hands them out.

use bytes::{Bytes, BytesMut};

use crate::compression::constants::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE, MIN_BLOCK_SIZE};
use crate::compression::types::CompressionError;

/// Write target for one stretch of codec output.
///
/// Frozen into a `Bytes` chunk trimmed to the bytes actually written.
#[derive(Debug)]
pub struct OutputBlock {
    buf: BytesMut,
    written: usize,
}

impl OutputBlock {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: BytesMut::zeroed(capacity), written: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    pub fn is_full(&self) -> bool {
        self.written == self.buf.len()
    }

    /// Unwritten tail of the block.
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.written..]
    }

    /// Mark `n` more bytes of the spare tail as written.
    pub fn advance(&mut self, n: usize) {
        assert!(
            n <= self.buf.len() - self.written,
            "advance past block capacity: {} > {}",
            n,
            self.buf.len() - self.written
        );
        self.written += n;
    }

    pub fn freeze(mut self) -> Bytes {
        self.buf.truncate(self.written);
        self.buf.freeze()
    }
}

/// Reject block capacities no codec can make progress in.
pub fn check_block_size(block_size: usize) -> Result<(), CompressionError> {
    if (MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&block_size) {
        Ok(())
    } else {
        Err(CompressionError::InvalidOptions(format!(
            "block_size {} outside {}..={}",
            block_size, MIN_BLOCK_SIZE, MAX_BLOCK_SIZE
        )))
    }
}

/// Source of output blocks for one transform.
///
/// Passed explicitly into the orchestrator so callers control where codec
/// output lands.
pub trait BlockAllocator {
    fn allocate(&self) -> OutputBlock;
}

/// Plain heap-backed blocks of a fixed size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeapBlocks {
    block_size: usize,
}

impl HeapBlocks {
    /// # Errors
    /// `InvalidOptions` when `block_size` is outside `MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE`.
    pub fn new(block_size: usize) -> Result<Self, CompressionError> {
        check_block_size(block_size)?;
        Ok(Self { block_size })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

impl Default for HeapBlocks {
    fn default() -> Self {
        Self { block_size: DEFAULT_BLOCK_SIZE }
    }
}

impl BlockAllocator for HeapBlocks {
    fn allocate(&self) -> OutputBlock {
        OutputBlock::with_capacity(self.block_size)
    }
}

impl<A: BlockAllocator + ?Sized> BlockAllocator for &A {
    fn allocate(&self) -> OutputBlock {
        (**self).allocate()
    }
}
