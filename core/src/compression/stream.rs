//! compression/stream.rs
//! Drives one `StreamDriver` across every chunk of a message.
//!
//! Output lands in blocks from the supplied allocator. All appends go through
//! a `MessageTxn`, so any error (or a compression that gained nothing) leaves
//! the output message exactly as it was before the call.
use bytes::Bytes;
use log::trace;

use crate::buffer::{check_block_size, BlockAllocator, ChunkedMessage, OutputBlock};
use crate::compression::types::{CompressionError, Direction, StreamDriver};
use crate::telemetry::TransformCounters;

/// Run `driver` over `input`, appending its output to `output`.
///
/// A message with no chunks is fed as a single empty final range. For the
/// compress direction the appended bytes must be strictly fewer than the
/// input bytes, else the output is rolled back and `NoGain` is returned.
pub fn transform<D, A>(
    driver: &mut D,
    input: &ChunkedMessage,
    output: &mut ChunkedMessage,
    blocks: &A,
) -> Result<TransformCounters, CompressionError>
where
    D: StreamDriver + ?Sized,
    A: BlockAllocator + ?Sized,
{
    let codec = driver.codec();
    let mut txn = output.begin();
    let mut counters = TransformCounters::default();

    let empty = [Bytes::new()];
    let ranges = if input.chunk_count() == 0 { &empty[..] } else { input.chunks() };

    let mut block = next_block(blocks)?;
    let mut done = false;

    for (index, range) in ranges.iter().enumerate() {
        let is_last = index + 1 == ranges.len();
        let mut offset = 0;

        loop {
            if block.is_full() {
                let full = std::mem::replace(&mut block, next_block(blocks)?);
                counters.add_block(full.written());
                txn.push(full.freeze());
            }

            let step = driver.process(&range[offset..], is_last, block.spare_mut())?;
            offset += step.consumed;
            block.advance(step.written);
            done = step.done;

            // Not output-starved: the driver took everything it was going to take.
            if !block.is_full() {
                break;
            }
        }

        if offset != range.len() {
            return Err(CompressionError::IncompleteConsumption {
                codec: codec.into(),
                range: index,
                remaining: range.len() - offset,
            });
        }
        counters.add_input(range.len());
    }

    if !done {
        return Err(CompressionError::TruncatedStream { codec: codec.into() });
    }

    if !block.is_empty() {
        counters.add_block(block.written());
        txn.push(block.freeze());
    }

    if driver.direction() == Direction::Compress && txn.appended_len() >= input.len() {
        return Err(CompressionError::NoGain { input: input.len(), output: txn.appended_len() });
    }

    trace!(
        "{} {:?}: {} bytes in {} chunks -> {} bytes in {} blocks",
        codec,
        driver.direction(),
        counters.bytes_in,
        counters.chunks_in,
        counters.bytes_out,
        counters.blocks_out
    );

    txn.commit();
    Ok(counters)
}

/// A block too small to hold a codec flush would fill on every call and
/// never let the range complete.
fn next_block<A: BlockAllocator + ?Sized>(blocks: &A) -> Result<OutputBlock, CompressionError> {
    let block = blocks.allocate();
    check_block_size(block.capacity())?;
    Ok(block)
}
