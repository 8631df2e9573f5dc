//! codecs/identity.rs
//! Pass-through: shares every input chunk into the output, no bytes copied.

use crate::buffer::ChunkedMessage;

/// Append a reference-sharing duplicate of `input` to `output`. Never fails.
pub fn copy(input: &ChunkedMessage, output: &mut ChunkedMessage) {
    for chunk in input {
        output.push(chunk.clone());
    }
}
