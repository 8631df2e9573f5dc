//! buffer/message.rs
//! Ordered sequence of shared byte chunks with a cached total length.
//!
//! Summary: the engine reads input messages and only appends to output messages.
//! Appends made during one transform go through a `MessageTxn`, which truncates
//! the message back to its watermark unless committed.

use bytes::{Bytes, BytesMut};

/// A logical byte message split into immutable, reference-counted chunks.
///
/// Invariant: `len` always equals the sum of the chunk lengths.
#[derive(Clone, Debug, Default)]
pub struct ChunkedMessage {
    chunks: Vec<Bytes>,
    len: usize,
}

/// Position in a message to roll back to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Watermark {
    pub chunk_count: usize,
    pub len: usize,
}

impl ChunkedMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chunks<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let mut msg = Self::new();
        for chunk in chunks {
            msg.push(chunk.into());
        }
        msg
    }

    /// Append a chunk. Zero-length chunks are kept in place.
    pub fn push(&mut self, chunk: Bytes) {
        self.len += chunk.len();
        self.chunks.push(chunk);
    }

    /// Total byte length across all chunks.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &[Bytes] {
        &self.chunks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bytes> {
        self.chunks.iter()
    }

    /// Concatenate every chunk into one contiguous buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for chunk in &self.chunks {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Same as `to_vec` but yields a single shared chunk.
    pub fn to_bytes(&self) -> Bytes {
        match self.chunks.as_slice() {
            [] => Bytes::new(),
            [only] => only.clone(),
            many => {
                let mut buf = BytesMut::with_capacity(self.len);
                for chunk in many {
                    buf.extend_from_slice(chunk);
                }
                buf.freeze()
            }
        }
    }

    /// Byte equality, ignoring where chunk boundaries fall.
    pub fn content_eq(&self, other: &ChunkedMessage) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut lhs = self.chunks.iter().flat_map(|c| c.iter());
        let mut rhs = other.chunks.iter().flat_map(|c| c.iter());
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a == b => continue,
                _ => return false,
            }
        }
    }

    pub fn watermark(&self) -> Watermark {
        Watermark { chunk_count: self.chunks.len(), len: self.len }
    }

    /// Release every chunk appended after `mark` and restore the cached length.
    pub fn rollback_to(&mut self, mark: Watermark) {
        debug_assert!(mark.chunk_count <= self.chunks.len());
        self.chunks.truncate(mark.chunk_count);
        self.len = mark.len;
        debug_assert_eq!(self.len, self.chunks.iter().map(Bytes::len).sum::<usize>());
    }

    /// Start appending under a rollback guard.
    pub fn begin(&mut self) -> MessageTxn<'_> {
        let mark = self.watermark();
        MessageTxn { msg: self, mark, committed: false }
    }
}

impl<'a> IntoIterator for &'a ChunkedMessage {
    type Item = &'a Bytes;
    type IntoIter = std::slice::Iter<'a, Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

impl From<Bytes> for ChunkedMessage {
    fn from(chunk: Bytes) -> Self {
        let mut msg = Self::new();
        msg.push(chunk);
        msg
    }
}

impl From<Vec<u8>> for ChunkedMessage {
    fn from(data: Vec<u8>) -> Self {
        Bytes::from(data).into()
    }
}

impl From<&'static [u8]> for ChunkedMessage {
    fn from(data: &'static [u8]) -> Self {
        Bytes::from_static(data).into()
    }
}

/// Append guard over a message.
///
/// Dropping it without `commit` rolls the message back to where it stood
/// when the guard was created, releasing every chunk pushed through it.
pub struct MessageTxn<'a> {
    msg: &'a mut ChunkedMessage,
    mark: Watermark,
    committed: bool,
}

impl MessageTxn<'_> {
    pub fn push(&mut self, chunk: Bytes) {
        self.msg.push(chunk);
    }

    /// Bytes appended since the guard was opened.
    pub fn appended_len(&self) -> usize {
        self.msg.len - self.mark.len
    }

    pub fn appended_chunks(&self) -> usize {
        self.msg.chunks.len() - self.mark.chunk_count
    }

    pub fn watermark(&self) -> Watermark {
        self.mark
    }

    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for MessageTxn<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.msg.rollback_to(self.mark);
        }
    }
}
