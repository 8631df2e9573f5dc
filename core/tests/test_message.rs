#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use message_compress::buffer::{BlockAllocator, ChunkedMessage, HeapBlocks, OutputBlock};
    use message_compress::compression::codecs::identity;

    fn two_chunks() -> ChunkedMessage {
        ChunkedMessage::from_chunks(["Hello, ", "World!"])
    }

    // --- ChunkedMessage ---

    #[test]
    fn cached_length_tracks_pushes() {
        let mut msg = ChunkedMessage::new();
        assert!(msg.is_empty());
        msg.push(Bytes::from_static(b"abc"));
        msg.push(Bytes::new());
        msg.push(Bytes::from_static(b"de"));
        assert_eq!(msg.len(), 5);
        assert_eq!(msg.chunk_count(), 3, "zero-length chunks are kept");
        assert_eq!(msg.to_vec(), b"abcde");
        assert_eq!(&msg.to_bytes()[..], b"abcde");
    }

    #[test]
    fn content_eq_ignores_chunk_boundaries() {
        let a = ChunkedMessage::from_chunks(["Hel", "lo, World!"]);
        let b = two_chunks();
        assert!(a.content_eq(&b));
        assert!(!a.content_eq(&ChunkedMessage::from_chunks(["Hello, World?"])));
        assert!(!a.content_eq(&ChunkedMessage::from_chunks(["Hello"])));
    }

    #[test]
    fn rollback_to_watermark_restores_count_and_length() {
        let mut msg = two_chunks();
        let mark = msg.watermark();
        msg.push(Bytes::from_static(b"extra"));
        msg.push(Bytes::from_static(b"more"));
        msg.rollback_to(mark);
        assert_eq!(msg.watermark(), mark);
        assert_eq!(msg.to_vec(), b"Hello, World!");
    }

    #[test]
    fn uncommitted_txn_rolls_back_on_drop() {
        let mut msg = two_chunks();
        {
            let mut txn = msg.begin();
            txn.push(Bytes::from_static(b"discarded"));
            assert_eq!(txn.appended_len(), 9);
            assert_eq!(txn.appended_chunks(), 1);
        }
        assert_eq!(msg.chunk_count(), 2);
        assert_eq!(msg.len(), 13);
    }

    #[test]
    fn committed_txn_keeps_appends() {
        let mut msg = two_chunks();
        let mut txn = msg.begin();
        txn.push(Bytes::from_static(b" Bye."));
        txn.commit();
        assert_eq!(msg.to_vec(), b"Hello, World! Bye.");
    }

    // --- Identity copy ---

    #[test]
    fn identity_copy_shares_chunks_in_order() {
        let input = two_chunks();
        let mut output = ChunkedMessage::from_chunks(["prefix:"]);
        identity::copy(&input, &mut output);

        assert_eq!(output.chunk_count(), 3);
        assert_eq!(output.to_vec(), b"prefix:Hello, World!");
        // Same backing memory, no byte copy.
        assert_eq!(output.chunks()[1].as_ptr(), input.chunks()[0].as_ptr());
        assert_eq!(output.chunks()[2].as_ptr(), input.chunks()[1].as_ptr());
    }

    #[test]
    fn identity_copy_of_empty_message_is_noop() {
        let mut output = two_chunks();
        identity::copy(&ChunkedMessage::new(), &mut output);
        assert_eq!(output.chunk_count(), 2);
    }

    // --- Output blocks ---

    #[test]
    fn block_freezes_to_written_length() {
        let mut block = OutputBlock::with_capacity(8);
        block.spare_mut()[..3].copy_from_slice(b"xyz");
        block.advance(3);
        assert!(!block.is_full());
        assert_eq!(block.spare_mut().len(), 5);
        assert_eq!(&block.freeze()[..], b"xyz");
    }

    #[test]
    #[should_panic]
    fn block_refuses_to_advance_past_capacity() {
        let mut block = OutputBlock::with_capacity(4);
        block.advance(5);
    }

    #[test]
    fn heap_blocks_use_configured_size() {
        let blocks = HeapBlocks::new(16).unwrap();
        let block = blocks.allocate();
        assert_eq!(block.capacity(), 16);
        assert!(block.is_empty());
        assert_eq!(HeapBlocks::default().block_size(), 1024);
    }
}
