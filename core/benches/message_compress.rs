//! Criterion benchmarks for whole-message compress / decompress.
//!
//! Run with:
//!   cargo bench --bench message_compress

use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use message_compress::buffer::ChunkedMessage;
use message_compress::compression::{CodecOptions, CompressionAlgorithm, Engine};

const CHUNK: usize = 16 * 1024;

fn corpus(size: usize) -> Vec<u8> {
    let words = ["stream ", "message ", "block ", "frame ", "zstd ", "deflate ", "gzip ", "chunk\n"];
    let mut out = Vec::with_capacity(size);
    let mut i = 0usize;
    while out.len() < size {
        out.extend_from_slice(words[(i * 7 + i / 3) % words.len()].as_bytes());
        i += 1;
    }
    out.truncate(size);
    out
}

fn chunked(data: &[u8]) -> ChunkedMessage {
    ChunkedMessage::from_chunks(data.chunks(CHUNK).map(Bytes::copy_from_slice))
}

fn bench_message_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_compress");
    let engine = Engine::new(CodecOptions { block_size: 8 * 1024, ..CodecOptions::default() })
        .expect("default options are valid");

    for &size in &[4 * 1024usize, 256 * 1024] {
        let input = chunked(&corpus(size));
        group.throughput(Throughput::Bytes(size as u64));

        for alg in [CompressionAlgorithm::Deflate, CompressionAlgorithm::Gzip, CompressionAlgorithm::Zstd] {
            group.bench_with_input(BenchmarkId::new(format!("compress_{alg}"), size), &input, |b, input| {
                b.iter(|| {
                    let mut out = ChunkedMessage::new();
                    engine.try_compress(alg, input, &mut out).unwrap();
                    out
                })
            });

            let mut compressed = ChunkedMessage::new();
            engine.try_compress(alg, &input, &mut compressed).unwrap();

            // Throughput is in decompressed bytes.
            group.bench_with_input(
                BenchmarkId::new(format!("decompress_{alg}"), size),
                &compressed,
                |b, compressed| {
                    b.iter(|| {
                        let mut out = ChunkedMessage::new();
                        engine.try_decompress(alg, compressed, &mut out).unwrap();
                        out
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_message_compress);
criterion_main!(benches);
