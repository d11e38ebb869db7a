//! Criterion benchmarks for the DAN3 codec.
//!
//! Run with:
//!   cargo bench --bench codec
//!
//! Optionally set DAN3_CORPUS_DIR to a directory of corpus files so the
//! benchmarks run against real payloads instead of synthetic tiles.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dan3::{compress, decompress, CompressOptions};

mod corpus {
    include!("corpus.rs");
}

fn bench_compress_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    // The optimal parse is deliberately expensive; keep samples small.
    group.sample_size(10);

    for &chunk_size in &[4_096usize, 16_384] {
        let chunks = corpus::corpus_chunks(chunk_size);
        let chunk = chunks[0].clone();

        // ── full optimal parse ──────────────────────────────────────────────
        {
            let opts = CompressOptions::default();
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(BenchmarkId::new("compress_slow", chunk_size), &chunk, |b, chunk| {
                b.iter(|| compress(chunk, &opts).unwrap())
            });
        }

        // ── fast parse ──────────────────────────────────────────────────────
        {
            let opts = CompressOptions { fast: true, ..CompressOptions::default() };
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(BenchmarkId::new("compress_fast", chunk_size), &chunk, |b, chunk| {
                b.iter(|| compress(chunk, &opts).unwrap())
            });
        }

        // ── narrow window (single regime) ───────────────────────────────────
        {
            let opts = CompressOptions { max_offset_bits: 9, ..CompressOptions::default() };
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(BenchmarkId::new("compress_b9", chunk_size), &chunk, |b, chunk| {
                b.iter(|| compress(chunk, &opts).unwrap())
            });
        }

        // ── decompress — pre-compress the chunk once, then benchmark ────────
        {
            let compressed = compress(&chunk, &CompressOptions::default()).unwrap();
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new("decompress", chunk_size),
                &compressed,
                |b, compressed| b.iter(|| decompress(compressed).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_compress_decompress);
criterion_main!(benches);
