//! Performance Benchmarks for Note Graph Construction
//!
//! Measures the similarity matrix pass, MMR selection and the full pipeline
//! across note counts typical of a personal vault.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use notegraph::mmr_selector::MmrSelector;
use notegraph::{build_graph, build_graph_from_matrix, EmbeddedNote, GraphBuilder, GraphConfig, SimilarityMatrix};

/// Generate deterministic test vectors for benchmarking
fn generate_benchmark_vector(seed: u32, dim: usize) -> Vec<f32> {
    let mut vector = Vec::with_capacity(dim);
    let mut x = seed as f32;

    for i in 0..dim {
        x = ((x * 9301.0 + 49297.0 + i as f32) % 233280.0) / 233280.0; // Simple LCG
        vector.push(x - 0.5); // Center around 0
    }

    vector
}

/// Generate a benchmark note set with the given size and embedding dimension
fn generate_benchmark_notes(size: usize, dim: usize) -> Vec<EmbeddedNote> {
    (0..size)
        .map(|i| {
            EmbeddedNote::new(
                format!("note-{:06}", i),
                format!("Benchmark note {}", i),
                format!("This is benchmark content for note {}", i),
            )
            .with_embedding(generate_benchmark_vector((i + 1) as u32, dim))
        })
        .collect()
}

/// Benchmark the pairwise similarity matrix
fn bench_similarity_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_matrix");
    let vector_dim = 384;

    for size in [50, 100, 200, 400] {
        let notes = generate_benchmark_notes(size, vector_dim);

        group.throughput(Throughput::Elements((size * (size - 1) / 2) as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &size, |b, _| {
            b.iter(|| black_box(SimilarityMatrix::build(black_box(&notes))))
        });
    }

    group.finish();
}

/// Benchmark MMR selection against a precomputed matrix
fn bench_mmr_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("mmr_selection");

    for size in [50, 100, 200, 400] {
        let notes = generate_benchmark_notes(size, 384);
        let matrix = SimilarityMatrix::build(&notes);

        for k in [1, 4, 10] {
            let selector = MmrSelector::new(0.7, k);
            group.bench_with_input(BenchmarkId::new(format!("k{}", k), size), &size, |b, _| {
                b.iter(|| black_box(selector.select_edges(black_box(&matrix))))
            });
        }
    }

    group.finish();
}

/// Benchmark the full pipeline versus parameter-only rebuilds
fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");
    group.sample_size(30);

    for size in [100, 300] {
        let notes = generate_benchmark_notes(size, 384);

        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| black_box(build_graph(black_box(&notes), 0.2, 4)))
        });

        let matrix = SimilarityMatrix::build(&notes);
        let config = GraphConfig::default();
        group.bench_with_input(BenchmarkId::new("from_matrix", size), &size, |b, _| {
            b.iter(|| black_box(build_graph_from_matrix(black_box(&notes), &matrix, &config)))
        });

        let mut builder = GraphBuilder::default();
        group.bench_with_input(BenchmarkId::new("cached_builder", size), &size, |b, _| {
            b.iter(|| black_box(builder.build(black_box(&notes))))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_similarity_matrix,
    bench_mmr_selection,
    bench_graph_build
);

criterion_main!(benches);
