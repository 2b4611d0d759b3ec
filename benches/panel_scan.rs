use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use haplokit::{Genotype, Haplotype, HaplotypeLibrary};

const N_LOCI: usize = 2048;

fn synthetic_panel(n_entries: usize) -> HaplotypeLibrary {
    let mut library = HaplotypeLibrary::new(N_LOCI);
    for e in 0..n_entries {
        let codes: Vec<u8> = (0..N_LOCI)
            .map(|i| {
                // deterministic mix of calls with sparse missing
                if (i * 7 + e * 13) % 97 == 0 {
                    9
                } else {
                    (((i * 31 + e * 17) >> 3) & 1) as u8
                }
            })
            .collect();
        library
            .add(Haplotype::from_codes(&codes).expect("valid synthetic codes"))
            .expect("uniform length");
    }
    library
}

fn synthetic_genotype() -> Genotype {
    let codes: Vec<u8> = (0..N_LOCI)
        .map(|i| if i % 89 == 0 { 9 } else { (i % 3) as u8 })
        .collect();
    Genotype::from_codes(&codes).expect("valid synthetic codes")
}

/// Benchmark panel-wide compatibility scans at different panel sizes
fn bench_compatibility_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("compatibility_scan");
    let genotype = synthetic_genotype();

    for n_entries in [64, 256, 1024] {
        let library = synthetic_panel(n_entries);
        group.throughput(Throughput::Elements(n_entries as u64));

        group.bench_with_input(
            BenchmarkId::new("entries", n_entries),
            &library,
            |b, library| {
                b.iter(|| {
                    let hits = library.compatible_with(black_box(&genotype)).unwrap();
                    black_box(hits)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark nearest-neighbor ranking at different panel sizes
fn bench_nearest_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_scan");
    let probe = {
        let codes: Vec<u8> = (0..N_LOCI).map(|i| ((i >> 2) & 1) as u8).collect();
        Haplotype::from_codes(&codes).expect("valid synthetic codes")
    };

    for n_entries in [64, 256, 1024] {
        let library = synthetic_panel(n_entries);
        group.throughput(Throughput::Elements(n_entries as u64));

        group.bench_with_input(
            BenchmarkId::new("entries", n_entries),
            &library,
            |b, library| {
                b.iter(|| {
                    let ranked = library.nearest_to(black_box(&probe), 8).unwrap();
                    black_box(ranked)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark a single pairwise comparison (the per-entry kernel cost)
fn bench_pairwise_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_compare");
    group.throughput(Throughput::Elements(N_LOCI as u64));

    let library = synthetic_panel(2);
    let a = library.get(haplokit::HapIdx::new(0)).unwrap();
    let b = library.get(haplokit::HapIdx::new(1)).unwrap();

    group.bench_function("hap_vs_hap", |bench| {
        bench.iter(|| {
            let summary = haplokit::compare_haplotypes(black_box(a), black_box(b)).unwrap();
            black_box(summary)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compatibility_scan,
    bench_nearest_scan,
    bench_pairwise_compare
);
criterion_main!(benches);
