//! Mutation and query costs on live archives.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use moarchive::sample::{draw_uniform_box, ReplayToken};
use moarchive::{build_archive_with, ArchiveCfg, MoArchive, PrecisionCache, PrecisionPair};

fn float_archive(n_obj: usize, n_points: usize, seed: u64) -> MoArchive {
    let cache = PrecisionCache::new();
    cache.set(PrecisionPair::float()).unwrap();
    let rows = draw_uniform_box(n_obj, n_points, 1.0, ReplayToken::new(seed, 0));
    build_archive_with(
        &cache,
        ArchiveCfg {
            f_vals: Some(rows),
            reference_point: Some(vec![1.0; n_obj]),
            ..ArchiveCfg::default()
        },
    )
    .unwrap()
    .0
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    for n_obj in [2usize, 3, 4] {
        let archive = float_archive(n_obj, 512, 3);
        let fresh = draw_uniform_box(n_obj, 64, 1.0, ReplayToken::new(4, n_obj as u64));
        group.bench_function(format!("{n_obj}obj"), |b| {
            b.iter_batched(
                || (archive.clone(), fresh.clone()),
                |(mut archive, fresh)| {
                    for row in &fresh {
                        archive.add(row, None);
                    }
                    black_box(archive.len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_improvement(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypervolume_improvement");
    for n_obj in [2usize, 3, 4] {
        let archive = float_archive(n_obj, 512, 5);
        let probe = vec![0.05; n_obj];
        group.bench_function(format!("{n_obj}obj"), |b| {
            b.iter(|| black_box(archive.hypervolume_improvement(black_box(&probe))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_improvement);
criterion_main!(benches);
