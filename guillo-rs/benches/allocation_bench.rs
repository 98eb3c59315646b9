use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use guillo_rs::allocation::Allocator;
use guillo_rs::cut_tree;
use guillo_rs::entities::Piece;
use guillo_rs::oracle::MaxRectsOracle;
use guillo_rs::util::CutConfig;
use itertools::Itertools;
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};

criterion_main!(benches);
criterion_group!(benches, allocation_bench, cut_tree_bench);

const N_PIECES: [usize; 3] = [50, 200, 800];
const BIN_WIDTH: u32 = 3000;
const BIN_HEIGHT: u32 = 2000;

fn generate_pieces(n: usize) -> Vec<Piece> {
    let mut rng = SmallRng::seed_from_u64(0);
    (0..n as u64)
        .map(|id| Piece::new(id, rng.random_range(50..=900), rng.random_range(50..=600)))
        .collect_vec()
}

/// Full allocation pipeline (initial packing, consolidation and waste redistribution)
fn allocation_bench(c: &mut Criterion) {
    let oracle = MaxRectsOracle::default();
    let allocator = Allocator::new(&oracle, CutConfig::default());

    let mut group = c.benchmark_group("allocation");
    group.sample_size(10);
    for n in N_PIECES {
        let pieces = generate_pieces(n);
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                allocator
                    .allocate(pieces.clone(), BIN_WIDTH, BIN_HEIGHT)
                    .expect("allocation failed")
            })
        });
    }
    group.finish();
}

fn cut_tree_bench(c: &mut Criterion) {
    let oracle = MaxRectsOracle::default();
    let allocation = Allocator::new(&oracle, CutConfig::default())
        .allocate(generate_pieces(800), BIN_WIDTH, BIN_HEIGHT)
        .expect("allocation failed");

    c.bench_function("cut_tree", |b| {
        b.iter(|| {
            allocation
                .containers
                .iter()
                .map(|c| cut_tree::plan_cuts(&c.rectangles, c.width, c.height).cuts.len())
                .sum::<usize>()
        })
    });
}
