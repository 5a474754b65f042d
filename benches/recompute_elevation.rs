//! Measure recalculating the elevations of a chunk after its heightmap changed
//!

use bevy_chunk_nav_graph::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let mut graph = HierarchicalGraph::new_tiled(DEFAULT_CHUNK_SIZE, 3, 3).unwrap();
	let mut rng = StdRng::seed_from_u64(7);
	let samples = DEFAULT_CHUNK_SIZE as usize + 1;
	let heightmap = Heightmap::from_fn(samples, samples, |_, _| rng.random_range(-2.0..2.0));
	let centre = ChunkOrigin::new(DEFAULT_CHUNK_SIZE as i32, DEFAULT_CHUNK_SIZE as i32);
	group.bench_function("recompute_elevation", |b| {
		b.iter(|| {
			graph
				.recompute_chunk(black_box(centre), black_box(&heightmap))
				.unwrap()
		})
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
