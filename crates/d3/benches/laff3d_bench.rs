//! Benchmarks for volumetric packing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use u_packing_core::geometry::Stackable;
use u_packing_d3::{Container, LaffPacker, LevelPacker};

fn packer_benchmark(c: &mut Criterion) {
    let uniform: Vec<Arc<Stackable>> = (0..20)
        .map(|i| Arc::new(Stackable::rotatable(format!("B{}", i), 10, 10, 10, 1).unwrap()))
        .collect();
    let mixed: Vec<Arc<Stackable>> = (0..40)
        .map(|i| {
            Arc::new(Stackable::rotatable(format!("M{}", i), 2 + i % 5, 3 + i % 4, 1 + i % 3, 1).unwrap())
        })
        .collect();

    let large = Container::new("L", 100, 100, 100, 0, 1000).unwrap();
    let small = Container::new("S", 20, 20, 20, 0, 1000).unwrap();
    let packer = LaffPacker::default();

    c.bench_function("laff_20_uniform_boxes", |b| {
        b.iter(|| {
            let result = packer.pack(black_box(&uniform), black_box(&large), &|| false);
            black_box(result)
        })
    });

    c.bench_function("laff_40_mixed_boxes", |b| {
        b.iter(|| {
            let result = packer.pack(black_box(&mixed), black_box(&small), &|| false);
            black_box(result)
        })
    });
}

criterion_group!(benches, packer_benchmark);
criterion_main!(benches);
