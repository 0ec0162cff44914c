use criterion::{Criterion, criterion_group, criterion_main};
use pursuit_core::*;
use std::hint::black_box;

const ESCAPE_TIERS: [(&str, i32, u8); 3] = [("small", 3, 2), ("default", 4, 3), ("large", 12, 16)];
const HUNT_TIERS: [(&str, i32); 3] = [("small", 5), ("default", 7), ("large", 32)];

fn bench_escape_layouts(c: &mut Criterion) {
    for (name, radius, chasers) in ESCAPE_TIERS {
        let config = EscapeConfig::new(radius, chasers, 3);
        c.bench_function(&format!("generate/escape/{name}"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                black_box(RandomEscapeGenerator::new(seed).generate(&config))
            })
        });
    }
}

fn bench_hunt_layouts(c: &mut Criterion) {
    for (name, size) in HUNT_TIERS {
        let config = HuntConfig::new(size, Adjacency::Eight);
        c.bench_function(&format!("generate/hunt/{name}"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                black_box(RandomHuntGenerator::new(seed).generate(&config))
            })
        });
    }
}

criterion_group!(gen_tiers, bench_escape_layouts, bench_hunt_layouts);
criterion_main!(gen_tiers);
