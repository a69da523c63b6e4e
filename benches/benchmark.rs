use criterion::{criterion_group, criterion_main, Criterion};

use aoc2022::heightmap::{HikingArea, LOWEST};
use aoc2022::{default_input, ALL_SOLUTIONS};

pub fn criterion_benchmark(c: &mut Criterion) {
    for (i, day) in ALL_SOLUTIONS.iter().enumerate() {
        let Ok(input) = default_input(i + 1) else {
            continue;
        };
        c.bench_function(&format!("day{}", i + 1), |b| b.iter(|| day(&input)));
    }
}

/// Both ways of finding the fewest steps from any lowest cell.
pub fn hike_sweep_benchmark(c: &mut Criterion) {
    let Ok(area) = default_input(12).and_then(|input| input.parse::<HikingArea>()) else {
        return;
    };
    c.bench_function("day12_forward_sweep", |b| {
        b.iter(|| area.map.fewest_steps_from_any(LOWEST, area.goal))
    });
    c.bench_function("day12_backward_search", |b| {
        b.iter(|| area.map.distances_to(area.goal).fewest_from_elevation(LOWEST))
    });
}

criterion_group!(benches, criterion_benchmark, hike_sweep_benchmark);
criterion_main!(benches);
