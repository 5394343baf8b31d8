use criterion::{criterion_group, criterion_main, Criterion};
use maze_pathfinding::{generator, Maze, Phase};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn generation_bench(c: &mut Criterion) {
    for size in [16, 64, 256] {
        let mut rng = StdRng::seed_from_u64(0);
        c.bench_function(format!("eller {size}x{size}").as_str(), |b| {
            b.iter(|| black_box(generator::generate(size, size, &mut rng)))
        });
    }
}

fn solve_bench(c: &mut Criterion) {
    for size in [21, 61] {
        let mut maze = Maze::with_seed(size, size, 0).unwrap();
        c.bench_function(format!("solve {size}x{size}").as_str(), |b| {
            b.iter(|| {
                maze.reset_search();
                maze.toggle_solving();
                while !matches!(
                    maze.advance().unwrap(),
                    Phase::Colorized | Phase::NoPath
                ) {}
                black_box(maze.path().len())
            })
        });
    }
}

criterion_group!(benches, generation_bench, solve_bench);
criterion_main!(benches);
