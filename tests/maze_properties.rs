/// Fuzzes the generator by checking for many seeded mazes of different sizes that the corridor
/// cells form a single tree and that the outer frame is solid.
use grid_util::Point;
use maze_pathfinding::{generator, CellKind, Grid, Maze};
use rand::prelude::*;
use std::collections::VecDeque;

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn random_grid(rows: usize, cols: usize, rng: &mut StdRng) -> Grid {
    let borders = generator::generate(rows, cols, rng);
    assert_eq!(borders.passages(), rows * cols - 1);
    let (height, width) = borders.grid_size();
    let mut grid = Grid::new(height, width);
    borders.apply_to(&mut grid).unwrap();
    grid
}

fn open(grid: &Grid, point: Point) -> bool {
    grid.get(point).map_or(false, |cell| !cell.is_wall())
}

fn flood_fill(grid: &Grid, from: Point) -> usize {
    let mut seen = vec![false; grid.width() * grid.height()];
    let mut queue = VecDeque::from([from]);
    seen[grid.get_ix_point(&from)] = true;
    let mut count = 0;
    while let Some(point) = queue.pop_front() {
        count += 1;
        for (dx, dy) in ORTHOGONAL {
            let next = Point::new(point.x + dx, point.y + dy);
            if open(grid, next) && !seen[grid.get_ix_point(&next)] {
                seen[grid.get_ix_point(&next)] = true;
                queue.push_back(next);
            }
        }
    }
    count
}

fn visualize_grid(grid: &Grid) {
    println!("{grid}");
}

#[test]
fn corridors_are_connected() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..500 {
        let rows = rng.gen_range(1..12);
        let cols = rng.gen_range(1..12);
        let grid = random_grid(rows, cols, &mut rng);
        let reached = flood_fill(&grid, Point::new(1, 1));
        if reached != grid.corridor_count() {
            visualize_grid(&grid);
        }
        assert_eq!(reached, grid.corridor_count());
    }
}

#[test]
fn corridors_form_a_spanning_tree() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..500 {
        let rows = rng.gen_range(1..12);
        let cols = rng.gen_range(1..12);
        let grid = random_grid(rows, cols, &mut rng);
        let edges = grid
            .points()
            .filter(|p| open(&grid, *p))
            .map(|p| {
                [Point::new(p.x + 1, p.y), Point::new(p.x, p.y + 1)]
                    .into_iter()
                    .filter(|n| open(&grid, *n))
                    .count()
            })
            .sum::<usize>();
        if edges + 1 != grid.corridor_count() {
            visualize_grid(&grid);
        }
        assert_eq!(edges + 1, grid.corridor_count());
        assert_eq!(grid.corridor_count(), 2 * rows * cols - 1);
    }
}

#[test]
fn frame_is_always_wall() {
    let mut rng = StdRng::seed_from_u64(2);
    for rows in 1..10 {
        for cols in 1..10 {
            let grid = random_grid(rows, cols, &mut rng);
            let (w, h) = (grid.width() as i32, grid.height() as i32);
            for point in grid.points() {
                if point.x == 0 || point.y == 0 || point.x == w - 1 || point.y == h - 1 {
                    assert_eq!(grid.kind(point).unwrap(), CellKind::Wall);
                }
            }
        }
    }
}

#[test]
fn goal_is_reachable_in_every_maze() {
    for seed in 0..200 {
        let (height, width) = (5 + seed as usize % 13, 5 + seed as usize % 7);
        let mut maze = Maze::with_seed(height, width, seed).unwrap();
        if !maze.goal_reachable() {
            visualize_grid(maze.grid());
        }
        assert!(maze.goal_reachable());
        maze.rebuild().unwrap();
        assert!(maze.goal_reachable());
    }
}
