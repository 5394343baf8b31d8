use grid_util::Point;
use maze_pathfinding::{Maze, Phase, SearchConfig};
use rand::{rngs::StdRng, SeedableRng};

// Walls drawn by hand on an open field, searched without diagonal moves:
//  _______
// |       |
// |   #   |
// |S  #  G|
// |   #   |
// |       |
//  _______

fn main() {
    let config = SearchConfig {
        allow_diagonal: false,
        ..SearchConfig::default()
    };
    let mut maze = Maze::with_config(5, 7, config, StdRng::seed_from_u64(0)).unwrap();
    maze.rebuild_open().unwrap();
    maze.toggle_edit_mode();
    for y in 1..=3 {
        maze.primary_action(Point::new(3, y)).unwrap();
    }
    maze.toggle_solving();
    while !matches!(maze.advance().unwrap(), Phase::Colorized | Phase::NoPath) {}
    println!("{}", maze);
    println!("Path cost: {:?}", maze.pathfinder().terminal().map(|n| n.cost));
}
