use maze_pathfinding::{Maze, Phase};
use std::{thread, time::Duration};

// Drives a maze the way a render loop would: one tick per frame, redrawing the grid each
// time, until the path has been found and painted.
//
// - # marks a wall, S the start and G the goal
// - + marks discovered cells, @ the cell being expanded and x dead ends
// - o marks cells confirmed while backtracking and * the finished path

fn main() {
    let mut maze = Maze::with_seed(15, 31, 7).unwrap();
    println!("{}", maze);
    if !maze.goal_reachable() {
        println!("Goal is unreachable");
        return;
    }
    maze.toggle_solving();
    let mut ticks = 0;
    loop {
        let phase = maze.advance().unwrap();
        ticks += 1;
        print!("\x1B[2J\x1B[H{}", maze);
        println!("tick {ticks}: {phase:?}");
        if matches!(phase, Phase::Colorized | Phase::NoPath) {
            break;
        }
        thread::sleep(Duration::from_millis(30));
    }
    println!("Path:");
    for p in maze.path() {
        println!("{:?}", p);
    }
}
