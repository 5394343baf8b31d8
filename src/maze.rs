use crate::cell::CellKind;
use crate::error::{MazeError, Result};
use crate::generator;
use crate::grid::Grid;
use crate::search::{Pathfinder, Phase, SearchConfig};
use core::fmt;
use grid_util::Point;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides what the two pointer actions of the presentation layer do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditMode {
    /// Primary action moves the start, secondary action moves the goal.
    #[default]
    Endpoints,
    /// Primary action raises a wall, secondary action carves it away.
    Walls,
}

/// [Maze] owns the [Grid] and the [Pathfinder] searching it, and is the only way to edit
/// either. Every edit discards the running search.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: Grid,
    pathfinder: Pathfinder,
    rng: StdRng,
    start: Point,
    goal: Point,
    solving: bool,
    edit_mode: EditMode,
    last_edited: Option<Point>,
}

fn force_odd(n: usize) -> usize {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

/// Picks two distinct open cells, trying the middle of the left and right edges first.
fn place_endpoints<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> (Point, Point) {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut start = Point::new(0, h / 2);
    let mut goal = Point::new(w - 1, h / 2);
    while !grid.can_move_to_simple(start) || !grid.can_move_to_simple(goal) || start == goal {
        start = Point::new(rng.gen_range(0..w), rng.gen_range(0..h));
        goal = Point::new(rng.gen_range(0..w), rng.gen_range(0..h));
    }
    (start, goal)
}

fn layout<R: Rng + ?Sized>(
    height: usize,
    width: usize,
    walls: bool,
    rng: &mut R,
) -> Result<(Grid, Point, Point)> {
    let mut grid = Grid::new(height, width);
    if walls {
        generator::generate(height / 2, width / 2, rng).apply_to(&mut grid)?;
    }
    let (start, goal) = place_endpoints(&grid, rng);
    grid.set_kind(start, CellKind::Start)?;
    grid.set_kind(goal, CellKind::Goal)?;
    Ok((grid, start, goal))
}

impl Maze {
    /// Generates a `height x width` maze seeded from system entropy. Even dimensions are
    /// bumped to the next odd number.
    pub fn new(height: usize, width: usize) -> Result<Maze> {
        Maze::with_config(height, width, SearchConfig::default(), StdRng::from_entropy())
    }
    /// Same as [new](Self::new), but reproducible.
    pub fn with_seed(height: usize, width: usize, seed: u64) -> Result<Maze> {
        Maze::with_config(
            height,
            width,
            SearchConfig::default(),
            StdRng::seed_from_u64(seed),
        )
    }
    pub fn with_config(
        height: usize,
        width: usize,
        config: SearchConfig,
        mut rng: StdRng,
    ) -> Result<Maze> {
        let (height, width) = (force_odd(height), force_odd(width));
        let lattice = (height / 2).checked_mul(width / 2);
        if lattice.map_or(true, |cells| cells < 2) || height.checked_mul(width).is_none() {
            return Err(MazeError::InvalidDimensions { height, width });
        }
        let (grid, start, goal) = layout(height, width, true, &mut rng)?;
        info!("Built a {height}x{width} maze, start {start:?}, goal {goal:?}");
        Ok(Maze {
            grid,
            pathfinder: Pathfinder::new(start, goal, config),
            rng,
            start,
            goal,
            solving: false,
            edit_mode: EditMode::default(),
            last_edited: None,
        })
    }

    /// Generates a fresh maze of the same size and new endpoints.
    pub fn rebuild(&mut self) -> Result<()> {
        self.build(true)
    }
    /// Replaces the maze with an open field without any walls.
    pub fn rebuild_open(&mut self) -> Result<()> {
        self.build(false)
    }
    fn build(&mut self, walls: bool) -> Result<()> {
        let (grid, start, goal) = layout(self.height(), self.width(), walls, &mut self.rng)?;
        self.grid = grid;
        self.start = start;
        self.goal = goal;
        self.solving = false;
        self.last_edited = None;
        self.pathfinder.reset(start, goal);
        info!(
            "Rebuilt {}x{} {}, start {start:?}, goal {goal:?}",
            self.height(),
            self.width(),
            if walls { "maze" } else { "open field" }
        );
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }
    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn goal(&self) -> Point {
        self.goal
    }
    pub fn phase(&self) -> Phase {
        self.pathfinder.phase()
    }
    pub fn path(&self) -> &[Point] {
        self.pathfinder.path()
    }
    pub fn config(&self) -> &SearchConfig {
        &self.pathfinder.config
    }
    /// Changes the movement rules. The running search is discarded.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.pathfinder.config = config;
        self.grid.components_dirty = true;
        self.reset_search();
    }

    pub fn is_solving(&self) -> bool {
        self.solving
    }
    pub fn toggle_solving(&mut self) -> bool {
        self.solving = !self.solving;
        debug!("Solving {}", if self.solving { "on" } else { "off" });
        self.solving
    }
    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }
    pub fn toggle_edit_mode(&mut self) -> EditMode {
        self.edit_mode = match self.edit_mode {
            EditMode::Endpoints => EditMode::Walls,
            EditMode::Walls => EditMode::Endpoints,
        };
        self.edit_mode
    }

    /// Advances the search by one step while solving is switched on; otherwise only reports
    /// the current phase.
    pub fn advance(&mut self) -> Result<Phase> {
        if !self.solving {
            return Ok(self.pathfinder.phase());
        }
        self.pathfinder.step(&mut self.grid)
    }

    /// Stops solving, wipes every search marker and seeds a new search.
    pub fn reset_search(&mut self) {
        self.solving = false;
        self.grid.clear_markers();
        self.pathfinder.reset(self.start, self.goal);
    }

    /// Checks whether the goal can be reached at all under the current movement rules.
    pub fn goal_reachable(&mut self) -> bool {
        self.grid.update(&self.pathfinder.config);
        self.grid.reachable(&self.start, &self.goal)
    }

    /// Forgets the last edited cell, so the next edit applies even on the same cell. Call when
    /// a new pointer stroke begins.
    pub fn begin_stroke(&mut self) {
        self.last_edited = None;
    }

    /// Opens up a cell. Returns `Ok(false)` when the cell is an endpoint or was the last one
    /// edited in the current stroke.
    pub fn carve(&mut self, point: Point) -> Result<bool> {
        self.edit(point, CellKind::Empty)
    }
    /// Turns a cell into a wall, with the same rules as [carve](Self::carve).
    pub fn wall_off(&mut self, point: Point) -> Result<bool> {
        self.edit(point, CellKind::Wall)
    }
    fn edit(&mut self, point: Point, kind: CellKind) -> Result<bool> {
        let is_endpoint = self.grid.get(point)?.is_endpoint();
        self.reset_search();
        let repeated = self.last_edited == Some(point);
        self.last_edited = Some(point);
        if repeated || is_endpoint {
            return Ok(false);
        }
        self.grid.set_kind(point, kind)?;
        Ok(true)
    }

    /// Moves the start onto `point`, replacing whatever was there. Returns `Ok(false)` when
    /// `point` already holds the start or the goal.
    pub fn move_start(&mut self, point: Point) -> Result<bool> {
        self.move_endpoint(point, CellKind::Start)
    }
    /// Moves the goal onto `point`, with the same rules as [move_start](Self::move_start).
    pub fn move_goal(&mut self, point: Point) -> Result<bool> {
        self.move_endpoint(point, CellKind::Goal)
    }
    fn move_endpoint(&mut self, point: Point, kind: CellKind) -> Result<bool> {
        self.grid.get(point)?;
        self.reset_search();
        if point == self.start || point == self.goal {
            return Ok(false);
        }
        let endpoint = if kind == CellKind::Start {
            &mut self.start
        } else {
            &mut self.goal
        };
        self.grid.set_kind(*endpoint, CellKind::Empty)?;
        self.grid.set_kind(point, kind)?;
        *endpoint = point;
        debug!("Moved {kind:?} to {point:?}");
        self.pathfinder.reset(self.start, self.goal);
        Ok(true)
    }

    /// Left-click style action: moves the start or raises a wall, depending on the
    /// [EditMode].
    pub fn primary_action(&mut self, point: Point) -> Result<bool> {
        match self.edit_mode {
            EditMode::Endpoints => self.move_start(point),
            EditMode::Walls => self.wall_off(point),
        }
    }
    /// Right-click style action: moves the goal or carves a wall away.
    pub fn secondary_action(&mut self, point: Point) -> Result<bool> {
        match self.edit_mode {
            EditMode::Endpoints => self.move_goal(point),
            EditMode::Walls => self.carve(point),
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
