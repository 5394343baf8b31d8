use crate::cell::{Cell, CellKind, CellState, Marker, Rgb};
use crate::error::{MazeError, Result};
use crate::search::SearchConfig;
use crate::{C, D, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::Point;
use itertools::iproduct;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Moore neighbourhood offsets `(dx, dy)` in row-major order. The search breaks cost ties by
/// discovery order, so this order is part of its observable behaviour.
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// [Grid] is the fixed-size matrix of [Cell]s a maze is drawn on. Besides the cells it keeps a
/// [UnionFind] over the open cells so that reachability can be answered without searching.
/// Points use `x` for the column and `y` for the row.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// Creates a `height x width` grid of empty cells.
    pub fn new(height: usize, width: usize) -> Grid {
        Grid {
            width,
            height,
            cells: vec![Cell::default(); width * height],
            components: UnionFind::new(width * height),
            components_dirty: true,
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }
    /// Index of an in-bounds point into the row-major cell storage.
    pub fn get_ix_point(&self, point: &Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }
    fn checked_ix(&self, point: Point) -> Result<usize> {
        if self.in_bounds(point) {
            Ok(self.get_ix_point(&point))
        } else {
            Err(MazeError::OutOfBounds {
                point,
                height: self.height,
                width: self.width,
            })
        }
    }
    pub fn get(&self, point: Point) -> Result<&Cell> {
        let ix = self.checked_ix(point)?;
        Ok(&self.cells[ix])
    }
    pub(crate) fn get_mut(&mut self, point: Point) -> Result<&mut Cell> {
        let ix = self.checked_ix(point)?;
        Ok(&mut self.cells[ix])
    }
    pub fn kind(&self, point: Point) -> Result<CellKind> {
        self.get(point).map(Cell::kind)
    }
    pub fn state(&self, point: Point) -> Result<CellState> {
        self.get(point).map(Cell::state)
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        iproduct!(0..self.height as i32, 0..self.width as i32).map(|(y, x)| Point::new(x, y))
    }
    pub fn cells(&self) -> impl Iterator<Item = (Point, &Cell)> {
        self.points().zip(self.cells.iter())
    }

    /// Updates the structural role of a cell. Any change flags the components as dirty.
    pub fn set_kind(&mut self, point: Point, kind: CellKind) -> Result<()> {
        self.get_mut(point)?.set_kind(kind);
        self.components_dirty = true;
        Ok(())
    }
    pub fn fill(&mut self, kind: CellKind) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::new(kind));
        self.components_dirty = true;
    }
    pub fn mark(&mut self, point: Point, marker: Marker) -> Result<()> {
        self.get_mut(point)?.mark(marker);
        Ok(())
    }
    pub fn clear_marker(&mut self, point: Point) -> Result<()> {
        self.get_mut(point)?.clear_marker();
        Ok(())
    }
    /// Removes every search marker and path colour, leaving the layout untouched.
    pub fn clear_markers(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear_marker);
    }
    /// Assigns the display colour of a cell on the finished path. Fails with
    /// [MazeError::NotCustomColored] unless the cell carries [Marker::CustomColored].
    pub fn set_color(&mut self, point: Point, color: Rgb) -> Result<()> {
        self.get_mut(point)?.set_color(point, color)
    }
    /// Number of cells that are not walls.
    pub fn corridor_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_wall()).count()
    }

    pub fn can_move_to_simple(&self, pos: Point) -> bool {
        self.in_bounds(pos) && !self.cells[self.get_ix_point(&pos)].is_wall()
    }
    /// Checks whether a single step from `start` to the adjacent `pos` is allowed. Without
    /// corner cutting a diagonal step needs both orthogonal cells it passes to be open.
    pub fn can_move_to(&self, pos: Point, start: Point, allow_corner_cutting: bool) -> bool {
        if allow_corner_cutting {
            self.can_move_to_simple(pos)
        } else {
            debug_assert!((start.x - pos.x).abs() <= 1 && (start.y - pos.y).abs() <= 1);
            self.can_move_to_simple(pos)
                && self.can_move_to_simple(Point::new(start.x, pos.y))
                && self.can_move_to_simple(Point::new(pos.x, start.y))
        }
    }
    pub fn neighborhood_points(&self, point: &Point, allow_diagonal: bool) -> SmallVec<[Point; 8]> {
        MOORE_OFFSETS
            .iter()
            .filter(|(dx, dy)| allow_diagonal || dx * dy == 0)
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .collect()
    }
    /// The reachable neighbours of `pos` paired with the step cost: [C] for cardinal moves and
    /// [D] for diagonal ones.
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Point,
        config: &SearchConfig,
    ) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        self.neighborhood_points(pos, config.allow_diagonal)
            .into_iter()
            .filter(|p| self.can_move_to(*p, *pos, config.allow_corner_cutting))
            .map(|p| {
                let cost = if p.x != pos.x && p.y != pos.y { D } else { C };
                (p, cost)
            })
            .collect()
    }

    /// Checks if start and goal are on the same component. Call [update](Self::update) after
    /// editing the grid.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.can_move_to_simple(*start) && self.can_move_to_simple(*goal) {
            !self
                .components
                .equiv(self.get_ix_point(start), self.get_ix_point(goal))
        } else {
            true
        }
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self, config: &SearchConfig) {
        if self.components_dirty {
            self.generate_components(config);
        }
    }
    /// Generates a new [UnionFind] structure and links up open neighbours to the same
    /// components, following the same movement rules as the search.
    pub fn generate_components(&mut self, config: &SearchConfig) {
        let mut components = UnionFind::new(self.width * self.height);
        for point in self.points().filter(|p| self.can_move_to_simple(*p)) {
            let parent_ix = self.get_ix_point(&point);
            let forward: &[(i32, i32)] = if config.allow_diagonal {
                &[(1, 0), (0, 1), (1, 1), (1, -1)]
            } else {
                &[(1, 0), (0, 1)]
            };
            forward
                .iter()
                .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
                .filter(|p| self.can_move_to(*p, point, config.allow_corner_cutting))
                .for_each(|p| {
                    components.union(parent_ix, self.get_ix_point(&p));
                });
        }
        self.components = components;
        self.components_dirty = false;
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                let symbol = match cell.state() {
                    CellState::Empty => '.',
                    CellState::Wall => '#',
                    CellState::Start => 'S',
                    CellState::Goal => 'G',
                    CellState::Frontier => '+',
                    CellState::PathHighlight => '@',
                    CellState::Wrong => 'x',
                    CellState::Confirmed => 'o',
                    CellState::CustomColored(_) => '*',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
