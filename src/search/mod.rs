//! Incremental best-first search. Every [Pathfinder::step] call performs one unit of work so
//! that a render loop can show the frontier growing, the path being traced back and finally a
//! colour gradient flowing along it.
pub mod graph;

use crate::cell::{Marker, Rgb};
use crate::error::Result;
use crate::grid::Grid;
use crate::{GRADIENT_END, GRADIENT_START};
use fxhash::FxBuildHasher;
use graph::{NodeId, PathGraph, PathPoint};
use grid_util::Point;
use indexmap::IndexMap;
use log::{debug, info, trace};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Progress of a [Pathfinder].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Expanding one frontier node per step.
    Searching,
    /// The goal was discovered; the next step starts tracing the route back.
    PathFound,
    /// Following parent links from the goal, one cell per step.
    Backtracking,
    /// The path is complete and painted with a gradient.
    Colorized,
    /// Rotating the gradient along the path, forever.
    Animating,
    /// The frontier ran dry without reaching the goal. Further steps do nothing.
    NoPath,
}

impl Phase {
    /// Whether [Pathfinder::path] holds the finished route.
    pub fn path_complete(self) -> bool {
        matches!(self, Phase::Colorized | Phase::Animating)
    }
}

/// Movement and re-expansion rules of the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Use the 8-neighbourhood, with diagonal steps costing [D](crate::D).
    pub allow_diagonal: bool,
    /// Allow diagonal steps that pass between two blocked orthogonal cells.
    pub allow_corner_cutting: bool,
    /// Move a closed node back to the frontier when a cheaper route to it shows up. Off by
    /// default: closed nodes keep the cost they were closed with.
    pub reopen_closed: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            allow_diagonal: true,
            allow_corner_cutting: true,
            reopen_closed: false,
        }
    }
}

/// Step-wise best-first search from a start to a goal cell.
///
/// Nodes are ranked by their cost plus the Manhattan distance to the goal. With diagonal steps
/// costing `sqrt(2)` that estimate can exceed the true remaining cost, so the route found is
/// short but not guaranteed to be the shortest.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    pub config: SearchConfig,
    start: Point,
    goal: Point,
    graph: PathGraph,
    frontier: FxIndexMap<Point, NodeId>,
    closed: FxIndexMap<Point, NodeId>,
    current_best: Option<Point>,
    terminal: Option<NodeId>,
    cursor: Option<NodeId>,
    path: Vec<Point>,
    colors: Vec<Rgb>,
    phase: Phase,
}

fn manhattan_distance(a: &Point, b: &Point) -> f64 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as f64
}

impl Pathfinder {
    pub fn new(start: Point, goal: Point, config: SearchConfig) -> Pathfinder {
        let mut pathfinder = Pathfinder {
            config,
            start,
            goal,
            graph: PathGraph::new(),
            frontier: FxIndexMap::default(),
            closed: FxIndexMap::default(),
            current_best: None,
            terminal: None,
            cursor: None,
            path: Vec::new(),
            colors: Vec::new(),
            phase: Phase::Searching,
        };
        pathfinder.reset(start, goal);
        pathfinder
    }

    /// Discards all search state and seeds the frontier with the start at cost 0. Grid markers
    /// are left alone; see [Grid::clear_markers].
    pub fn reset(&mut self, start: Point, goal: Point) {
        self.start = start;
        self.goal = goal;
        self.graph.clear();
        self.frontier.clear();
        self.closed.clear();
        self.current_best = None;
        self.terminal = None;
        self.cursor = None;
        self.path.clear();
        self.colors.clear();
        self.phase = Phase::Searching;
        let root = self.graph.insert(start, 0.0, None);
        self.frontier.insert(start, root);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn goal(&self) -> Point {
        self.goal
    }
    pub fn graph(&self) -> &PathGraph {
        &self.graph
    }
    pub fn current_best(&self) -> Option<Point> {
        self.current_best
    }
    /// Frontier nodes in discovery order.
    pub fn frontier(&self) -> impl Iterator<Item = &PathPoint> + '_ {
        self.frontier.values().map(|id| &self.graph[*id])
    }
    /// Expanded nodes in expansion order.
    pub fn closed(&self) -> impl Iterator<Item = &PathPoint> + '_ {
        self.closed.values().map(|id| &self.graph[*id])
    }
    /// The goal node, once discovered.
    pub fn terminal(&self) -> Option<&PathPoint> {
        self.terminal.map(|id| &self.graph[id])
    }
    pub fn terminal_id(&self) -> Option<NodeId> {
        self.terminal
    }
    /// The recorded node for `point`, looking at the frontier, the closed set and the goal.
    pub fn node(&self, point: &Point) -> Option<&PathPoint> {
        self.frontier
            .get(point)
            .or_else(|| self.closed.get(point))
            .map(|id| &self.graph[*id])
            .or_else(|| self.terminal().filter(|node| node.point == *point))
    }
    pub fn cost_of(&self, point: &Point) -> Option<f64> {
        self.node(point).map(|node| node.cost)
    }
    pub fn parent_of(&self, point: &Point) -> Option<Point> {
        self.node(point)
            .and_then(|node| node.parent)
            .map(|id| self.graph[id].point)
    }
    /// The route from start to goal. Empty until backtracking has finished.
    pub fn path(&self) -> &[Point] {
        if self.phase.path_complete() {
            &self.path
        } else {
            &[]
        }
    }
    /// Current gradient colours, aligned with [path](Self::path).
    pub fn colors(&self) -> &[Rgb] {
        if self.phase.path_complete() {
            &self.colors
        } else {
            &[]
        }
    }

    /// Advances the search by one unit of work and returns the resulting phase.
    pub fn step(&mut self, grid: &mut Grid) -> Result<Phase> {
        self.phase = match self.phase {
            Phase::Searching => self.expand(grid)?,
            Phase::PathFound => {
                debug!("Backtracking from {:?}", self.goal);
                self.cursor = self.terminal;
                self.backtrack(grid)?
            }
            Phase::Backtracking => self.backtrack(grid)?,
            Phase::Colorized | Phase::Animating => self.animate(grid)?,
            Phase::NoPath => Phase::NoPath,
        };
        Ok(self.phase)
    }

    fn select_best(&self) -> Option<(Point, NodeId)> {
        self.frontier
            .iter()
            .map(|(point, id)| (*point, *id))
            .min_by(|(pa, a), (pb, b)| {
                let fa = self.graph[*a].cost + manhattan_distance(pa, &self.goal);
                let fb = self.graph[*b].cost + manhattan_distance(pb, &self.goal);
                fa.total_cmp(&fb)
            })
    }

    fn expand(&mut self, grid: &mut Grid) -> Result<Phase> {
        if let Some(previous) = self.current_best.take() {
            if grid.get(previous)?.marker() == Some(Marker::PathHighlight) {
                grid.mark(previous, Marker::Frontier)?;
            }
        }
        let Some((point, id)) = self.select_best() else {
            info!("Frontier exhausted, {:?} is unreachable", self.goal);
            return Ok(Phase::NoPath);
        };
        grid.mark(point, Marker::PathHighlight)?;
        self.current_best = Some(point);
        let cost = self.graph[id].cost;
        trace!("Expanding {:?} at cost {}", point, cost);

        let mut successful = false;
        let mut useful = false;
        let mut found = false;
        for (neighbour, step_cost) in grid.neighborhood_points_and_cost(&point, &self.config) {
            if neighbour == self.start {
                continue;
            }
            let new_cost = cost + step_cost;
            if let Some(&closed_id) = self.closed.get(&neighbour) {
                if self.config.reopen_closed && self.graph[closed_id].cost > new_cost {
                    trace!("Reopening {:?} at cost {}", neighbour, new_cost);
                    self.graph.reparent(closed_id, id, new_cost);
                    self.closed.shift_remove(&neighbour);
                    self.frontier.insert(neighbour, closed_id);
                    grid.mark(neighbour, Marker::Frontier)?;
                    useful = true;
                }
                continue;
            }
            if let Some(&open_id) = self.frontier.get(&neighbour) {
                if self.graph[open_id].cost > new_cost {
                    trace!("Relaxing {:?} to cost {}", neighbour, new_cost);
                    self.graph.reparent(open_id, id, new_cost);
                    useful = true;
                }
                continue;
            }
            successful = true;
            if neighbour == self.goal {
                if !found {
                    self.terminal = Some(self.graph.insert(neighbour, new_cost, Some(id)));
                    found = true;
                }
            } else {
                let node = self.graph.insert(neighbour, new_cost, Some(id));
                self.frontier.insert(neighbour, node);
                grid.mark(neighbour, Marker::Frontier)?;
            }
        }
        if !successful && !useful {
            grid.mark(point, Marker::Wrong)?;
        }
        self.frontier.shift_remove(&point);
        self.closed.insert(point, id);

        if let Some(terminal) = self.terminal() {
            info!("Reached {:?} at cost {}", self.goal, terminal.cost);
            Ok(Phase::PathFound)
        } else if self.frontier.is_empty() {
            info!("Frontier exhausted, {:?} is unreachable", self.goal);
            Ok(Phase::NoPath)
        } else {
            Ok(Phase::Searching)
        }
    }

    fn backtrack(&mut self, grid: &mut Grid) -> Result<Phase> {
        match self.cursor {
            Some(id) => {
                let node = &self.graph[id];
                grid.mark(node.point, Marker::Confirmed)?;
                self.path.push(node.point);
                self.cursor = node.parent;
                Ok(Phase::Backtracking)
            }
            None => {
                self.path.reverse();
                self.colorize(grid)?;
                Ok(Phase::Colorized)
            }
        }
    }

    fn colorize(&mut self, grid: &mut Grid) -> Result<()> {
        debug!("Colouring a path of {} cells", self.path.len());
        for point in self.frontier.keys().chain(self.closed.keys()) {
            grid.clear_marker(*point)?;
        }
        self.current_best = None;
        self.colors = Rgb::gradient(GRADIENT_START, GRADIENT_END, self.path.len());
        for (point, color) in self.path.iter().zip(self.colors.iter()) {
            grid.mark(*point, Marker::CustomColored)?;
            grid.set_color(*point, *color)?;
        }
        Ok(())
    }

    /// Shifts every colour one cell further along the path; the last one wraps to the start.
    fn animate(&mut self, grid: &mut Grid) -> Result<Phase> {
        self.colors.rotate_right(1);
        for (point, color) in self.path.iter().zip(self.colors.iter()) {
            grid.set_color(*point, *color)?;
        }
        Ok(Phase::Animating)
    }
}
