use crate::error::{MazeError, Result};
use grid_util::Point;

/// A plain 8-bit RGB colour, used for the gradient painted along a solved path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    fn channels(self) -> [i32; 3] {
        [self.r as i32, self.g as i32, self.b as i32]
    }

    fn from_channels(channels: [i32; 3]) -> Rgb {
        let [r, g, b] = channels.map(|c| c.clamp(0, u8::MAX as i32) as u8);
        Rgb { r, g, b }
    }

    /// Builds `len` colours starting at `start` and walking towards `end` with a fixed
    /// per-channel step of `(end - start) / len`, rounded down. The final colour therefore
    /// stops one step short of `end`.
    pub fn gradient(start: Rgb, end: Rgb, len: usize) -> Vec<Rgb> {
        if len == 0 {
            return Vec::new();
        }
        let from = start.channels();
        let to = end.channels();
        let step: [i32; 3] = std::array::from_fn(|i| (to[i] - from[i]).div_euclid(len as i32));
        (0..len as i32)
            .map(|i| Rgb::from_channels(std::array::from_fn(|c| from[c] + step[c] * i)))
            .collect()
    }
}

/// Structural role of a cell. Exactly one cell of a maze is [CellKind::Start] and one is
/// [CellKind::Goal].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    Goal,
}

/// Search visualisation tag, kept apart from the [CellKind] so that clearing a search never
/// touches the maze layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Discovered by the search.
    Frontier,
    /// The node currently being expanded.
    PathHighlight,
    /// Visited while backtracking from the goal.
    Confirmed,
    /// Expanded without producing anything new: a dead end.
    Wrong,
    /// Part of the finished path; carries a display colour.
    CustomColored,
}

/// The single authoritative state a presentation layer draws for a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    Empty,
    Wall,
    Start,
    Goal,
    Frontier,
    Confirmed,
    Wrong,
    PathHighlight,
    CustomColored(Rgb),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) kind: CellKind,
    pub(crate) marker: Option<Marker>,
    pub(crate) color: Option<Rgb>,
}

impl Cell {
    pub fn new(kind: CellKind) -> Cell {
        Cell {
            kind,
            marker: None,
            color: None,
        }
    }
    pub fn kind(&self) -> CellKind {
        self.kind
    }
    pub fn marker(&self) -> Option<Marker> {
        self.marker
    }
    pub fn color(&self) -> Option<Rgb> {
        self.color
    }
    pub fn is_wall(&self) -> bool {
        self.kind == CellKind::Wall
    }
    pub fn is_endpoint(&self) -> bool {
        matches!(self.kind, CellKind::Start | CellKind::Goal)
    }

    /// Changes the structural role. Walls never carry search markers.
    pub(crate) fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
        if kind == CellKind::Wall {
            self.clear_marker();
        }
    }

    pub(crate) fn mark(&mut self, marker: Marker) {
        if self.is_wall() {
            return;
        }
        self.marker = Some(marker);
        if marker != Marker::CustomColored {
            self.color = None;
        }
    }

    pub(crate) fn clear_marker(&mut self) {
        self.marker = None;
        self.color = None;
    }

    pub(crate) fn set_color(&mut self, point: Point, color: Rgb) -> Result<()> {
        if self.marker != Some(Marker::CustomColored) {
            return Err(MazeError::NotCustomColored { point });
        }
        self.color = Some(color);
        Ok(())
    }

    /// Collapses kind and marker into what should be drawn. The coloured path wins over the
    /// endpoints, which win over every other search marker.
    pub fn state(&self) -> CellState {
        if let (Some(Marker::CustomColored), Some(color)) = (self.marker, self.color) {
            return CellState::CustomColored(color);
        }
        match self.kind {
            CellKind::Start => return CellState::Start,
            CellKind::Goal => return CellState::Goal,
            _ => {}
        }
        match self.marker {
            Some(Marker::Wrong) => CellState::Wrong,
            Some(Marker::Confirmed) => CellState::Confirmed,
            Some(Marker::PathHighlight) => CellState::PathHighlight,
            Some(Marker::Frontier) => CellState::Frontier,
            _ if self.is_wall() => CellState::Wall,
            _ => CellState::Empty,
        }
    }
}
