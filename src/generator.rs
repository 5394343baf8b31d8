//! Perfect maze generation with [Eller's algorithm](http://www.neocomputer.org/projects/eller.html).
//!
//! The generator works on a half-resolution lattice of logical cells and only decides which
//! borders between them are walls. [Borders::apply_to] then lays the result out on a [Grid]
//! where logical cell `(r, c)` becomes the corridor cell at row `2r + 1`, column `2c + 1`.
use crate::cell::CellKind;
use crate::error::Result;
use crate::grid::Grid;
use grid_util::Point;
use log::trace;
use rand::Rng;

/// Border layout of a `rows x cols` lattice. `true` means wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Borders {
    /// `right[r][c]` separates logical cell `(r, c)` from `(r, c + 1)`.
    pub right: Vec<Vec<bool>>,
    /// `down[r][c]` separates logical cell `(r, c)` from `(r + 1, c)`.
    pub down: Vec<Vec<bool>>,
}

impl Borders {
    pub fn rows(&self) -> usize {
        self.right.len()
    }
    pub fn cols(&self) -> usize {
        self.right.first().map_or(0, Vec::len)
    }
    /// Number of removed borders, i.e. passages between logical cells.
    pub fn passages(&self) -> usize {
        self.right
            .iter()
            .chain(self.down.iter())
            .flatten()
            .filter(|wall| !**wall)
            .count()
    }
    /// Size of the grid this lattice is laid out on, as `(height, width)`.
    pub fn grid_size(&self) -> (usize, usize) {
        (2 * self.rows() + 1, 2 * self.cols() + 1)
    }

    /// Walls off the whole grid and carves the corridor cells plus every open border. Lattice
    /// posts at even rows and columns always stay walls.
    ///
    /// Fails with [OutOfBounds](crate::MazeError::OutOfBounds) if `grid` is smaller than
    /// [grid_size](Self::grid_size).
    pub fn apply_to(&self, grid: &mut Grid) -> Result<()> {
        grid.fill(CellKind::Wall);
        for (r, (right_row, down_row)) in self.right.iter().zip(self.down.iter()).enumerate() {
            for (c, (right, down)) in right_row.iter().zip(down_row.iter()).enumerate() {
                let x = 2 * c as i32 + 1;
                let y = 2 * r as i32 + 1;
                grid.set_kind(Point::new(x, y), CellKind::Empty)?;
                if !right {
                    grid.set_kind(Point::new(x + 1, y), CellKind::Empty)?;
                }
                if !down {
                    grid.set_kind(Point::new(x, y + 1), CellKind::Empty)?;
                }
            }
        }
        Ok(())
    }
}

/// Set membership of the current row. Columns without a set get a fresh id at the start of
/// the next row.
struct RowSets {
    sets: Vec<Option<usize>>,
    next_set: usize,
}

impl RowSets {
    fn new(cols: usize) -> RowSets {
        RowSets {
            sets: vec![None; cols],
            next_set: 0,
        }
    }

    fn fill_fresh(&mut self) -> Vec<usize> {
        let mut row = Vec::with_capacity(self.sets.len());
        for set in self.sets.iter_mut() {
            let id = *set.get_or_insert_with(|| {
                self.next_set += 1;
                self.next_set
            });
            row.push(id);
        }
        row
    }
}

/// Relabels every column of set `absorbed` as `kept`.
fn merge(row: &mut [usize], kept: usize, absorbed: usize) {
    row.iter_mut()
        .filter(|set| **set == absorbed)
        .for_each(|set| *set = kept);
}

fn right_borders<R: Rng + ?Sized>(row: &mut [usize], rng: &mut R) -> Vec<bool> {
    let cols = row.len();
    let mut borders = vec![false; cols];
    for i in 0..cols - 1 {
        if rng.gen::<bool>() || row[i] == row[i + 1] {
            borders[i] = true;
        } else {
            let (kept, absorbed) = (row[i], row[i + 1]);
            merge(row, kept, absorbed);
        }
    }
    borders[cols - 1] = true;
    borders
}

/// Places a wall under a column at random, unless it is the last member of its set that is
/// still open downward.
fn down_borders<R: Rng + ?Sized>(row: &[usize], rng: &mut R) -> Vec<bool> {
    let mut borders = vec![false; row.len()];
    for i in 0..row.len() {
        if !rng.gen::<bool>() {
            continue;
        }
        let members = row.iter().filter(|set| **set == row[i]).count();
        let sealed = row
            .iter()
            .zip(borders.iter())
            .filter(|(set, wall)| **set == row[i] && **wall)
            .count();
        if members - sealed != 1 {
            borders[i] = true;
        }
    }
    borders
}

/// Generates a perfect maze on a `rows x cols` lattice, row by row. Every logical cell ends up
/// connected to every other through exactly one route.
///
/// Panics if either dimension is zero; callers validate sizes first.
pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Borders {
    assert!(
        rows >= 1 && cols >= 1,
        "maze lattice must be at least 1x1, got {rows}x{cols}"
    );
    let mut sets = RowSets::new(cols);
    let mut right = Vec::with_capacity(rows);
    let mut down = Vec::with_capacity(rows);

    for r in 0..rows {
        let mut row = sets.fill_fresh();
        let mut row_right = right_borders(&mut row, rng);
        let row_down = if r + 1 < rows {
            let row_down = down_borders(&row, rng);
            sets.sets = row
                .iter()
                .zip(row_down.iter())
                .map(|(set, wall)| (!wall).then_some(*set))
                .collect();
            row_down
        } else {
            // Seal the bottom edge and join whatever sets are still apart.
            for i in 0..cols - 1 {
                if row[i] != row[i + 1] {
                    row_right[i] = false;
                    let (kept, absorbed) = (row[i], row[i + 1]);
                    merge(&mut row, kept, absorbed);
                }
            }
            vec![true; cols]
        };
        trace!("row {r}: sets {row:?}");
        right.push(row_right);
        down.push(row_down);
    }
    Borders { right, down }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lattice_components(borders: &Borders) -> usize {
        let (rows, cols) = (borders.rows(), borders.cols());
        let mut components = petgraph::unionfind::UnionFind::new(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                if !borders.right[r][c] {
                    components.union(r * cols + c, r * cols + c + 1);
                }
                if !borders.down[r][c] {
                    components.union(r * cols + c, (r + 1) * cols + c);
                }
            }
        }
        let mut labels = components.into_labeling();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }

    #[test]
    fn spanning_tree_on_many_lattices() {
        let mut rng = StdRng::seed_from_u64(0);
        for rows in 1..8 {
            for cols in 1..8 {
                let borders = generate(rows, cols, &mut rng);
                assert_eq!(borders.rows(), rows);
                assert_eq!(borders.cols(), cols);
                assert_eq!(borders.passages(), rows * cols - 1);
                assert_eq!(lattice_components(&borders), 1);
            }
        }
    }

    #[test]
    fn outer_borders_are_walls() {
        let mut rng = StdRng::seed_from_u64(7);
        let borders = generate(6, 5, &mut rng);
        assert!(borders.right.iter().all(|row| row[4]));
        assert!(borders.down[5].iter().all(|wall| *wall));
    }

    #[test]
    fn single_row_is_a_corridor() {
        let mut rng = StdRng::seed_from_u64(3);
        let borders = generate(1, 6, &mut rng);
        assert_eq!(borders.right[0], vec![false, false, false, false, false, true]);
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate(9, 11, &mut StdRng::seed_from_u64(42));
        let b = generate(9, 11, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic]
    fn empty_lattice_panics() {
        generate(0, 3, &mut StdRng::seed_from_u64(0));
    }

    #[test]
    fn apply_keeps_posts_and_frame() {
        let borders = generate(4, 4, &mut StdRng::seed_from_u64(11));
        let (height, width) = borders.grid_size();
        let mut grid = Grid::new(height, width);
        borders.apply_to(&mut grid).unwrap();
        for point in grid.points() {
            let on_frame = point.x == 0
                || point.y == 0
                || point.x as usize == width - 1
                || point.y as usize == height - 1;
            let post = point.x % 2 == 0 && point.y % 2 == 0;
            if on_frame || post {
                assert_eq!(grid.kind(point).unwrap(), CellKind::Wall);
            }
        }
        assert_eq!(grid.corridor_count(), 16 + 15);
    }

    #[test]
    fn apply_to_small_grid_fails() {
        let borders = generate(3, 3, &mut StdRng::seed_from_u64(2));
        let mut grid = Grid::new(3, 3);
        assert!(matches!(
            borders.apply_to(&mut grid),
            Err(crate::MazeError::OutOfBounds { .. })
        ));
    }
}
