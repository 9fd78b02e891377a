pub mod maker;

use std::{collections::VecDeque, fmt};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    config::{self, Config},
    error::MazeError,
};
use maker::MazeMaker;

pub const WEST: u8 = 0b01; // Bit set while the cell's west wall stands.
pub const SOUTH: u8 = 0b10; // Bit set while the cell's south wall stands.
pub const WALLED: u8 = WEST | SOUTH;

/// A perfect maze over a `side` x `side` grid.
///
/// Cells are indexed row-major from the south-west corner: `x = index % side`,
/// `y = index / side`, with `y` increasing northwards. Each cell only records
/// its own south and west walls. The north and east perimeter belong to a
/// phantom row and column just outside the grid (see [`crate::layout`]).
#[derive(Clone, PartialEq, Eq)]
pub struct Maze {
    side: usize,
    exit_corridor: usize,
    masks: Vec<u8>,
}

impl Maze {
    /// Generates a maze with the thread-local random generator.
    pub fn new(side: usize, exit_corridor: usize) -> Result<Self, MazeError> {
        Self::generate(side, exit_corridor, &mut rand::rng())
    }

    pub fn generate_seeded(side: usize, exit_corridor: usize, seed: u64) -> Result<Self, MazeError> {
        Self::generate(side, exit_corridor, &mut StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &Config) -> Result<Self, MazeError> {
        match config.seed {
            Some(seed) => Self::generate_seeded(config.side, config.exit_corridor, seed),
            None => Self::new(config.side, config.exit_corridor),
        }
    }

    pub fn generate<R: Rng + ?Sized>(
        side: usize,
        exit_corridor: usize,
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        config::validate_maze(side, exit_corridor)?;

        let mut maker = MazeMaker::new(side, exit_corridor, rng);
        let removed = maker.carve()?;

        let expected = side * side - 1;
        debug_assert_eq!(removed, expected, "generated maze is not a spanning tree");
        if removed != expected {
            return Err(MazeError::InvariantViolation(
                "generated maze is not a spanning tree",
            ));
        }

        debug!(side, exit_corridor, removed, "generated maze");

        Ok(Self {
            side,
            exit_corridor,
            masks: maker.masks,
        })
    }

    /// Wraps masks that were produced elsewhere. Only the shape is checked.
    pub fn from_masks(side: usize, exit_corridor: usize, masks: Vec<u8>) -> Result<Self, MazeError> {
        config::validate_maze(side, exit_corridor)?;
        if masks.len() != side * side {
            return Err(MazeError::invalid(format!(
                "expected {} masks for side {side}, got {}",
                side * side,
                masks.len()
            )));
        }
        if let Some(bad) = masks.iter().find(|&&mask| mask > WALLED) {
            return Err(MazeError::invalid(format!("mask out of range: {bad}")));
        }

        Ok(Self {
            side,
            exit_corridor,
            masks,
        })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn half(&self) -> usize {
        self.side / 2
    }

    pub fn exit_corridor(&self) -> usize {
        self.exit_corridor
    }

    pub fn masks(&self) -> &[u8] {
        &self.masks
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn cell_index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.side && y < self.side {
            Some(y * self.side + x)
        } else {
            None
        }
    }

    pub fn cell_coords(&self, index: usize) -> (usize, usize) {
        (index % self.side, index / self.side)
    }

    /// Whether the wall(s) in `bits` still stand for the given cell, or
    /// `None` if there is no such cell.
    pub fn has_wall(&self, index: usize, bits: u8) -> Option<bool> {
        self.masks.get(index).map(|&mask| mask & bits != 0)
    }

    /// The cell whose south wall is the gate to the outside.
    pub fn gate(&self) -> usize {
        self.half()
    }

    pub fn in_exit_corridor(&self, x: usize, y: usize) -> bool {
        let half = self.half();
        y < self.exit_corridor && (x == half || x == half + 1)
    }

    /// Open walls between two cells of the grid, as `(lower, higher)` index
    /// pairs. The gate isn't included.
    pub fn passages(&self) -> Vec<(usize, usize)> {
        let mut passages = Vec::with_capacity(self.masks.len());

        for (index, &mask) in self.masks.iter().enumerate() {
            let (x, y) = self.cell_coords(index);
            if x > 0 && mask & WEST == 0 {
                passages.push((index - 1, index));
            }
            if y > 0 && mask & SOUTH == 0 {
                passages.push((index - self.side, index));
            }
        }

        passages
    }

    /// Cells with an opening in the south or west boundary of the grid.
    pub fn exterior_openings(&self) -> Vec<usize> {
        self.masks
            .iter()
            .enumerate()
            .filter(|&(index, &mask)| {
                let (x, y) = self.cell_coords(index);
                (x == 0 && mask & WEST == 0) || (y == 0 && mask & SOUTH == 0)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of cells reachable from cell 0 through open walls.
    pub fn reachable_count(&self) -> usize {
        let mut adjacency = vec![Vec::new(); self.masks.len()];
        for (a, b) in self.passages() {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }

        let mut visited = vec![false; self.masks.len()];
        let mut queue = VecDeque::new();
        let mut count = 0;

        visited[0] = true;
        queue.push_back(0);

        while let Some(cell) = queue.pop_front() {
            count += 1;
            for &next in &adjacency[cell] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        count
    }

    /// Connected, with one fewer passage than cells: a tree.
    pub fn is_spanning_tree(&self) -> bool {
        self.passages().len() == self.masks.len() - 1 && self.reachable_count() == self.masks.len()
    }

    /// Block map of the maze: `2 * side + 1` rows of `2 * side + 1` entries,
    /// 1 for wall, 0 for space, row 0 at the south.
    pub fn block_grid(&self) -> Vec<Vec<u8>> {
        let width = 2 * self.side + 1;
        let mut grid = vec![vec![1; width]; width];

        for (index, &mask) in self.masks.iter().enumerate() {
            let (x, y) = self.cell_coords(index);
            let (gx, gz) = (2 * x + 1, 2 * y + 1);
            grid[gz][gx] = 0;
            if mask & WEST == 0 {
                grid[gz][gx - 1] = 0;
            }
            if mask & SOUTH == 0 {
                grid[gz - 1][gx] = 0;
            }
        }

        grid
    }

    pub fn log(&self) -> String {
        self.block_grid()
            .iter()
            .rev()
            .map(|row| {
                row.iter()
                    .map(|&cell| if cell == 0 { "  " } else { "██" })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}
