pub mod algorithms;

use rand::Rng;

use algorithms::kruskal::Kruskal;

use super::{SOUTH, WALLED, WEST};
use crate::error::MazeError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Orientation {
    South,
    West,
}

/// A wall that could be knocked down: the south or west wall of `cell`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Wall {
    pub cell: usize,
    pub orientation: Orientation,
}

impl Wall {
    /// The cell on the other side of the wall. Always the lower index of the
    /// pair, so `cell` is the one whose mask records the wall.
    pub fn neighbor(&self, side: usize) -> usize {
        match self.orientation {
            Orientation::South => self.cell - side,
            Orientation::West => self.cell - 1,
        }
    }

    pub fn bit(&self) -> u8 {
        match self.orientation {
            Orientation::South => SOUTH,
            Orientation::West => WEST,
        }
    }
}

pub struct MazeMaker<'a, R: Rng + ?Sized> {
    pub masks: Vec<u8>,
    pub rng: &'a mut R,
    side: usize,
    exit_corridor: usize,
}

impl<'a, R: Rng + ?Sized> MazeMaker<'a, R> {
    pub fn new(side: usize, exit_corridor: usize, rng: &'a mut R) -> Self {
        Self {
            masks: vec![WALLED; side * side],
            rng,
            side,
            exit_corridor,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn half(&self) -> usize {
        self.side / 2
    }

    /// Cells whose west walls are never candidates: the two columns that
    /// flank the corridor leading in from the gate.
    fn in_exit_corridor(&self, x: usize, y: usize) -> bool {
        let half = self.half();
        y < self.exit_corridor && (x == half || x == half + 1)
    }

    fn candidate_walls(&self) -> Vec<Wall> {
        let mut walls = Vec::with_capacity(2 * self.masks.len());

        for cell in 0..self.masks.len() {
            let x = cell % self.side;
            let y = cell / self.side;

            if y > 0 {
                walls.push(Wall {
                    cell,
                    orientation: Orientation::South,
                });
            }

            if x > 0 && !self.in_exit_corridor(x, y) {
                walls.push(Wall {
                    cell,
                    orientation: Orientation::West,
                });
            }
        }

        walls
    }

    fn remove_wall(&mut self, wall: Wall) {
        self.masks[wall.cell] &= !wall.bit();
    }

    /// The gate to the outside, at the bottom of the centre column. It
    /// doesn't join two cells, so it's outside the spanning tree.
    fn open_gate(&mut self) {
        let gate = self.half();
        self.masks[gate] &= !SOUTH;
    }

    /// Runs the generator and returns the number of walls knocked down
    /// between cells (not counting the gate).
    pub fn carve(&mut self) -> Result<usize, MazeError> {
        let removed = self.kruskal()?;
        self.open_gate();
        Ok(removed)
    }
}
