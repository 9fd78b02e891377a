use disjoint::DisjointSet;
use rand::{Rng, seq::SliceRandom};

use super::super::MazeMaker;
use crate::error::MazeError;

pub trait Kruskal {
    fn kruskal(&mut self) -> Result<usize, MazeError>;
}

impl<R: Rng + ?Sized> Kruskal for MazeMaker<'_, R> {
    fn kruskal(&mut self) -> Result<usize, MazeError> {
        let side = self.side();
        let mut walls = self.candidate_walls();
        let mut cells = DisjointSet::with_len(self.masks.len());
        let mut removed = 0;

        walls.shuffle(&mut *self.rng);
        for wall in walls {
            let neighbor = wall.neighbor(side);
            debug_assert_ne!(wall.cell, neighbor, "wall joins a cell to itself");
            if wall.cell == neighbor {
                return Err(MazeError::InvariantViolation("wall joins a cell to itself"));
            }

            // `join` only merges, and reports true, when the two cells were
            // in different trees; otherwise the wall would close a loop.
            if cells.join(wall.cell, neighbor) {
                self.remove_wall(wall);
                removed += 1;
            }
        }

        Ok(removed)
    }
}
