//! Where the pieces of the wall unit stand in a maze.
//!
//! Cells only own their south and west walls, so the north and east
//! perimeter is drawn by a phantom ring of cells at row `side` and column
//! `side`: south walls along the top, west walls along the right.

use glam::{Vec2, vec2};

use crate::{
    maze::{Maze, SOUTH, WEST},
    wall::FaceGroup,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WallSet {
    pub west: bool,
    pub south: bool,
    pub column: bool,
}

impl WallSet {
    pub fn groups(&self) -> impl Iterator<Item = FaceGroup> {
        [
            (self.west, FaceGroup::West),
            (self.column, FaceGroup::Column),
            (self.south, FaceGroup::South),
        ]
        .into_iter()
        .filter_map(|(present, group)| present.then_some(group))
    }
}

/// Wall pieces at grid position `(x, y)`, including the perimeter ring.
/// Anything outside the grid and ring is empty.
pub fn wall_set(maze: &Maze, x: i32, y: i32) -> WallSet {
    let side = maze.side() as i32;

    if x < 0 || y < 0 || x > side || y > side {
        return WallSet::default();
    }

    match (x == side, y == side) {
        (false, false) => {
            let index = (y * side + x) as usize;
            WallSet {
                west: maze.has_wall(index, WEST) == Some(true),
                south: maze.has_wall(index, SOUTH) == Some(true),
                column: true,
            }
        }
        (true, false) => WallSet {
            west: true,
            south: false,
            column: true,
        },
        (false, true) => WallSet {
            west: false,
            south: true,
            column: true,
        },
        (true, true) => WallSet {
            west: false,
            south: false,
            column: true,
        },
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DrawCall {
    pub x: i32,
    pub y: i32,
    pub group: FaceGroup,
}

impl DrawCall {
    /// Model-space translation for this instance, in cells.
    pub fn offset(&self) -> Vec2 {
        vec2(self.x as f32, self.y as f32)
    }
}

/// Every instance the renderer has to draw for one frame, row by row.
pub fn draw_calls(maze: &Maze) -> Vec<DrawCall> {
    let side = maze.side() as i32;
    let mut calls = Vec::with_capacity(3 * (maze.len() + 2 * maze.side() + 1));

    for y in 0..=side {
        for x in 0..=side {
            calls.extend(
                wall_set(maze, x, y)
                    .groups()
                    .map(|group| DrawCall { x, y, group }),
            );
        }
    }

    calls
}

/// Axis-aligned footprint of a wall piece in the maze plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub min: Vec2,
    pub max: Vec2,
}

impl Footprint {
    fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

pub fn footprints(maze: &Maze, thickness: f32, x: i32, y: i32) -> Vec<Footprint> {
    let set = wall_set(maze, x, y);
    let corner = vec2(x as f32, y as f32);
    let mut footprints = Vec::with_capacity(3);

    if set.column {
        footprints.push(Footprint {
            min: corner,
            max: corner + Vec2::splat(thickness),
        });
    }
    if set.south {
        footprints.push(Footprint {
            min: corner + vec2(thickness, 0.0),
            max: corner + vec2(1.0, thickness),
        });
    }
    if set.west {
        footprints.push(Footprint {
            min: corner + vec2(0.0, thickness),
            max: corner + vec2(thickness, 1.0),
        });
    }

    footprints
}

/// Whether a circle in the maze plane (cell units) touches no wall.
pub fn is_circle_clear(maze: &Maze, thickness: f32, center: Vec2, radius: f32) -> bool {
    let min_x = (center.x - radius).floor() as i32 - 1;
    let max_x = (center.x + radius).floor() as i32;
    let min_y = (center.y - radius).floor() as i32 - 1;
    let max_y = (center.y + radius).floor() as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            for footprint in footprints(maze, thickness, x, y) {
                let closest = footprint.closest_point(center);
                if center.distance_squared(closest) < radius * radius {
                    return false;
                }
            }
        }
    }

    true
}
