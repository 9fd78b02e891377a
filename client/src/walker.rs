use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, vec2};

use common::{layout, maze::Maze};

use crate::input::WalkInput;

pub const EYE_HEIGHT: f32 = 0.5; // Walls are one cell tall.
pub const RADIUS: f32 = 0.15;
pub const SPEED: f32 = 2.0; // Cells per second.
const MAX_PITCH: f32 = FRAC_PI_2 - 0.05;

/// The player, in maze-plane coordinates: `x` east, `y` north, one unit per
/// cell. `yaw` is measured clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walker {
    pub position: Vec2,
    pub yaw: f32,
    pub pitch: f32,
}

impl Walker {
    /// Just outside the gate, looking up the exit corridor.
    pub fn at_gate(maze: &Maze, wall_thickness: f32) -> Self {
        let x = maze.half() as f32 + (1.0 + wall_thickness) / 2.0;
        Self {
            position: vec2(x, -0.75),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn forward(&self) -> Vec2 {
        vec2(self.yaw.sin(), self.yaw.cos())
    }

    pub fn right(&self) -> Vec2 {
        vec2(self.yaw.cos(), -self.yaw.sin())
    }

    pub fn is_inside(&self, maze: &Maze) -> bool {
        let side = maze.side() as f32;
        self.position.cmpge(Vec2::ZERO).all() && self.position.cmplt(Vec2::splat(side)).all()
    }

    pub fn update(&mut self, maze: &Maze, wall_thickness: f32, input: &WalkInput, dt: f32) {
        self.yaw += input.yaw_delta;
        self.pitch = (self.pitch + input.pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);

        let mut wish_dir = Vec2::ZERO;
        if input.forward {
            wish_dir += self.forward();
        }
        if input.backward {
            wish_dir -= self.forward();
        }
        if input.right {
            wish_dir += self.right();
        }
        if input.left {
            wish_dir -= self.right();
        }

        if wish_dir.length_squared() < 0.001 {
            return;
        }

        let step = wish_dir.normalize() * SPEED * dt;
        let clear = |p: Vec2| layout::is_circle_clear(maze, wall_thickness, p, RADIUS);

        // Slide along walls: if the full step is blocked, try each axis alone.
        let candidates = [
            self.position + step,
            self.position + vec2(step.x, 0.0),
            self.position + vec2(0.0, step.y),
        ];
        if let Some(&next) = candidates.iter().find(|&&p| clear(p)) {
            self.position = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use common::maze::{SOUTH, WALLED, WEST};

    use super::*;

    const THICKNESS: f32 = 0.25;

    fn corridor_maze() -> Maze {
        // 3x3 with a straight passage up the centre column from the gate.
        // The side columns hang off the top row.
        let mut masks = vec![WALLED; 9];
        masks[1] &= !SOUTH;
        masks[4] &= !SOUTH;
        masks[7] &= !SOUTH;
        masks[3] &= !SOUTH;
        masks[6] &= !SOUTH;
        masks[5] &= !SOUTH;
        masks[8] &= !SOUTH;
        masks[7] &= !WEST;
        masks[8] &= !WEST;
        Maze::from_masks(3, 1, masks).expect("valid shape")
    }

    fn forward_for(dt: f32) -> (WalkInput, f32) {
        (
            WalkInput {
                forward: true,
                ..Default::default()
            },
            dt,
        )
    }

    #[test]
    fn test_walker_starts_outside_facing_north() {
        let maze = corridor_maze();
        let walker = Walker::at_gate(&maze, THICKNESS);
        assert!(!walker.is_inside(&maze));
        assert!((walker.forward() - vec2(0.0, 1.0)).length() < 1e-6);
        assert!((walker.right() - vec2(1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_walker_enters_through_gate() {
        let maze = corridor_maze();
        let mut walker = Walker::at_gate(&maze, THICKNESS);
        let (input, dt) = forward_for(0.05);

        for _ in 0..20 {
            walker.update(&maze, THICKNESS, &input, dt);
        }

        assert!(walker.is_inside(&maze), "walker stuck at {:?}", walker.position);
        assert!(walker.position.y > 1.0);
    }

    #[test]
    fn test_walker_is_stopped_by_wall() {
        let maze = corridor_maze();
        let mut walker = Walker::at_gate(&maze, THICKNESS);
        walker.position.x = 0.6; // In front of the closed south wall of cell 0.
        let (input, dt) = forward_for(0.05);

        for _ in 0..40 {
            walker.update(&maze, THICKNESS, &input, dt);
        }

        assert!(walker.position.y < 0.0, "walked through a wall: {:?}", walker.position);
    }

    #[test]
    fn test_turning_and_pitch_clamp() {
        let maze = corridor_maze();
        let mut walker = Walker::at_gate(&maze, THICKNESS);
        let input = WalkInput {
            yaw_delta: FRAC_PI_2,
            pitch_delta: 10.0,
            ..Default::default()
        };
        walker.update(&maze, THICKNESS, &input, 0.0);

        assert!((walker.forward() - vec2(1.0, 0.0)).length() < 1e-6);
        assert_eq!(walker.pitch, MAX_PITCH);
    }

    #[test]
    fn test_diagonal_move_slides_along_wall() {
        let maze = corridor_maze();
        let mut walker = Walker::at_gate(&maze, THICKNESS);
        walker.position = vec2(1.625, 1.5);
        walker.yaw = FRAC_PI_2 / 2.0; // North-east, into the corridor's east wall.
        let (input, dt) = forward_for(0.05);
        let start = walker.position;

        for _ in 0..10 {
            walker.update(&maze, THICKNESS, &input, dt);
        }

        assert!(walker.position.y > start.y, "should keep moving north");
        assert!(walker.position.x < 2.0, "should not pass the east wall");
    }
}
