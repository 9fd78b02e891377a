//! The reusable wall unit: one cell's south wall, west wall and the corner
//! column where they meet, compiled once into a single vertex buffer.
//!
//! Model space is the unit cell `[0, 1] x [0, 1]` with `z` up. The south wall
//! covers `y in [0, t]`, the west wall `x in [0, t]` and the column is the
//! `[0, t] x [0, t]` post they share, `t` being the wall thickness. A renderer
//! draws the groups it needs per cell with a per-cell offset instead of
//! duplicating geometry.

pub mod strip;

use glam::{Vec3, vec3};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::{
    config::{self, Config},
    error::MazeError,
};
use strip::{StripBuilder, long_axis_samples, portion, segment_counts};

pub const FLOATS_PER_VERTEX: usize = 6; // Position xyz, then normal xyz.
pub const SEAM_VERTICES: usize = 2;
const CAP_VERTICES: usize = 4;

/// Largest unit a renderer can address with 16-bit indices.
pub const MAX_VERTICES: usize = u16::MAX as usize;

/// How many vertices [`WallUnit::compile`] emits for these parameters, or
/// `None` if the count does not fit in a `usize`.
pub fn vertex_count_for(wall_thickness: f32, detail_level: usize) -> Option<usize> {
    let (column_segments, rest_segments) = segment_counts(wall_thickness, detail_level);
    let samples = column_segments.checked_add(rest_segments)?.checked_add(1)?;

    // Front, back and top strips: two vertices per sample.
    let south = samples.checked_mul(6)?;
    let west = rest_segments.checked_add(1)?.checked_mul(6)?;
    // South and west end caps, then both sides of the post.
    let caps = 4 * CAP_VERTICES;

    south.checked_add(west)?.checked_add(caps)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// A triangle-strip draw call: first vertex and vertex count.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct DrawRange {
    pub offset: usize,
    pub length: usize,
}

impl DrawRange {
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn triangle_count(&self) -> usize {
        self.length.saturating_sub(2)
    }

    /// The strip as a triangle list, every triangle wound like the first.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        (0..self.triangle_count())
            .map(|k| {
                let i = self.offset + k;
                if k % 2 == 0 {
                    [i, i + 1, i + 2]
                } else {
                    [i + 1, i, i + 2]
                }
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FaceGroup {
    South,
    West,
    Column,
}

/// A wall run split into the column prefix and the rest of the wall.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Portion {
    pub run: DrawRange,
    pub column: DrawRange,
    pub remainder: DrawRange,
}

impl Portion {
    /// Column then remainder replays the run exactly, sharing only the seam.
    pub fn is_consistent(&self) -> bool {
        self.column.offset == self.run.offset
            && self.column.length >= SEAM_VERTICES
            && self.column.end() - SEAM_VERTICES == self.remainder.offset
            && self.remainder.end() == self.run.end()
            && self.column.length + self.remainder.length == self.run.length + SEAM_VERTICES
    }
}

#[derive(Clone, Debug)]
pub struct WallUnit {
    vertices: Vec<WallVertex>,
    south: Vec<DrawRange>,
    west: Vec<DrawRange>,
    column: Vec<DrawRange>,
    portions: Vec<Portion>,
    wall_thickness: f32,
    detail_level: usize,
}

impl WallUnit {
    pub fn from_config(config: &Config) -> Result<Self, MazeError> {
        Self::compile(config.wall_thickness, config.detail_level)
    }

    pub fn compile(wall_thickness: f32, detail_level: usize) -> Result<Self, MazeError> {
        config::validate_wall(wall_thickness, detail_level)?;

        let t = wall_thickness;
        let (column_segments, rest_segments) = segment_counts(t, detail_level);
        let along = long_axis_samples(t, column_segments, rest_segments);
        let from_column: Vec<f32> = along[column_segments..].to_vec();

        let mut builder = StripBuilder::new();
        let mut south = Vec::new();
        let mut west = Vec::new();
        let mut column = Vec::new();
        let mut portions = Vec::new();

        // South wall: faces running along x, each carved at x = t.
        let runs = [
            builder.ladder(
                along.iter().map(|&x| (vec3(x, 0.0, 1.0), vec3(x, 0.0, 0.0))),
                Vec3::NEG_Y,
            ),
            builder.ladder(
                along.iter().map(|&x| (vec3(x, t, 0.0), vec3(x, t, 1.0))),
                Vec3::Y,
            ),
            builder.ladder(
                along.iter().map(|&x| (vec3(x, t, 1.0), vec3(x, 0.0, 1.0))),
                Vec3::Z,
            ),
        ];
        for run in runs {
            let carved = portion(run, column_segments)?;
            column.push(carved.column);
            south.push(carved.remainder);
            portions.push(carved);
        }
        south.push(builder.ladder(
            [0.0, t].map(|y| (vec3(1.0, y, 1.0), vec3(1.0, y, 0.0))),
            Vec3::X,
        ));

        // The post's own sides, so it stays closed when both walls are open.
        column.push(builder.ladder(
            [0.0, t].map(|y| (vec3(0.0, y, 0.0), vec3(0.0, y, 1.0))),
            Vec3::NEG_X,
        ));
        column.push(builder.ladder(
            [0.0, t].map(|y| (vec3(t, y, 1.0), vec3(t, y, 0.0))),
            Vec3::X,
        ));

        // West wall: starts past the column footprint, at y = t.
        west.push(builder.ladder(
            from_column
                .iter()
                .map(|&y| (vec3(t, y, 1.0), vec3(t, y, 0.0))),
            Vec3::X,
        ));
        west.push(builder.ladder(
            from_column
                .iter()
                .map(|&y| (vec3(0.0, y, 0.0), vec3(0.0, y, 1.0))),
            Vec3::NEG_X,
        ));
        west.push(builder.ladder(
            from_column
                .iter()
                .map(|&y| (vec3(0.0, y, 1.0), vec3(t, y, 1.0))),
            Vec3::Z,
        ));
        west.push(builder.ladder(
            [0.0, t].map(|x| (vec3(x, 1.0, 0.0), vec3(x, 1.0, 1.0))),
            Vec3::Y,
        ));

        let vertices = builder.finish();
        debug_assert_eq!(
            Some(vertices.len()),
            vertex_count_for(t, detail_level),
            "vertex count out of step with the emitted strips"
        );

        debug!(
            wall_thickness,
            detail_level,
            vertices = vertices.len(),
            south = south.len(),
            west = west.len(),
            column = column.len(),
            "compiled wall unit"
        );

        Ok(Self {
            vertices,
            south,
            west,
            column,
            portions,
            wall_thickness,
            detail_level,
        })
    }

    pub fn vertices(&self) -> &[WallVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn ranges(&self, group: FaceGroup) -> &[DrawRange] {
        match group {
            FaceGroup::South => &self.south,
            FaceGroup::West => &self.west,
            FaceGroup::Column => &self.column,
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = (FaceGroup, &[DrawRange])> + '_ {
        FaceGroup::iter().map(move |group| (group, self.ranges(group)))
    }

    /// How each carved south run was split between column and wall.
    pub fn portions(&self) -> &[Portion] {
        &self.portions
    }

    pub fn wall_thickness(&self) -> f32 {
        self.wall_thickness
    }

    pub fn detail_level(&self) -> usize {
        self.detail_level
    }

    /// The buffer as it would be uploaded: position then normal per vertex.
    pub fn floats(&self) -> Vec<f32> {
        let mut floats = Vec::with_capacity(self.vertices.len() * FLOATS_PER_VERTEX);
        for vertex in &self.vertices {
            floats.extend_from_slice(&vertex.position.to_array());
            floats.extend_from_slice(&vertex.normal.to_array());
        }
        floats
    }

    pub fn group_vertices(&self, group: FaceGroup) -> impl Iterator<Item = &WallVertex> + '_ {
        self.ranges(group)
            .iter()
            .flat_map(move |range| &self.vertices[range.offset..range.end()])
    }
}
