use glam::Vec3;

use super::{DrawRange, Portion, SEAM_VERTICES, WallVertex};
use crate::error::MazeError;

/// Appends flat-shaded triangle strips to a shared vertex buffer.
///
/// A strip is laid out as a ladder: each rung contributes two vertices, and
/// consecutive rungs form a quad.
#[derive(Debug, Default)]
pub struct StripBuilder {
    vertices: Vec<WallVertex>,
}

impl StripBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn ladder<I>(&mut self, rungs: I, normal: Vec3) -> DrawRange
    where
        I: IntoIterator<Item = (Vec3, Vec3)>,
    {
        let offset = self.vertices.len();
        for (a, b) in rungs {
            self.vertices.push(WallVertex {
                position: a,
                normal,
            });
            self.vertices.push(WallVertex {
                position: b,
                normal,
            });
        }

        DrawRange {
            offset,
            length: self.vertices.len() - offset,
        }
    }

    pub fn finish(self) -> Vec<WallVertex> {
        self.vertices
    }
}

/// Splits a ladder strip into the first `column_rungs` quads and the rest.
///
/// The two ranges share the seam rung, so the remainder starts two vertices
/// before the column ends.
pub fn portion(run: DrawRange, column_rungs: usize) -> Result<Portion, MazeError> {
    let column = DrawRange {
        offset: run.offset,
        length: SEAM_VERTICES + 2 * column_rungs,
    };

    if column_rungs == 0 || column.length >= run.length {
        return Err(MazeError::InvariantViolation(
            "carved column does not fit inside its run",
        ));
    }

    let next = column.end() - SEAM_VERTICES;
    let remainder = DrawRange {
        offset: next,
        length: run.end() - next,
    };

    Ok(Portion {
        run,
        column,
        remainder,
    })
}

/// Segments over the column and over the rest of a wall's long axis, at
/// `detail_level` segments per unit. Each side gets at least one.
pub fn segment_counts(thickness: f32, detail_level: usize) -> (usize, usize) {
    let detail = detail_level as f32;
    let column = ((detail * thickness).round() as usize).max(1);
    let rest = ((detail * (1.0 - thickness)).round() as usize).max(1);
    (column, rest)
}

/// Positions along a wall's long axis: `column_segments` even steps over
/// `[0, thickness]`, then `rest_segments` even steps over `[thickness, 1]`.
pub fn long_axis_samples(thickness: f32, column_segments: usize, rest_segments: usize) -> Vec<f32> {
    let mut samples = Vec::with_capacity(column_segments + rest_segments + 1);
    samples.push(0.0);
    for i in 1..column_segments {
        samples.push(thickness * i as f32 / column_segments as f32);
    }
    samples.push(thickness);
    for k in 1..rest_segments {
        samples.push(thickness + (1.0 - thickness) * k as f32 / rest_segments as f32);
    }
    samples.push(1.0);
    samples
}
