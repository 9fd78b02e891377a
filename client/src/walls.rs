//! Draws the maze by instancing the compiled wall unit.
//!
//! The whole unit lives in one static vertex buffer and one index buffer,
//! with each face group as a contiguous slice of indices. Each draw call
//! only updates the `offset` uniform before drawing its slice, so the cost
//! per cell is a uniform upload and a draw, never new geometry.

use macroquad::{
    miniquad::{
        Bindings, BufferId, BufferLayout, BufferSource, BufferType, BufferUsage, Comparison,
        PassAction, Pipeline, PipelineParams, ShaderId, ShaderMeta, ShaderSource,
        UniformBlockLayout, UniformDesc, UniformType, UniformsSource, VertexAttribute,
        VertexFormat,
    },
    prelude::*,
    window::InternalGlContext,
};
use tracing::debug;

use common::{
    layout::DrawCall,
    wall::{self, FaceGroup, WallUnit},
};

use crate::StartupError;

const VERTEX_SHADER: &str = r#"#version 100
attribute vec3 in_pos;
attribute vec3 in_normal;

uniform mat4 mvp;
uniform vec2 offset;

varying lowp float shade;

void main() {
    // Maze plane (x east, y north, z up) to camera space (y up, -z north).
    vec3 world = vec3(in_pos.x + offset.x, in_pos.z, -(in_pos.y + offset.y));
    vec3 normal = vec3(in_normal.x, in_normal.z, -in_normal.y);
    vec3 light = normalize(vec3(0.4, 0.8, 0.3));
    shade = 0.55 + 0.45 * max(dot(normal, light), 0.0);
    gl_Position = mvp * vec4(world, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 100
varying lowp float shade;

void main() {
    gl_FragColor = vec4(vec3(0.72, 0.66, 0.55) * shade, 1.0);
}
"#;

#[repr(C)]
struct Uniforms {
    mvp: Mat4,
    offset: [f32; 2],
}

fn shader_meta() -> ShaderMeta {
    ShaderMeta {
        images: vec![],
        uniforms: UniformBlockLayout {
            uniforms: vec![
                UniformDesc::new("mvp", UniformType::Mat4),
                UniformDesc::new("offset", UniformType::Float2),
            ],
        },
    }
}

fn internal_gl<'a>() -> InternalGlContext<'a> {
    // SAFETY: macroquad runs on one thread and none of the callers holds
    // the context across an await.
    unsafe { get_internal_gl() }
}

/// Where a face group's triangles sit in the shared index buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexSpan {
    pub start: i32,
    pub count: i32,
}

/// Triangle-list indices for every face group, laid out group after group.
pub fn build_indices(unit: &WallUnit) -> Result<(Vec<u16>, [IndexSpan; 3]), StartupError> {
    if unit.vertex_count() > wall::MAX_VERTICES {
        return Err(StartupError::Renderer(format!(
            "wall unit has {} vertices, more than 16-bit indices can address",
            unit.vertex_count()
        )));
    }

    let mut indices = Vec::new();
    let mut spans = [IndexSpan::default(); 3];

    for (group, ranges) in unit.groups() {
        let start = indices.len();
        for range in ranges {
            for triangle in range.triangles() {
                indices.extend(triangle.iter().map(|&i| i as u16));
            }
        }
        spans[group as usize] = IndexSpan {
            start: start as i32,
            count: (indices.len() - start) as i32,
        };
    }

    Ok((indices, spans))
}

pub struct WallRenderer {
    pipeline: Pipeline,
    bindings: Bindings,
    shader: ShaderId,
    vertex_buffer: BufferId,
    index_buffer: BufferId,
    spans: [IndexSpan; 3],
}

impl WallRenderer {
    pub fn new(unit: &WallUnit) -> Result<Self, StartupError> {
        let (indices, spans) = build_indices(unit)?;
        let vertices = unit.floats();

        let ctx = internal_gl().quad_context;

        let shader = ctx
            .new_shader(
                ShaderSource::Glsl {
                    vertex: VERTEX_SHADER,
                    fragment: FRAGMENT_SHADER,
                },
                shader_meta(),
            )
            .map_err(|e| StartupError::Renderer(format!("wall shader: {e:?}")))?;

        let vertex_buffer = ctx.new_buffer(
            BufferType::VertexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&vertices),
        );
        let index_buffer = ctx.new_buffer(
            BufferType::IndexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&indices),
        );

        let pipeline = ctx.new_pipeline(
            &[BufferLayout::default()],
            &[
                VertexAttribute::new("in_pos", VertexFormat::Float3),
                VertexAttribute::new("in_normal", VertexFormat::Float3),
            ],
            shader,
            PipelineParams {
                depth_test: Comparison::LessOrEqual,
                depth_write: true,
                ..Default::default()
            },
        );

        debug!(
            vertices = unit.vertex_count(),
            indices = indices.len(),
            "uploaded wall unit"
        );

        Ok(Self {
            pipeline,
            bindings: Bindings {
                vertex_buffers: vec![vertex_buffer],
                index_buffer,
                images: vec![],
            },
            shader,
            vertex_buffer,
            index_buffer,
            spans,
        })
    }

    pub fn span(&self, group: FaceGroup) -> IndexSpan {
        self.spans[group as usize]
    }

    /// Draws one instance of the unit per call, under the current 3D camera
    /// transform `mvp`.
    pub fn draw(&self, calls: &[DrawCall], mvp: Mat4) {
        let mut gl = internal_gl();
        // Flush macroquad's own batches first so the floor is in the depth buffer.
        gl.flush();
        let ctx = gl.quad_context;

        ctx.begin_default_pass(PassAction::Nothing);
        ctx.apply_pipeline(&self.pipeline);
        ctx.apply_bindings(&self.bindings);

        for call in calls {
            let span = self.span(call.group);
            if span.count == 0 {
                continue;
            }
            ctx.apply_uniforms(UniformsSource::table(&Uniforms {
                mvp,
                offset: call.offset().to_array(),
            }));
            ctx.draw(span.start, span.count, 1);
        }

        ctx.end_render_pass();
    }
}

impl Drop for WallRenderer {
    fn drop(&mut self) {
        let ctx = internal_gl().quad_context;
        ctx.delete_pipeline(self.pipeline);
        ctx.delete_buffer(self.index_buffer);
        ctx.delete_buffer(self.vertex_buffer);
        ctx.delete_shader(self.shader);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_cover_every_group_back_to_back() {
        let unit = WallUnit::compile(0.25, 2).expect("valid unit");
        let (indices, spans) = build_indices(&unit).expect("fits in u16");

        let mut expected_start = 0;
        for (group, ranges) in unit.groups() {
            let span = spans[group as usize];
            let triangles: usize = ranges
                .iter()
                .map(|range| range.triangle_count())
                .sum();

            assert_eq!(span.start, expected_start, "{group} is not contiguous");
            assert_eq!(span.count as usize, 3 * triangles);
            assert!(span.count > 0);
            expected_start += span.count;
        }

        assert_eq!(expected_start as usize, indices.len());
        assert!(indices.iter().all(|&i| (i as usize) < unit.vertex_count()));
    }

    #[test]
    fn test_indices_stay_inside_their_group() {
        let unit = WallUnit::compile(0.2, 3).expect("valid unit");
        let (indices, spans) = build_indices(&unit).expect("fits in u16");

        for (group, ranges) in unit.groups() {
            let span = spans[group as usize];
            let slice = &indices[span.start as usize..(span.start + span.count) as usize];
            for &index in slice {
                let index = index as usize;
                assert!(
                    ranges
                        .iter()
                        .any(|range| (range.offset..range.end()).contains(&index)),
                    "index {index} of {group} falls outside its ranges"
                );
            }
        }
    }
}
