//! Fixed orthographic projection for 2D scenes.
//!
//! World space is measured in pixels of the configured logical size with the origin at
//! the bottom-left corner of the window. The projection is uploaded once at start-up.

use wgpu::util::DeviceExt;

use crate::pipelines::sprite::mk_uniform_bind_group;

// cgmath produces OpenGL clip space (z in [-1, 1]), WGPU expects z in [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub width: f32,
    pub height: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            near: -1.0,
            far: 1.0,
        }
    }

    pub fn calc_matrix(&self) -> cgmath::Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX
            * cgmath::ortho(0.0, self.width, 0.0, self.height, self.near, self.far)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProjectionUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl From<&Projection> for ProjectionUniform {
    fn from(projection: &Projection) -> Self {
        Self {
            view_proj: projection.calc_matrix().into(),
        }
    }
}

/// Projection together with its GPU buffer and bind group (group 1 of the sprite pipeline).
#[derive(Debug)]
pub struct ProjectionResources {
    pub projection: Projection,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ProjectionResources {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        projection: Projection,
    ) -> Self {
        let uniform = ProjectionUniform::from(&projection);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Projection Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = mk_uniform_bind_group(device, &buffer, layout, "projection_bind_group");
        Self {
            projection,
            buffer,
            bind_group,
        }
    }

    /// Replace the projection, e.g. from an `Out::Configure` hook.
    pub fn set(&mut self, queue: &wgpu::Queue, projection: Projection) {
        self.projection = projection;
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[ProjectionUniform::from(&projection)]),
        );
    }
}
