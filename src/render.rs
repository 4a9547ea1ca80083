//! Render composition.
//!
//! This module defines the [`Render`] enum, which flows return each frame to describe
//! what should be drawn. The engine flattens all renders into a single list of sprite
//! draws, keeping the order in which they were returned: earlier sprites end up behind
//! later ones.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the primary enum describing render operations
//! - [`Flat<'a>`] contains the GPU handles of one textured quad
//!

use wgpu::RenderPass;

/// GPU handles needed to draw one sprite: quad buffers and its two bind groups.
#[derive(Clone, Copy)]
pub struct Flat<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub index: &'a wgpu::Buffer,
    /// Texture and sampler (group 0).
    pub group: &'a wgpu::BindGroup,
    /// Per-sprite uniforms (group 2).
    pub uniform: &'a wgpu::BindGroup,
    pub amount: u32,
}

impl<'a> Flat<'a> {
    /// Issue the indexed draw. Pipeline and projection (group 1) must already be bound.
    pub fn draw(&self, render_pass: &mut RenderPass<'_>) {
        render_pass.set_bind_group(0, self.group, &[]);
        render_pass.set_bind_group(2, self.uniform, &[]);
        render_pass.set_vertex_buffer(0, self.vertex.slice(..));
        render_pass.set_index_buffer(self.index.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.amount, 0, 0..1);
    }
}

/// Specifies how a flow should be rendered.
///
/// - `Sprites(Vec<Flat>)` renders sprites back to front in the given order
/// - `Composed(Vec<Render>)` renders its parts one after the other, so a flow can stack
///   several layers
pub enum Render<'a> {
    Sprites(Vec<Flat<'a>>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /// Flatten `self` into `flats`, preserving order.
    pub(crate) fn collect(self, flats: &mut Vec<Flat<'a>>) {
        match self {
            Render::Sprites(mut vec) => flats.append(&mut vec),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.collect(flats)),
        }
    }
}

/// Draw all renders with the sprite pipeline.
///
/// The projection bind group is shared by every sprite and bound once.
pub fn draw_renders<'a>(
    render_pass: &mut RenderPass<'_>,
    pipeline: &wgpu::RenderPipeline,
    projection: &wgpu::BindGroup,
    renders: impl IntoIterator<Item = Render<'a>>,
) {
    let mut flats: Vec<Flat> = Vec::new();
    renders
        .into_iter()
        .for_each(|render| render.collect(&mut flats));

    render_pass.set_pipeline(pipeline);
    render_pass.set_bind_group(1, projection, &[]);
    for flat in flats {
        if flat.amount == 0 {
            log::warn!("you attempted to render a sprite without indices");
            continue;
        }
        flat.draw(render_pass);
    }
}
