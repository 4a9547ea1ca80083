//! Sprites: textured quads with a transform, a sprite-sheet frame and a behaviour.
//!
//! A [`Sprite`] is split in two halves:
//! - [`SpriteState`] holds everything the CPU decides (placement, frame, scroll, animation).
//!   It does not touch the GPU and can be created and updated anywhere.
//! - [`SpriteResource`] owns the texture, quad buffers and bind groups on the GPU. They are
//!   released when the resource is dropped.
//!
//! [`Sprite::write_to_buffer`](crate::context::BufferWriter::write_to_buffer) uploads the
//! state's uniform once per frame.

use cgmath::{Vector2, Vector3, Zero};
use wgpu::util::DeviceExt;

use crate::{
    context::{BufferWriter, InitContext},
    data_structures::{
        animation::{Behaviour, Character},
        quad::QuadMesh,
        sprite_sheet::SpriteSheet,
        texture::Texture,
        transform::Transform,
    },
    pipelines::sprite::{SpriteUniform, mk_texture_bind_group, mk_uniform_bind_group},
    render::Flat,
    resources::texture::load_texture,
};

/// CPU side of a sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteState {
    pub transform: Transform,
    pub behaviour: Behaviour,
    sheet: SpriteSheet,
    frame_index: u32,
    scroll_offset: Vector2<f32>,
}

impl SpriteState {
    /// A static sprite with a single-cell sheet at the origin.
    pub fn new() -> Self {
        Self {
            transform: Transform::new(),
            behaviour: Behaviour::Static,
            sheet: SpriteSheet::SINGLE,
            frame_index: 0,
            scroll_offset: Vector2::zero(),
        }
    }

    pub fn with_behaviour(mut self, behaviour: Behaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    /// Shortcut for a velocity-driven sprite with default animation settings.
    pub fn character() -> Self {
        Self::new().with_behaviour(Behaviour::VelocityDriven(Character::new()))
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.transform.scale = scale;
    }

    pub fn set_translate(&mut self, translate: Vector3<f32>) {
        self.transform.translate = translate;
    }

    /// Replace the sheet grid. The frame index is kept as is.
    ///
    /// Velocity-driven sprites only accept sheets their walk cycle fits on.
    pub fn set_sprite_sheet(&mut self, columns: u32, rows: u32) -> anyhow::Result<()> {
        let sheet = SpriteSheet::new(columns, rows)?;
        if let Some(character) = self.behaviour.character() {
            character.check_sheet(&sheet)?;
        }
        self.sheet = sheet;
        Ok(())
    }

    pub fn sprite_sheet(&self) -> SpriteSheet {
        self.sheet
    }

    /// Indices past the end of the sheet are not rejected; they sample outside the texture.
    pub fn set_frame_index(&mut self, frame_index: u32) {
        if frame_index >= self.sheet.frame_count() {
            log::debug!(
                "frame {} is outside the {}x{} sheet",
                frame_index,
                self.sheet.columns(),
                self.sheet.rows()
            );
        }
        self.frame_index = frame_index;
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn set_scroll_offset(&mut self, scroll_offset: Vector2<f32>) {
        self.scroll_offset = scroll_offset;
    }

    pub fn scroll_offset(&self) -> Vector2<f32> {
        self.scroll_offset
    }

    /// Velocity of a velocity-driven sprite, `None` for static ones.
    pub fn velocity(&self) -> Option<Vector3<f32>> {
        self.behaviour.character().map(|character| character.velocity)
    }

    /// Returns `false` and leaves the sprite untouched if it is static.
    pub fn set_velocity(&mut self, velocity: Vector3<f32>) -> bool {
        match self.behaviour.character_mut() {
            Some(character) => {
                character.velocity = velocity;
                true
            }
            None => {
                log::warn!("velocity ignored, the sprite is static");
                false
            }
        }
    }

    /// Advance the behaviour by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.behaviour.update(
            dt,
            &self.sheet,
            &mut self.frame_index,
            &mut self.transform.translate,
        );
    }

    pub fn model_matrix(&self) -> cgmath::Matrix4<f32> {
        self.transform.to_matrix()
    }

    /// Snapshot of the shader inputs. Calling it twice without changes yields equal values.
    pub fn to_uniform(&self) -> SpriteUniform {
        SpriteUniform {
            model: self.model_matrix().into(),
            sheet_size: [self.sheet.columns() as i32, self.sheet.rows() as i32],
            frame_index: self.frame_index as i32,
            _padding: 0,
            scroll_offset: self.scroll_offset.into(),
            _padding2: [0.0; 2],
        }
    }

    /// Whether a world-space point lies inside the sprite's quad. Edges count as inside.
    pub fn contains(&self, point: Vector2<f32>) -> bool {
        let (min, max) = self.transform.bounds();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

impl Default for SpriteState {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<SpriteState> for SpriteState {
    fn as_ref(&self) -> &SpriteState {
        self
    }
}

impl AsMut<SpriteState> for SpriteState {
    fn as_mut(&mut self) -> &mut SpriteState {
        self
    }
}

/// GPU side of a sprite.
#[derive(Debug)]
pub struct SpriteResource {
    pub texture: Texture,
    pub texture_bind_group: wgpu::BindGroup,
    pub mesh: QuadMesh,
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,
    label: String,
}

impl SpriteResource {
    pub fn new(ctx: &InitContext, texture: Texture, state: &SpriteState, label: &str) -> Self {
        let texture_bind_group =
            mk_texture_bind_group(&ctx.device, &texture, &ctx.layouts.texture);
        let mesh = QuadMesh::new(&ctx.device, label);
        let uniform_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{:?} Sprite Buffer", label)),
                contents: bytemuck::cast_slice(&[state.to_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let uniform_bind_group = mk_uniform_bind_group(
            &ctx.device,
            &uniform_buffer,
            &ctx.layouts.sprite,
            "sprite_bind_group",
        );
        Self {
            texture,
            texture_bind_group,
            mesh,
            uniform_buffer,
            uniform_bind_group,
            label: label.to_string(),
        }
    }
}

impl Drop for SpriteResource {
    fn drop(&mut self) {
        self.texture.texture.destroy();
        self.mesh.vertex_buffer.destroy();
        self.mesh.index_buffer.destroy();
        self.uniform_buffer.destroy();
        log::debug!("released GPU resources of sprite {}", self.label);
    }
}

/// A drawable sprite.
#[derive(Debug)]
pub struct Sprite {
    pub state: SpriteState,
    resource: SpriteResource,
}

impl Sprite {
    /// Load `file_name` from the assets directory.
    ///
    /// A missing or undecodable image is logged and replaced with a transparent texture,
    /// the sprite is still created.
    pub async fn new(ctx: &InitContext, file_name: &str) -> Self {
        let texture = match load_texture(file_name, &ctx.device, &ctx.queue).await {
            Ok(texture) => texture,
            Err(e) => {
                log::error!("Could not load sprite texture {}: {}", file_name, e);
                Texture::empty(&ctx.device, &ctx.queue, file_name)
            }
        };
        Self::from_texture(ctx, texture, file_name)
    }

    /// Build a sprite from an image already in memory. Failures fall back like [`Sprite::new`].
    pub fn from_image(ctx: &InitContext, img: &image::DynamicImage, label: &str) -> Self {
        let texture = match Texture::from_image(&ctx.device, &ctx.queue, img, Some(label)) {
            Ok(texture) => texture,
            Err(e) => {
                log::error!("Could not create sprite texture {}: {}", label, e);
                Texture::empty(&ctx.device, &ctx.queue, label)
            }
        };
        Self::from_texture(ctx, texture, label)
    }

    pub fn from_texture(ctx: &InitContext, texture: Texture, label: &str) -> Self {
        let state = SpriteState::new();
        let resource = SpriteResource::new(ctx, texture, &state, label);
        Self { state, resource }
    }

    pub fn with_behaviour(mut self, behaviour: Behaviour) -> Self {
        self.state.behaviour = behaviour;
        self
    }

    pub fn resource(&self) -> &SpriteResource {
        &self.resource
    }

    pub fn update(&mut self, dt: f32) {
        self.state.update(dt);
    }

    pub fn flat(&self) -> Flat<'_> {
        Flat {
            vertex: &self.resource.mesh.vertex_buffer,
            index: &self.resource.mesh.index_buffer,
            group: &self.resource.texture_bind_group,
            uniform: &self.resource.uniform_bind_group,
            amount: self.resource.mesh.num_indices,
        }
    }

    /// Record the draw into a pass that already has the sprite pipeline and projection bound.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        self.flat().draw(render_pass);
    }
}

impl BufferWriter for Sprite {
    fn write_to_buffer(&mut self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.resource.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.state.to_uniform()]),
        );
    }
}

impl AsRef<SpriteState> for Sprite {
    fn as_ref(&self) -> &SpriteState {
        &self.state
    }
}

impl AsMut<SpriteState> for Sprite {
    fn as_mut(&mut self) -> &mut SpriteState {
        &mut self.state
    }
}
