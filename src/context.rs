use std::sync::Arc;

use cgmath::Vector2;
use winit::{dpi::PhysicalPosition, window::Window};

use crate::{
    camera::{Projection, ProjectionResources},
    config::Config,
    input::{KeyBindings, screen_to_world},
    pipelines::sprite::{SpriteLayouts, mk_sprite_pipeline},
};

/// Window, GPU device and everything shared by all sprites.
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub layouts: SpriteLayouts,
    pub pipeline: wgpu::RenderPipeline,
    pub projection: ProjectionResources,
    pub clear_colour: wgpu::Color,
    pub key_bindings: KeyBindings,
    /// Last known cursor position in window coordinates.
    pub cursor: PhysicalPosition<f64>,
}

impl Context {
    pub async fn new(window: Arc<Window>, settings: &Config) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Sprite textures are sRGB, an sRGB surface keeps colours unchanged.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("the surface is not supported by the adapter"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            // Vsync. Fifo is the one mode every backend has to support.
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let layouts = SpriteLayouts::new(&device);
        let pipeline = mk_sprite_pipeline(&device, config.format, &layouts).await;
        let projection = ProjectionResources::new(
            &device,
            &layouts.projection,
            Projection::new(settings.width, settings.height),
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            layouts,
            pipeline,
            projection,
            clear_colour: settings.clear_colour,
            key_bindings: settings.key_bindings.clone(),
            cursor: PhysicalPosition::new(0.0, 0.0),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The cursor position in world space.
    pub fn cursor_world(&self) -> Vector2<f32> {
        screen_to_world(
            self.cursor,
            self.window.inner_size(),
            &self.projection.projection,
        )
    }
}

/// Handles a flow constructor needs to create GPU resources, without access to the window.
#[derive(Debug, Clone)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub layouts: SpriteLayouts,
}

impl InitContext {
    /// Used for rendering without a window.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        let layouts = SpriteLayouts::new(&device);
        Self {
            device,
            queue,
            layouts,
        }
    }
}

impl From<&Context> for InitContext {
    fn from(value: &Context) -> Self {
        // Device, queue and layouts are reference counted, cloning only copies the handles.
        Self {
            device: value.device.clone(),
            queue: value.queue.clone(),
            layouts: value.layouts.clone(),
        }
    }
}

/// Types that keep a CPU copy of GPU buffer contents and upload it on demand.
pub trait BufferWriter {
    fn write_to_buffer(&mut self, queue: &wgpu::Queue);
}
