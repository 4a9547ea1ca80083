use std::time::Duration;

use sprite_ngin::{
    GraphicsFlow, Out, Sprite, WindowEvent,
    camera::{Projection, ProjectionResources},
    context::{Context, InitContext},
    data_structures::texture::Texture,
    pipelines::sprite::mk_sprite_pipeline,
    render::{Render, draw_renders},
};

/// Offscreen target with the same pipeline setup a window would get.
pub(crate) struct Headless {
    pub(crate) ctx: InitContext,
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) projection: ProjectionResources,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Headless {
    /// `width * 4` has to be a multiple of 256 for the readback copy.
    pub(crate) async fn new(width: u32, height: u32) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
            .expect("No GPU adapter available for integration tests.");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .expect("Failed to create a device for integration tests.");
        let ctx = InitContext::new(device, queue);
        let pipeline = mk_sprite_pipeline(&ctx.device, Texture::FORMAT, &ctx.layouts).await;
        let projection = ProjectionResources::new(
            &ctx.device,
            &ctx.layouts.projection,
            Projection::new(width, height),
        );
        Self {
            ctx,
            pipeline,
            projection,
            width,
            height,
        }
    }

    /// Draw `renders` over `clear` and read the frame back. Row 0 is the top of the image.
    pub(crate) async fn render(
        &self,
        flows: &[&dyn GraphicsFlow],
        clear: wgpu::Color,
    ) -> image::RgbaImage {
        let extent = wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        };
        let target = self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("test target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Texture::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("test pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            draw_renders(
                &mut render_pass,
                &self.pipeline,
                &self.projection.bind_group,
                flows.iter().map(|flow| flow.on_render()),
            );
        }

        let u32_size = std::mem::size_of::<u32>() as u32;
        let output_buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
            size: (u32_size * self.width * self.height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            label: None,
            mapped_at_creation: false,
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(u32_size * self.width),
                    rows_per_image: Some(self.height),
                },
            },
            extent,
        );
        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).unwrap();
        });
        self.ctx
            .device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(Duration::from_secs(3)),
            })
            .unwrap();
        rx.receive().await.unwrap().unwrap();
        let data = buffer_slice.get_mapped_range().to_vec();
        output_buffer.unmap();
        image::RgbaImage::from_raw(self.width, self.height, data).unwrap()
    }
}

pub(crate) fn rgba(colour: wgpu::Color) -> image::Rgba<u8> {
    let f_to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    image::Rgba([
        f_to_u8(colour.r),
        f_to_u8(colour.g),
        f_to_u8(colour.b),
        f_to_u8(colour.a),
    ])
}

/// A `width` by `height` image split into equally wide vertical bands of the given colours.
pub(crate) fn bands(width: u32, height: u32, colours: &[[u8; 4]]) -> image::DynamicImage {
    let band = width / colours.len() as u32;
    let img = image::RgbaImage::from_fn(width, height, |x, _| {
        let idx = ((x / band) as usize).min(colours.len() - 1);
        image::Rgba(colours[idx])
    });
    image::DynamicImage::ImageRgba8(img)
}

/// Draws a fixed list of sprites, back to front.
pub(crate) struct Layer<'a>(pub(crate) Vec<&'a Sprite>);

impl GraphicsFlow for Layer<'_> {
    fn on_init(&mut self, _: &mut Context) -> Out {
        Out::Empty
    }

    fn on_update(&mut self, _: &Context, _: Duration) -> Out {
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, _: &WindowEvent) -> Out {
        Out::Empty
    }

    fn on_render(&self) -> Render<'_> {
        Render::Sprites(self.0.iter().map(|sprite| sprite.flat()).collect())
    }
}

/// Draws each group as its own layer through [`Render::Composed`].
pub(crate) struct Stacked<'a>(pub(crate) Vec<Vec<&'a Sprite>>);

impl GraphicsFlow for Stacked<'_> {
    fn on_init(&mut self, _: &mut Context) -> Out {
        Out::Empty
    }

    fn on_update(&mut self, _: &Context, _: Duration) -> Out {
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, _: &WindowEvent) -> Out {
        Out::Empty
    }

    fn on_render(&self) -> Render<'_> {
        Render::Composed(
            self.0
                .iter()
                .map(|group| Render::Sprites(group.iter().map(|sprite| sprite.flat()).collect()))
                .collect(),
        )
    }
}
