use crate::data_structures::{quad::QuadVertex, texture::Texture};

/// Per-sprite shader inputs, one uniform buffer per sprite.
///
/// Layout matches `SpriteUniform` in `sprite.wgsl` (96 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteUniform {
    pub model: [[f32; 4]; 4],
    pub sheet_size: [i32; 2],
    pub frame_index: i32,
    // Uniforms need 16 byte alignment for the vec2 below.
    pub _padding: i32,
    pub scroll_offset: [f32; 2],
    pub _padding2: [f32; 2],
}

/// Bind group layouts shared by every sprite.
///
/// - group 0: sprite texture and sampler
/// - group 1: projection
/// - group 2: per-sprite [`SpriteUniform`]
#[derive(Clone, Debug)]
pub struct SpriteLayouts {
    pub texture: wgpu::BindGroupLayout,
    pub projection: wgpu::BindGroupLayout,
    pub sprite: wgpu::BindGroupLayout,
}

impl SpriteLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            texture: mk_texture_bind_group_layout(device),
            projection: mk_uniform_bind_group_layout(device, "projection_bind_group_layout"),
            sprite: mk_uniform_bind_group_layout(device, "sprite_bind_group_layout"),
        }
    }
}

fn mk_texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("sprite_texture_bind_group_layout"),
    })
}

fn mk_uniform_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

pub fn mk_texture_bind_group(
    device: &wgpu::Device,
    texture: &Texture,
    layout: &wgpu::BindGroupLayout,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
        label: Some("sprite_texture_bind_group"),
    })
}

pub fn mk_uniform_bind_group(
    device: &wgpu::Device,
    buffer: &wgpu::Buffer,
    layout: &wgpu::BindGroupLayout,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some(label),
    })
}

fn mk_render_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    render_pipeline_layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Sprite Render Pipeline"),
        layout: Some(render_pipeline_layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[QuadVertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Negative scales mirror a sprite, which flips the winding.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        // Draw order is the painter's order of the scene, no depth test.
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

/// Build the sprite pipeline for the given colour target.
///
/// Shader and pipeline validation errors are logged instead of aborting: the pipeline
/// handle stays usable for recording, it just renders nothing.
pub async fn mk_sprite_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    layouts: &SpriteLayouts,
) -> wgpu::RenderPipeline {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Sprite Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("sprite.wgsl").into()),
    });
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Sprite Render Pipeline Layout"),
        bind_group_layouts: &[&layouts.texture, &layouts.projection, &layouts.sprite],
        push_constant_ranges: &[],
    });
    let pipeline = mk_render_pipeline(device, color_format, &render_pipeline_layout, &shader);

    if let Some(error) = device.pop_error_scope().await {
        log::error!("Sprite pipeline failed validation, sprites will not render: {}", error);
    }
    pipeline
}
