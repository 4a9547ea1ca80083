//! The unit quad every sprite is drawn with.

use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    // Not read by the sprite shader, kept so vertex colours can be added without a new layout.
    pub color: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl QuadVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Unit square centred on the origin. UV `(0, 0)` is the bottom-left corner.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [0.5, 0.5, 0.0],
        color: [0.0, 0.0, 0.0],
        tex_coords: [1.0, 1.0],
    },
    QuadVertex {
        position: [-0.5, -0.5, 0.0],
        color: [0.0, 0.0, 0.0],
        tex_coords: [0.0, 0.0],
    },
    QuadVertex {
        position: [0.5, -0.5, 0.0],
        color: [0.0, 0.0, 0.0],
        tex_coords: [1.0, 0.0],
    },
    QuadVertex {
        position: [-0.5, 0.5, 0.0],
        color: [0.0, 0.0, 0.0],
        tex_coords: [0.0, 1.0],
    },
];

/// Two counter-clockwise triangles.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 3, 1];

/// Vertex and index buffers of the unit quad on the GPU.
#[derive(Debug)]
pub struct QuadMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl QuadMesh {
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", label)),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: QUAD_INDICES.len() as u32,
        }
    }
}
