//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub platform: [f32; 4],
    pub spring: [f32; 4],
    pub coin: [f32; 4],
    pub goal: [f32; 4],
    pub actor: [f32; 4],
    pub eye: [f32; 4],
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        background: [0.53, 0.75, 0.92, 1.0],
        platform: [0.35, 0.25, 0.18, 1.0],
        spring: [0.95, 0.35, 0.55, 1.0],
        coin: [1.0, 0.82, 0.2, 1.0],
        goal: [0.3, 0.85, 0.4, 0.6],
        actor: [0.2, 0.3, 0.8, 1.0],
        eye: [1.0, 1.0, 1.0, 1.0],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        platform: [1.0, 1.0, 1.0, 1.0],
        spring: [1.0, 0.0, 1.0, 1.0],
        coin: [1.0, 1.0, 0.0, 1.0],
        goal: [0.0, 1.0, 0.0, 0.8],
        actor: [0.0, 0.8, 1.0, 1.0],
        eye: [0.0, 0.0, 0.0, 1.0],
    };

    pub fn for_settings(settings: &crate::Settings) -> Self {
        if settings.high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::STANDARD
        }
    }
}
