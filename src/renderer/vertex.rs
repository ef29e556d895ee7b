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
pub mod colors {
    use crate::{Rgba, hex};

    // Surface sky-to-sea gradient
    pub const SURFACE_TOP: Rgba = hex(0x87CEEB, 1.0);
    pub const SURFACE_MID: Rgba = hex(0x4682B4, 1.0);
    pub const SURFACE_BOTTOM: Rgba = hex(0x1E3A5F, 1.0);

    // Deep water gradient
    pub const UNDERWATER_TOP: Rgba = hex(0x001F3F, 1.0);
    pub const UNDERWATER_MID: Rgba = hex(0x003366, 1.0);
    pub const UNDERWATER_BOTTOM: Rgba = hex(0x000D1A, 1.0);

    pub const WAVE_SURFACE: Rgba = [1.0, 1.0, 1.0, 0.3];
    pub const WAVE_UNDERWATER: Rgba = [0.0, 100.0 / 255.0, 200.0 / 255.0, 0.2];

    pub const LAUNCHER_BASE: Rgba = hex(0x333333, 1.0);
    pub const READY: Rgba = hex(0x4CAF50, 1.0);
    pub const RELOADING: Rgba = hex(0xF44336, 1.0);
    pub const RELOAD_RING: Rgba = [1.0, 1.0, 1.0, 0.8];

    pub const HEALTH_HIGH: Rgba = hex(0x4CAF50, 1.0);
    pub const HEALTH_MID: Rgba = hex(0xFFC107, 1.0);
    pub const HEALTH_LOW: Rgba = hex(0xF44336, 1.0);
    pub const HEALTH_BACK: Rgba = [1.0, 0.0, 0.0, 0.5];

    // Ship superstructure
    pub const CABIN: Rgba = hex(0x555555, 1.0);
    pub const FUNNEL: Rgba = hex(0x888888, 1.0);
    // Submarine details
    pub const CONNING_TOWER: Rgba = hex(0x000080, 1.0);
    pub const PERISCOPE: Rgba = hex(0x666666, 1.0);

    pub const MISSILE_BODY: Rgba = hex(0xFF4500, 1.0);
    pub const MISSILE_TIP: Rgba = hex(0xFFD700, 1.0);
    pub const MISSILE_FIN: Rgba = hex(0x8B0000, 1.0);
    pub const TRAIL: Rgba = [1.0, 100.0 / 255.0, 0.0, 0.5];

    // Explosion radial stops, inside out
    pub const BLAST_CORE: Rgba = [1.0, 1.0, 0.0, 1.0];
    pub const BLAST_INNER: Rgba = [1.0, 100.0 / 255.0, 0.0, 0.8];
    pub const BLAST_OUTER: Rgba = [1.0, 0.0, 0.0, 0.4];
    pub const BLAST_EDGE: Rgba = [0.0, 0.0, 0.0, 0.0];
}
