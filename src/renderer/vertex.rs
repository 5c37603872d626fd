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
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const WALL: [f32; 4] = [0.118, 0.161, 0.231, 1.0];
    pub const GRID_LINE: [f32; 4] = [1.0, 1.0, 1.0, 0.03];
    pub const PLAYER: [f32; 4] = [0.231, 0.51, 0.965, 1.0];
    pub const PLAYER_WINDSHIELD: [f32; 4] = [0.576, 0.773, 0.992, 1.0];
    pub const ENEMY: [f32; 4] = [0.937, 0.267, 0.267, 1.0];
    pub const ENEMY_STUNNED: [f32; 4] = [0.392, 0.455, 0.545, 1.0];
    pub const WHEEL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const FLAG: [f32; 4] = [0.937, 0.267, 0.267, 1.0];
    pub const FLAG_POLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const FUEL_CAN: [f32; 4] = [0.984, 0.749, 0.141, 1.0];
    pub const SMOKE_CAN: [f32; 4] = [0.58, 0.639, 0.722, 1.0];
    pub const ITEM_MARK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Smoke cloud base color; alpha is scaled by remaining lifetime
    pub const SMOKE: [f32; 3] = [0.863, 0.863, 0.863];
    pub const SMOKE_MAX_ALPHA: f32 = 0.6;

    /// Road shade: lower ground greener, higher ground browner
    pub fn road(elevation: f32) -> [f32; 4] {
        let shade = (elevation * 100.0).floor();
        [
            (40.0 + shade) / 255.0,
            (120.0 - shade / 2.0) / 255.0,
            40.0 / 255.0,
            1.0,
        ]
    }
}
