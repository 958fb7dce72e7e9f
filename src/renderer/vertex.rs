//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Playfield-space vertex: pixel position plus linear RGBA
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements (linear RGBA)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.098, 0.137, 0.255, 1.0]; // Night blue
    pub const PIPE_BODY: [f32; 4] = [0.165, 0.545, 0.545, 1.0];
    pub const PIPE_EDGE: [f32; 4] = [0.102, 0.302, 0.302, 1.0];
    pub const PIPE_RIM: [f32; 4] = [0.247, 0.8, 0.8, 1.0];
    pub const BIRD_BODY: [f32; 4] = [0.98, 0.8, 0.08, 1.0];
    pub const BIRD_WING: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const BIRD_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BIRD_PUPIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BIRD_BEAK: [f32; 4] = [0.976, 0.451, 0.086, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
    }
}
