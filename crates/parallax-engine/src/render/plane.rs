use bytemuck::{Pod, Zeroable};

/// Vertex of the textured plane.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    /// Bottom-left origin, +V up.
    pub uv: [f32; 2],
}

impl PlaneVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Reference width of the plane in world units; height follows the photo.
pub const PLANE_WIDTH: f32 = 2.0;

/// A single quad in the XY plane, centered on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
    pub vertices: [PlaneVertex; 4],
    pub indices: [u16; 6],
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self {
            width,
            height,
            vertices: [
                PlaneVertex { position: [-hw, -hh, 0.0], uv: [0.0, 0.0] },
                PlaneVertex { position: [hw, -hh, 0.0], uv: [1.0, 0.0] },
                PlaneVertex { position: [hw, hh, 0.0], uv: [1.0, 1.0] },
                PlaneVertex { position: [-hw, hh, 0.0], uv: [0.0, 1.0] },
            ],
            indices: [0, 1, 2, 0, 2, 3],
        }
    }

    /// Plane of [`PLANE_WIDTH`] whose height matches an image aspect ratio.
    pub fn for_aspect(aspect: f32) -> Self {
        Self::new(PLANE_WIDTH, PLANE_WIDTH / aspect)
    }
}
