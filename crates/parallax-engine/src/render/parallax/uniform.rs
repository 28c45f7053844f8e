use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Uniform block shared by both shader stages.
///
/// Layout matches `struct Parallax` in `parallax.wgsl` (80 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParallaxUniform {
    pub view_proj: [[f32; 4]; 4],
    /// `(tiltX, tiltY)`.
    pub tilt: [f32; 2],
    pub strength: f32,
    pub _pad: f32, // 16-byte alignment
}

impl ParallaxUniform {
    pub fn new(view_proj: Mat4, tilt: [f32; 2], strength: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            tilt,
            strength,
            _pad: 0.0,
        }
    }

    /// Minimum binding size for the uniform buffer.
    pub(crate) fn binding_size() -> Option<wgpu::BufferSize> {
        wgpu::BufferSize::new(std::mem::size_of::<Self>() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<ParallaxUniform>(), 80);
        assert!(ParallaxUniform::binding_size().is_some());
    }

    #[test]
    fn matrix_is_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let u = ParallaxUniform::new(m, [0.0, 0.0], 0.0);
        assert_eq!(u.view_proj[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
