use glam::{Mat4, Vec3};

use crate::coords::Viewport;

/// Fixed perspective camera looking at the origin.
///
/// Only the aspect ratio changes at runtime (window resize); field of view,
/// clip planes and placement stay as constructed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
        }
    }
}

impl PerspectiveCamera {
    /// Updates the aspect ratio from a viewport.
    ///
    /// Degenerate viewports (minimized window) keep the previous aspect.
    /// Returns `true` when the aspect changed.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        match viewport.aspect() {
            Some(aspect) if aspect != self.aspect => {
                self.aspect = aspect;
                true
            }
            _ => false,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Projection with a `[0, 1]` depth range, as wgpu expects.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn ndc(cam: &PerspectiveCamera, p: Vec3) -> Vec3 {
        let clip = cam.view_proj() * Vec4::new(p.x, p.y, p.z, 1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn origin_projects_to_center() {
        let cam = PerspectiveCamera::default();
        let p = ndc(&cam, Vec3::ZERO);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
        assert!((0.0..=1.0).contains(&p.z));
    }

    #[test]
    fn half_fov_reaches_top_edge() {
        let cam = PerspectiveCamera::default();
        let half_height = 2.0 * (37.5f32).to_radians().tan();
        let p = ndc(&cam, Vec3::new(0.0, half_height, 0.0));
        assert!((p.y - 1.0).abs() < 1e-4, "got {}", p.y);
    }

    #[test]
    fn wider_aspect_shrinks_horizontal_extent() {
        let mut cam = PerspectiveCamera::default();
        let before = ndc(&cam, Vec3::new(1.0, 0.0, 0.0)).x;
        assert!(cam.set_viewport(Viewport::new(200.0, 100.0)));
        let after = ndc(&cam, Vec3::new(1.0, 0.0, 0.0)).x;
        assert!((after - before / 2.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_viewport_keeps_aspect() {
        let mut cam = PerspectiveCamera::default();
        cam.set_viewport(Viewport::new(300.0, 100.0));
        assert!(!cam.set_viewport(Viewport::new(0.0, 0.0)));
        assert_eq!(cam.aspect, 3.0);
    }
}
