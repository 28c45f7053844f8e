//! Scene state: camera, textures, and the plane built once both textures exist.

use std::fmt;

use parallax_engine::coords::Viewport;
use parallax_engine::render::{
    ImageData, ParallaxDraw, ParallaxUniform, PerspectiveCamera, PlaneGeometry,
};

use crate::tilt::Tilt;

/// Which of the two textures a load belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureSlot {
    Photo,
    DepthMap,
}

impl fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureSlot::Photo => f.write_str("photo"),
            TextureSlot::DepthMap => f.write_str("depth map"),
        }
    }
}

/// Camera, textures and plane for the parallax view.
///
/// The plane is constructed exactly once, on the first completion that leaves
/// both texture slots filled. Completions after that are ignored.
#[derive(Debug)]
pub struct ParallaxScene {
    camera: PerspectiveCamera,
    viewport: Viewport,
    strength: f32,

    photo: Option<ImageData>,
    depth: Option<ImageData>,
    plane: Option<PlaneGeometry>,

    /// Bumped when the plane is constructed; drives GPU re-upload.
    generation: u64,
}

impl ParallaxScene {
    pub fn new(strength: f32) -> Self {
        Self {
            camera: PerspectiveCamera::default(),
            viewport: Viewport::default(),
            strength,
            photo: None,
            depth: None,
            plane: None,
            generation: 0,
        }
    }

    #[inline]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn strength(&self) -> f32 {
        self.strength
    }

    #[inline]
    pub fn plane(&self) -> Option<&PlaneGeometry> {
        self.plane.as_ref()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once the plane exists.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.plane.is_some()
    }

    /// Records a finished load and tries to construct the plane.
    ///
    /// A slot is filled at most once. Returns `true` only for the call that
    /// constructed the plane.
    pub fn set_texture(&mut self, slot: TextureSlot, image: ImageData) -> bool {
        let target = match slot {
            TextureSlot::Photo => &mut self.photo,
            TextureSlot::DepthMap => &mut self.depth,
        };

        if target.is_some() {
            log::warn!("{slot} already loaded; ignoring duplicate completion");
            return false;
        }
        *target = Some(image);

        self.try_build_plane()
    }

    fn try_build_plane(&mut self) -> bool {
        if self.plane.is_some() {
            return false;
        }
        let (Some(photo), Some(_)) = (self.photo.as_ref(), self.depth.as_ref()) else {
            return false;
        };

        let plane = PlaneGeometry::for_aspect(photo.aspect());
        log::debug!(
            "constructing parallax plane {:.3}x{:.3} (photo {}x{})",
            plane.width,
            plane.height,
            photo.width(),
            photo.height()
        );

        self.plane = Some(plane);
        self.generation += 1;
        true
    }

    /// Tracks the window size. Updates the camera aspect only; geometry and
    /// tilt/strength uniforms are untouched.
    ///
    /// Returns `true` when the viewport changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        if self.camera.set_viewport(viewport) {
            log::debug!("camera aspect now {:.4}", self.camera.aspect);
        }
        true
    }

    /// Uniform block for the current camera and `tilt`.
    pub fn uniform(&self, tilt: Tilt) -> ParallaxUniform {
        ParallaxUniform::new(self.camera.view_proj(), tilt.to_array(), self.strength)
    }

    /// Draw description for this frame, or `None` while textures are loading.
    pub fn draw(&self, tilt: Tilt) -> Option<ParallaxDraw<'_>> {
        let plane = self.plane.as_ref()?;
        let photo = self.photo.as_ref()?;
        let depth = self.depth.as_ref()?;
        Some(ParallaxDraw {
            generation: self.generation,
            plane,
            photo,
            depth,
            uniform: self.uniform(tilt),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_engine::render::PixelFormat;

    fn photo(w: u32, h: u32) -> ImageData {
        ImageData::new(w, h, PixelFormat::Rgba8Srgb, vec![128; (w * h * 4) as usize]).unwrap()
    }

    fn depth(w: u32, h: u32) -> ImageData {
        ImageData::new(w, h, PixelFormat::R8, vec![64; (w * h) as usize]).unwrap()
    }

    // ── join barrier ──────────────────────────────────────────────────────

    #[test]
    fn plane_waits_for_both_textures() {
        let mut scene = ParallaxScene::new(0.0005);
        assert!(!scene.set_texture(TextureSlot::Photo, photo(4, 2)));
        assert!(!scene.is_ready());
        assert!(scene.draw(Tilt::default()).is_none());

        assert!(scene.set_texture(TextureSlot::DepthMap, depth(4, 2)));
        assert!(scene.is_ready());
        assert!(scene.draw(Tilt::default()).is_some());
    }

    #[test]
    fn completion_order_does_not_matter() {
        let mut scene = ParallaxScene::new(0.0005);
        assert!(!scene.set_texture(TextureSlot::DepthMap, depth(2, 2)));
        assert!(scene.set_texture(TextureSlot::Photo, photo(3, 1)));
        assert!((scene.plane().unwrap().height - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn construction_is_idempotent() {
        let mut scene = ParallaxScene::new(0.0005);
        scene.set_texture(TextureSlot::Photo, photo(4, 2));
        scene.set_texture(TextureSlot::DepthMap, depth(4, 2));
        let plane = scene.plane().cloned();
        assert_eq!(scene.generation(), 1);

        assert!(!scene.set_texture(TextureSlot::Photo, photo(2, 4)));
        assert!(!scene.set_texture(TextureSlot::DepthMap, depth(2, 4)));
        assert_eq!(scene.generation(), 1);
        assert_eq!(scene.plane().cloned(), plane);
    }

    #[test]
    fn plane_matches_photo_aspect() {
        let mut scene = ParallaxScene::new(0.0005);
        scene.set_texture(TextureSlot::Photo, photo(1600, 900));
        scene.set_texture(TextureSlot::DepthMap, depth(800, 450));
        let plane = scene.plane().unwrap();
        assert_eq!(plane.width, 2.0);
        assert!((plane.height - 1.125).abs() < 1e-6);
    }

    // ── uniforms & resize ─────────────────────────────────────────────────

    #[test]
    fn uniform_carries_tilt_and_strength() {
        let scene = ParallaxScene::new(0.25);
        let u = scene.uniform(Tilt::new(3.0, -7.0));
        assert_eq!(u.tilt, [3.0, -7.0]);
        assert_eq!(u.strength, 0.25);
    }

    #[test]
    fn resize_updates_camera_only() {
        let mut scene = ParallaxScene::new(0.0005);
        scene.set_texture(TextureSlot::Photo, photo(4, 3));
        scene.set_texture(TextureSlot::DepthMap, depth(4, 3));
        scene.resize(Viewport::new(800.0, 600.0));

        let tilt = Tilt::new(12.0, -4.0);
        let plane_before = scene.plane().cloned();
        let uniform_before = scene.uniform(tilt);
        let generation_before = scene.generation();

        assert!(scene.resize(Viewport::new(1920.0, 1080.0)));
        assert!((scene.camera().aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(scene.viewport(), Viewport::new(1920.0, 1080.0));

        let uniform_after = scene.uniform(tilt);
        assert_eq!(scene.plane().cloned(), plane_before);
        assert_eq!(scene.generation(), generation_before);
        assert_eq!(uniform_after.tilt, uniform_before.tilt);
        assert_eq!(uniform_after.strength, uniform_before.strength);
        assert_ne!(uniform_after.view_proj, uniform_before.view_proj);
    }

    #[test]
    fn same_viewport_is_not_a_resize() {
        let mut scene = ParallaxScene::new(0.0005);
        assert!(scene.resize(Viewport::new(640.0, 480.0)));
        assert!(!scene.resize(Viewport::new(640.0, 480.0)));
    }
}
