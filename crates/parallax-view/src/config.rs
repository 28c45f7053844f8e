use std::path::PathBuf;

use parallax_engine::paint::Color;
use parallax_engine::render::SamplerQuality;

use crate::tilt::TiltMode;

/// Photo loaded when no path is given.
pub const DEFAULT_PHOTO_PATH: &str = "your_photo.jpg";

/// Depth map loaded when no path is given.
pub const DEFAULT_DEPTH_PATH: &str = "your_depth_map.png";

/// UV displacement per unit of tilt at full depth.
pub const DEFAULT_PARALLAX_STRENGTH: f32 = 0.0005;

/// Everything the viewer needs besides the window itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxConfig {
    /// Color image, resolved against the working directory.
    pub photo_path: PathBuf,
    /// Grayscale depth image. Only the red channel is read.
    pub depth_path: PathBuf,
    pub mode: TiltMode,
    pub parallax_strength: f32,
    pub sampler: SamplerQuality,
    /// Background visible around the plane.
    pub clear_color: Color,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            photo_path: PathBuf::from(DEFAULT_PHOTO_PATH),
            depth_path: PathBuf::from(DEFAULT_DEPTH_PATH),
            mode: TiltMode::default(),
            parallax_strength: DEFAULT_PARALLAX_STRENGTH,
            sampler: SamplerQuality::default(),
            clear_color: Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let cfg = ParallaxConfig::default();
        assert_eq!(cfg.photo_path, PathBuf::from("your_photo.jpg"));
        assert_eq!(cfg.depth_path, PathBuf::from("your_depth_map.png"));
        assert_eq!(cfg.parallax_strength, 0.0005);
        assert_eq!(cfg.mode, TiltMode::hover());
        assert_eq!(cfg.sampler.anisotropy, 16);
    }
}
