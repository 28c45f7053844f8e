//! Depth-parallax photo viewer.
//!
//! A photo and its depth map are drawn on a plane; pointer input tilts the
//! sample coordinates so nearer pixels shift further than distant ones.

pub mod app;
pub mod config;
pub mod loader;
pub mod scene;
pub mod snapshot;
pub mod tilt;

pub use app::Application;
pub use config::ParallaxConfig;
pub use loader::{LoadError, LoadErrorKind, TextureLoader};
pub use scene::{ParallaxScene, TextureSlot};
pub use snapshot::render_snapshot;
pub use tilt::{Tilt, TiltMapper, TiltMode};
