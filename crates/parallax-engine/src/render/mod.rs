//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, textures) and create
//! them lazily on first use, keyed by surface format and content generation.
//!
//! Convention:
//! - world space is right-handed, +Y up, camera looking down -Z
//! - plane UVs have a bottom-left origin; shaders flip V when sampling

mod ctx;
pub mod camera;
pub mod image;
pub mod parallax;
pub mod plane;

pub use camera::PerspectiveCamera;
pub use ctx::{RenderCtx, RenderTarget};
pub use image::{ImageData, PixelFormat};
pub use parallax::{ParallaxDraw, ParallaxRenderer, ParallaxUniform, SamplerQuality};
pub use plane::{PlaneGeometry, PlaneVertex};
