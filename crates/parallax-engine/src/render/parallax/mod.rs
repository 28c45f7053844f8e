//! Depth-parallax plane renderer.
//!
//! One textured quad; the fragment stage reads a depth sample at the
//! unmodified UV and shifts the photo lookup by `tilt * depth * strength`.
//! `reference` holds the same math on the CPU.

mod renderer;
mod uniform;

pub mod reference;

pub use renderer::{ParallaxDraw, ParallaxRenderer, SamplerQuality};
pub use uniform::ParallaxUniform;
