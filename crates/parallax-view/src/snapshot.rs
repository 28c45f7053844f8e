//! Headless single-frame rendering.

use std::path::Path;

use anyhow::{Context, Result};
use parallax_engine::render::parallax::reference;

use crate::config::ParallaxConfig;
use crate::loader::load_image;
use crate::scene::TextureSlot;
use crate::tilt::Tilt;

/// Renders the displaced photo at `tilt` on the CPU and writes it to `out`.
///
/// The output has the photo's resolution. The format follows `out`'s
/// extension.
pub fn render_snapshot(config: &ParallaxConfig, tilt: Tilt, out: &Path) -> Result<()> {
    let photo = load_image(TextureSlot::Photo, &config.photo_path)?;
    let depth = load_image(TextureSlot::DepthMap, &config.depth_path)?;

    log::info!(
        "snapshot {}x{} at tilt ({}, {}), strength {}",
        photo.width(),
        photo.height(),
        tilt.x,
        tilt.y,
        config.parallax_strength
    );

    let frame = reference::render(&photo, &depth, tilt.to_array(), config.parallax_strength);
    let (width, height) = (frame.width(), frame.height());

    let image = image::RgbaImage::from_raw(width, height, frame.into_pixels())
        .context("rendered frame has an unexpected buffer size")?;
    image
        .save(out)
        .with_context(|| format!("failed to write snapshot to '{}'", out.display()))?;

    log::info!("wrote {}", out.display());
    Ok(())
}
