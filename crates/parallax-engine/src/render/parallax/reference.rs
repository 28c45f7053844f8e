//! CPU implementation of the parallax fragment stage.
//!
//! Mirrors `parallax.wgsl` with nearest sampling and clamp-to-edge
//! addressing. Used for headless snapshots and for checking the shader math.

use crate::render::image::{ImageData, PixelFormat};

/// UV displacement for one fragment.
#[inline]
pub fn parallax_offset(tilt: [f32; 2], depth: f32, strength: f32) -> [f32; 2] {
    [tilt[0] * depth * strength, tilt[1] * depth * strength]
}

/// Plane UV (bottom-left origin) shifted by the parallax offset.
#[inline]
pub fn displaced_uv(uv: [f32; 2], tilt: [f32; 2], depth: f32, strength: f32) -> [f32; 2] {
    let [dx, dy] = parallax_offset(tilt, depth, strength);
    [uv[0] + dx, uv[1] + dy]
}

/// Converts a plane UV to texel space (top-left origin).
#[inline]
pub fn to_texel_space(uv: [f32; 2]) -> [f32; 2] {
    [uv[0], 1.0 - uv[1]]
}

/// Nearest-texel lookup at a plane UV, clamped to the edge.
pub fn sample_nearest(image: &ImageData, uv: [f32; 2]) -> [u8; 4] {
    let [s, t] = to_texel_space(uv);
    let to_index = |coord: f32, extent: u32| -> u32 {
        let scaled = (coord * extent as f32).floor();
        scaled.clamp(0.0, (extent - 1) as f32) as u32
    };
    image.texel(to_index(s, image.width()), to_index(t, image.height()))
}

/// Depth at a plane UV in `[0, 1]`, read from the red channel.
#[inline]
pub fn sample_depth(depth: &ImageData, uv: [f32; 2]) -> f32 {
    sample_nearest(depth, uv)[0] as f32 / 255.0
}

/// Shades one fragment: depth at the unmodified UV, photo at the displaced UV.
pub fn shade(
    photo: &ImageData,
    depth: &ImageData,
    uv: [f32; 2],
    tilt: [f32; 2],
    strength: f32,
) -> [u8; 4] {
    let d = sample_depth(depth, uv);
    sample_nearest(photo, displaced_uv(uv, tilt, d, strength))
}

/// Renders the plane face-on at the photo's resolution.
///
/// Every output pixel corresponds to one photo texel center, so with zero tilt
/// (or an all-black depth map) the output equals the photo.
pub fn render(photo: &ImageData, depth: &ImageData, tilt: [f32; 2], strength: f32) -> ImageData {
    let (w, h) = (photo.width(), photo.height());
    let mut pixels = Vec::with_capacity(w as usize * h as usize * 4);

    for y in 0..h {
        for x in 0..w {
            let s = (x as f32 + 0.5) / w as f32;
            let t = (y as f32 + 0.5) / h as f32;
            let uv = [s, 1.0 - t];
            pixels.extend_from_slice(&shade(photo, depth, uv, tilt, strength));
        }
    }

    // Dimensions and length come from a valid photo; construction cannot fail.
    ImageData::new(w, h, PixelFormat::Rgba8Srgb, pixels).unwrap_or_else(|| photo.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_photo(w: u32, h: u32) -> ImageData {
        let mut px = Vec::new();
        for y in 0..h {
            for x in 0..w {
                px.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 0, 255]);
            }
        }
        ImageData::new(w, h, PixelFormat::Rgba8Srgb, px).unwrap()
    }

    fn flat_depth(w: u32, h: u32, value: u8) -> ImageData {
        ImageData::new(w, h, PixelFormat::R8, vec![value; (w * h) as usize]).unwrap()
    }

    // ── offset math ───────────────────────────────────────────────────────

    #[test]
    fn offset_is_linear_in_depth() {
        let tilt = [20.0, -10.0];
        let a = parallax_offset(tilt, 0.25, 0.0005);
        let b = parallax_offset(tilt, 0.5, 0.0005);
        assert!((b[0] - 2.0 * a[0]).abs() < 1e-9);
        assert!((b[1] - 2.0 * a[1]).abs() < 1e-9);
    }

    #[test]
    fn offset_is_linear_in_strength() {
        let tilt = [7.0, 3.0];
        let a = parallax_offset(tilt, 0.8, 0.001);
        let b = parallax_offset(tilt, 0.8, 0.003);
        assert!((b[0] - 3.0 * a[0]).abs() < 1e-9);
        assert!((b[1] - 3.0 * a[1]).abs() < 1e-9);
    }

    #[test]
    fn zero_depth_means_zero_offset() {
        assert_eq!(parallax_offset([50.0, -50.0], 0.0, 1.0), [0.0, 0.0]);
    }

    // ── sampling ──────────────────────────────────────────────────────────

    #[test]
    fn texel_space_flips_v() {
        assert_eq!(to_texel_space([0.25, 0.0]), [0.25, 1.0]);
        assert_eq!(to_texel_space([0.25, 1.0]), [0.25, 0.0]);
    }

    #[test]
    fn top_left_uv_hits_first_row() {
        let photo = gradient_photo(4, 4);
        assert_eq!(sample_nearest(&photo, [0.01, 0.99]), [0, 0, 0, 255]);
        assert_eq!(sample_nearest(&photo, [0.99, 0.01]), [30, 30, 0, 255]);
    }

    #[test]
    fn out_of_range_uv_clamps_to_edge() {
        let photo = gradient_photo(4, 4);
        assert_eq!(sample_nearest(&photo, [-0.5, 2.0]), sample_nearest(&photo, [0.0, 1.0]));
        assert_eq!(sample_nearest(&photo, [1.5, -1.0]), [30, 30, 0, 255]);
    }

    // ── whole frame ───────────────────────────────────────────────────────

    #[test]
    fn zero_depth_reproduces_photo() {
        let photo = gradient_photo(8, 6);
        let depth = flat_depth(8, 6, 0);
        let out = render(&photo, &depth, [50.0, 50.0], 0.05);
        assert_eq!(out, photo);
    }

    #[test]
    fn full_depth_shifts_by_expected_texels() {
        let photo = gradient_photo(10, 10);
        let depth = flat_depth(10, 10, 255);
        // offset = 20 * 1.0 * 0.01 = 0.2 UV = 2 texels to the right.
        let out = render(&photo, &depth, [20.0, 0.0], 0.01);
        assert_eq!(out.texel(0, 0), photo.texel(2, 0));
        assert_eq!(out.texel(9, 0), photo.texel(9, 0));
    }

    #[test]
    fn positive_tilt_y_samples_higher_rows() {
        let photo = gradient_photo(10, 10);
        let depth = flat_depth(10, 10, 255);
        // +V is up in plane UV, so the lookup moves toward row 0.
        let out = render(&photo, &depth, [0.0, 20.0], 0.01);
        assert_eq!(out.texel(0, 5), photo.texel(0, 3));
    }
}
