/// Pixel layout of an [`ImageData`] buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixelFormat {
    /// Four bytes per pixel, sRGB-encoded color.
    Rgba8Srgb,
    /// One byte per pixel, linear intensity.
    R8,
}

impl PixelFormat {
    #[inline]
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Rgba8Srgb => 4,
            PixelFormat::R8 => 1,
        }
    }

    #[inline]
    pub const fn texture_format(self) -> wgpu::TextureFormat {
        match self {
            PixelFormat::Rgba8Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            PixelFormat::R8 => wgpu::TextureFormat::R8Unorm,
        }
    }
}

/// Decoded, tightly packed image ready for texture upload.
///
/// Rows are stored top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl ImageData {
    /// Wraps a pixel buffer.
    ///
    /// Returns `None` if either dimension is zero or the buffer length does not
    /// match `width * height * bytes_per_pixel`.
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * format.bytes_per_pixel() as usize;
        if width == 0 || height == 0 || pixels.len() != expected {
            return None;
        }
        Some(Self { width, height, format, pixels })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Width over height.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * self.format.bytes_per_pixel()
    }

    /// Returns the texel at `(x, y)` widened to RGBA.
    ///
    /// Single-channel images report their value in red, the way a GPU sampler
    /// exposes an `R8Unorm` texture. Out-of-range coordinates are clamped to
    /// the edge.
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let bpp = self.format.bytes_per_pixel() as usize;
        let i = (y * self.width as usize + x) * bpp;
        match self.format {
            PixelFormat::Rgba8Srgb => [
                self.pixels[i],
                self.pixels[i + 1],
                self.pixels[i + 2],
                self.pixels[i + 3],
            ],
            PixelFormat::R8 => [self.pixels[i], 0, 0, 255],
        }
    }
}
