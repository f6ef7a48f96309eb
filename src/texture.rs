use std::path::Path;

use image::RgbaImage;

use crate::math::RGBColor;

/// Read only colour lookup at texture coordinates, shared across render threads.
pub trait Texture: Sync {
    fn sample(&self, u: f64, v: f64) -> RGBColor;
}

/// Equirectangular image sampled with nearest neighbour lookup.
pub struct ImageTexture {
    image: RgbaImage,
}

impl ImageTexture {
    pub fn new(image: RgbaImage) -> Self {
        ImageTexture { image }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        Ok(ImageTexture::new(image::open(path)?.into_rgba8()))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn texel_index(coordinate: f64, size: u32) -> u32 {
        let scaled = (coordinate.clamp(0.0, 1.0) * size as f64) as u32;
        scaled.min(size.saturating_sub(1))
    }
}

impl Texture for ImageTexture {
    fn sample(&self, u: f64, v: f64) -> RGBColor {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return RGBColor::BLACK;
        }
        let x = Self::texel_index(u, width);
        let y = Self::texel_index(v, height);
        RGBColor::from_rgba8(self.image.get_pixel(x, y).0)
    }
}

/// Same colour everywhere.
#[derive(Copy, Clone, Debug)]
pub struct ConstantTexture(pub RGBColor);

impl Texture for ConstantTexture {
    fn sample(&self, _u: f64, _v: f64) -> RGBColor {
        self.0
    }
}
