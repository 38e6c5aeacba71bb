//! Linear RGB color
//!
//! Palette entries arrive as packed sRGB hex (`0xRRGGBB`) and are converted
//! once into the linear working space the renderer shades in, so instance
//! colors can be copied straight into the GPU attribute buffer.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse packed `0xRRGGBB` sRGB into linear RGB
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self {
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
        }
    }

    /// Component-wise linear interpolation
    #[inline]
    pub fn lerp(&self, end: Color, alpha: f32) -> Self {
        Self {
            r: self.r + alpha * (end.r - self.r),
            g: self.g + alpha * (end.g - self.g),
            b: self.b + alpha * (end.b - self.b),
        }
    }

    #[inline]
    pub fn write_to(&self, data: &mut [f32], base: usize) {
        data[base] = self.r;
        data[base + 1] = self.g;
        data[base + 2] = self.b;
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_extremes_map_exactly() {
        assert_eq!(Color::from_hex(0x000000), Color::new(0.0, 0.0, 0.0));
        assert_eq!(Color::from_hex(0xFFFFFF), Color::WHITE);
    }

    #[test]
    fn hex_channels_are_linearized() {
        let navy = Color::from_hex(0x000080);
        assert_eq!(navy.r, 0.0);
        assert_eq!(navy.g, 0.0);
        // sRGB 128/255 is roughly 0.216 in linear space
        assert!((navy.b - 0.2158).abs() < 1e-3);
    }
}
