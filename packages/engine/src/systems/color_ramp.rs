//! ColorRamp - piecewise-linear palette lookup

use crate::core::{BallpitError, Color, Result};

#[derive(Clone, Debug)]
pub struct ColorRamp {
    stops: Vec<Color>,
}

impl ColorRamp {
    pub fn new(stops: Vec<Color>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(BallpitError::PaletteTooShort(stops.len()));
        }
        Ok(Self { stops })
    }

    pub fn from_hex(colors: &[u32]) -> Result<Self> {
        Self::new(colors.iter().map(|&hex| Color::from_hex(hex)).collect())
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color at `ratio` in `[0, 1]` (clamped, NaN reads as 0), interpolated between the two
    /// bracketing stops.
    pub fn get_color_at(&self, ratio: f32) -> Color {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        let last = self.stops.len() - 1;
        let scaled = ratio * last as f32;
        let idx = scaled.floor() as usize;
        let start = self.stops[idx.min(last)];
        if idx >= last {
            return start;
        }
        start.lerp(self.stops[idx + 1], scaled - idx as f32)
    }
}
