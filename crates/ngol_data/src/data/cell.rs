use serde::{Deserialize, Serialize};

/// One grid cell: three independent population channels.
///
/// Intermediate values may leave `[0.0, 1.0]`; anything stored back into a
/// grid goes through [`Cell::clamped`] first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Cell {
    pub const BLACK: Cell = Cell::new(0.0, 0.0, 0.0);
    pub const WHITE: Cell = Cell::new(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Same value on every channel.
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    #[must_use]
    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[must_use]
    pub fn from_channels(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }

    #[must_use]
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Clamps every channel into `[0.0, 1.0]`. `NaN` becomes `0.0`.
    #[must_use]
    pub fn clamped(self) -> Self {
        self.map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
    }

    /// True when every channel is exactly zero.
    #[must_use]
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// True when any channel carries population.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.r > 0.0 || self.g > 0.0 || self.b > 0.0
    }

    /// Rec. 601 luma, used for text dumps of a grid.
    #[must_use]
    pub fn luminance(&self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

impl From<[f32; 3]> for Cell {
    fn from(c: [f32; 3]) -> Self {
        Self::from_channels(c)
    }
}
