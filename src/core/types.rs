use serde::{Deserialize, Serialize};

/// Largest magnitude any viewport bound may take.
pub const MAX_BOUND_MAGNITUDE: f64 = 1e15;

/// Drawing surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned rectangle in pixel space (origin top-left, Y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the normalized rectangle spanned by two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            width: (b.0 - a.0).abs(),
            height: (b.1 - a.1).abs(),
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    #[must_use]
    pub fn has_area(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Closed data-space interval with `max > min`, both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub min: f64,
    pub max: f64,
}

impl DataRange {
    /// Returns a clamped range, or `None` when the input is non-finite or
    /// collapses to zero width after clamping to ±[`MAX_BOUND_MAGNITUDE`].
    #[must_use]
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let min = min.clamp(-MAX_BOUND_MAGNITUDE, MAX_BOUND_MAGNITUDE);
        let max = max.clamp(-MAX_BOUND_MAGNITUDE, MAX_BOUND_MAGNITUDE);
        if max <= min {
            return None;
        }
        Some(Self { min, max })
    }
}

/// Data-space rectangle: shared X plus one Y range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Deterministic fallback for series without any finite sample.
    pub const UNIT: Self = Self {
        x_min: 0.0,
        x_max: 1.0,
        y_min: 0.0,
        y_max: 1.0,
    };

    #[must_use]
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite()
    }
}

/// Running min/max accumulator that ignores non-finite samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Extent {
    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    pub fn include(&mut self, value: f64) {
        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    pub fn merge(&mut self, other: Self) {
        if !other.is_empty() {
            self.min = self.min.min(other.min);
            self.max = self.max.max(other.max);
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.min > self.max
    }
}
