use serde::{Deserialize, Serialize};

use crate::core::DataRange;

/// Smallest domain value accepted by logarithmic scales.
pub const LOG_DOMAIN_FLOOR: f64 = 1e-12;

const TICK_SIGNIFICANT_DIGITS: usize = 12;
const MAX_TICK_ITERATIONS: usize = 10_000;

/// Mapping family of a [`Scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleKind {
    #[default]
    Linear,
    Logarithmic,
}

impl ScaleKind {
    /// Maps a data value into the space in which this scale interpolates.
    ///
    /// Vertex buffers and frame bounds are expressed in this space so the
    /// rasterizer only needs an affine transform.
    #[must_use]
    pub fn project(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Logarithmic => value.max(LOG_DOMAIN_FLOOR).log10(),
        }
    }

    /// Inverse of [`ScaleKind::project`].
    #[must_use]
    pub fn unproject(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Logarithmic => 10f64.powf(value),
        }
    }

    /// Projects both ends of a data range into scale space.
    #[must_use]
    pub fn project_range(self, range: DataRange) -> (f64, f64) {
        (self.project(range.min), self.project(range.max))
    }

    /// Builds a data range from scale-space ends, rejecting degenerate results.
    #[must_use]
    pub fn unproject_range(self, min: f64, max: f64) -> Option<DataRange> {
        self.sanitize(self.unproject(min), self.unproject(max))
    }

    /// Validates a data-space range for this kind; logarithmic minimums are
    /// raised to [`LOG_DOMAIN_FLOOR`].
    #[must_use]
    pub fn sanitize(self, min: f64, max: f64) -> Option<DataRange> {
        match self {
            Self::Linear => DataRange::new(min, max),
            Self::Logarithmic => DataRange::new(min.max(LOG_DOMAIN_FLOOR), max),
        }
    }
}

/// Domain-to-pixel mapping for one axis.
///
/// Degenerate domains or ranges never panic: `transform` falls back to the
/// range start and `invert` to the domain start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    domain: (f64, f64),
    range: (f64, f64),
    kind: ScaleKind,
}

impl Scale {
    #[must_use]
    pub fn new(kind: ScaleKind, domain: (f64, f64), range: (f64, f64)) -> Self {
        let mut scale = Self {
            domain: (0.0, 1.0),
            range,
            kind,
        };
        scale.set_domain(domain.0, domain.1);
        scale
    }

    #[must_use]
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(ScaleKind::Linear, domain, range)
    }

    #[must_use]
    pub fn logarithmic(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(ScaleKind::Logarithmic, domain, range)
    }

    #[must_use]
    pub fn kind(self) -> ScaleKind {
        self.kind
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    pub fn set_domain(&mut self, min: f64, max: f64) {
        self.domain = match self.kind {
            ScaleKind::Linear => (min, max),
            ScaleKind::Logarithmic => (min.max(LOG_DOMAIN_FLOOR), max.max(LOG_DOMAIN_FLOOR)),
        };
    }

    pub fn set_range(&mut self, min: f64, max: f64) {
        self.range = (min, max);
    }

    /// Maps a data value to a pixel coordinate.
    #[must_use]
    pub fn transform(self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        if self.kind == ScaleKind::Logarithmic && value <= 0.0 {
            return r0;
        }
        let (d0, d1) = self.projected_domain();
        let span = d1 - d0;
        if !span.is_finite() || span == 0.0 {
            return r0;
        }
        let t = (self.kind.project(value) - d0) / span;
        r0 + t * (r1 - r0)
    }

    /// Maps a pixel coordinate back to a data value.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let (r0, r1) = self.range;
        let (d0, d1) = self.projected_domain();
        let pixel_span = r1 - r0;
        if !pixel_span.is_finite() || pixel_span == 0.0 {
            return self.domain.0;
        }
        let t = (pixel - r0) / pixel_span;
        self.kind.unproject(d0 + t * (d1 - d0))
    }

    /// Tick values inside the domain.
    ///
    /// Linear scales use "nice" 1/2/5/10 steps, logarithmic scales use powers
    /// of ten. At most `count` logarithmic ticks are returned.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count == 0 || !min.is_finite() || !max.is_finite() || max <= min {
            return Vec::new();
        }
        match self.kind {
            ScaleKind::Linear => nice_ticks(min, max, count),
            ScaleKind::Logarithmic => power_ticks(min, max, count),
        }
    }

    fn projected_domain(self) -> (f64, f64) {
        (
            self.kind.project(self.domain.0),
            self.kind.project(self.domain.1),
        )
    }
}

/// Step snapped to 1, 2, 5 or 10 times a power of ten.
#[must_use]
pub fn nice_step(span: f64, count: usize) -> f64 {
    let raw = span / count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let mantissa = raw / magnitude;
    let snapped = if mantissa < 1.5 {
        1.0
    } else if mantissa < 3.0 {
        2.0
    } else if mantissa < 7.0 {
        5.0
    } else {
        10.0
    };
    snapped * magnitude
}

fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let step = nice_step(max - min, count);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }

    let first = (min / step).ceil();
    let tolerance = step * 1e-9;
    let mut ticks: Vec<f64> = Vec::new();
    for i in 0..MAX_TICK_ITERATIONS {
        let value = round_significant((first + i as f64) * step);
        if value > max + tolerance {
            break;
        }
        if ticks.last().is_none_or(|last| value > *last) {
            ticks.push(value);
        }
    }
    ticks
}

fn power_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let first = min.log10().ceil() as i32;
    let last = max.log10().floor() as i32;
    if last < first {
        return Vec::new();
    }
    let total = (last - first + 1) as usize;
    let stride = total.div_ceil(count);
    (first..=last)
        .step_by(stride.max(1))
        .take(count)
        .map(|exponent| round_significant(10f64.powi(exponent)))
        .collect()
}

/// Rounds to twelve significant digits to strip accumulated float noise.
#[must_use]
pub fn round_significant(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let formatted = format!("{:.*e}", TICK_SIGNIFICANT_DIGITS - 1, value);
    formatted.parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_snaps_mantissa_thresholds() {
        assert_eq!(nice_step(10.0, 10), 1.0);
        assert_eq!(nice_step(14.0, 10), 1.0);
        assert_eq!(nice_step(16.0, 10), 2.0);
        assert_eq!(nice_step(30.0, 10), 5.0);
        assert_eq!(nice_step(75.0, 10), 10.0);
    }

    #[test]
    fn round_significant_strips_float_noise() {
        assert_eq!(round_significant(0.1 + 0.2), 0.3);
        assert_eq!(round_significant(-0.0), -0.0);
    }
}
