use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::derived_cache::{CacheState, DerivedCache};
use crate::core::smoothing::centered_moving_average;
use crate::core::{AxisId, Bounds, Color, Extent};

/// Identifier of one series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeriesId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SeriesId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geometry family of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SeriesKind {
    #[default]
    Line,
    Scatter,
    Step,
    Band,
    Bar,
    Heatmap,
    Candlestick,
}

impl SeriesKind {
    /// Whether appended samples map to new vertices without touching the
    /// geometry of existing samples.
    #[must_use]
    pub const fn supports_partial_append(self) -> bool {
        matches!(self, Self::Line | Self::Scatter)
    }
}

/// Visual parameters forwarded to the rasterizer with each draw descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Color,
    /// Secondary color: bearish candles, band fill, heatmap high end.
    pub secondary_color: Color,
    pub line_width: f64,
    pub point_size: f64,
    /// Bar or candle body width as a fraction of the tightest sample spacing.
    pub width_ratio: f64,
    /// Explicit bar/cell width in data units; overrides `width_ratio`.
    #[serde(default)]
    pub fixed_width: Option<f64>,
    /// Centered moving-average window applied to `y` before geometry building.
    #[serde(default)]
    pub smoothing_window: Option<usize>,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.129, 0.588, 0.953),
            secondary_color: Color::rgb(0.937, 0.325, 0.314),
            line_width: 1.5,
            point_size: 3.0,
            width_ratio: 0.8,
            fixed_width: None,
            smoothing_window: None,
        }
    }
}

impl SeriesStyle {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = Some(window);
        self
    }

    #[must_use]
    pub fn smoothing_enabled(&self) -> bool {
        self.smoothing_window.is_some_and(|window| window > 1)
    }
}

/// Parallel sample channels of one series.
///
/// `x` and `y` are required. Auxiliary channels are optional but, once
/// present, always hold exactly `len()` samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default)]
    pub error_minus: Option<Vec<f64>>,
    #[serde(default)]
    pub error_plus: Option<Vec<f64>>,
    #[serde(default)]
    pub y2: Option<Vec<f64>>,
    #[serde(default)]
    pub open: Option<Vec<f64>>,
    #[serde(default)]
    pub high: Option<Vec<f64>>,
    #[serde(default)]
    pub low: Option<Vec<f64>>,
    #[serde(default)]
    pub close: Option<Vec<f64>>,
    #[serde(default)]
    pub values: Option<Vec<f64>>,
}

impl SeriesData {
    #[must_use]
    pub fn xy(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// OHLC samples; `y` mirrors `close`.
    #[must_use]
    pub fn ohlc(x: Vec<f64>, open: Vec<f64>, high: Vec<f64>, low: Vec<f64>, close: Vec<f64>) -> Self {
        Self {
            x,
            y: close.clone(),
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_errors(mut self, minus: Vec<f64>, plus: Vec<f64>) -> Self {
        self.error_minus = Some(minus);
        self.error_plus = Some(plus);
        self
    }

    #[must_use]
    pub fn with_y2(mut self, y2: Vec<f64>) -> Self {
        self.y2 = Some(y2);
        self
    }

    #[must_use]
    pub fn with_values(mut self, values: Vec<f64>) -> Self {
        self.values = Some(values);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn aux_channels(&self) -> [(&'static str, &Option<Vec<f64>>); 8] {
        [
            ("error_minus", &self.error_minus),
            ("error_plus", &self.error_plus),
            ("y2", &self.y2),
            ("open", &self.open),
            ("high", &self.high),
            ("low", &self.low),
            ("close", &self.close),
            ("values", &self.values),
        ]
    }

    fn aux_channels_mut(&mut self) -> [(&'static str, &mut Option<Vec<f64>>); 8] {
        [
            ("error_minus", &mut self.error_minus),
            ("error_plus", &mut self.error_plus),
            ("y2", &mut self.y2),
            ("open", &mut self.open),
            ("high", &mut self.high),
            ("low", &mut self.low),
            ("close", &mut self.close),
            ("values", &mut self.values),
        ]
    }

    /// Brings every channel to the common sample count.
    ///
    /// X/Y mismatches truncate to the shorter length; short auxiliary
    /// channels are padded with NaN so they never contribute to bounds.
    fn normalize(&mut self, series_id: &SeriesId) {
        let len = self.len();
        if self.x.len() != self.y.len() {
            warn!(
                series = %series_id,
                x_len = self.x.len(),
                y_len = self.y.len(),
                "x/y length mismatch; using the shorter length"
            );
            self.x.truncate(len);
            self.y.truncate(len);
        }
        for (name, channel) in self.aux_channels_mut() {
            let Some(values) = channel else { continue };
            if values.len() > len {
                values.truncate(len);
            } else if values.len() < len {
                warn!(
                    series = %series_id,
                    channel = name,
                    channel_len = values.len(),
                    len,
                    "auxiliary channel shorter than samples; padding with NaN"
                );
                values.resize(len, f64::NAN);
            }
        }
    }

    fn extend(&mut self, other: Self) {
        let old_len = self.len();
        let added = other.len();
        let Self {
            x,
            y,
            error_minus,
            error_plus,
            y2,
            open,
            high,
            low,
            close,
            values,
        } = other;
        let incoming = [error_minus, error_plus, y2, open, high, low, close, values];
        for ((_, target), source) in self.aux_channels_mut().into_iter().zip(incoming) {
            match (target.as_mut(), source) {
                (Some(existing), Some(source)) => existing.extend(source),
                (Some(existing), None) => existing.resize(old_len + added, f64::NAN),
                (None, Some(source)) => {
                    let mut padded = vec![f64::NAN; old_len];
                    padded.extend(source);
                    *target = Some(padded);
                }
                (None, None) => {}
            }
        }
        self.x.extend(x);
        self.y.extend(y);
    }

    fn trim_front(&mut self, count: usize) {
        self.x.drain(..count);
        self.y.drain(..count);
        for (_, channel) in self.aux_channels_mut() {
            if let Some(values) = channel {
                values.drain(..count);
            }
        }
    }
}

/// GPU-buffer freshness of a series relative to its last upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    Clean,
    Dirty(BufferDirty),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferDirty {
    /// Geometry must be regenerated from scratch.
    Full,
    /// Only `appended` samples were added at the end since the last upload.
    Append { appended: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ComputedBounds {
    bounds: Bounds,
    finite_samples: usize,
}

/// One dataset with its style, owning axis and cached derived values.
#[derive(Debug, Clone)]
pub struct Series {
    id: SeriesId,
    kind: SeriesKind,
    axis_id: AxisId,
    visible: bool,
    style: SeriesStyle,
    max_points: Option<usize>,
    data: SeriesData,
    bounds: DerivedCache<ComputedBounds>,
    smoothed: DerivedCache<Vec<f64>>,
    buffer_state: BufferState,
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<SeriesId>, kind: SeriesKind, axis_id: impl Into<AxisId>) -> Self {
        Self {
            id: id.into(),
            kind,
            axis_id: axis_id.into(),
            visible: true,
            style: SeriesStyle::default(),
            max_points: None,
            data: SeriesData::default(),
            bounds: DerivedCache::default(),
            smoothed: DerivedCache::default(),
            buffer_state: BufferState::Dirty(BufferDirty::Full),
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: SeriesData) -> Self {
        self.update_data(data, false);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.set_style(style);
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.set_max_points(Some(max_points));
        self
    }

    #[must_use]
    pub fn id(&self) -> &SeriesId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    #[must_use]
    pub fn axis_id(&self) -> &AxisId {
        &self.axis_id
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn style(&self) -> &SeriesStyle {
        &self.style
    }

    #[must_use]
    pub fn max_points(&self) -> Option<usize> {
        self.max_points
    }

    /// Read-only view of the raw channels for exporters and analysis tools.
    #[must_use]
    pub fn data(&self) -> &SeriesData {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn buffer_state(&self) -> BufferState {
        self.buffer_state
    }

    #[must_use]
    pub fn bounds_cache_state(&self) -> CacheState {
        self.bounds.state()
    }

    /// Data bounds over every finite sample of every vertical channel.
    ///
    /// Returns [`Bounds::UNIT`] when the series has no finite sample.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.computed_bounds().bounds
    }

    /// Number of samples with a finite X and at least one finite vertical value.
    #[must_use]
    pub fn finite_sample_count(&self) -> usize {
        self.computed_bounds().finite_samples
    }

    /// Whether this series should take part in autoscaling.
    #[must_use]
    pub fn contributes_to_autoscale(&self) -> bool {
        self.visible && self.finite_sample_count() > 0 && self.bounds().is_finite()
    }

    /// `y` after optional smoothing; this is what geometry is built from.
    #[must_use]
    pub fn render_y(&self) -> &[f64] {
        match self.style.smoothing_window {
            Some(window) if window > 1 => self
                .smoothed
                .get_or_compute(|| centered_moving_average(&self.data.y, window)),
            _ => &self.data.y,
        }
    }

    /// Replaces (`append == false`) or extends the sample channels.
    ///
    /// Appends trim the oldest samples in lock-step when the rolling window
    /// capacity is exceeded.
    pub fn update_data(&mut self, mut data: SeriesData, append: bool) {
        data.normalize(&self.id);
        if !append {
            self.data = data;
            self.invalidate_derived();
            self.buffer_state = BufferState::Dirty(BufferDirty::Full);
            self.apply_rolling_window();
            return;
        }

        let appended = data.len();
        if appended == 0 {
            return;
        }
        self.data.extend(data);
        self.invalidate_derived();
        self.buffer_state = match self.buffer_state {
            BufferState::Clean => BufferState::Dirty(BufferDirty::Append { appended }),
            BufferState::Dirty(BufferDirty::Append { appended: pending }) => {
                BufferState::Dirty(BufferDirty::Append {
                    appended: pending + appended,
                })
            }
            BufferState::Dirty(BufferDirty::Full) => BufferState::Dirty(BufferDirty::Full),
        };
        let trimmed = self.apply_rolling_window();
        trace!(
            series = %self.id,
            appended,
            trimmed,
            len = self.len(),
            "append series data"
        );
    }

    /// Sets the rolling-window capacity, trimming immediately when exceeded.
    pub fn set_max_points(&mut self, max_points: Option<usize>) {
        self.max_points = max_points;
        self.apply_rolling_window();
    }

    pub fn set_style(&mut self, style: SeriesStyle) {
        self.style = style;
        self.invalidate_derived();
        self.buffer_state = BufferState::Dirty(BufferDirty::Full);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_kind(&mut self, kind: SeriesKind) {
        if self.kind != kind {
            self.kind = kind;
            self.buffer_state = BufferState::Dirty(BufferDirty::Full);
        }
    }

    /// Records that the rasterizer now holds this series' current geometry.
    pub fn mark_uploaded(&mut self) {
        self.buffer_state = BufferState::Clean;
    }

    /// Forces the next frame to regenerate this series from scratch.
    pub fn mark_buffer_lost(&mut self) {
        self.buffer_state = BufferState::Dirty(BufferDirty::Full);
    }

    fn invalidate_derived(&mut self) {
        self.bounds.invalidate();
        self.smoothed.invalidate();
    }

    fn apply_rolling_window(&mut self) -> usize {
        let Some(capacity) = self.max_points else {
            return 0;
        };
        let len = self.len();
        if len <= capacity {
            return 0;
        }
        let excess = len - capacity;
        self.data.trim_front(excess);
        self.invalidate_derived();
        // Existing vertices shifted; an in-place tail write would be wrong.
        self.buffer_state = BufferState::Dirty(BufferDirty::Full);
        excess
    }

    fn computed_bounds(&self) -> ComputedBounds {
        *self.bounds.get_or_compute(|| compute_bounds(&self.data))
    }
}

fn compute_bounds(data: &SeriesData) -> ComputedBounds {
    let len = data.len();
    let mut x_extent = Extent::EMPTY;
    let mut y_extent = Extent::EMPTY;
    let mut finite_samples = 0usize;

    let error_minus = data.error_minus.as_deref();
    let error_plus = data.error_plus.as_deref();
    let vertical_aux: Vec<&[f64]> = data
        .aux_channels()
        .into_iter()
        .filter(|(name, _)| !matches!(*name, "error_minus" | "error_plus" | "values"))
        .filter_map(|(_, channel)| channel.as_deref())
        .collect();

    for index in 0..len {
        let x = data.x[index];
        x_extent.include(x);

        let mut sample_extent = Extent::EMPTY;
        let y = data.y[index];
        sample_extent.include(y);
        if let Some(minus) = error_minus {
            sample_extent.include(y - minus[index]);
        }
        if let Some(plus) = error_plus {
            sample_extent.include(y + plus[index]);
        }
        for channel in &vertical_aux {
            sample_extent.include(channel[index]);
        }

        if x.is_finite() && !sample_extent.is_empty() {
            finite_samples += 1;
        }
        y_extent.merge(sample_extent);
    }

    if finite_samples == 0 || x_extent.is_empty() || y_extent.is_empty() {
        return ComputedBounds {
            bounds: Bounds::UNIT,
            finite_samples: 0,
        };
    }

    ComputedBounds {
        bounds: Bounds::new(x_extent.min, x_extent.max, y_extent.min, y_extent.max),
        finite_samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_into_missing_aux_channel_pads_front_with_nan() {
        let mut data = SeriesData::xy(vec![0.0, 1.0], vec![1.0, 2.0]);
        data.extend(SeriesData::xy(vec![2.0], vec![3.0]).with_y2(vec![9.0]));

        let y2 = data.y2.expect("y2 channel created");
        assert_eq!(y2.len(), 3);
        assert!(y2[0].is_nan() && y2[1].is_nan());
        assert_eq!(y2[2], 9.0);
    }

    #[test]
    fn bounds_include_error_and_secondary_channels() {
        let data = SeriesData::xy(vec![0.0, 1.0], vec![5.0, 6.0])
            .with_errors(vec![1.0, 1.0], vec![2.0, 0.5])
            .with_y2(vec![-3.0, 5.5]);
        let computed = compute_bounds(&data);
        assert_eq!(computed.bounds, Bounds::new(0.0, 1.0, -3.0, 7.0));
        assert_eq!(computed.finite_samples, 2);
    }
}
