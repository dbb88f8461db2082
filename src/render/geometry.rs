use ordered_float::OrderedFloat;

use crate::core::{Color, ScaleKind, Series, SeriesKind, SeriesStyle};

/// Vertices of one axis-aligned rectangle drawn as two triangles.
pub const QUAD_VERTICES: usize = 6;
/// Vertices of one candle: body and wick rectangles.
pub const CANDLE_VERTICES: usize = 2 * QUAD_VERTICES;
/// Texels in a heatmap color ramp.
pub const COLORMAP_SIZE: usize = 256;

const WICK_WIDTH_RATIO: f64 = 0.15;

/// Vertex data produced for one series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesGeometry {
    pub vertices: Vec<f32>,
    pub components: usize,
    pub aux_vertices: Option<Vec<f32>>,
    pub texture: Option<Vec<u8>>,
}

impl SeriesGeometry {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        if self.components == 0 {
            0
        } else {
            self.vertices.len() / self.components
        }
    }

    /// Aux buffers always use two components per vertex.
    #[must_use]
    pub fn aux_vertex_count(&self) -> usize {
        self.aux_vertices.as_ref().map_or(0, |aux| aux.len() / 2)
    }
}

/// Axis scale families that turn data values into scale space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Projection {
    pub x: ScaleKind,
    pub y: ScaleKind,
}

impl Projection {
    fn point(self, out: &mut Vec<f32>, x: f64, y: f64) {
        out.push(project_component(self.x, x));
        out.push(project_component(self.y, y));
    }

    /// Two triangles spanning `[x0, x1] × [y0, y1]`.
    fn quad(self, out: &mut Vec<f32>, x0: f64, x1: f64, y0: f64, y1: f64) {
        for (x, y) in [(x0, y0), (x1, y0), (x1, y1), (x0, y0), (x1, y1), (x0, y1)] {
            self.point(out, x, y);
        }
    }
}

fn project_component(kind: ScaleKind, value: f64) -> f32 {
    if !value.is_finite() || (kind == ScaleKind::Logarithmic && value <= 0.0) {
        return f32::NAN;
    }
    kind.project(value) as f32
}

/// Builds the complete geometry of `series` for the given axis scales.
#[must_use]
pub fn build_geometry(series: &Series, x_kind: ScaleKind, y_kind: ScaleKind) -> SeriesGeometry {
    let projection = Projection {
        x: x_kind,
        y: y_kind,
    };
    match series.kind() {
        SeriesKind::Line | SeriesKind::Scatter => SeriesGeometry {
            vertices: line_vertices(series, x_kind, y_kind, 0),
            components: 2,
            aux_vertices: has_error_channels(series)
                .then(|| error_bar_vertices(series, projection, 0)),
            texture: None,
        },
        SeriesKind::Step => simple(step_vertices(series, projection)),
        SeriesKind::Band => simple(band_vertices(series, projection)),
        SeriesKind::Bar => simple(bar_vertices(series, projection)),
        SeriesKind::Heatmap => heatmap_geometry(series, projection),
        SeriesKind::Candlestick => candlestick_geometry(series, projection),
    }
}

fn simple(vertices: Vec<f32>) -> SeriesGeometry {
    SeriesGeometry {
        vertices,
        components: 2,
        aux_vertices: None,
        texture: None,
    }
}

/// One two-component vertex per sample from `start` onward.
///
/// Non-finite samples become NaN vertices so a line strip breaks there.
#[must_use]
pub fn line_vertices(series: &Series, x_kind: ScaleKind, y_kind: ScaleKind, start: usize) -> Vec<f32> {
    let projection = Projection {
        x: x_kind,
        y: y_kind,
    };
    let x = &series.data().x;
    let y = series.render_y();
    let len = series.len();
    let mut out = Vec::with_capacity(len.saturating_sub(start) * 2);
    for index in start..len {
        projection.point(&mut out, x[index], y[index]);
    }
    out
}

pub(crate) fn has_error_channels(series: &Series) -> bool {
    let data = series.data();
    data.error_minus.is_some() || data.error_plus.is_some()
}

/// Two vertices per sample: the lower and upper error bound.
pub(crate) fn error_bar_vertices(series: &Series, projection: Projection, start: usize) -> Vec<f32> {
    let data = series.data();
    let y = series.render_y();
    let len = series.len();
    let mut out = Vec::with_capacity(len.saturating_sub(start) * 4);
    for index in start..len {
        let minus = data.error_minus.as_ref().map_or(0.0, |values| values[index]);
        let plus = data.error_plus.as_ref().map_or(0.0, |values| values[index]);
        projection.point(&mut out, data.x[index], y[index] - minus);
        projection.point(&mut out, data.x[index], y[index] + plus);
    }
    out
}

/// `2n - 1` vertices: each sample holds its value until the next X.
fn step_vertices(series: &Series, projection: Projection) -> Vec<f32> {
    let x = &series.data().x;
    let y = series.render_y();
    let len = series.len();
    let mut out = Vec::with_capacity(len.saturating_mul(2).saturating_sub(1) * 2);
    for index in 0..len {
        projection.point(&mut out, x[index], y[index]);
        if index + 1 < len {
            projection.point(&mut out, x[index + 1], y[index]);
        }
    }
    out
}

/// `2n` vertices alternating upper (`y`) and lower (`y2`, or zero) edges.
fn band_vertices(series: &Series, projection: Projection) -> Vec<f32> {
    let data = series.data();
    let y = series.render_y();
    let lower = data.y2.as_deref();
    let len = series.len();
    let mut out = Vec::with_capacity(len * 4);
    for index in 0..len {
        projection.point(&mut out, data.x[index], y[index]);
        projection.point(&mut out, data.x[index], lower.map_or(0.0, |lower| lower[index]));
    }
    out
}

/// `6n` vertices: one quad from the zero baseline to each sample.
fn bar_vertices(series: &Series, projection: Projection) -> Vec<f32> {
    let data = series.data();
    let y = series.render_y();
    let len = series.len();
    let half = body_width(series) / 2.0;
    let baseline = baseline_value(projection.y);
    let mut out = Vec::with_capacity(len * QUAD_VERTICES * 2);
    for index in 0..len {
        let x = data.x[index];
        let value = y[index];
        let (bottom, top) = if value >= baseline {
            (baseline, value)
        } else {
            (value, baseline)
        };
        projection.quad(&mut out, x - half, x + half, bottom, top);
    }
    out
}

fn baseline_value(kind: ScaleKind) -> f64 {
    match kind {
        ScaleKind::Linear => 0.0,
        ScaleKind::Logarithmic => crate::core::LOG_DOMAIN_FLOOR,
    }
}

/// Width of a bar or candle body in data units.
fn body_width(series: &Series) -> f64 {
    let style = series.style();
    if let Some(width) = style.fixed_width.filter(|width| width.is_finite() && *width > 0.0) {
        return width;
    }
    min_spacing(&series.data().x).unwrap_or(1.0) * style.width_ratio
}

/// Smallest positive gap between distinct finite values.
fn min_spacing(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<OrderedFloat<f64>> = values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
        .windows(2)
        .map(|pair| pair[1].0 - pair[0].0)
        .filter(|gap| *gap > 0.0)
        .map(OrderedFloat)
        .min()
        .map(|gap| gap.0)
}

/// `6n` three-component vertices: x, y and the cell value normalized to
/// `[0, 1]`, plus a color ramp texture.
fn heatmap_geometry(series: &Series, projection: Projection) -> SeriesGeometry {
    let data = series.data();
    let values = data.values.as_deref().unwrap_or(&data.y);
    let len = series.len();

    let finite = || values.iter().copied().filter(|value| value.is_finite()).map(OrderedFloat);
    let low = finite().min().map_or(0.0, |value| value.0);
    let high = finite().max().map_or(1.0, |value| value.0);
    let span = high - low;

    let style = series.style();
    let half_width = style
        .fixed_width
        .filter(|width| width.is_finite() && *width > 0.0)
        .or_else(|| min_spacing(&data.x))
        .unwrap_or(1.0)
        / 2.0;
    let half_height = min_spacing(&data.y).unwrap_or(1.0) / 2.0;

    let mut vertices = Vec::with_capacity(len * QUAD_VERTICES * 3);
    for index in 0..len {
        let (x, y) = (data.x[index], data.y[index]);
        let value = values[index];
        let normalized = if !value.is_finite() {
            f32::NAN
        } else if span > 0.0 {
            ((value - low) / span) as f32
        } else {
            0.5
        };
        for (vx, vy) in [
            (x - half_width, y - half_height),
            (x + half_width, y - half_height),
            (x + half_width, y + half_height),
            (x - half_width, y - half_height),
            (x + half_width, y + half_height),
            (x - half_width, y + half_height),
        ] {
            projection.point(&mut vertices, vx, vy);
            vertices.push(normalized);
        }
    }

    SeriesGeometry {
        vertices,
        components: 3,
        aux_vertices: None,
        texture: Some(colormap(style)),
    }
}

/// 256-texel RGBA8 ramp from the primary to the secondary style color.
#[must_use]
pub fn colormap(style: &SeriesStyle) -> Vec<u8> {
    ramp(style.color, style.secondary_color)
}

fn ramp(low: Color, high: Color) -> Vec<u8> {
    (0..COLORMAP_SIZE)
        .flat_map(|texel| low.mix(high, texel as f64 / (COLORMAP_SIZE - 1) as f64).to_rgba8())
        .collect()
}

/// Bullish candles (`close >= open`) go to the main buffer and bearish ones
/// to the aux buffer, 12 vertices each. Candles with a non-finite price are
/// dropped. Missing OHLC channels fall back to `y`.
fn candlestick_geometry(series: &Series, projection: Projection) -> SeriesGeometry {
    let data = series.data();
    let (open, high, low, close) = (
        channel_or(&data.open, &data.y),
        channel_or(&data.high, &data.y),
        channel_or(&data.low, &data.y),
        channel_or(&data.close, &data.y),
    );

    let half_body = body_width(series) / 2.0;
    let half_wick = half_body * WICK_WIDTH_RATIO;
    let mut bullish = Vec::new();
    let mut bearish = Vec::new();
    for index in 0..series.len() {
        let x = data.x[index];
        let (o, h, l, c) = (open[index], high[index], low[index], close[index]);
        if ![x, o, h, l, c].into_iter().all(f64::is_finite) {
            continue;
        }
        let out = if c >= o { &mut bullish } else { &mut bearish };
        projection.quad(out, x - half_body, x + half_body, o.min(c), o.max(c));
        projection.quad(out, x - half_wick, x + half_wick, l.min(h), l.max(h));
    }

    SeriesGeometry {
        vertices: bullish,
        components: 2,
        aux_vertices: Some(bearish),
        texture: None,
    }
}

fn channel_or<'a>(channel: &'a Option<Vec<f64>>, fallback: &'a [f64]) -> &'a [f64] {
    channel.as_deref().unwrap_or(fallback)
}
