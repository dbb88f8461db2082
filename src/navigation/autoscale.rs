use tracing::debug;

use crate::core::{AxisId, DataRange, Extent, MAX_BOUND_MAGNITUDE, ScaleKind, Series, ViewportState};
use crate::error::ChartResult;
use crate::navigation::BaselineAxes;

const PADDING_RATIO: f64 = 0.05;
const MAX_PADDING: f64 = 1e10;

/// Fits X and every Y axis to the visible series that own finite samples.
///
/// Axes without a qualifying series keep their current range. Returns
/// whether any range changed.
pub fn apply_autoscale<'a>(
    state: &mut ViewportState,
    series: impl IntoIterator<Item = &'a Series>,
    baseline_axes: &BaselineAxes,
) -> ChartResult<bool> {
    let candidates: Vec<&Series> = series
        .into_iter()
        .filter(|series| series.contributes_to_autoscale())
        .collect();

    let mut changed = false;
    let x_kind = state.x().kind;
    let mut x_extent = Extent::EMPTY;
    for series in &candidates {
        let bounds = series.bounds();
        x_extent.include(x_kind.project(bounds.x_min));
        x_extent.include(x_kind.project(bounds.x_max));
    }
    if let Some(range) = fitted_range(x_extent, x_kind) {
        changed |= state.set_x_range(range);
    }

    let axes: Vec<(AxisId, ScaleKind)> = state
        .axes()
        .map(|(id, view)| (id.clone(), view.kind))
        .collect();
    for (axis, kind) in axes {
        let mut projected = Extent::EMPTY;
        let mut raw = Extent::EMPTY;
        for series in candidates.iter().filter(|series| series.axis_id() == &axis) {
            let bounds = series.bounds();
            raw.include(bounds.y_min);
            raw.include(bounds.y_max);
            projected.include(kind.project(bounds.y_min));
            projected.include(kind.project(bounds.y_max));
        }
        let Some(mut range) = fitted_range(projected, kind) else {
            continue;
        };
        if baseline_axes.contains(&axis) && raw.min >= 0.0 {
            range = kind.sanitize(0.0, range.max).unwrap_or(range);
        }
        changed |= state.set_y_range(&axis, range)?;
    }

    debug!(
        series = candidates.len(),
        changed,
        "autoscale viewport"
    );
    Ok(changed)
}

fn fitted_range(extent: Extent, kind: ScaleKind) -> Option<DataRange> {
    if extent.is_empty() {
        return None;
    }
    let (min, max) = padded_range(extent.min, extent.max);
    kind.unproject_range(min, max)
}

/// Pads a raw extent by five percent per side, capped at `1e10`.
///
/// A zero-width or non-finite extent is first widened to a synthetic span of
/// `max(|min| * 0.1, 1)` centered on `min`. Results are clamped to ±1e15.
#[must_use]
pub fn padded_range(min: f64, max: f64) -> (f64, f64) {
    let mut min = min;
    let mut max = max;
    let mut span = max - min;
    if !span.is_finite() || span <= 0.0 {
        span = (min.abs() * 0.1).max(1.0);
        min -= span / 2.0;
        max = min + span;
    }
    let padding = (span * PADDING_RATIO).min(MAX_PADDING);
    (
        (min - padding).clamp(-MAX_BOUND_MAGNITUDE, MAX_BOUND_MAGNITUDE),
        (max + padding).clamp(-MAX_BOUND_MAGNITUDE, MAX_BOUND_MAGNITUDE),
    )
}
