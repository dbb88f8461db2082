use tracing::trace;

use crate::core::{AxisId, PixelRect, ViewportState};
use crate::error::{ChartError, ChartResult};
use crate::navigation::{BaselineAxes, pin_baseline};

/// Shifts the viewport by a pixel delta.
///
/// X moves against `dx` so dragging right reveals earlier data. Y moves with
/// `dy` on `axis`, or on every axis when `axis` is `None`, each axis using
/// its own span. A plot area without area makes this a no-op.
pub fn apply_pan(
    state: &mut ViewportState,
    dx: f64,
    dy: f64,
    axis: Option<&AxisId>,
    plot_area: PixelRect,
    baseline_axes: &BaselineAxes,
) -> ChartResult<bool> {
    if let Some(axis) = axis
        && !state.contains_axis(axis)
    {
        return Err(ChartError::UnknownAxis(axis.to_string()));
    }
    if !plot_area.has_area() || !dx.is_finite() || !dy.is_finite() {
        return Ok(false);
    }

    let mut changed = false;
    if dx != 0.0 {
        let x = state.x();
        let (min, max) = x.projected();
        let delta = dx / plot_area.width * (max - min);
        if let Some(range) = x.kind.unproject_range(min - delta, max - delta) {
            changed |= state.set_x_range(range);
        }
    }

    if dy != 0.0 {
        let targets: Vec<AxisId> = match axis {
            Some(axis) => vec![axis.clone()],
            None => state.axes().map(|(id, _)| id.clone()).collect(),
        };
        for id in targets {
            let Some(view) = state.y(&id) else { continue };
            let (min, max) = view.projected();
            let delta = dy / plot_area.height * (max - min);
            let Some(shifted) = view.kind.unproject_range(min + delta, max + delta) else {
                continue;
            };
            let range = pin_baseline(&id, view.range, shifted, baseline_axes);
            changed |= state.set_y_range(&id, range)?;
        }
    }

    trace!(dx, dy, axis = ?axis, changed, "apply pan");
    Ok(changed)
}
