use crate::core::{AxisId, AxisView, DataRange, ViewportState};
use crate::navigation::{ZoomRequest, proportional_range};

/// Narrowest span a wheel step may produce.
pub const MIN_SPAN: f64 = 1e-12;
/// Widest span a wheel step may produce.
pub const MAX_SPAN: f64 = 1e15;

/// Region a wheel step zooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WheelTarget {
    XAxis,
    YAxis(AxisId),
    Plot,
}

/// Cursor position as fractions of the plot area, measured from the left
/// and from the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelFocus {
    pub x_fraction: f64,
    pub y_fraction: f64,
}

/// Scales `view` by `factor` around the value at `fraction` of its span so
/// that value keeps its pixel position.
///
/// Returns `None` when the resulting span leaves `[MIN_SPAN, MAX_SPAN]`.
#[must_use]
pub fn focal_range(view: AxisView, fraction: f64, factor: f64) -> Option<DataRange> {
    let (min, max) = view.projected();
    let focus = min + fraction * (max - min);
    let next_min = view.kind.unproject(focus - (focus - min) * factor);
    let next_max = view.kind.unproject(focus + (max - focus) * factor);
    admissible(next_min, next_max)
}

/// Builds the zoom request for one wheel step, or `None` when any affected
/// axis would become degenerate.
#[must_use]
pub fn wheel_zoom(
    state: &ViewportState,
    target: &WheelTarget,
    focus: WheelFocus,
    factor: f64,
) -> Option<ZoomRequest> {
    if !factor.is_finite() || factor <= 0.0 {
        return None;
    }
    match target {
        WheelTarget::XAxis => {
            let x = focal_range(state.x(), focus.x_fraction, factor)?;
            Some(ZoomRequest::new().with_x(x.min, x.max))
        }
        WheelTarget::YAxis(axis) => {
            let y = focal_range(state.y(axis)?, focus.y_fraction, factor)?;
            Some(ZoomRequest::new().with_y(y.min, y.max).on_axis(axis.clone()))
        }
        WheelTarget::Plot => {
            let x = focal_range(state.x(), focus.x_fraction, factor)?;
            let primary = state.primary();
            let y = focal_range(primary, focus.y_fraction, factor)?;
            for (id, view) in state.axes() {
                if id == state.primary_axis() {
                    continue;
                }
                let follower = proportional_range(primary, y, view)?;
                admissible(follower.min, follower.max)?;
            }
            Some(ZoomRequest::new().with_x(x.min, x.max).with_y(y.min, y.max))
        }
    }
}

fn admissible(min: f64, max: f64) -> Option<DataRange> {
    let span = max - min;
    if !span.is_finite() || !(MIN_SPAN..=MAX_SPAN).contains(&span) {
        return None;
    }
    DataRange::new(min, max)
}
