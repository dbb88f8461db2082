//! Navigation algorithms over [`ViewportState`](crate::core::ViewportState).
//!
//! Every function here is pure with respect to the engine: it reads series
//! bounds and layout passed in explicitly and mutates only the viewport
//! state it is handed.

mod autoscale;
mod box_zoom;
mod pan;
mod wheel;
mod zoom;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{AxisId, DataRange};

pub use autoscale::{apply_autoscale, padded_range};
pub use box_zoom::{BoxZoom, MIN_SELECTION_PX, selection_to_zoom};
pub use pan::apply_pan;
pub use wheel::{MAX_SPAN, MIN_SPAN, WheelFocus, WheelTarget, focal_range, wheel_zoom};
pub use zoom::{apply_zoom, proportional_range};

/// Y axes that carry at least one visible bar series and must keep their
/// baseline at zero.
pub type BaselineAxes = IndexSet<AxisId>;

/// Target ranges for one zoom step, in data space.
///
/// Without `axis_id` the Y range applies to the primary axis and every
/// other axis follows proportionally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoomRequest {
    #[serde(default)]
    pub x_range: Option<(f64, f64)>,
    #[serde(default)]
    pub y_range: Option<(f64, f64)>,
    #[serde(default)]
    pub axis_id: Option<AxisId>,
}

impl ZoomRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_x(mut self, min: f64, max: f64) -> Self {
        self.x_range = Some((min, max));
        self
    }

    #[must_use]
    pub fn with_y(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    #[must_use]
    pub fn on_axis(mut self, axis_id: impl Into<AxisId>) -> Self {
        self.axis_id = Some(axis_id.into());
        self
    }
}

/// Pins the lower bound of a baseline axis to zero.
///
/// An axis whose upper bound is not positive keeps `previous`.
pub(crate) fn pin_baseline(
    axis: &AxisId,
    previous: DataRange,
    next: DataRange,
    baseline_axes: &BaselineAxes,
) -> DataRange {
    if !baseline_axes.contains(axis) {
        return next;
    }
    DataRange::new(0.0, next.max).unwrap_or(previous)
}
