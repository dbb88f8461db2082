use serde::{Deserialize, Serialize};

use crate::core::{AxisLayout, AxisPosition, ChartLayout, PixelRect, Viewport, YAxisConfig};

/// Base spacing between the container edge and the plot area, before axis
/// gutters are added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for LayoutMargins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 25.0,
            bottom: 40.0,
            left: 25.0,
        }
    }
}

/// Derives the plot area and gutter offsets from the container size.
///
/// Each axis takes `axis_width` on its side; stacked axes on the same side
/// move outward in declaration order.
#[must_use]
pub fn compute_layout(
    viewport: Viewport,
    margins: LayoutMargins,
    axis_width: f64,
    axes: &[YAxisConfig],
) -> ChartLayout {
    let mut left_count = 0usize;
    let mut right_count = 0usize;
    let mut layouts = Vec::with_capacity(axes.len());
    for axis in axes {
        let stacked = match axis.position {
            AxisPosition::Left => &mut left_count,
            AxisPosition::Right => &mut right_count,
        };
        layouts.push(AxisLayout {
            id: axis.id.clone(),
            position: axis.position,
            pixel_offset: *stacked as f64 * axis_width,
        });
        *stacked += 1;
    }

    let left = margins.left + left_count as f64 * axis_width;
    let right = margins.right + right_count as f64 * axis_width;
    let width = (f64::from(viewport.width) - left - right).max(0.0);
    let height = (f64::from(viewport.height) - margins.top - margins.bottom).max(0.0);

    ChartLayout {
        plot_area: PixelRect::new(left, margins.top, width, height),
        axes: layouts,
        axis_width,
    }
}
