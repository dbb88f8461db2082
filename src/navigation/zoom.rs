use tracing::trace;

use crate::core::{AxisId, AxisView, DataRange, ViewportState};
use crate::error::{ChartError, ChartResult};
use crate::navigation::{BaselineAxes, ZoomRequest, pin_baseline};

/// Applies a zoom step and reports whether any stored range changed.
///
/// Degenerate requested ranges are ignored. An unknown `axis_id` is an error.
pub fn apply_zoom(
    state: &mut ViewportState,
    request: &ZoomRequest,
    baseline_axes: &BaselineAxes,
) -> ChartResult<bool> {
    if let Some(axis) = &request.axis_id
        && !state.contains_axis(axis)
    {
        return Err(ChartError::UnknownAxis(axis.to_string()));
    }

    let mut changed = false;
    if let Some((min, max)) = request.x_range
        && let Some(range) = state.x().kind.sanitize(min, max)
    {
        changed |= state.set_x_range(range);
    }

    let Some((min, max)) = request.y_range else {
        return Ok(changed);
    };

    match &request.axis_id {
        Some(axis) => {
            let Some(view) = state.y(axis) else {
                return Err(ChartError::UnknownAxis(axis.to_string()));
            };
            if let Some(range) = view.kind.sanitize(min, max) {
                let range = pin_baseline(axis, view.range, range, baseline_axes);
                changed |= state.set_y_range(axis, range)?;
            }
        }
        None => {
            let primary_id = state.primary_axis().clone();
            let primary = state.primary();
            let Some(target) = primary.kind.sanitize(min, max) else {
                return Ok(changed);
            };

            let updates: Vec<(AxisId, DataRange)> = state
                .axes()
                .filter_map(|(id, view)| {
                    let next = if *id == primary_id {
                        Some(target)
                    } else {
                        proportional_range(primary, target, view)
                    }?;
                    Some((id.clone(), pin_baseline(id, view.range, next, baseline_axes)))
                })
                .collect();

            for (id, range) in updates {
                changed |= state.set_y_range(&id, range)?;
            }
        }
    }

    trace!(changed, axis = ?request.axis_id, "apply zoom");
    Ok(changed)
}

/// Rescales a secondary axis by the same factor and offset the primary axis
/// moved by. Computed in each axis' scale space.
#[must_use]
pub fn proportional_range(
    primary_before: AxisView,
    primary_after: DataRange,
    axis: AxisView,
) -> Option<DataRange> {
    let (old_min, old_max) = primary_before.projected();
    let (new_min, new_max) = primary_before.kind.project_range(primary_after);
    let old_span = old_max - old_min;
    if !old_span.is_finite() || old_span <= 0.0 {
        return None;
    }
    let factor = (new_max - new_min) / old_span;
    let offset = (new_min - old_min) / old_span;

    let (axis_min, axis_max) = axis.projected();
    let span = axis_max - axis_min;
    let min = axis_min + offset * span;
    let max = min + factor * span;
    axis.kind.unproject_range(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScaleKind;

    #[test]
    fn proportional_range_follows_primary_offset_and_factor() {
        let primary = AxisView::new(DataRange::new(0.0, 10.0).expect("range"), ScaleKind::Linear);
        let secondary =
            AxisView::new(DataRange::new(0.0, 100.0).expect("range"), ScaleKind::Linear);
        let next = proportional_range(
            primary,
            DataRange::new(2.0, 6.0).expect("range"),
            secondary,
        )
        .expect("valid rescale");
        assert!((next.min - 20.0).abs() <= 1e-9);
        assert!((next.max - 60.0).abs() <= 1e-9);
    }
}
