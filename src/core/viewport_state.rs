use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{AxisId, DataRange, ScaleKind};
use crate::error::{ChartError, ChartResult};

/// Visible range of one axis together with the scale family it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisView {
    pub range: DataRange,
    pub kind: ScaleKind,
}

impl AxisView {
    #[must_use]
    pub fn new(range: DataRange, kind: ScaleKind) -> Self {
        Self { range, kind }
    }

    /// Range ends in scale space.
    #[must_use]
    pub fn projected(self) -> (f64, f64) {
        self.kind.project_range(self.range)
    }
}

/// The currently visible data rectangle: one shared X range and one
/// independent range per Y axis.
///
/// Every stored range is finite with `max > min`; writes that would break
/// this are rejected and leave the previous range in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    x: AxisView,
    y: IndexMap<AxisId, AxisView>,
    primary_id: AxisId,
    primary: usize,
}

impl ViewportState {
    pub fn new(
        x: AxisView,
        y_axes: impl IntoIterator<Item = (AxisId, AxisView)>,
        primary: &AxisId,
    ) -> ChartResult<Self> {
        let mut y = IndexMap::new();
        for (id, view) in y_axes {
            if y.insert(id.clone(), view).is_some() {
                return Err(ChartError::InvalidConfig(format!(
                    "duplicate y axis id `{id}`"
                )));
            }
        }
        let index = y
            .get_index_of(primary)
            .ok_or_else(|| ChartError::UnknownAxis(primary.to_string()))?;
        Ok(Self {
            x,
            y,
            primary_id: primary.clone(),
            primary: index,
        })
    }

    #[must_use]
    pub fn x(&self) -> AxisView {
        self.x
    }

    #[must_use]
    pub fn x_range(&self) -> DataRange {
        self.x.range
    }

    #[must_use]
    pub fn y(&self, id: &AxisId) -> Option<AxisView> {
        self.y.get(id).copied()
    }

    #[must_use]
    pub fn y_range(&self, id: &AxisId) -> Option<DataRange> {
        self.y.get(id).map(|view| view.range)
    }

    #[must_use]
    pub fn contains_axis(&self, id: &AxisId) -> bool {
        self.y.contains_key(id)
    }

    #[must_use]
    pub fn primary_axis(&self) -> &AxisId {
        &self.primary_id
    }

    #[must_use]
    pub fn primary(&self) -> AxisView {
        self.y[self.primary]
    }

    /// Y axes in declaration order.
    pub fn axes(&self) -> impl Iterator<Item = (&AxisId, AxisView)> {
        self.y.iter().map(|(id, view)| (id, *view))
    }

    /// Returns `true` when the stored range changed.
    pub fn set_x_range(&mut self, range: DataRange) -> bool {
        let Some(range) = self.x.kind.sanitize(range.min, range.max) else {
            return false;
        };
        let changed = self.x.range != range;
        self.x.range = range;
        changed
    }

    /// Returns `Ok(true)` when the stored range changed.
    pub fn set_y_range(&mut self, id: &AxisId, range: DataRange) -> ChartResult<bool> {
        let view = self
            .y
            .get_mut(id)
            .ok_or_else(|| ChartError::UnknownAxis(id.to_string()))?;
        let Some(range) = view.kind.sanitize(range.min, range.max) else {
            return Ok(false);
        };
        let changed = view.range != range;
        view.range = range;
        Ok(changed)
    }

    #[must_use]
    pub fn view_bounds(&self) -> ViewBounds {
        let primary = self.primary();
        ViewBounds {
            x: self.x.range,
            y: primary.range,
            primary_axis: self.primary_axis().clone(),
            axes: self
                .y
                .iter()
                .map(|(id, view)| (id.clone(), view.range))
                .collect(),
        }
    }
}

/// Combined bounds reported to the host and carried by navigation events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewBounds {
    pub x: DataRange,
    /// Range of the primary axis.
    pub y: DataRange,
    pub primary_axis: AxisId,
    pub axes: IndexMap<AxisId, DataRange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: f64, max: f64) -> DataRange {
        DataRange::new(min, max).expect("valid range")
    }

    fn state() -> ViewportState {
        ViewportState::new(
            AxisView::new(range(0.0, 10.0), ScaleKind::Linear),
            [
                (AxisId::from("left"), AxisView::new(range(0.0, 10.0), ScaleKind::Linear)),
                (
                    AxisId::from("log"),
                    AxisView::new(range(1.0, 1000.0), ScaleKind::Logarithmic),
                ),
            ],
            &AxisId::from("left"),
        )
        .expect("valid state")
    }

    #[test]
    fn rejects_unknown_primary_axis() {
        let err = ViewportState::new(
            AxisView::new(range(0.0, 1.0), ScaleKind::Linear),
            [(AxisId::from("a"), AxisView::new(range(0.0, 1.0), ScaleKind::Linear))],
            &AxisId::from("b"),
        )
        .expect_err("unknown primary");
        assert!(matches!(err, ChartError::UnknownAxis(_)));
    }

    #[test]
    fn log_axis_minimum_is_raised_to_floor() {
        let mut state = state();
        let changed = state
            .set_y_range(&AxisId::from("log"), range(-5.0, 100.0))
            .expect("known axis");
        assert!(changed);
        let stored = state.y_range(&AxisId::from("log")).expect("log axis");
        assert!(stored.min > 0.0);
        assert_eq!(stored.max, 100.0);
    }

    #[test]
    fn view_bounds_report_primary_and_every_axis() {
        let bounds = state().view_bounds();
        assert_eq!(bounds.primary_axis, AxisId::from("left"));
        assert_eq!(bounds.y, range(0.0, 10.0));
        assert_eq!(bounds.axes.len(), 2);
    }
}
