use serde::{Deserialize, Serialize};

use crate::core::{AxisId, Bounds, ChartLayout, SeriesId, SeriesKind, ViewBounds, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragMode, InteractionMode};
use crate::render::Rasterizer;

use super::ChartEngine;

/// Per-series summary carried by [`EngineSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub id: SeriesId,
    pub kind: SeriesKind,
    pub axis_id: AxisId,
    pub visible: bool,
    pub len: usize,
    pub finite_samples: usize,
    pub bounds: Bounds,
    pub max_points: Option<usize>,
}

/// Serializable read-only view of the engine used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub pixel_ratio: f64,
    pub layout: ChartLayout,
    pub view_bounds: ViewBounds,
    pub series: Vec<SeriesSnapshot>,
    pub interaction_mode: InteractionMode,
    pub drag_mode: DragMode,
}

impl EngineSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}

impl<R: Rasterizer> ChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let model = &self.core.model;
        EngineSnapshot {
            viewport: model.viewport,
            pixel_ratio: model.pixel_ratio,
            layout: model.layout.clone(),
            view_bounds: model.state.view_bounds(),
            series: model
                .series
                .values()
                .map(|series| SeriesSnapshot {
                    id: series.id().clone(),
                    kind: series.kind(),
                    axis_id: series.axis_id().clone(),
                    visible: series.is_visible(),
                    len: series.len(),
                    finite_samples: series.finite_sample_count(),
                    bounds: series.bounds(),
                    max_points: series.max_points(),
                })
                .collect(),
            interaction_mode: model.interaction.mode().clone(),
            drag_mode: model.interaction.drag_mode(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_pretty()
    }
}
