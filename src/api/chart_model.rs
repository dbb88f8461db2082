use indexmap::IndexMap;

use crate::core::{
    AxisId, ChartLayout, Color, DataRange, Scale, Series, SeriesId, Viewport, ViewportState,
    YAxisConfig,
};
use crate::interaction::InteractionManager;
use crate::navigation::BoxZoom;

use super::LayoutMargins;

/// Per-axis scales refreshed from the viewport state and plot area.
#[derive(Debug, Clone)]
pub(super) struct ScaleSet {
    pub(super) x: Scale,
    pub(super) y: IndexMap<AxisId, Scale>,
}

/// Mutable chart domain state owned by the engine.
pub(super) struct ChartModel {
    pub(super) viewport: Viewport,
    pub(super) pixel_ratio: f64,
    pub(super) clear_color: Color,
    pub(super) axes: Vec<YAxisConfig>,
    pub(super) initial_x_range: Option<DataRange>,
    pub(super) margins: LayoutMargins,
    pub(super) axis_width: f64,
    pub(super) layout: ChartLayout,
    pub(super) layout_override: bool,
    pub(super) state: ViewportState,
    pub(super) scales: ScaleSet,
    pub(super) series: IndexMap<SeriesId, Series>,
    pub(super) interaction: InteractionManager,
    pub(super) box_zoom: BoxZoom,
}
