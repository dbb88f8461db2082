use indexmap::IndexMap;
use tracing::debug;

use crate::core::{AxisView, DataRange, Scale, ScaleKind, ViewportState};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionManager;
use crate::navigation::BoxZoom;
use crate::render::Rasterizer;

use super::chart_model::{ChartModel, ScaleSet};
use super::chart_runtime::ChartRuntimeState;
use super::engine_core::EngineCore;
use super::{ChartEngine, ChartEngineConfig, compute_layout};

impl<R: Rasterizer> ChartEngine<R> {
    /// Creates a fully initialized engine from a validated config.
    pub fn new(mut rasterizer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let primary = config
            .resolved_primary_axis()
            .cloned()
            .ok_or_else(|| ChartError::InvalidConfig("no primary axis".to_owned()))?;

        let x_range = config
            .x_range
            .unwrap_or_else(|| default_range(config.x_scale_kind));
        let state = ViewportState::new(
            AxisView::new(x_range, config.x_scale_kind),
            config.y_axes.iter().map(|axis| {
                let range = axis
                    .initial_range
                    .unwrap_or_else(|| default_range(axis.scale_kind));
                (axis.id.clone(), AxisView::new(range, axis.scale_kind))
            }),
            &primary,
        )?;

        let layout = compute_layout(
            config.viewport,
            config.margins,
            config.axis_width,
            &config.y_axes,
        );
        let plot = layout.plot_area;
        let scales = ScaleSet {
            x: Scale::new(
                config.x_scale_kind,
                (x_range.min, x_range.max),
                (plot.x, plot.right()),
            ),
            y: state
                .axes()
                .map(|(id, view)| {
                    (
                        id.clone(),
                        Scale::new(
                            view.kind,
                            (view.range.min, view.range.max),
                            (plot.bottom(), plot.y),
                        ),
                    )
                })
                .collect(),
        };

        rasterizer.resize(config.viewport)?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            axes = config.y_axes.len(),
            primary = %primary,
            "bootstrap chart engine"
        );

        Ok(Self {
            rasterizer,
            core: EngineCore {
                model: ChartModel {
                    viewport: config.viewport,
                    pixel_ratio: config.pixel_ratio,
                    clear_color: config.clear_color,
                    axes: config.y_axes,
                    initial_x_range: config.x_range,
                    margins: config.margins,
                    axis_width: config.axis_width,
                    layout,
                    layout_override: false,
                    state,
                    scales,
                    series: IndexMap::new(),
                    interaction: InteractionManager::new(config.drag_mode, config.wheel),
                    box_zoom: BoxZoom::default(),
                },
                runtime: ChartRuntimeState::pending_first_frame(),
            },
        })
    }
}

fn default_range(kind: ScaleKind) -> DataRange {
    match kind {
        ScaleKind::Linear => DataRange { min: 0.0, max: 1.0 },
        ScaleKind::Logarithmic => DataRange {
            min: 1.0,
            max: 10.0,
        },
    }
}
