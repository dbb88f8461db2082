use tracing::debug;

use crate::core::{AxisId, ChartLayout, Scale, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Rasterizer;

use super::engine_core::EngineCore;
use super::validation::validate_layout;
use super::{ChartEvent, EventKind, SubscriptionId, Subscriptions, compute_layout};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the viewport state, series, interaction state and
/// draw-list builder, and hands finished frames to its rasterizer.
pub struct ChartEngine<R: Rasterizer> {
    pub(super) rasterizer: R,
    pub(super) core: EngineCore,
}

impl<R: Rasterizer> ChartEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.model.viewport
    }

    #[must_use]
    pub fn pixel_ratio(&self) -> f64 {
        self.core.model.pixel_ratio
    }

    #[must_use]
    pub fn layout(&self) -> &ChartLayout {
        &self.core.model.layout
    }

    /// Replaces the computed layout with one supplied by the host.
    ///
    /// The override survives resizes until [`ChartEngine::clear_layout_override`].
    pub fn set_layout(&mut self, layout: ChartLayout) -> ChartResult<()> {
        validate_layout(&layout)?;
        if let Some(unknown) = layout
            .axes
            .iter()
            .find(|axis| !self.core.model.state.contains_axis(&axis.id))
        {
            return Err(ChartError::UnknownAxis(unknown.id.to_string()));
        }
        self.core.model.layout = layout;
        self.core.model.layout_override = true;
        self.request_render();
        Ok(())
    }

    pub fn clear_layout_override(&mut self) {
        self.core.model.layout_override = false;
        self.recompute_layout();
        self.request_render();
    }

    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport { width, height });
        }
        self.rasterizer.resize(viewport)?;
        self.core.model.viewport = viewport;
        if !self.core.model.layout_override {
            self.recompute_layout();
        }
        debug!(width, height, "resize viewport");
        self.emit(&ChartEvent::Resize { width, height });
        self.request_render();
        Ok(())
    }

    /// Current X scale, mapping data to plot-area pixels.
    #[must_use]
    pub fn x_scale(&self) -> Scale {
        self.core.model.scales.x
    }

    #[must_use]
    pub fn y_scale(&self, axis: &AxisId) -> Option<Scale> {
        self.core.model.scales.y.get(axis).copied()
    }

    #[must_use]
    pub fn x_ticks(&self, count: usize) -> Vec<f64> {
        self.core.model.scales.x.ticks(count)
    }

    pub fn y_ticks(&self, axis: &AxisId, count: usize) -> ChartResult<Vec<f64>> {
        self.y_scale(axis)
            .map(|scale| scale.ticks(count))
            .ok_or_else(|| ChartError::UnknownAxis(axis.to_string()))
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&ChartEvent) + 'static,
    {
        self.core.runtime.events.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.core.runtime.events.unsubscribe(id)
    }

    /// Registry handle that handlers can capture to unsubscribe themselves.
    #[must_use]
    pub fn subscriptions(&self) -> Subscriptions {
        self.core.runtime.events.subscriptions()
    }

    #[must_use]
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    #[must_use]
    pub fn into_rasterizer(self) -> R {
        self.rasterizer
    }

    pub(super) fn emit(&self, event: &ChartEvent) {
        self.core.runtime.events.emit(event);
    }

    pub(super) fn recompute_layout(&mut self) {
        let model = &mut self.core.model;
        model.layout = compute_layout(model.viewport, model.margins, model.axis_width, &model.axes);
    }

    /// Pushes the viewport state and plot area into every axis scale.
    pub(super) fn refresh_scales(&mut self) {
        let model = &mut self.core.model;
        let plot = model.layout.plot_area;
        let x = model.state.x();
        model.scales.x.set_domain(x.range.min, x.range.max);
        model.scales.x.set_range(plot.x, plot.right());
        for (id, view) in model.state.axes() {
            if let Some(scale) = model.scales.y.get_mut(id) {
                scale.set_domain(view.range.min, view.range.max);
                scale.set_range(plot.bottom(), plot.y);
            }
        }
    }
}
