use tracing::{debug, trace};

use crate::core::{AxisId, PixelRect, ViewBounds};
use crate::error::ChartResult;
use crate::navigation::{ZoomRequest, apply_autoscale, apply_pan, apply_zoom};
use crate::render::Rasterizer;

use super::{ChartEngine, ChartEvent};

impl<R: Rasterizer> ChartEngine<R> {
    /// Applies a zoom step. Always notifies `Zoom` subscribers and requests
    /// a frame, even when the bounds did not change.
    pub fn zoom(&mut self, request: ZoomRequest) -> ChartResult<()> {
        let baseline = self.baseline_axes();
        let changed = apply_zoom(&mut self.core.model.state, &request, &baseline)?;
        trace!(changed, "zoom");
        self.emit(&ChartEvent::Zoom(self.view_bounds()));
        self.request_render();
        Ok(())
    }

    /// Pans by a pixel delta. `axis` limits the vertical shift to one axis.
    pub fn pan(&mut self, dx: f64, dy: f64, axis: Option<&AxisId>) -> ChartResult<()> {
        let baseline = self.baseline_axes();
        let plot_area = self.core.model.layout.plot_area;
        let changed = apply_pan(
            &mut self.core.model.state,
            dx,
            dy,
            axis,
            plot_area,
            &baseline,
        )?;
        if changed {
            self.emit(&ChartEvent::Pan(self.view_bounds()));
            self.request_render();
        }
        Ok(())
    }

    /// Fits every axis to the visible series.
    pub fn auto_scale(&mut self) -> ChartResult<()> {
        self.auto_scale_silently()?;
        self.emit(&ChartEvent::Zoom(self.view_bounds()));
        self.request_render();
        Ok(())
    }

    /// Restores the configured initial ranges; axes without one are
    /// autoscaled.
    pub fn reset_zoom(&mut self) -> ChartResult<()> {
        let model = &self.core.model;
        let has_initial = model.initial_x_range.is_some()
            || model.axes.iter().any(|axis| axis.initial_range.is_some());
        if !has_initial {
            return self.auto_scale();
        }

        self.auto_scale_silently()?;
        let model = &mut self.core.model;
        if let Some(range) = model.initial_x_range {
            model.state.set_x_range(range);
        }
        for axis in &model.axes {
            if let Some(range) = axis.initial_range {
                model.state.set_y_range(&axis.id, range)?;
            }
        }
        debug!("reset zoom to configured ranges");
        self.emit(&ChartEvent::Zoom(self.view_bounds()));
        self.request_render();
        Ok(())
    }

    #[must_use]
    pub fn view_bounds(&self) -> ViewBounds {
        self.core.model.state.view_bounds()
    }

    /// Drives box zoom: `Some` updates the pending selection, `None` commits.
    ///
    /// Returns `true` when a commit was applied as a zoom.
    pub fn box_zoom(&mut self, selection: Option<PixelRect>) -> ChartResult<bool> {
        let model = &mut self.core.model;
        let plot_area = model.layout.plot_area;
        match model.box_zoom.update(selection, plot_area, &model.state) {
            Some(request) => {
                debug!(?request, "commit box zoom");
                self.zoom(request)?;
                Ok(true)
            }
            None => {
                self.request_render();
                Ok(false)
            }
        }
    }

    #[must_use]
    pub fn selection(&self) -> Option<PixelRect> {
        self.core.model.box_zoom.selection()
    }

    fn auto_scale_silently(&mut self) -> ChartResult<bool> {
        let baseline = self.baseline_axes();
        let model = &mut self.core.model;
        apply_autoscale(&mut model.state, model.series.values(), &baseline)
    }
}
