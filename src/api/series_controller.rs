use tracing::{debug, warn};

use crate::core::{Series, SeriesData, SeriesId, SeriesKind, SeriesStyle};
use crate::error::{ChartError, ChartResult};
use crate::navigation::BaselineAxes;
use crate::render::Rasterizer;

use super::ChartEngine;
use super::validation::{validate_rolling_window, validate_series_style};

impl<R: Rasterizer> ChartEngine<R> {
    /// Registers a series on one of the configured Y axes.
    pub fn add_series(&mut self, series: Series) -> ChartResult<()> {
        if self.core.model.series.contains_key(series.id()) {
            return Err(ChartError::DuplicateSeries(series.id().to_string()));
        }
        if !self.core.model.state.contains_axis(series.axis_id()) {
            return Err(ChartError::UnknownAxis(series.axis_id().to_string()));
        }
        validate_series_style(series.style())?;
        validate_rolling_window(series.max_points())?;

        debug!(
            series = %series.id(),
            kind = ?series.kind(),
            axis = %series.axis_id(),
            len = series.len(),
            "add series"
        );
        self.core.model.series.insert(series.id().clone(), series);
        self.request_render();
        Ok(())
    }

    /// Removes a series and releases its rasterizer buffers.
    pub fn remove_series(&mut self, id: &SeriesId) -> ChartResult<Series> {
        let series = self
            .core
            .model
            .series
            .shift_remove(id)
            .ok_or_else(|| ChartError::UnknownSeries(id.to_string()))?;
        if let Err(err) = self
            .core
            .runtime
            .draw_list
            .release(&mut self.rasterizer, id)
        {
            warn!(series = %id, error = %err, "failed to release series buffers");
        }
        debug!(series = %id, "remove series");
        self.request_render();
        Ok(series)
    }

    /// Replaces every channel of a series.
    pub fn update_series(&mut self, id: &SeriesId, data: SeriesData) -> ChartResult<()> {
        let series = self.series_mut(id)?;
        series.update_data(data, false);
        debug!(series = %id, len = series.len(), "replace series data");
        self.request_render();
        Ok(())
    }

    /// Appends samples, trimming to the rolling window when one is set.
    pub fn append_data(&mut self, id: &SeriesId, data: SeriesData) -> ChartResult<()> {
        self.series_mut(id)?.update_data(data, true);
        self.request_render();
        Ok(())
    }

    pub fn set_max_points(&mut self, id: &SeriesId, max_points: Option<usize>) -> ChartResult<()> {
        validate_rolling_window(max_points)?;
        self.series_mut(id)?.set_max_points(max_points);
        self.request_render();
        Ok(())
    }

    pub fn set_series_style(&mut self, id: &SeriesId, style: SeriesStyle) -> ChartResult<()> {
        validate_series_style(&style)?;
        self.series_mut(id)?.set_style(style);
        self.request_render();
        Ok(())
    }

    pub fn set_series_visible(&mut self, id: &SeriesId, visible: bool) -> ChartResult<()> {
        self.series_mut(id)?.set_visible(visible);
        self.request_render();
        Ok(())
    }

    pub fn set_series_kind(&mut self, id: &SeriesId, kind: SeriesKind) -> ChartResult<()> {
        self.series_mut(id)?.set_kind(kind);
        self.request_render();
        Ok(())
    }

    #[must_use]
    pub fn series(&self, id: &SeriesId) -> Option<&Series> {
        self.core.model.series.get(id)
    }

    /// Series ids in insertion order, which is also draw order.
    pub fn series_ids(&self) -> impl Iterator<Item = &SeriesId> {
        self.core.model.series.keys()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.core.model.series.len()
    }

    /// Axes with a visible bar series.
    pub(super) fn baseline_axes(&self) -> BaselineAxes {
        self.core
            .model
            .series
            .values()
            .filter(|series| series.kind() == SeriesKind::Bar && series.is_visible())
            .map(|series| series.axis_id().clone())
            .collect()
    }

    fn series_mut(&mut self, id: &SeriesId) -> ChartResult<&mut Series> {
        self.core
            .model
            .series
            .get_mut(id)
            .ok_or_else(|| ChartError::UnknownSeries(id.to_string()))
    }
}
