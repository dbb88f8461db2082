use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::Bounds;
use crate::error::ChartResult;
use crate::render::{FrameUniforms, Rasterizer, RectPrimitive, RenderFrame};

use super::{ChartEngine, ChartEvent, RenderStats};

const FPS_WINDOW_MS: f64 = 1000.0;

/// Result of one [`ChartEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrameOutcome {
    Rendered(RenderStats),
    /// Nothing changed since the last frame.
    Idle,
    /// The engine was destroyed; the host should stop scheduling frames.
    Stopped,
}

impl<R: Rasterizer> ChartEngine<R> {
    /// Marks the next tick as dirty and syncs the scales with the viewport.
    pub fn request_render(&mut self) {
        if self.core.runtime.render_loop.stopped {
            return;
        }
        self.refresh_scales();
        self.core.runtime.render_loop.needs_render = true;
    }

    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.core.runtime.render_loop.needs_render
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.core.runtime.render_loop.stopped
    }

    /// Called once per animation frame with a monotonic timestamp.
    ///
    /// Renders at most one frame and only when something changed. A failed
    /// frame keeps the dirty flag so the next tick retries.
    pub fn tick(&mut self, now_ms: f64) -> ChartResult<FrameOutcome> {
        let render_loop = &self.core.runtime.render_loop;
        if render_loop.stopped {
            return Ok(FrameOutcome::Stopped);
        }
        if !render_loop.needs_render {
            return Ok(FrameOutcome::Idle);
        }
        self.render_at(Some(now_ms)).map(FrameOutcome::Rendered)
    }

    /// Renders immediately regardless of the dirty flag. Forced frames are
    /// left out of the FPS window.
    pub fn render(&mut self) -> ChartResult<FrameOutcome> {
        if self.core.runtime.render_loop.stopped {
            return Ok(FrameOutcome::Stopped);
        }
        self.render_at(None).map(FrameOutcome::Rendered)
    }

    #[must_use]
    pub fn last_render_stats(&self) -> Option<RenderStats> {
        self.core.runtime.render_loop.last_stats
    }

    /// Releases every rasterizer resource and drops all subscriptions.
    ///
    /// The engine stays readable afterwards but never renders again.
    pub fn destroy(&mut self) -> ChartResult<()> {
        if self.core.runtime.render_loop.stopped {
            return Ok(());
        }
        let released = self.core.runtime.draw_list.tracked_series();
        self.core
            .runtime
            .draw_list
            .release_all(&mut self.rasterizer)?;
        self.core.runtime.events.clear();
        self.core.model.interaction.cancel();
        self.core.model.box_zoom.cancel();

        let render_loop = &mut self.core.runtime.render_loop;
        render_loop.stopped = true;
        render_loop.needs_render = false;
        debug!(released, "destroy chart engine");
        Ok(())
    }

    fn render_at(&mut self, now_ms: Option<f64>) -> ChartResult<RenderStats> {
        self.refresh_scales();
        let started = Instant::now();
        self.draw_frame()?;
        let frame_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let render_loop = &mut self.core.runtime.render_loop;
        render_loop.needs_render = false;
        match (now_ms, render_loop.window_start_ms) {
            (Some(now_ms), None) => {
                render_loop.window_start_ms = Some(now_ms);
                render_loop.frames_in_window = 0;
            }
            (Some(now_ms), Some(start)) => {
                render_loop.frames_in_window += 1;
                let elapsed = now_ms - start;
                if elapsed >= FPS_WINDOW_MS {
                    render_loop.fps =
                        f64::from(render_loop.frames_in_window) * FPS_WINDOW_MS / elapsed;
                    render_loop.window_start_ms = Some(now_ms);
                    render_loop.frames_in_window = 0;
                }
            }
            (None, _) => {}
        }
        let stats = RenderStats {
            fps: render_loop.fps,
            frame_time_ms,
        };
        render_loop.last_stats = Some(stats);

        self.emit(&ChartEvent::Render(stats));
        Ok(stats)
    }

    fn draw_frame(&mut self) -> ChartResult<()> {
        let model = &mut self.core.model;
        let (draw_list, stats) = self.core.runtime.draw_list.build(
            &mut self.rasterizer,
            model.series.values_mut(),
            &model.state,
        );

        let (x_min, x_max) = model.state.x().projected();
        let (y_min, y_max) = model.state.primary().projected();
        let uniforms = FrameUniforms {
            viewport: model.viewport,
            pixel_ratio: model.pixel_ratio,
            clear_color: model.clear_color,
            data_bounds: Bounds::new(x_min, x_max, y_min, y_max),
            plot_area: model.layout.plot_area,
        };
        let frame = RenderFrame::new(uniforms)
            .with_draw_list(draw_list)
            .with_selection(model.box_zoom.selection().map(RectPrimitive::selection));

        trace!(
            draws = frame.draw_list.len(),
            visible = frame.visible_draw_count(),
            partial = stats.partial_writes,
            skipped = stats.skipped,
            "render frame"
        );
        self.rasterizer.render(&frame)
    }
}
