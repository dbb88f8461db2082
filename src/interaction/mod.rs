//! Pointer, wheel and touch gestures turned into navigation commands.
//!
//! [`InteractionManager`] holds only gesture state. Layout and viewport
//! state are borrowed per event from the engine that owns them.


use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AxisId, ChartLayout, PixelRect, ViewportState};
use crate::error::{ChartError, ChartResult};
use crate::navigation::{WheelFocus, WheelTarget, ZoomRequest, wheel_zoom};

pub use hit_test::{HitRegion, X_AXIS_HIT_HEIGHT, hit_test};

/// What a plot-area drag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DragMode {
    #[default]
    Pan,
    BoxSelect,
}

/// Axes a pan gesture moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanScope {
    All,
    YAxis(AxisId),
    XAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning { scope: PanScope },
    BoxSelecting { anchor: (f64, f64) },
}

/// Per-tick wheel zoom factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelZoomBehavior {
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
}

impl Default for WheelZoomBehavior {
    fn default() -> Self {
        Self {
            zoom_in_factor: 0.9,
            zoom_out_factor: 1.1,
        }
    }
}

impl WheelZoomBehavior {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.zoom_in_factor.is_finite()
            || !(0.0..1.0).contains(&self.zoom_in_factor)
            || self.zoom_in_factor == 0.0
        {
            return Err(ChartError::InvalidConfig(
                "wheel zoom-in factor must be in (0, 1)".to_owned(),
            ));
        }
        if !self.zoom_out_factor.is_finite() || self.zoom_out_factor <= 1.0 {
            return Err(ChartError::InvalidConfig(
                "wheel zoom-out factor must be finite and > 1".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Positive deltas zoom out.
    #[must_use]
    pub fn factor_for(self, delta: f64) -> f64 {
        if delta > 0.0 {
            self.zoom_out_factor
        } else {
            self.zoom_in_factor
        }
    }
}

/// Navigation step requested by a gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionCommand {
    Pan {
        dx: f64,
        dy: f64,
        axis: Option<AxisId>,
    },
    SelectionChanged(PixelRect),
    /// Final selection rectangle at pointer release.
    SelectionCommitted(PixelRect),
    Zoom(ZoomRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionManager {
    mode: InteractionMode,
    drag_mode: DragMode,
    wheel: WheelZoomBehavior,
    last_pointer: (f64, f64),
}

impl Default for InteractionManager {
    fn default() -> Self {
        Self::new(DragMode::Pan, WheelZoomBehavior::default())
    }
}

impl InteractionManager {
    #[must_use]
    pub fn new(drag_mode: DragMode, wheel: WheelZoomBehavior) -> Self {
        Self {
            mode: InteractionMode::Idle,
            drag_mode,
            wheel,
            last_pointer: (0.0, 0.0),
        }
    }

    #[must_use]
    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    /// Applies to the next gesture; an active one keeps its mode.
    pub fn set_drag_mode(&mut self, drag_mode: DragMode) {
        self.drag_mode = drag_mode;
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.mode == InteractionMode::Idle
    }

    /// Abandons the active gesture without committing it.
    pub fn cancel(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, layout: &ChartLayout) -> Option<InteractionCommand> {
        if !self.is_idle() {
            trace!(mode = ?self.mode, "pointer down ignored during active gesture");
            return None;
        }
        self.mode = match hit_test(layout, x, y) {
            HitRegion::YAxis(axis) => InteractionMode::Panning {
                scope: PanScope::YAxis(axis),
            },
            HitRegion::XAxis => InteractionMode::Panning {
                scope: PanScope::XAxis,
            },
            HitRegion::Plot => match self.drag_mode {
                DragMode::Pan => InteractionMode::Panning {
                    scope: PanScope::All,
                },
                DragMode::BoxSelect => InteractionMode::BoxSelecting { anchor: (x, y) },
            },
            HitRegion::Outside => return None,
        };
        self.last_pointer = (x, y);
        trace!(mode = ?self.mode, x, y, "gesture started");
        None
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<InteractionCommand> {
        match &self.mode {
            InteractionMode::Idle => None,
            InteractionMode::Panning { scope } => {
                let (last_x, last_y) = self.last_pointer;
                let (dx, dy) = (x - last_x, y - last_y);
                let command = match scope {
                    PanScope::All => pan_command(dx, dy, None),
                    PanScope::YAxis(axis) => pan_command(0.0, dy, Some(axis.clone())),
                    PanScope::XAxis => pan_command(dx, 0.0, None),
                };
                self.last_pointer = (x, y);
                command
            }
            InteractionMode::BoxSelecting { anchor } => Some(InteractionCommand::SelectionChanged(
                PixelRect::from_corners(*anchor, (x, y)),
            )),
        }
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<InteractionCommand> {
        let mode = std::mem::replace(&mut self.mode, InteractionMode::Idle);
        match mode {
            InteractionMode::BoxSelecting { anchor } => Some(InteractionCommand::SelectionCommitted(
                PixelRect::from_corners(anchor, (x, y)),
            )),
            InteractionMode::Panning { .. } | InteractionMode::Idle => None,
        }
    }

    /// Zooms around the cursor; the hit region picks the axes.
    pub fn wheel(
        &self,
        x: f64,
        y: f64,
        delta: f64,
        layout: &ChartLayout,
        state: &ViewportState,
    ) -> Option<InteractionCommand> {
        if !delta.is_finite() || delta == 0.0 {
            return None;
        }
        let plot = layout.plot_area;
        if !plot.has_area() {
            return None;
        }
        let target = match hit_test(layout, x, y) {
            HitRegion::YAxis(axis) => WheelTarget::YAxis(axis),
            HitRegion::XAxis => WheelTarget::XAxis,
            HitRegion::Plot => WheelTarget::Plot,
            HitRegion::Outside => return None,
        };
        let focus = WheelFocus {
            x_fraction: ((x - plot.x) / plot.width).clamp(0.0, 1.0),
            y_fraction: ((plot.bottom() - y) / plot.height).clamp(0.0, 1.0),
        };
        let factor = self.wheel.factor_for(delta);
        let request = wheel_zoom(state, &target, focus, factor);
        if request.is_none() {
            trace!(?target, factor, "wheel zoom rejected as degenerate");
        }
        request.map(InteractionCommand::Zoom)
    }

    /// Single-finger touches pan every axis; multi-touch is ignored.
    pub fn touch_start(&mut self, touches: &[(f64, f64)], layout: &ChartLayout) -> Option<InteractionCommand> {
        let [(x, y)] = touches else {
            return None;
        };
        if !self.is_idle() || hit_test(layout, *x, *y) == HitRegion::Outside {
            return None;
        }
        self.mode = InteractionMode::Panning {
            scope: PanScope::All,
        };
        self.last_pointer = (*x, *y);
        None
    }

    pub fn touch_move(&mut self, touches: &[(f64, f64)]) -> Option<InteractionCommand> {
        let [(x, y)] = touches else {
            return None;
        };
        if !matches!(self.mode, InteractionMode::Panning { .. }) {
            return None;
        }
        self.pointer_move(*x, *y)
    }

    pub fn touch_end(&mut self) -> Option<InteractionCommand> {
        if matches!(self.mode, InteractionMode::Panning { .. }) {
            self.mode = InteractionMode::Idle;
        }
        None
    }
}

fn pan_command(dx: f64, dy: f64, axis: Option<AxisId>) -> Option<InteractionCommand> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(InteractionCommand::Pan { dx, dy, axis })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_factors_follow_delta_sign() {
        let wheel = WheelZoomBehavior::default();
        assert_eq!(wheel.factor_for(120.0), 1.1);
        assert_eq!(wheel.factor_for(-120.0), 0.9);
    }

    #[test]
    fn rejects_inverted_wheel_factors() {
        let wheel = WheelZoomBehavior {
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
        };
        assert!(wheel.validate().is_err());
    }
}
