use crate::error::ChartResult;
use crate::interaction::{DragMode, InteractionCommand, InteractionMode};
use crate::render::Rasterizer;

use super::ChartEngine;

impl<R: Rasterizer> ChartEngine<R> {
    pub fn pointer_down(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let model = &mut self.core.model;
        let command = model.interaction.pointer_down(x, y, &model.layout);
        self.dispatch(command)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let command = self.core.model.interaction.pointer_move(x, y);
        self.dispatch(command)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let command = self.core.model.interaction.pointer_up(x, y);
        self.dispatch(command)
    }

    /// Positive `delta` zooms out.
    pub fn wheel(&mut self, x: f64, y: f64, delta: f64) -> ChartResult<()> {
        let model = &self.core.model;
        let command = model
            .interaction
            .wheel(x, y, delta, &model.layout, &model.state);
        self.dispatch(command)
    }

    pub fn touch_start(&mut self, touches: &[(f64, f64)]) -> ChartResult<()> {
        let model = &mut self.core.model;
        let command = model.interaction.touch_start(touches, &model.layout);
        self.dispatch(command)
    }

    pub fn touch_move(&mut self, touches: &[(f64, f64)]) -> ChartResult<()> {
        let command = self.core.model.interaction.touch_move(touches);
        self.dispatch(command)
    }

    pub fn touch_end(&mut self) -> ChartResult<()> {
        let command = self.core.model.interaction.touch_end();
        self.dispatch(command)
    }

    /// Abandons the active gesture and any pending selection.
    pub fn cancel_interaction(&mut self) {
        self.core.model.interaction.cancel();
        self.core.model.box_zoom.cancel();
        self.request_render();
    }

    #[must_use]
    pub fn interaction_mode(&self) -> &InteractionMode {
        self.core.model.interaction.mode()
    }

    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.core.model.interaction.drag_mode()
    }

    pub fn set_drag_mode(&mut self, mode: DragMode) {
        self.core.model.interaction.set_drag_mode(mode);
    }

    fn dispatch(&mut self, command: Option<InteractionCommand>) -> ChartResult<()> {
        let Some(command) = command else {
            return Ok(());
        };
        match command {
            InteractionCommand::Pan { dx, dy, axis } => self.pan(dx, dy, axis.as_ref()),
            InteractionCommand::SelectionChanged(rect) => self.box_zoom(Some(rect)).map(|_| ()),
            InteractionCommand::SelectionCommitted(rect) => {
                self.box_zoom(Some(rect))?;
                self.box_zoom(None).map(|_| ())
            }
            InteractionCommand::Zoom(request) => self.zoom(request),
        }
    }
}
