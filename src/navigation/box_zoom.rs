use tracing::trace;

use crate::core::{PixelRect, ViewportState};
use crate::navigation::ZoomRequest;

/// Selections must exceed this size on both sides to commit.
pub const MIN_SELECTION_PX: f64 = 5.0;

/// Pending box-zoom selection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxZoom {
    selection: Option<PixelRect>,
}

impl BoxZoom {
    #[must_use]
    pub fn selection(&self) -> Option<PixelRect> {
        self.selection
    }

    /// `Some` stores the in-progress rectangle; `None` commits it.
    ///
    /// Returns the zoom to apply on a commit that clears the size threshold.
    pub fn update(
        &mut self,
        selection: Option<PixelRect>,
        plot_area: PixelRect,
        state: &ViewportState,
    ) -> Option<ZoomRequest> {
        match selection {
            Some(rect) => {
                self.selection = Some(rect);
                None
            }
            None => {
                let committed = self.selection.take()?;
                selection_to_zoom(committed, plot_area, state)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.selection = None;
    }
}

/// Converts a pixel selection into a global zoom request over the current
/// bounds. Pixel Y grows downward, so the vertical fractions are flipped.
#[must_use]
pub fn selection_to_zoom(
    selection: PixelRect,
    plot_area: PixelRect,
    state: &ViewportState,
) -> Option<ZoomRequest> {
    if selection.width <= MIN_SELECTION_PX || selection.height <= MIN_SELECTION_PX {
        trace!(
            width = selection.width,
            height = selection.height,
            "box zoom selection below threshold"
        );
        return None;
    }
    if !plot_area.has_area() {
        return None;
    }

    let fraction_x = |px: f64| ((px - plot_area.x) / plot_area.width).clamp(0.0, 1.0);
    let fraction_y = |py: f64| ((plot_area.bottom() - py) / plot_area.height).clamp(0.0, 1.0);

    let x = state.x();
    let (x_min, x_max) = x.projected();
    let left = fraction_x(selection.x);
    let right = fraction_x(selection.right());

    let y = state.primary();
    let (y_min, y_max) = y.projected();
    let bottom = fraction_y(selection.bottom());
    let top = fraction_y(selection.y);

    let lerp = |min: f64, max: f64, t: f64| min + t * (max - min);
    Some(
        ZoomRequest::new()
            .with_x(
                x.kind.unproject(lerp(x_min, x_max, left)),
                x.kind.unproject(lerp(x_min, x_max, right)),
            )
            .with_y(
                y.kind.unproject(lerp(y_min, y_max, bottom)),
                y.kind.unproject(lerp(y_min, y_max, top)),
            ),
    )
}
