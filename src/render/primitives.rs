pub use crate::core::Color;

use crate::core::PixelRect;
use crate::error::{ChartError, ChartResult};

/// Filled, outlined rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub rect: PixelRect,
    pub fill_color: Color,
    pub border_width: f64,
    pub border_color: Color,
}

impl RectPrimitive {
    /// Translucent overlay used for an in-progress box-zoom selection.
    #[must_use]
    pub fn selection(rect: PixelRect) -> Self {
        Self {
            rect,
            fill_color: Color::rgba(0.259, 0.522, 0.957, 0.15),
            border_width: 1.0,
            border_color: Color::rgba(0.259, 0.522, 0.957, 0.8),
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        let rect = self.rect;
        if ![rect.x, rect.y, rect.width, rect.height]
            .into_iter()
            .all(f64::is_finite)
            || rect.width < 0.0
            || rect.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect must have finite coordinates and non-negative size".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}
