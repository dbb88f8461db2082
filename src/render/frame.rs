use crate::core::{Bounds, Color, PixelRect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{DrawDescriptor, RectPrimitive};

/// Per-frame values shared by every draw call.
///
/// `data_bounds` is the visible rectangle of X and the primary axis in
/// scale space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub viewport: Viewport,
    pub pixel_ratio: f64,
    pub clear_color: Color,
    pub data_bounds: Bounds,
    pub plot_area: PixelRect,
}

/// Everything a rasterizer needs for one draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub uniforms: FrameUniforms,
    pub draw_list: Vec<DrawDescriptor>,
    pub selection: Option<RectPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(uniforms: FrameUniforms) -> Self {
        Self {
            uniforms,
            draw_list: Vec::new(),
            selection: None,
        }
    }

    #[must_use]
    pub fn with_draw_list(mut self, draw_list: Vec<DrawDescriptor>) -> Self {
        self.draw_list = draw_list;
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Option<RectPrimitive>) -> Self {
        self.selection = selection;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        let uniforms = &self.uniforms;
        if !uniforms.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: uniforms.viewport.width,
                height: uniforms.viewport.height,
            });
        }
        if !uniforms.pixel_ratio.is_finite() || uniforms.pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        uniforms.clear_color.validate()?;
        if !uniforms.data_bounds.is_finite() {
            return Err(ChartError::InvalidData(
                "frame data bounds must be finite".to_owned(),
            ));
        }

        for descriptor in &self.draw_list {
            descriptor.validate()?;
        }
        if let Some(selection) = self.selection {
            selection.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn visible_draw_count(&self) -> usize {
        self.draw_list
            .iter()
            .filter(|descriptor| descriptor.visible)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniforms() -> FrameUniforms {
        FrameUniforms {
            viewport: Viewport::new(100, 100),
            pixel_ratio: 1.0,
            clear_color: Color::WHITE,
            data_bounds: Bounds::UNIT,
            plot_area: PixelRect::new(0.0, 0.0, 100.0, 100.0),
        }
    }

    #[test]
    fn non_finite_data_bounds_fail_validation() {
        assert!(RenderFrame::new(uniforms()).validate().is_ok());

        let mut broken = uniforms();
        broken.data_bounds.y_max = f64::NAN;
        assert!(matches!(
            RenderFrame::new(broken).validate(),
            Err(ChartError::InvalidData(_))
        ));
    }
}
