use serde::{Deserialize, Serialize};

use crate::core::{AxisId, Color, DEFAULT_AXIS_WIDTH, DataRange, ScaleKind, Viewport, YAxisConfig};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragMode, WheelZoomBehavior};

use super::LayoutMargins;
use super::validation::{validate_axis_width, validate_margins, validate_pixel_ratio};

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep chart setup in a JSON file instead of
/// building it in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
    #[serde(default = "default_clear_color")]
    pub clear_color: Color,
    #[serde(default)]
    pub x_scale_kind: ScaleKind,
    /// Initial shared X range; `reset_zoom` returns here.
    #[serde(default)]
    pub x_range: Option<DataRange>,
    #[serde(default = "default_y_axes")]
    pub y_axes: Vec<YAxisConfig>,
    /// Defaults to the first entry of `y_axes`.
    #[serde(default)]
    pub primary_axis: Option<AxisId>,
    #[serde(default)]
    pub margins: LayoutMargins,
    #[serde(default = "default_axis_width")]
    pub axis_width: f64,
    #[serde(default)]
    pub drag_mode: DragMode,
    #[serde(default)]
    pub wheel: WheelZoomBehavior,
}

impl ChartEngineConfig {
    /// Creates a config with one linear left axis named `y`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pixel_ratio: default_pixel_ratio(),
            clear_color: default_clear_color(),
            x_scale_kind: ScaleKind::Linear,
            x_range: None,
            y_axes: default_y_axes(),
            primary_axis: None,
            margins: LayoutMargins::default(),
            axis_width: default_axis_width(),
            drag_mode: DragMode::Pan,
            wheel: WheelZoomBehavior::default(),
        }
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    #[must_use]
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    #[must_use]
    pub fn with_x_scale_kind(mut self, kind: ScaleKind) -> Self {
        self.x_scale_kind = kind;
        self
    }

    #[must_use]
    pub fn with_x_range(mut self, range: DataRange) -> Self {
        self.x_range = Some(range);
        self
    }

    /// Replaces the axis list.
    #[must_use]
    pub fn with_y_axes(mut self, axes: Vec<YAxisConfig>) -> Self {
        self.y_axes = axes;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: YAxisConfig) -> Self {
        self.y_axes.push(axis);
        self
    }

    #[must_use]
    pub fn with_primary_axis(mut self, axis: impl Into<AxisId>) -> Self {
        self.primary_axis = Some(axis.into());
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: LayoutMargins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_axis_width(mut self, axis_width: f64) -> Self {
        self.axis_width = axis_width;
        self
    }

    #[must_use]
    pub fn with_drag_mode(mut self, mode: DragMode) -> Self {
        self.drag_mode = mode;
        self
    }

    #[must_use]
    pub fn with_wheel(mut self, wheel: WheelZoomBehavior) -> Self {
        self.wheel = wheel;
        self
    }

    /// Axis that navigation treats as primary.
    #[must_use]
    pub fn resolved_primary_axis(&self) -> Option<&AxisId> {
        self.primary_axis
            .as_ref()
            .or_else(|| self.y_axes.first().map(|axis| &axis.id))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        validate_pixel_ratio(self.pixel_ratio)?;
        self.clear_color.validate()?;
        validate_margins(self.margins)?;
        validate_axis_width(self.axis_width)?;
        self.wheel.validate()?;

        if self.y_axes.is_empty() {
            return Err(ChartError::InvalidConfig(
                "at least one y axis is required".to_owned(),
            ));
        }
        for (index, axis) in self.y_axes.iter().enumerate() {
            if axis.id.as_str().is_empty() {
                return Err(ChartError::InvalidConfig("axis ids must not be empty".to_owned()));
            }
            if self.y_axes[..index].iter().any(|other| other.id == axis.id) {
                return Err(ChartError::InvalidConfig(format!(
                    "duplicate y axis id `{}`",
                    axis.id
                )));
            }
            if let Some(range) = axis.initial_range {
                validate_initial_range(range, axis.scale_kind, axis.id.as_str())?;
            }
        }
        if let Some(range) = self.x_range {
            validate_initial_range(range, self.x_scale_kind, "x")?;
        }
        if let Some(primary) = &self.primary_axis
            && !self.y_axes.iter().any(|axis| &axis.id == primary)
        {
            return Err(ChartError::UnknownAxis(primary.to_string()));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn validate_initial_range(range: DataRange, kind: ScaleKind, axis: &str) -> ChartResult<()> {
    if DataRange::new(range.min, range.max).is_none() {
        return Err(ChartError::InvalidConfig(format!(
            "initial range of axis `{axis}` must be finite with max > min"
        )));
    }
    if kind == ScaleKind::Logarithmic && range.min <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "initial range of logarithmic axis `{axis}` must be positive"
        )));
    }
    Ok(())
}

fn default_pixel_ratio() -> f64 {
    1.0
}

fn default_clear_color() -> Color {
    Color::WHITE
}

fn default_y_axes() -> Vec<YAxisConfig> {
    vec![YAxisConfig::new("y")]
}

fn default_axis_width() -> f64 {
    DEFAULT_AXIS_WIDTH
}
