use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{DataRange, PixelRect, ScaleKind};

/// Identifier of one Y axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisId(String);

impl AxisId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AxisId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AxisId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Side of the plot area an axis gutter is stacked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisPosition {
    #[default]
    Left,
    Right,
}

/// Construction-time description of one Y axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisConfig {
    pub id: AxisId,
    #[serde(default)]
    pub position: AxisPosition,
    #[serde(default)]
    pub scale_kind: ScaleKind,
    #[serde(default)]
    pub initial_range: Option<DataRange>,
}

impl YAxisConfig {
    #[must_use]
    pub fn new(id: impl Into<AxisId>) -> Self {
        Self {
            id: id.into(),
            position: AxisPosition::Left,
            scale_kind: ScaleKind::Linear,
            initial_range: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: AxisPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_scale_kind(mut self, kind: ScaleKind) -> Self {
        self.scale_kind = kind;
        self
    }

    #[must_use]
    pub fn with_initial_range(mut self, range: DataRange) -> Self {
        self.initial_range = Some(range);
        self
    }
}

/// Host layout metadata for one axis gutter.
///
/// `pixel_offset` is the distance between the plot-area edge and the axis
/// line, growing outward as axes are stacked on the same side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub id: AxisId,
    pub position: AxisPosition,
    pub pixel_offset: f64,
}

/// Default width of one Y-axis gutter in pixels.
pub const DEFAULT_AXIS_WIDTH: f64 = 50.0;

/// Plot-area rectangle plus the gutter metadata of every Y axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub plot_area: PixelRect,
    pub axes: Vec<AxisLayout>,
    /// Width of each Y-axis gutter, which is also its pointer hit width.
    #[serde(default = "default_axis_width")]
    pub axis_width: f64,
}

fn default_axis_width() -> f64 {
    DEFAULT_AXIS_WIDTH
}

impl ChartLayout {
    #[must_use]
    pub fn axis(&self, id: &AxisId) -> Option<&AxisLayout> {
        self.axes.iter().find(|axis| &axis.id == id)
    }

    /// Pixel position of the axis line.
    #[must_use]
    pub fn axis_line_x(&self, axis: &AxisLayout) -> f64 {
        match axis.position {
            AxisPosition::Left => self.plot_area.x - axis.pixel_offset,
            AxisPosition::Right => self.plot_area.right() + axis.pixel_offset,
        }
    }
}
