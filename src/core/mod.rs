pub mod axis;
pub mod color;
pub mod derived_cache;
pub mod scale;
pub mod series;
pub mod smoothing;
pub mod types;
pub mod viewport_state;

pub use axis::{AxisId, AxisLayout, AxisPosition, ChartLayout, DEFAULT_AXIS_WIDTH, YAxisConfig};
pub use color::Color;
pub use derived_cache::{CacheState, DerivedCache};
pub use scale::{LOG_DOMAIN_FLOOR, Scale, ScaleKind};
pub use series::{BufferDirty, BufferState, Series, SeriesData, SeriesId, SeriesKind, SeriesStyle};
pub use types::{Bounds, DataRange, Extent, MAX_BOUND_MAGNITUDE, PixelRect, Viewport};
pub use viewport_state::{AxisView, ViewBounds, ViewportState};
