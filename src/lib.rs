//! chart-viewport: viewport and draw-list engine for GPU-backed 2D charts.
//!
//! The crate decides *what* to draw for large numeric series (scales, bounds,
//! navigation, vertex buffers, interaction) and hands the result to an
//! external [`render::Rasterizer`] that owns the actual GPU work.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod navigation;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
