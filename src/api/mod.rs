mod chart_model;
mod chart_runtime;
mod engine;
mod engine_config;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod events;
mod interaction_controller;
mod layout;
mod navigation_controller;
mod render_loop;
mod series_controller;
mod validation;

pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use engine_snapshot::{EngineSnapshot, SeriesSnapshot};
pub use events::{ChartEvent, EventBus, EventKind, RenderStats, SubscriptionId, Subscriptions};
pub use layout::{LayoutMargins, compute_layout};
pub use render_loop::FrameOutcome;
