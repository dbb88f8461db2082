use crate::render::DrawListBuilder;

use super::{EventBus, RenderStats};

/// Dirty-flag frame scheduling and FPS accounting.
#[derive(Debug, Default)]
pub(super) struct RenderLoopState {
    pub(super) needs_render: bool,
    pub(super) stopped: bool,
    pub(super) window_start_ms: Option<f64>,
    pub(super) frames_in_window: u32,
    pub(super) fps: f64,
    pub(super) last_stats: Option<RenderStats>,
}

/// Runtime orchestration state grouped separately from the chart model.
pub(super) struct ChartRuntimeState {
    pub(super) draw_list: DrawListBuilder,
    pub(super) events: EventBus,
    pub(super) render_loop: RenderLoopState,
}

impl ChartRuntimeState {
    #[must_use]
    pub(super) fn pending_first_frame() -> Self {
        Self {
            draw_list: DrawListBuilder::new(),
            events: EventBus::default(),
            render_loop: RenderLoopState {
                needs_render: true,
                ..RenderLoopState::default()
            },
        }
    }
}
