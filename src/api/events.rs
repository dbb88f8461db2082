use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::ViewBounds;

/// Topic a handler subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Zoom,
    Pan,
    Resize,
    Render,
}

/// Timing of the most recent frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RenderStats {
    /// Frames per second over the last completed one-second window.
    pub fps: f64,
    pub frame_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    Zoom(ViewBounds),
    Pan(ViewBounds),
    Resize { width: u32, height: u32 },
    Render(RenderStats),
}

impl ChartEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Zoom(_) => EventKind::Zoom,
            Self::Pan(_) => EventKind::Pan,
            Self::Resize { .. } => EventKind::Resize,
            Self::Render(_) => EventKind::Render,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

type Handler = Rc<RefCell<dyn FnMut(&ChartEvent)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: IndexMap<SubscriptionId, (EventKind, Handler)>,
}

/// Shared handle to the handler registry.
///
/// Handlers may capture a clone and unsubscribe themselves (or others)
/// while an event is being delivered.
#[derive(Clone, Default)]
pub struct Subscriptions {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("len", &self.len())
            .finish()
    }
}

impl Subscriptions {
    /// Returns `true` when `id` was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry
            .borrow_mut()
            .handlers
            .shift_remove(&id)
            .is_some()
    }

    #[must_use]
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.registry.borrow().handlers.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn subscribe(&self, kind: EventKind, handler: Handler) -> SubscriptionId {
        let mut registry = self.registry.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.handlers.insert(id, (kind, handler));
        id
    }

    fn clear(&self) {
        self.registry.borrow_mut().handlers.clear();
    }

    fn snapshot(&self, kind: EventKind) -> Vec<Handler> {
        self.registry
            .borrow()
            .handlers
            .values()
            .filter(|(handler_kind, _)| *handler_kind == kind)
            .map(|(_, handler)| Rc::clone(handler))
            .collect()
    }
}

/// Typed publish/subscribe fan-out in subscription order.
#[derive(Debug, Default)]
pub struct EventBus {
    subscriptions: Subscriptions,
}

impl EventBus {
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&ChartEvent) + 'static,
    {
        self.subscriptions
            .subscribe(kind, Rc::new(RefCell::new(handler)))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    #[must_use]
    pub fn subscriptions(&self) -> Subscriptions {
        self.subscriptions.clone()
    }

    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    /// Delivers `event` to the handlers registered for its kind when the
    /// emission started. Returns the number of handlers called.
    pub fn emit(&self, event: &ChartEvent) -> usize {
        let mut delivered = 0;
        for handler in self.subscriptions.snapshot(event.kind()) {
            match handler.try_borrow_mut() {
                Ok(mut callback) => {
                    (*callback)(event);
                    delivered += 1;
                }
                Err(_) => {
                    warn!(kind = ?event.kind(), "skipping handler re-entered during its own emission");
                }
            }
        }
        delivered
    }
}
