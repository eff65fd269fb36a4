//! Dismiss-on-outside-interaction registry.
//!
//! Dropdowns and menus across the editor close when the user interacts
//! anywhere else. The application owns one registry, injects it where
//! needed, and forwards unhandled pointer-downs to [`DismissRegistry::pointer_down`];
//! a component opening its menu calls [`DismissRegistry::dismiss_except`]
//! with its own id so every other consumer closes first.

use smol_str::SmolStr;

struct Consumer {
    id: SmolStr,
    callback: Box<dyn FnMut()>,
    /// Whether plain window-level pointer-downs invoke this consumer.
    window_event: bool,
}

/// Registry of dismiss callbacks keyed by component id.
#[derive(Default)]
pub struct DismissRegistry {
    consumers: Vec<Consumer>,
}

impl DismissRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dismiss callback. Duplicate ids are ignored.
    pub fn register(&mut self, id: impl Into<SmolStr>, callback: Box<dyn FnMut()>) {
        self.register_scoped(id, callback, true);
    }

    /// Register with control over whether window-level pointer-downs
    /// invoke the callback (components that manage their own outside
    /// click detection pass `false`).
    pub fn register_scoped(
        &mut self,
        id: impl Into<SmolStr>,
        callback: Box<dyn FnMut()>,
        window_event: bool,
    ) {
        let id = id.into();
        if self.consumers.iter().any(|c| c.id == id) {
            return;
        }
        self.consumers.push(Consumer {
            id,
            callback,
            window_event,
        });
    }

    /// Remove a consumer (component unmounted).
    pub fn unregister(&mut self, id: &str) {
        self.consumers.retain(|c| c.id != id);
    }

    /// An unhandled pointer-down anywhere: dismiss every window-event
    /// consumer.
    pub fn pointer_down(&mut self) {
        for consumer in &mut self.consumers {
            if consumer.window_event {
                (consumer.callback)();
            }
        }
    }

    /// Dismiss every consumer except the listed ids (a component opening
    /// its own menu keeps itself out of the sweep).
    pub fn dismiss_except(&mut self, keep: &[&str]) {
        for consumer in &mut self.consumers {
            if !keep.contains(&consumer.id.as_str()) {
                (consumer.callback)();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }
}
