//! Notifications from the engine to the host application.
//!
//! Handlers are registered by event name, so hosts can wire them without
//! matching on engine types.

use std::collections::HashMap;
use std::fmt;

/// Event emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// No compatible adapter or device. The session will not render.
    DeviceUnavailable { reason: String },
}

impl HostEvent {
    pub const DEVICE_UNAVAILABLE: &'static str = "device_unavailable";

    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::DeviceUnavailable { .. } => Self::DEVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEvent::DeviceUnavailable { reason } => write!(f, "{}: {reason}", self.name()),
        }
    }
}

type Handler = Box<dyn FnMut(&HostEvent)>;

/// Name-keyed event handlers.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<String, Vec<Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events named `name`.
    pub fn on<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&HostEvent) + 'static,
    {
        self.handlers.entry(name.into()).or_default().push(Box::new(handler));
    }

    /// Dispatches `event` to every handler registered under its name.
    ///
    /// Returns the number of handlers invoked.
    pub fn emit(&mut self, event: &HostEvent) -> usize {
        let Some(handlers) = self.handlers.get_mut(event.name()) else {
            log::debug!("no handler for host event '{}'", event.name());
            return 0;
        };
        for handler in handlers.iter_mut() {
            handler(event);
        }
        handlers.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("EventBus").field("events", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn unavailable() -> HostEvent {
        HostEvent::DeviceUnavailable { reason: "no adapter".into() }
    }

    #[test]
    fn device_unavailable_has_stable_name() {
        assert_eq!(unavailable().name(), "device_unavailable");
        assert_eq!(unavailable().to_string(), "device_unavailable: no adapter");
    }

    #[test]
    fn emit_reaches_every_named_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        for tag in ["a", "b"] {
            let seen = seen.clone();
            bus.on(HostEvent::DEVICE_UNAVAILABLE, move |ev| {
                seen.borrow_mut().push(format!("{tag}:{}", ev.name()));
            });
        }
        bus.on("something_else", |_| panic!("wrong handler"));

        assert_eq!(bus.emit(&unavailable()), 2);
        assert_eq!(*seen.borrow(), vec!["a:device_unavailable", "b:device_unavailable"]);
    }

    #[test]
    fn emit_without_handlers_is_a_no_op() {
        let mut bus = EventBus::new();
        assert_eq!(bus.emit(&unavailable()), 0);
    }
}
