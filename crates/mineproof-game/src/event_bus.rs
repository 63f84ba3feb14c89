use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

use crate::{Event, EventKind};

type Handler = Rc<dyn Fn(&Event)>;

/// Single-threaded publish/subscribe hub.
///
/// Cloning the bus yields another handle to the same subscriber table.
/// Handlers for a kind run in subscription order. The handler list is copied
/// before dispatch and no borrow is held while a handler runs, so a handler
/// may publish further events or subscribe new handlers. Handlers subscribed
/// during a dispatch only see later events.
///
/// # Examples
///
/// ```
/// use std::{cell::Cell, rc::Rc};
///
/// use mineproof_game::{Event, EventBus, EventKind};
///
/// let bus = EventBus::new();
/// let resolved = Rc::new(Cell::new(0));
///
/// let inner = bus.clone();
/// bus.subscribe(EventKind::GuessRequested, move |_| {
///     inner.publish(&Event::GuessResolved);
/// });
/// let counter = Rc::clone(&resolved);
/// bus.subscribe(EventKind::GuessResolved, move |_| counter.set(counter.get() + 1));
///
/// bus.publish(&Event::GuessRequested);
/// assert_eq!(resolved.get(), 1);
/// ```
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Rc<RefCell<BTreeMap<EventKind, Vec<Handler>>>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.borrow();
        f.debug_struct("EventBus")
            .field(
                "handlers",
                &handlers.iter().map(|(kind, list)| (kind, list.len())).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl EventBus {
    /// Creates a bus without subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every event of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        self.handlers
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(Rc::new(handler));
    }

    /// Delivers `event` to every handler subscribed to its kind.
    pub fn publish(&self, event: &Event) {
        let kind = event.kind();
        let snapshot: Vec<Handler> = self
            .handlers
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_default();
        log::trace!("publishing {kind} to {} handlers", snapshot.len());
        for handler in snapshot {
            handler(event);
        }
    }

    /// Returns the number of handlers subscribed to `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.handlers.borrow().get(&kind).map_or(0, Vec::len)
    }
}
