// ABOUTME: Per-property change notification: property identities and the subscriber registry

use std::fmt;
use std::sync::Arc;

/// Identity of an observable view-model property.
///
/// Handlers receive this value; `name()` is the stable string key a UI
/// binding layer can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    LogDetails,
    NotificationMessage,
    NotificationVisible,
}

impl Property {
    pub fn name(self) -> &'static str {
        match self {
            Property::LogDetails => "log_details",
            Property::NotificationMessage => "notification_message",
            Property::NotificationVisible => "notification_visible",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Callback invoked after an observable property has been written.
pub type ChangeHandler = Arc<dyn Fn(Property) + Send + Sync>;

/// Token returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Ordered list of registered change handlers.
///
/// Dispatch order is registration order; ids stay valid across removals of
/// other subscribers.
#[derive(Default)]
pub struct SubscriberRegistry {
    entries: Vec<(SubscriberId, ChangeHandler)>,
    next_id: u64,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: ChangeHandler) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, handler));
        id
    }

    /// Removes a handler. Returns false when the id was never issued or was
    /// already removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Snapshot of the current handlers, in registration order. Taken under
    /// the state lock so dispatch can happen after the lock is released.
    pub fn snapshot(&self) -> Vec<ChangeHandler> {
        self.entries
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}

/// Invokes every handler with the mutated property, in order.
pub(crate) fn dispatch(handlers: &[ChangeHandler], property: Property) {
    for handler in handlers {
        handler(property);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_handler(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> ChangeHandler {
        let log = Arc::clone(log);
        let tag = tag.to_string();
        Arc::new(move |property| {
            log.lock().unwrap().push(format!("{tag}:{property}"));
        })
    }

    #[test]
    fn dispatch_runs_handlers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = SubscriberRegistry::new();
        registry.subscribe(recording_handler(&log, "first"));
        registry.subscribe(recording_handler(&log, "second"));

        dispatch(&registry.snapshot(), Property::LogDetails);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:log_details", "second:log_details"]
        );
    }

    #[test]
    fn unsubscribe_removes_only_the_named_handler() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = SubscriberRegistry::new();
        let first = registry.subscribe(recording_handler(&log, "first"));
        registry.subscribe(recording_handler(&log, "second"));

        assert!(registry.unsubscribe(first));
        assert!(!registry.unsubscribe(first));
        assert_eq!(registry.len(), 1);

        dispatch(&registry.snapshot(), Property::NotificationVisible);
        assert_eq!(*log.lock().unwrap(), vec!["second:notification_visible"]);
    }

    #[test]
    fn empty_registry_dispatch_is_a_noop() {
        let registry = SubscriberRegistry::new();
        assert!(registry.is_empty());
        dispatch(&registry.snapshot(), Property::NotificationMessage);
    }

    #[test]
    fn property_names_are_stable() {
        assert_eq!(Property::LogDetails.name(), "log_details");
        assert_eq!(Property::NotificationMessage.name(), "notification_message");
        assert_eq!(Property::NotificationVisible.name(), "notification_visible");
    }
}
