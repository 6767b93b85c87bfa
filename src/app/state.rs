// ABOUTME: Log-pane view-model: observable state, change dispatch, and the auto-hide timer

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tracing::debug;

use crate::app::notification::{HideTimer, DEFAULT_HIDE_DELAY};
use crate::app::observers::{dispatch, Property, SubscriberId, SubscriberRegistry};
use crate::logging::LogSink;

#[derive(Debug)]
struct PaneState {
    log_details: String,
    notification_message: String,
    notification_visible: bool,
    subscribers: SubscriberRegistry,
    timer: HideTimer,
}

impl PaneState {
    fn new() -> Self {
        Self {
            log_details: String::new(),
            notification_message: String::new(),
            notification_visible: false,
            subscribers: SubscriberRegistry::new(),
            timer: HideTimer::new(),
        }
    }
}

/// View-model for a log pane with a transient, auto-hiding notification.
///
/// Three observable properties (`log_details`, `notification_message`,
/// `notification_visible`) raise per-property change notifications on every
/// write, with no equality check: assigning a property its current value
/// still notifies. Notifications are dispatched synchronously, in
/// registration order, after the field has been written, so a handler always
/// reads the new value through the getters.
///
/// All state lives behind one mutex; handlers run outside it and may call
/// back into the view-model. The hide timer is a tokio task, so the
/// view-model must be used inside a tokio runtime.
pub struct LogPaneViewModel {
    state: Arc<Mutex<PaneState>>,
    sink: Arc<dyn LogSink>,
    hide_delay: Duration,
}

impl LogPaneViewModel {
    /// Creates a view-model with the default 5-second hide delay.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self::with_hide_delay(sink, DEFAULT_HIDE_DELAY)
    }

    pub fn with_hide_delay(sink: Arc<dyn LogSink>, hide_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(PaneState::new())),
            sink,
            hide_delay,
        }
    }

    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }

    /// Registers a change handler; any number may be registered.
    pub fn subscribe<F>(&self, handler: F) -> SubscriberId
    where
        F: Fn(Property) + Send + Sync + 'static,
    {
        self.state().subscribers.subscribe(Arc::new(handler))
    }

    /// Removes a handler. Returns false for an unknown or already-removed id.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.state().subscribers.unsubscribe(id)
    }

    /// Appends a line to the log history and forwards it to the sink.
    ///
    /// Every entry is prefixed with a newline, including the first, so the
    /// accumulated text always begins with a blank line.
    pub fn update_log_details(&self, message: &str) {
        let handlers = {
            let mut state = self.state();
            state.log_details.push('\n');
            state.log_details.push_str(message);
            state.subscribers.snapshot()
        };
        dispatch(&handlers, Property::LogDetails);
        self.sink.log_message(message);
    }

    /// Shows a transient notification and schedules its hide.
    ///
    /// Calling again while a notification is visible replaces the message
    /// and restarts the deadline: the previously scheduled hide is cancelled
    /// and only the fresh one can ever hide the notification.
    pub fn show_notification(&self, message: impl Into<String>) {
        let (handlers, generation) = {
            let mut state = self.state();
            state.notification_message = message.into();
            state.notification_visible = true;
            let generation = state.timer.arm();
            (state.subscribers.snapshot(), generation)
        };

        let shared = Arc::downgrade(&self.state);
        let delay = self.hide_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            apply_hide(&shared, generation);
        });
        self.state().timer.store(handle);
        debug!(
            generation,
            delay_ms = delay.as_millis() as u64,
            "notification shown, hide scheduled"
        );

        dispatch(&handlers, Property::NotificationMessage);
        dispatch(&handlers, Property::NotificationVisible);
    }

    pub fn log_details(&self) -> String {
        self.state().log_details.clone()
    }

    /// Replaces the entire log text. Notifies even when the value is unchanged.
    pub fn set_log_details(&self, value: impl Into<String>) {
        let handlers = {
            let mut state = self.state();
            state.log_details = value.into();
            state.subscribers.snapshot()
        };
        dispatch(&handlers, Property::LogDetails);
    }

    pub fn notification_message(&self) -> String {
        self.state().notification_message.clone()
    }

    /// Notifies even when the value is unchanged.
    pub fn set_notification_message(&self, value: impl Into<String>) {
        let handlers = {
            let mut state = self.state();
            state.notification_message = value.into();
            state.subscribers.snapshot()
        };
        dispatch(&handlers, Property::NotificationMessage);
    }

    pub fn notification_visible(&self) -> bool {
        self.state().notification_visible
    }

    /// Raw visibility setter; does not touch the hide timer. Notifies even
    /// when the value is unchanged.
    pub fn set_notification_visible(&self, value: bool) {
        let handlers = {
            let mut state = self.state();
            state.notification_visible = value;
            state.subscribers.snapshot()
        };
        dispatch(&handlers, Property::NotificationVisible);
    }

    /// True while a scheduled hide is outstanding.
    pub fn hide_scheduled(&self) -> bool {
        self.state().timer.is_armed()
    }

    fn state(&self) -> MutexGuard<'_, PaneState> {
        lock_state(&self.state)
    }
}

impl Drop for LogPaneViewModel {
    fn drop(&mut self) {
        self.state().timer.cancel();
    }
}

impl fmt::Debug for LogPaneViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("LogPaneViewModel")
            .field("notification_visible", &state.notification_visible)
            .field("hide_delay", &self.hide_delay)
            .field("subscribers", &state.subscribers)
            .finish_non_exhaustive()
    }
}

/// Visible -> Hidden transition, run by the timer task when its deadline
/// fires. A task whose generation was superseded leaves the state alone.
fn apply_hide(shared: &Weak<Mutex<PaneState>>, generation: u64) {
    let Some(state) = shared.upgrade() else {
        return;
    };
    let handlers = {
        let mut state = lock_state(&state);
        if !state.timer.is_current(generation) || !state.notification_visible {
            return;
        }
        state.notification_visible = false;
        state.timer.clear();
        state.subscribers.snapshot()
    };
    debug!(generation, "notification hidden after delay");
    dispatch(&handlers, Property::NotificationVisible);
}

fn lock_state(state: &Mutex<PaneState>) -> MutexGuard<'_, PaneState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
