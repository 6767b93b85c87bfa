// ABOUTME: Single-shot delayed-hide timer handle with explicit cancel and restart

use std::time::Duration;

use tokio::task::JoinHandle;

/// Default time a notification stays on screen before auto-hiding.
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_secs(5);

/// Owns at most one outstanding delayed-hide task.
///
/// Restarting is an explicit cancel-then-reschedule: `arm()` aborts the
/// previous task and bumps the generation, so a superseded task can never
/// apply its hide even if it was already past its sleep when aborted.
#[derive(Debug, Default)]
pub(crate) struct HideTimer {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl HideTimer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending task and reserves a new generation for the next
    /// one. The caller spawns the task and hands its handle to `store`.
    pub(crate) fn arm(&mut self) -> u64 {
        self.cancel();
        self.generation += 1;
        self.generation
    }

    pub(crate) fn store(&mut self, handle: JoinHandle<()>) {
        self.handle = Some(handle);
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// True while a scheduled hide has neither fired nor been cancelled.
    pub(crate) fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// A firing task passes back the generation it was armed with; only the
    /// most recent one may hide.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Called by the task that fired; drops the stored handle.
    pub(crate) fn clear(&mut self) {
        self.handle = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_bumps_generation_and_invalidates_previous() {
        let mut timer = HideTimer::new();
        let first = timer.arm();
        assert!(timer.is_current(first));

        let second = timer.arm();
        assert!(!timer.is_current(first));
        assert!(timer.is_current(second));
    }

    #[tokio::test]
    async fn cancel_aborts_the_stored_task() {
        let mut timer = HideTimer::new();
        timer.arm();
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });
        timer.store(handle);
        assert!(timer.is_armed());

        timer.cancel();
        assert!(!timer.is_armed());
    }
}
