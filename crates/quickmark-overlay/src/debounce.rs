//! Cancelable one-shot timer for coalescing keystrokes.

use std::time::Duration;
use tokio::task::JoinHandle;

/// Owned debounce timer.
///
/// `schedule` cancels whatever was pending and arms a new timer. Each timer
/// is stamped with a generation; an expiry is only honoured if
/// `take_elapsed` sees the current generation, so an expiry that was already
/// queued when a newer keystroke arrived is ignored.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay` unless rescheduled or cancelled first.
    ///
    /// The action receives the timer's generation. Must be called from
    /// within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, action: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel_pending();
        let generation = self.generation;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action(generation);
        }));
        generation
    }

    /// Drop the pending timer, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    /// Whether a timer is armed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Accept an expiry. Returns false for a superseded generation.
    pub fn take_elapsed(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.pending.is_none() {
            return false;
        }
        self.pending = None;
        true
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
