//! Auto-dismiss timer for modals and toasts.
//!
//! At most one callback is pending. Scheduling again cancels the previous
//! one, and dropping the timer cancels whatever is pending. Delays come from
//! [`ClientConfig`](crate::config::ClientConfig).

use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct DismissTimer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DismissTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `callback` once the delay has passed, replacing any pending
    /// callback.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
