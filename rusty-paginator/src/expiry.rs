//! Per-session expiry timers.

use std::{future::Future, time::Duration};

use tokio::task::AbortHandle;

/// Handle to a session's pending expiry task.
///
/// Dropping the handle cancels the task. Each timer carries an epoch so a
/// task that already woke up can tell whether it is still the session's
/// current timer.
#[derive(Debug)]
pub(crate) struct ExpiryTimer {
    epoch: u64,
    handle: Option<AbortHandle>,
}

impl ExpiryTimer {
    /// Spawn `on_fire` after `delay`.
    pub(crate) fn arm<F>(epoch: u64, delay: Duration, on_fire: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire.await;
        });

        Self {
            epoch,
            handle: Some(task.abort_handle()),
        }
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn cancel(self) {
        drop(self);
    }

    /// Release the handle without aborting; used by the firing task itself.
    pub(crate) fn disarm(mut self) {
        self.handle = None;
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
