//! Collapse bursts of input into one delayed call.
//!
//! Every pushed value restarts the quiet interval; when the interval passes
//! with no new value, the most recent one is handed to the callback. Earlier
//! values in the burst are dropped. Shutting down (or dropping) the debouncer
//! discards a pending value without firing it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

/// Quiet period used by the search box
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(1200);

#[derive(Debug)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Start the debouncer task. Must be called from within a tokio runtime.
    pub fn spawn<F>(interval: Duration, mut on_settle: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            let sleep = time::sleep(interval);
            tokio::pin!(sleep);

            loop {
                tokio::select! {
                    biased;

                    _ = token.cancelled() => break,

                    msg = rx.recv() => match msg {
                        Some(value) => {
                            pending = Some(value);
                            sleep.as_mut().reset(Instant::now() + interval);
                        }
                        None => break,
                    },

                    _ = &mut sleep, if pending.is_some() => {
                        if let Some(value) = pending.take() {
                            on_settle(value);
                        }
                    }
                }
            }

            if pending.is_some() {
                tracing::debug!("Debouncer stopped with a pending value; discarded");
            }
        });

        Self {
            tx,
            cancel,
            handle: Some(handle),
        }
    }

    /// Queue `value`, restarting the quiet interval.
    pub fn push(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::debug!("Debouncer already stopped; input ignored");
        }
    }

    /// Stop without firing any pending value and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Debouncer task ended abnormally: {}", e);
            }
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
