//! Trailing-edge debouncing for auto-fill lookups.
//!
//! Each keystroke restarts a quiet-period timer; only the last value seen when
//! the timer expires is acted on. This is what keeps the address and company
//! lookups from firing on every digit typed.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

/// Default quiet period before a postal code lookup.
pub const CEP_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default quiet period before a company lookup.
pub const CNPJ_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Runs a callback with the most recent value once input has been quiet for
/// `delay`.
///
/// Dropping the debouncer (or calling [`Debouncer::finish`]) flushes a pending
/// value immediately rather than discarding it.
pub struct Debouncer<T> {
    tx: watch::Sender<Option<T>>,
    handle: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns the debouncing task on the current tokio runtime.
    pub fn spawn<F, Fut>(delay: Duration, mut callback: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (tx, mut rx) = watch::channel::<Option<T>>(None);

        let handle = tokio::spawn(async move {
            // Wait for the first value of each burst.
            while rx.changed().await.is_ok() {
                let closed = loop {
                    tokio::select! {
                        changed = rx.changed() => {
                            if changed.is_err() {
                                break true;
                            }
                            trace!("debounce timer restarted");
                        }
                        _ = tokio::time::sleep(delay) => break false,
                    }
                };

                let value = rx.borrow_and_update().clone();
                if let Some(value) = value {
                    callback(value).await;
                }

                if closed {
                    return;
                }
            }
        });

        Self { tx, handle }
    }

    /// Records a new value and restarts the quiet period.
    pub fn push(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// Flushes any pending value and waits for the callback to finish.
    pub async fn finish(self) {
        let Self { tx, handle } = self;
        drop(tx);
        if let Err(err) = handle.await {
            tracing::error!(error = %err, "debounce task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl FnMut(u32) -> std::future::Ready<()>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback = move |v| {
            sink.lock().unwrap().push(v);
            std::future::ready(())
        };
        (seen, callback)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_value() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(500), callback);

        debouncer.push(1);
        debouncer.push(2);
        debouncer.push(3);
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(*seen.lock().unwrap(), vec![3]);
        debouncer.finish().await;
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_pushes_fire_separately() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(100), callback);

        debouncer.push(1);
        tokio::time::sleep(Duration::from_millis(150)).await;
        debouncer.push(2);
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
        debouncer.finish().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_inside_window_restart_timer() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(100), callback);

        for v in 0..5 {
            debouncer.push(v);
            tokio::time::sleep(Duration::from_millis(60)).await;
        }
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*seen.lock().unwrap(), vec![4]);
        debouncer.finish().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_flushes_pending_value() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_secs(60), callback);

        debouncer.push(7);
        debouncer.finish().await;

        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_without_values_is_silent() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(10), callback);
        debouncer.finish().await;
        assert!(seen.lock().unwrap().is_empty());
    }
}
