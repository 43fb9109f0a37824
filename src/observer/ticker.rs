use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::ChangeNotifier;

/// Drives a [`ChangeNotifier`] from a fixed-period clock.
///
/// The ticker only holds a weak reference, so it never keeps the notifier
/// alive; once the notifier is dropped the background task exits on its next
/// tick.
pub struct PeriodicTicker;

impl PeriodicTicker {
    /// Spawn the ticking task on the current tokio runtime.
    ///
    /// The first tick fires one `period` after start. Each tick replaces the
    /// state with `step(&state)` and notifies observers.
    pub fn start<T, F>(notifier: &Arc<ChangeNotifier<T>>, period: Duration, step: F) -> TickerHandle
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&T) -> T + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let ticks = Arc::new(AtomicU64::new(0));

        let task = tokio::spawn(tick_loop(
            Arc::downgrade(notifier),
            period,
            step,
            shutdown_rx,
            Arc::clone(&ticks),
        ));
        info!(?period, "ticker started");

        TickerHandle {
            shutdown: shutdown_tx,
            task: Some(task),
            ticks,
        }
    }
}

async fn tick_loop<T, F>(
    notifier: Weak<ChangeNotifier<T>>,
    period: Duration,
    step: F,
    mut shutdown: watch::Receiver<bool>,
    ticks: Arc<AtomicU64>,
) where
    T: Clone + Send + Sync + 'static,
    F: Fn(&T) -> T + Send + 'static,
{
    // tokio rejects a zero period.
    let period = period.max(Duration::from_millis(1));
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = shutdown.changed() => {
                debug!("ticker received stop signal");
                break;
            }
            _ = interval.tick() => {
                let Some(notifier) = notifier.upgrade() else {
                    debug!("notifier dropped, ticker exiting");
                    break;
                };
                if let Err(error) = notifier.update_state(&step) {
                    warn!(%error, "tick notification failed");
                }
                ticks.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}

/// Start/stop handle for a running [`PeriodicTicker`].
///
/// Dropping the handle aborts the task.
pub struct TickerHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl TickerHandle {
    /// Number of ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Signal the task to stop and wait for it. Any tick already in progress
    /// completes first; none start afterwards. Returns the final tick count.
    pub async fn stop(mut self) -> Result<u64, JoinError> {
        // An error only means the task already exited.
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            task.await?;
        }
        let ticks = self.ticks();
        info!(ticks, "ticker stopped");
        Ok(ticks)
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
