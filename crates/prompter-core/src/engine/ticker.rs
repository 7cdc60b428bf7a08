//! Cancellable periodic tick task driving automatic playback.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::state::{ScrollState, TickOutcome};

/// Handle to a running tick task.
///
/// There is at most one of these per engine; starting playback replaces any
/// previous handle after stopping it, so two tick streams can never advance
/// the same offset concurrently.
pub(crate) struct Ticker {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a tick loop over the shared state.
    ///
    /// The loop exits on its own when playback finishes or is paused; ticks
    /// re-check `is_playing` under the state lock, so a tick that fires
    /// after `stop` can never mutate the offset.
    pub(crate) fn spawn(state: Arc<Mutex<ScrollState>>, period: Duration) -> Self {
        let (shutdown, mut rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // Never burst to catch up after a stalled executor; skipped
            // ticks would otherwise advance the offset faster than wall
            // clock.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; consume it so the loop
            // fires one period after start.
            interval.tick().await;

            loop {
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() || *rx.borrow() {
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        let mut state = state.lock();
                        match state.apply_tick() {
                            TickOutcome::Advanced => {}
                            TickOutcome::Finished => {
                                debug!("playback reached end of content");
                                break;
                            }
                            // Paused under our feet; the pending tick must
                            // not run again.
                            TickOutcome::Skipped => break,
                        }
                    }
                }
            }
        });
        Self { shutdown, task }
    }

    /// Cancel the tick loop and tear the task down.
    pub(crate) fn stop(self) {
        let _ = self.shutdown.send(true);
        self.task.abort();
    }
}
