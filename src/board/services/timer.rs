//! Periodic driver that sweeps running tasks once per tick.

use crate::board::{ports::BoardRepository, services::BoardStore};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error};

/// Tick period of the timer.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drives [`BoardStore::tick`] on a fixed period.
///
/// Elapsed time is counted as ticks observed while a task is running, so a
/// task accumulates the same time however often it is paused, resumed, or
/// shown.
pub struct TimerService<R>
where
    R: BoardRepository,
{
    store: Arc<BoardStore<R>>,
    period: Duration,
}

impl<R> TimerService<R>
where
    R: BoardRepository,
{
    /// Creates a timer ticking every [`TICK_PERIOD`].
    #[must_use]
    pub const fn new(store: Arc<BoardStore<R>>) -> Self {
        Self {
            store,
            period: TICK_PERIOD,
        }
    }

    /// Overrides the tick period.
    #[must_use]
    pub const fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Ticks until `shutdown` resolves and returns the number of ticks
    /// observed.
    ///
    /// The first tick fires one period after the call. A tick whose save
    /// fails is logged and the loop keeps running; the store keeps its
    /// previous state for that tick.
    pub async fn run_until(&self, shutdown: impl Future<Output = ()>) -> u64 {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);
        let mut observed: u64 = 0;
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    debug!(observed, "timer stopped");
                    return observed;
                }
                _ = ticker.tick() => {
                    observed = observed.saturating_add(1);
                    if let Err(err) = self.store.tick().await {
                        error!(error = %err, "timer tick could not be saved");
                    }
                }
            }
        }
    }
}
