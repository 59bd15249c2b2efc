//! Process-wide request budget protecting the text-generation provider.

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Which provider model a permitted request should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelTier {
    /// The primary, higher-capability model.
    Primary,
    /// The lower-capability model used once the short-term budget is spent.
    Fallback,
}

/// Request refused because the daily budget is exhausted.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("daily request budget of {limit} exhausted")]
pub struct RateLimitExceeded {
    /// The daily budget that was reached.
    pub limit: u32,
}

/// Budget thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimits {
    /// Length of the rolling short-term window.
    pub window: TimeDelta,
    /// Requests allowed on the primary model within one window.
    pub primary_per_window: usize,
    /// Length of the daily window.
    pub day: TimeDelta,
    /// Requests allowed within one daily window.
    pub daily_budget: u32,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            window: TimeDelta::seconds(60),
            primary_per_window: 9,
            day: TimeDelta::days(1),
            daily_budget: 50,
        }
    }
}

/// Point-in-time view of limiter usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateUsage {
    /// Requests recorded in the rolling window.
    pub in_window: usize,
    /// Requests counted in the current daily window.
    pub today: u32,
}

#[derive(Debug)]
struct RateWindow {
    recent: VecDeque<DateTime<Utc>>,
    today: u32,
    last_reset: DateTime<Utc>,
}

impl RateWindow {
    /// Resets the daily count once a full day has passed and drops
    /// timestamps that have left the rolling window.
    fn roll(&mut self, now: DateTime<Utc>, limits: &RateLimits) {
        if now - self.last_reset > limits.day {
            self.today = 0;
            self.last_reset = now;
        }
        while self
            .recent
            .front()
            .is_some_and(|stamp| now - *stamp >= limits.window)
        {
            self.recent.pop_front();
        }
    }
}

/// Rolling-window and daily request limiter.
///
/// Checking the budget and recording the request happen under one lock, so
/// concurrent callers never decide on a stale window.
#[derive(Debug)]
pub struct RateLimiter<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    limits: RateLimits,
    state: Mutex<RateWindow>,
}

impl<C> RateLimiter<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a limiter whose daily window starts now.
    #[must_use]
    pub fn new(clock: Arc<C>, limits: RateLimits) -> Self {
        let last_reset = clock.utc();
        Self {
            clock,
            limits,
            state: Mutex::new(RateWindow {
                recent: VecDeque::new(),
                today: 0,
                last_reset,
            }),
        }
    }

    /// Returns the configured thresholds.
    #[must_use]
    pub const fn limits(&self) -> &RateLimits {
        &self.limits
    }

    /// Admits one request and records it.
    ///
    /// Requests beyond the rolling-window budget are admitted on
    /// [`ModelTier::Fallback`]. Admitted requests count against both
    /// windows immediately, whatever the provider later does.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitExceeded`] once the daily budget is spent; nothing
    /// is recorded in that case.
    pub fn acquire(&self) -> Result<ModelTier, RateLimitExceeded> {
        let now = self.clock.utc();
        let mut window = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        window.roll(now, &self.limits);

        if window.today >= self.limits.daily_budget {
            return Err(RateLimitExceeded {
                limit: self.limits.daily_budget,
            });
        }
        let tier = if window.recent.len() >= self.limits.primary_per_window {
            ModelTier::Fallback
        } else {
            ModelTier::Primary
        };

        window.recent.push_back(now);
        window.today = window.today.saturating_add(1);
        Ok(tier)
    }

    /// Reports current usage after rolling both windows forward.
    #[must_use]
    pub fn usage(&self) -> RateUsage {
        let now = self.clock.utc();
        let mut window = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        window.roll(now, &self.limits);
        RateUsage {
            in_window: window.recent.len(),
            today: window.today,
        }
    }
}
