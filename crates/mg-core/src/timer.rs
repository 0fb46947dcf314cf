//! Per-round countdown timer.
//!
//! The timer counts down from the round's limit as the host loop calls
//! [`RoundTimer::tick`]. The first of win, lose, or timeout latches the
//! round's outcome; anything after that is ignored. A latched outcome is
//! handed out exactly once through [`RoundTimer::poll_outcome`].

use crate::outcome::RoundOutcome;

/// Remaining time at or below which a round is considered urgent.
pub const DEFAULT_URGENT_THRESHOLD: f64 = 2.0;

/// Countdown and outcome latch for one round.
#[derive(Debug, Clone, Default)]
pub struct RoundTimer {
    limit: f64,
    remaining: f64,
    paused: bool,
    outcome: Option<RoundOutcome>,
    delivered: bool,
}

impl RoundTimer {
    /// Create a timer already counting down from `limit` seconds.
    pub fn started(limit: f64) -> Self {
        let mut timer = Self::default();
        timer.start(limit);
        timer
    }

    /// Begin a fresh countdown from `limit` seconds, clearing any latch.
    ///
    /// Negative or non-finite limits are treated as zero, which times out on
    /// the first tick.
    pub fn start(&mut self, limit: f64) {
        let limit = if limit.is_finite() { limit.max(0.0) } else { 0.0 };
        self.limit = limit;
        self.remaining = limit;
        self.paused = false;
        self.outcome = None;
        self.delivered = false;
        tracing::debug!(limit, "round timer started");
    }

    /// Advance the countdown by `delta` seconds. Returns the remaining time.
    ///
    /// Latches [`RoundOutcome::Timeout`] when the countdown reaches zero and
    /// no outcome was latched earlier. Ticks on a paused or latched timer
    /// change nothing.
    pub fn tick(&mut self, delta: f64) -> f64 {
        if self.paused || self.outcome.is_some() {
            return self.remaining;
        }
        if delta.is_finite() && delta > 0.0 {
            self.remaining = (self.remaining - delta).max(0.0);
        }
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.latch(RoundOutcome::Timeout);
        }
        self.remaining
    }

    /// Latch a win. Returns `true` if this call decided the round.
    pub fn report_win(&mut self) -> bool {
        self.latch(RoundOutcome::Win)
    }

    /// Latch a loss. Returns `true` if this call decided the round.
    pub fn report_lose(&mut self) -> bool {
        self.latch(RoundOutcome::Lose)
    }

    fn latch(&mut self, outcome: RoundOutcome) -> bool {
        if let Some(existing) = self.outcome {
            tracing::debug!(%existing, ignored = %outcome, "duplicate round outcome ignored");
            return false;
        }
        self.outcome = Some(outcome);
        tracing::debug!(%outcome, remaining = self.remaining, "round outcome latched");
        true
    }

    /// Take the latched outcome. Yields `Some` at most once per round.
    pub fn poll_outcome(&mut self) -> Option<RoundOutcome> {
        if self.delivered {
            return None;
        }
        let outcome = self.outcome?;
        self.delivered = true;
        Some(outcome)
    }

    /// Extend the countdown by `seconds`, capped at twice the limit.
    ///
    /// Never shortens the countdown and does nothing once the round is
    /// decided. Returns the remaining time.
    pub fn add_bonus_time(&mut self, seconds: f64) -> f64 {
        if self.outcome.is_some() || !seconds.is_finite() || seconds <= 0.0 {
            return self.remaining;
        }
        let extended = (self.remaining + seconds).min(self.limit * 2.0);
        if extended > self.remaining {
            self.remaining = extended;
        }
        tracing::debug!(bonus = seconds, remaining = self.remaining, "bonus time added");
        self.remaining
    }

    /// Pause (`false`) or resume (`true`) the countdown.
    pub fn set_running(&mut self, running: bool) {
        self.paused = !running;
    }

    /// The round's starting limit in seconds.
    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Seconds left, never negative.
    pub fn remaining(&self) -> f64 {
        self.remaining.max(0.0)
    }

    /// Fraction of the limit already used, from 0.0 to 1.0.
    ///
    /// Bonus time can push the remaining time above the limit, in which case
    /// this reports 0.0.
    pub fn progress(&self) -> f64 {
        if self.limit > 0.0 {
            ((self.limit - self.remaining) / self.limit).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Remaining time as a fraction of the limit.
    pub fn remaining_normalized(&self) -> f64 {
        if self.limit > 0.0 {
            self.remaining / self.limit
        } else {
            0.0
        }
    }

    /// Return `true` if the remaining time is at or below `threshold`.
    pub fn is_urgent(&self, threshold: f64) -> bool {
        self.remaining <= threshold
    }

    /// Return `true` while the countdown is live: not paused and undecided.
    pub fn is_running(&self) -> bool {
        !self.paused && self.outcome.is_none()
    }

    /// Return `true` once an outcome has been latched.
    pub fn has_ended(&self) -> bool {
        self.outcome.is_some()
    }

    /// The latched outcome, if any, regardless of delivery.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn tick_counts_down() {
        let mut t = RoundTimer::started(3.0);
        assert!(approx(t.tick(0.5), 2.5));
        assert!(approx(t.tick(1.0), 1.5));
        assert!(t.is_running());
        assert!(t.poll_outcome().is_none());
    }

    #[test]
    fn tick_clamps_at_zero_and_times_out_once() {
        let mut t = RoundTimer::started(1.0);
        assert!(approx(t.tick(5.0), 0.0));
        assert_eq!(t.poll_outcome(), Some(RoundOutcome::Timeout));
        assert!(approx(t.tick(1.0), 0.0));
        assert_eq!(t.poll_outcome(), None);
        assert_eq!(t.outcome(), Some(RoundOutcome::Timeout));
    }

    #[test]
    fn exact_expiry_times_out() {
        let mut t = RoundTimer::started(2.0);
        t.tick(1.0);
        t.tick(1.0);
        assert_eq!(t.poll_outcome(), Some(RoundOutcome::Timeout));
    }

    #[test]
    fn first_report_wins_the_latch() {
        let mut t = RoundTimer::started(3.0);
        assert!(t.report_win());
        assert!(!t.report_lose());
        assert!(!t.report_win());
        t.tick(10.0);
        assert_eq!(t.poll_outcome(), Some(RoundOutcome::Win));
        assert_eq!(t.poll_outcome(), None);
    }

    #[test]
    fn win_after_timeout_is_ignored() {
        let mut t = RoundTimer::started(1.0);
        t.tick(1.5);
        assert!(!t.report_win());
        assert_eq!(t.poll_outcome(), Some(RoundOutcome::Timeout));
    }

    #[test]
    fn bonus_time_capped_at_double_limit() {
        let mut t = RoundTimer::started(4.0);
        t.tick(1.0);
        assert!(approx(t.add_bonus_time(2.0), 5.0));
        assert!(approx(t.add_bonus_time(100.0), 8.0));
        assert!(approx(t.add_bonus_time(1.0), 8.0));
    }

    #[test]
    fn bonus_time_never_shortens() {
        let mut t = RoundTimer::started(2.0);
        assert!(approx(t.add_bonus_time(-1.0), 2.0));
        assert!(approx(t.add_bonus_time(f64::NAN), 2.0));
    }

    #[test]
    fn bonus_time_ignored_after_latch() {
        let mut t = RoundTimer::started(2.0);
        t.report_lose();
        assert!(approx(t.add_bonus_time(1.0), 2.0));
    }

    #[test]
    fn paused_timer_ignores_ticks() {
        let mut t = RoundTimer::started(2.0);
        t.set_running(false);
        assert!(approx(t.tick(5.0), 2.0));
        assert!(!t.is_running());
        assert!(!t.has_ended());
        t.set_running(true);
        t.tick(5.0);
        assert!(t.has_ended());
    }

    #[test]
    fn progress_and_normalized() {
        let mut t = RoundTimer::started(4.0);
        t.tick(1.0);
        assert!(approx(t.progress(), 0.25));
        assert!(approx(t.remaining_normalized(), 0.75));
    }

    #[test]
    fn urgency_threshold() {
        let mut t = RoundTimer::started(5.0);
        assert!(!t.is_urgent(DEFAULT_URGENT_THRESHOLD));
        t.tick(3.0);
        assert!(t.is_urgent(DEFAULT_URGENT_THRESHOLD));
    }

    #[test]
    fn restart_clears_latch() {
        let mut t = RoundTimer::started(1.0);
        t.report_win();
        t.poll_outcome();
        t.start(3.0);
        assert!(!t.has_ended());
        assert!(approx(t.remaining(), 3.0));
        assert!(t.report_lose());
        assert_eq!(t.poll_outcome(), Some(RoundOutcome::Lose));
    }

    #[test]
    fn zero_limit_times_out_on_first_tick() {
        let mut t = RoundTimer::started(-3.0);
        assert!(approx(t.limit(), 0.0));
        t.tick(0.0);
        assert_eq!(t.poll_outcome(), Some(RoundOutcome::Timeout));
        assert!(approx(t.progress(), 1.0));
    }
}
