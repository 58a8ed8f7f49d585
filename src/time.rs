//! Game clocks.
//!
//! `draw_web()` calls at ~60fps with variable delta. [`GameTime`] converts
//! this into a fixed number of discrete ticks per second. Timers built on
//! top of those ticks ([`IntervalTimer`], [`Delay`]) never look at the wall
//! clock, which keeps game logic deterministic and fully testable.

/// Fixed ticks per real-time second used by every game clock.
pub const TICKS_PER_SEC: u32 = 10;

pub struct GameTime {
    /// Milliseconds per tick (e.g. 100ms = 10 ticks/sec)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since creation
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()` or similar)
    /// and return the number of discrete ticks to process this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // Clamp so a backgrounded tab does not dump minutes of ticks at once
            Some(prev) => (now_ms - prev).clamp(0.0, 500.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

/// Lifecycle of an [`IntervalTimer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Cancelled,
}

/// A repeating timer that fires once every `period_ticks` game ticks.
///
/// Once cancelled it stays silent until [`start`](IntervalTimer::start) is
/// called again, so a stopped game never receives a stray callback.
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    period_ticks: u32,
    elapsed: u32,
    state: TimerState,
    /// Number of times this timer has been started.
    pub starts: u32,
    /// Number of cancels that actually stopped a running timer.
    pub cancels: u32,
}

impl IntervalTimer {
    pub fn new(period_ticks: u32) -> Self {
        Self {
            period_ticks: period_ticks.max(1),
            elapsed: 0,
            state: TimerState::Idle,
            starts: 0,
            cancels: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Start counting from zero. Callers must cancel a running timer first.
    pub fn start(&mut self) {
        debug_assert!(!self.is_running(), "interval timer started twice");
        self.elapsed = 0;
        self.state = TimerState::Running;
        self.starts += 1;
    }

    /// Stop the timer. Returns `true` only if it was running.
    pub fn cancel(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Cancelled;
        self.elapsed = 0;
        self.cancels += 1;
        true
    }

    /// Feed game ticks, returning how many whole periods elapsed.
    pub fn advance(&mut self, delta_ticks: u32) -> u32 {
        if !self.is_running() {
            return 0;
        }
        let total = self.elapsed + delta_ticks;
        self.elapsed = total % self.period_ticks;
        total / self.period_ticks
    }
}

/// A one-shot countdown measured in game ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delay {
    remaining: Option<u32>,
}

impl Delay {
    /// (Re)arm the delay to fire after `ticks`.
    pub fn arm(&mut self, ticks: u32) {
        self.remaining = Some(ticks);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Feed game ticks. Returns `true` exactly once, on the call that
    /// exhausts the countdown.
    pub fn advance(&mut self, delta_ticks: u32) -> bool {
        match self.remaining {
            Some(left) if delta_ticks >= left => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - delta_ticks);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── GameTime ─────────────────────────────────────────────────

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        assert_eq!(gt.update(0.0), 0);
    }

    #[test]
    fn remainder_carried_over() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(0.0);
        assert_eq!(gt.update(150.0), 1); // 50ms left over
        assert_eq!(gt.update(200.0), 1); // 50ms + 50ms
        assert_eq!(gt.total_ticks, 2);
    }

    #[test]
    fn backgrounded_tab_is_clamped() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(0.0);
        assert_eq!(gt.update(60_000.0), 5);
    }

    #[test]
    fn clock_going_backwards_yields_nothing() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(1000.0);
        assert_eq!(gt.update(900.0), 0);
    }

    #[test]
    fn steady_60fps_is_about_ten_ticks_per_second() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(0.0);
        let total: u32 = (1..=60).map(|i| gt.update(i as f64 * 16.667)).sum();
        assert!((9..=11).contains(&total), "expected ~10 ticks, got {total}");
    }

    // ── IntervalTimer ────────────────────────────────────────────

    #[test]
    fn idle_timer_never_fires() {
        let mut t = IntervalTimer::new(TICKS_PER_SEC);
        assert_eq!(t.advance(100), 0);
        assert_eq!(t.state(), TimerState::Idle);
    }

    #[test]
    fn fires_once_per_period() {
        let mut t = IntervalTimer::new(10);
        t.start();
        assert_eq!(t.advance(9), 0);
        assert_eq!(t.advance(1), 1);
        assert_eq!(t.advance(25), 2);
        assert_eq!(t.advance(5), 1); // 5 carried + 5
    }

    #[test]
    fn cancel_reports_only_the_first_stop() {
        let mut t = IntervalTimer::new(10);
        t.start();
        assert!(t.cancel());
        assert!(!t.cancel());
        assert_eq!(t.cancels, 1);
        assert_eq!(t.advance(100), 0);
    }

    #[test]
    fn restart_after_cancel_begins_from_zero() {
        let mut t = IntervalTimer::new(10);
        t.start();
        t.advance(7);
        t.cancel();
        t.start();
        assert_eq!(t.advance(7), 0);
        assert_eq!(t.advance(3), 1);
        assert_eq!(t.starts, 2);
    }

    // ── Delay ────────────────────────────────────────────────────

    #[test]
    fn delay_fires_exactly_once() {
        let mut d = Delay::default();
        d.arm(5);
        assert!(!d.advance(4));
        assert!(d.advance(1));
        assert!(!d.advance(10));
        assert!(!d.is_armed());
    }

    #[test]
    fn delay_overshoot_still_fires() {
        let mut d = Delay::default();
        d.arm(5);
        assert!(d.advance(30));
    }

    #[test]
    fn cancelled_delay_is_silent() {
        let mut d = Delay::default();
        d.arm(5);
        d.cancel();
        assert!(!d.advance(5));
    }
}
