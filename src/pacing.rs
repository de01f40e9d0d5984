// Frame pacing. The boot animation and the render loop both hold a fixed frame
// rate by sleeping out whatever is left of the current frame period. Time comes
// from a `Clock` so both can be driven by a virtual clock in tests.

use std::time::{Duration, Instant};

/// Source of time plus the ability to wait.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock; `sleep` blocks the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Keeps consecutive frames one period apart.
///
/// Each [`wait`](FramePacer::wait) sleeps until the end of the current frame and
/// starts the next one at that deadline, so work done between waits is absorbed
/// into the period. After a stall longer than two periods the schedule restarts
/// from now instead of rushing through the backlog.
pub struct FramePacer<C: Clock> {
    clock: C,
    period: Duration,
    frame_start: Option<Instant>,
}

impl<C: Clock> FramePacer<C> {
    pub fn new(clock: C, period: Duration) -> Self {
        Self { clock, period, frame_start: None }
    }

    pub fn frame_period(&self) -> Duration {
        self.period
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Sleep out the rest of the current frame. Returns how long we slept
    /// (zero when the frame already overran).
    pub fn wait(&mut self) -> Duration {
        let now = self.clock.now();
        let max_drift = self.period * 2;

        let start = match self.frame_start {
            Some(start) if now <= start + self.period + max_drift => start,
            // First frame, or we fell too far behind: restart the schedule
            _ => now,
        };
        let deadline = start + self.period;
        self.frame_start = Some(deadline);

        let remaining = deadline.saturating_duration_since(now);
        if !remaining.is_zero() {
            self.clock.sleep(remaining);
        }
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualClock;

    const PERIOD: Duration = Duration::from_millis(41);

    #[test]
    fn first_wait_sleeps_a_full_period() {
        let clock = ManualClock::new();
        let mut pacer = FramePacer::new(clock.clone(), PERIOD);
        assert_eq!(pacer.wait(), PERIOD);
        assert_eq!(clock.sleeps(), vec![PERIOD]);
    }

    #[test]
    fn sleeps_only_the_remainder() {
        let clock = ManualClock::new();
        let mut pacer = FramePacer::new(clock.clone(), PERIOD);
        pacer.wait();
        clock.advance(Duration::from_millis(10));
        assert_eq!(pacer.wait(), Duration::from_millis(31));
        clock.advance(Duration::from_millis(40));
        assert_eq!(pacer.wait(), Duration::from_millis(1));
    }

    #[test]
    fn overrun_frames_do_not_sleep() {
        let clock = ManualClock::new();
        let mut pacer = FramePacer::new(clock.clone(), PERIOD);
        pacer.wait();
        clock.advance(Duration::from_millis(50));
        assert_eq!(pacer.wait(), Duration::ZERO);
        // Still on the same schedule: next deadline is 41ms after the missed one.
        assert_eq!(pacer.wait(), Duration::from_millis(32));
    }

    #[test]
    fn long_stall_restarts_schedule() {
        let clock = ManualClock::new();
        let mut pacer = FramePacer::new(clock.clone(), PERIOD);
        pacer.wait();
        clock.advance(Duration::from_secs(5));
        assert_eq!(pacer.wait(), PERIOD);
        assert_eq!(pacer.wait(), PERIOD);
    }
}
