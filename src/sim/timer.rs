//! Logical interval timers
//!
//! Engines own their timers as `Option<Interval>`: `Some` is armed, `None` is
//! cancelled. The host only supplies elapsed time; engines step from deadline
//! to deadline so that every firing happens at its exact instant.

/// A repeating timer measured in milliseconds of simulation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u32,
    elapsed_ms: u32,
}

impl Interval {
    /// Arm a timer that first fires one full period from now
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Time until the next firing
    pub fn remaining_ms(&self) -> u32 {
        self.period_ms - self.elapsed_ms
    }

    /// Advance by `dt_ms` (at most `remaining_ms`), returning true on a firing
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        self.elapsed_ms += dt_ms.min(self.remaining_ms());
        if self.elapsed_ms >= self.period_ms {
            self.elapsed_ms = 0;
            true
        } else {
            false
        }
    }
}

/// Advance an optional timer, returning true if it is armed and fired
pub fn advance_armed(timer: &mut Option<Interval>, dt_ms: u32) -> bool {
    timer.as_mut().is_some_and(|t| t.advance(dt_ms))
}

/// Earliest deadline among the armed timers, if any are armed
pub fn next_deadline<'a, I>(timers: I) -> Option<u32>
where
    I: IntoIterator<Item = &'a Option<Interval>>,
{
    timers
        .into_iter()
        .flatten()
        .map(Interval::remaining_ms)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_period() {
        let mut t = Interval::new(1000);
        assert!(!t.advance(400));
        assert_eq!(t.remaining_ms(), 600);
        assert!(t.advance(600));
        assert_eq!(t.remaining_ms(), 1000);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut t = Interval::new(0);
        assert_eq!(t.period_ms(), 1);
        assert!(t.advance(1));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut t: Option<Interval> = None;
        assert!(!advance_armed(&mut t, 10_000));
    }

    #[test]
    fn test_next_deadline_skips_cancelled() {
        let mut a = Interval::new(1000);
        a.advance(900);
        let timers = [Some(Interval::new(800)), None, Some(a)];
        assert_eq!(next_deadline(&timers), Some(100));
        assert_eq!(next_deadline(&[None, None]), None);
    }
}
