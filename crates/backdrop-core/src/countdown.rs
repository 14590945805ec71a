//! Countdown to the event start.

use chrono::NaiveDateTime;

/// Time remaining split into display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

/// Countdown towards a fixed local date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target: NaiveDateTime,
}

impl Countdown {
    pub fn new(target: NaiveDateTime) -> Self {
        Self { target }
    }

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    /// Whether the target has been reached.
    pub fn is_over(&self, now: NaiveDateTime) -> bool {
        now >= self.target
    }

    /// Remaining time, clamped to zero once the target has passed.
    pub fn remaining(&self, now: NaiveDateTime) -> TimeLeft {
        let total = (self.target - now).num_seconds().max(0) as u64;
        TimeLeft {
            days: (total / 86_400) as u32,
            hours: ((total % 86_400) / 3_600) as u32,
            minutes: ((total % 3_600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, d)
            .and_then(|date| date.and_hms_opt(h, m, s))
            .expect("valid date")
    }

    #[test]
    fn test_remaining_splits_units() {
        let countdown = Countdown::new(at(6, 9, 0, 0));
        let left = countdown.remaining(at(4, 7, 58, 30));
        assert_eq!(
            left,
            TimeLeft {
                days: 2,
                hours: 1,
                minutes: 1,
                seconds: 30
            }
        );
        assert!(!countdown.is_over(at(4, 7, 58, 30)));
    }

    #[test]
    fn test_remaining_clamps_after_target() {
        let countdown = Countdown::new(at(6, 9, 0, 0));
        assert_eq!(countdown.remaining(at(7, 0, 0, 0)), TimeLeft::default());
        assert!(countdown.is_over(at(6, 9, 0, 0)));
    }
}
