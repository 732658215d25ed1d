//! Countdown arithmetic for the "event starts in" timer.

use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// Time remaining until `target`, or `None` once it has passed.
    pub fn until(target: NaiveDateTime, now: NaiveDateTime) -> Option<Self> {
        let total = (target - now).num_seconds();
        if total <= 0 {
            return None;
        }
        Some(Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        })
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::parse_datetime;

    #[test]
    fn splits_remaining_time() {
        let now = parse_datetime("2025-01-01T00:00:00").unwrap();
        let target = parse_datetime("2025-01-03T05:06:07").unwrap();
        assert_eq!(
            TimeLeft::until(target, now),
            Some(TimeLeft { days: 2, hours: 5, minutes: 6, seconds: 7 })
        );
    }

    #[test]
    fn past_targets_have_no_countdown() {
        let now = parse_datetime("2025-01-01T00:00:00").unwrap();
        assert_eq!(TimeLeft::until(now, now), None);
        assert!(TimeLeft::default().is_zero());
    }
}
