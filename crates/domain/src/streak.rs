//! Streak rules - continuation, reset, and same-day detection for habits.
//!
//! Comparison is date-only; time of day never matters. The caller supplies
//! "today" so the rule stays deterministic under test.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Outcome of advancing a habit's streak for one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakUpdate {
    pub streak: i64,
    pub last_completed: NaiveDate,
    /// True when the habit was already completed today. The caller must not
    /// re-apply rewards or persist anything in that case.
    pub already_done_today: bool,
}

/// Advance a streak given today's date and the last completion date.
///
/// Same day: no change. Yesterday: streak continues. Anything older (or a
/// first-ever completion): streak restarts at 1.
pub fn advance(today: NaiveDate, last_completed: Option<NaiveDate>, current_streak: i64) -> StreakUpdate {
    match last_completed {
        Some(last) if last == today => StreakUpdate {
            streak: current_streak,
            last_completed: last,
            already_done_today: true,
        },
        Some(last) if Some(last) == today.checked_sub_days(Days::new(1)) => StreakUpdate {
            streak: current_streak + 1,
            last_completed: today,
            already_done_today: false,
        },
        _ => StreakUpdate {
            streak: 1,
            last_completed: today,
            already_done_today: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_yesterday_continues_the_streak() {
        let update = advance(date(2025, 6, 15), Some(date(2025, 6, 14)), 3);
        assert_eq!(update.streak, 4);
        assert_eq!(update.last_completed, date(2025, 6, 15));
        assert!(!update.already_done_today);
    }

    #[test]
    fn test_same_day_is_a_no_op() {
        let update = advance(date(2025, 6, 15), Some(date(2025, 6, 15)), 3);
        assert_eq!(update.streak, 3);
        assert!(update.already_done_today);
    }

    #[test]
    fn test_first_completion_starts_at_one() {
        let update = advance(date(2025, 6, 15), None, 0);
        assert_eq!(update.streak, 1);
        assert!(!update.already_done_today);
    }

    #[test]
    fn test_gap_resets_to_one() {
        let update = advance(date(2025, 6, 15), Some(date(2025, 6, 12)), 7);
        assert_eq!(update.streak, 1);
        assert_eq!(update.last_completed, date(2025, 6, 15));
    }

    #[test]
    fn test_continuation_across_month_boundary() {
        let update = advance(date(2025, 7, 1), Some(date(2025, 6, 30)), 9);
        assert_eq!(update.streak, 10);
    }
}
