use serde::Serialize;
use time::Date;
use uuid::Uuid;

use crate::entries::repo::FoodEntry;

/// Sum of a member's non-deleted calorie entries for one calendar day.
///
/// Always recomputed from the full entry set. The cached
/// `current_daily_calories` on the member row is a projection of this value,
/// never an incrementally maintained counter, so concurrent or out-of-order
/// writes converge on the next recomputation.
pub fn aggregate_day(entries: &[FoodEntry], member_id: Uuid, day: Date) -> i64 {
    entries
        .iter()
        .filter(|e| e.member_id == member_id && e.entry_date == day && !e.deleted)
        .map(|e| i64::from(e.calories))
        .sum()
}

/// Progress toward the daily goal, capped at 100%.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DailyProgress {
    pub percent: u8,
    pub goal_exceeded: bool,
}

/// A zero (or negative) goal yields 0% rather than dividing.
pub fn daily_progress(current: i64, goal: i64) -> DailyProgress {
    if goal <= 0 {
        return DailyProgress {
            percent: 0,
            goal_exceeded: false,
        };
    }
    let raw = (current as f64 / goal as f64 * 100.0).round();
    DailyProgress {
        percent: raw.clamp(0.0, 100.0) as u8,
        goal_exceeded: current > goal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::OffsetDateTime;

    fn entry(member_id: Uuid, day: Date, calories: i32, deleted: bool) -> FoodEntry {
        FoodEntry {
            id: Uuid::new_v4(),
            member_id,
            user_id: Uuid::new_v4(),
            food_name: "apple".into(),
            calories,
            eaten_at: OffsetDateTime::now_utc(),
            entry_date: day,
            deleted,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn sums_only_matching_day_and_skips_soft_deleted() {
        let member = Uuid::new_v4();
        let day = date!(2026 - 08 - 29);
        let other_day = date!(2026 - 08 - 28);
        let entries = vec![
            entry(member, day, 200, false),
            entry(member, day, 150, false),
            entry(member, day, 999, true),
            entry(member, other_day, 500, false),
        ];
        assert_eq!(aggregate_day(&entries, member, day), 350);
    }

    #[test]
    fn ignores_entries_of_other_members() {
        let member = Uuid::new_v4();
        let day = date!(2026 - 08 - 29);
        let entries = vec![
            entry(member, day, 120, false),
            entry(Uuid::new_v4(), day, 480, false),
        ];
        assert_eq!(aggregate_day(&entries, member, day), 120);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let member = Uuid::new_v4();
        let day = date!(2026 - 08 - 29);
        let entries = vec![
            entry(member, day, 300, false),
            entry(member, day, 250, false),
        ];
        let first = aggregate_day(&entries, member, day);
        let second = aggregate_day(&entries, member, day);
        assert_eq!(first, 550);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_day_sums_to_zero() {
        let member = Uuid::new_v4();
        assert_eq!(aggregate_day(&[], member, date!(2026 - 08 - 29)), 0);
    }

    #[test]
    fn zero_goal_is_zero_percent_not_a_division() {
        let p = daily_progress(350, 0);
        assert_eq!(p.percent, 0);
        assert!(!p.goal_exceeded);
    }

    #[test]
    fn exceeded_goal_caps_at_hundred_and_flags() {
        let p = daily_progress(1200, 1000);
        assert_eq!(p.percent, 100);
        assert!(p.goal_exceeded);
    }

    #[test]
    fn partial_progress_rounds_to_nearest() {
        assert_eq!(daily_progress(350, 1649).percent, 21);
        assert_eq!(daily_progress(1000, 1000).percent, 100);
        assert!(!daily_progress(1000, 1000).goal_exceeded);
        assert_eq!(daily_progress(0, 1649).percent, 0);
    }
}
