use crate::milestone::{Delay, MilestoneStatus};
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Compare the current finish against the planned date for a milestone that
/// is not yet complete. Returns a delay in whole days (rounded up) when the
/// finish is later than planned; finishing early or on time records nothing.
pub fn calculate_delay(
    status: MilestoneStatus,
    planned: DateTime<Utc>,
    current_finish: Option<DateTime<Utc>>,
    reason: &str,
) -> Option<Delay> {
    if status == MilestoneStatus::Completed {
        return None;
    }
    let finish = current_finish?;
    Delay::new(whole_days_late(planned, finish), reason)
}

fn whole_days_late(planned: DateTime<Utc>, finish: DateTime<Utc>) -> i64 {
    let millis = (finish - planned).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_partial_day_rounds_up() {
        let delay =
            calculate_delay(MilestoneStatus::InProgress, at(1, 8), Some(at(3, 9)), "r").unwrap();
        assert_eq!(delay.days(), 3);
        assert_eq!(delay.reason(), "r");
    }

    #[test]
    fn test_exact_days() {
        let delay = calculate_delay(MilestoneStatus::Delayed, at(1, 8), Some(at(6, 8)), "r");
        assert_eq!(delay.map(|d| d.days()), Some(5));
    }

    #[test]
    fn test_early_or_on_time_is_not_a_delay() {
        assert!(calculate_delay(MilestoneStatus::OnTrack, at(5, 8), Some(at(2, 8)), "r").is_none());
        assert!(calculate_delay(MilestoneStatus::OnTrack, at(5, 8), Some(at(5, 8)), "r").is_none());
    }

    #[test]
    fn test_completed_or_unfinished_is_skipped() {
        assert!(calculate_delay(MilestoneStatus::Completed, at(1, 8), Some(at(9, 8)), "r").is_none());
        assert!(calculate_delay(MilestoneStatus::InProgress, at(1, 8), None, "r").is_none());
    }
}
