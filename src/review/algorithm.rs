//! Review scheduling
//!
//! Pure state transitions over `ProgressRecord`. Storage calls into these
//! and persists the result; nothing here touches disk or the clock.

use chrono::{DateTime, Duration, Utc};

use crate::progress::ProgressRecord;

/// Days to wait after each successive review. The last entry repeats.
pub const INTERVAL_DAYS: [i64; 6] = [1, 3, 7, 14, 30, 90];

/// How far back the review screen looks for recently reviewed words.
pub const RECENT_REVIEW_DAYS: i64 = 7;

/// Interval to wait after the `review_count`-th review.
///
/// A count of 0 (learned but not yet counted) shares the first slot, so a
/// freshly learned word and a word reviewed once are both due after a day.
pub fn interval(review_count: u32) -> Duration {
    let slot = (review_count.saturating_sub(1) as usize).min(INTERVAL_DAYS.len() - 1);
    Duration::days(INTERVAL_DAYS[slot])
}

/// Mark a word learned. Already-learned records come back unchanged.
pub fn learn(record: &ProgressRecord, now: DateTime<Utc>) -> ProgressRecord {
    if record.is_learned {
        return record.clone();
    }

    ProgressRecord {
        word: record.word.clone(),
        is_learned: true,
        last_reviewed_at: Some(now),
        next_review_due_at: Some(now + interval(0)),
        review_count: 1,
    }
}

/// Reset a record to the unlearned state. The row itself is kept.
pub fn unlearn(record: &ProgressRecord) -> ProgressRecord {
    ProgressRecord::new(record.word.clone())
}

/// Count one more review and schedule the next one.
pub fn record_review(record: &ProgressRecord, now: DateTime<Utc>) -> ProgressRecord {
    let review_count = record.review_count.saturating_add(1);

    ProgressRecord {
        word: record.word.clone(),
        is_learned: record.is_learned,
        last_reviewed_at: Some(now),
        next_review_due_at: Some(now + interval(review_count)),
        review_count,
    }
}

/// Unlearned records are never due, whatever their timestamps say.
pub fn is_due(record: &ProgressRecord, now: DateTime<Utc>) -> bool {
    record.is_learned && record.next_review_due_at.map_or(false, |due| due <= now)
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i64) -> String {
    match days {
        i64::MIN..=0 => "now".to_string(),
        1..=6 => format!("{}d", days),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 11, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_interval_table() {
        assert_eq!(interval(0), Duration::days(1));
        assert_eq!(interval(1), Duration::days(1));
        assert_eq!(interval(2), Duration::days(3));
        assert_eq!(interval(3), Duration::days(7));
        assert_eq!(interval(6), Duration::days(90));
    }

    #[test]
    fn test_interval_non_decreasing_and_clamped() {
        for n in 0..50 {
            assert!(interval(n) <= interval(n + 1));
        }
        assert_eq!(interval(7), Duration::days(90));
        assert_eq!(interval(u32::MAX), Duration::days(90));
    }

    #[test]
    fn test_learn_sets_first_review() {
        let learned = learn(&ProgressRecord::new("A"), t0());

        assert!(learned.is_learned);
        assert_eq!(learned.review_count, 1);
        assert_eq!(learned.last_reviewed_at, Some(t0()));
        assert_eq!(learned.next_review_due_at, Some(t0() + Duration::days(1)));
    }

    #[test]
    fn test_learn_twice_is_noop() {
        let learned = learn(&ProgressRecord::new("A"), t0());
        let again = learn(&learned, t0() + Duration::days(5));
        assert_eq!(again, learned);
    }

    #[test]
    fn test_unlearn_clears_schedule() {
        let learned = record_review(&learn(&ProgressRecord::new("A"), t0()), t0());
        let cleared = unlearn(&learned);

        assert_eq!(cleared, ProgressRecord::new("A"));
    }

    #[test]
    fn test_record_review_is_monotone() {
        let mut record = learn(&ProgressRecord::new("A"), t0());
        let mut now = t0();

        for _ in 0..10 {
            now = now + Duration::hours(30);
            let next = record_review(&record, now);
            assert_eq!(next.review_count, record.review_count + 1);
            assert!(next.next_review_due_at.unwrap() > next.last_reviewed_at.unwrap());
            record = next;
        }
        assert_eq!(record.next_review_due_at, Some(now + Duration::days(90)));
    }

    #[test]
    fn test_is_due() {
        let learned = learn(&ProgressRecord::new("A"), t0());

        assert!(!is_due(&learned, t0()));
        assert!(is_due(&learned, t0() + Duration::days(1)));
    }

    #[test]
    fn test_unlearned_never_due() {
        let mut stale = ProgressRecord::new("A");
        stale.next_review_due_at = Some(t0());

        assert!(!is_due(&stale, t0() + Duration::days(365)));
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(-3), "now");
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(6), "6d");
        assert_eq!(format_interval(29), "4w");
        assert_eq!(format_interval(364), "12mo");
        assert_eq!(format_interval(400), "1y");
    }

    #[test]
    fn test_format_interval_schedule() {
        let labels: Vec<String> = INTERVAL_DAYS.iter().map(|d| format_interval(*d)).collect();
        assert_eq!(labels, vec!["1d", "3d", "1w", "2w", "1mo", "3mo"]);
    }
}
