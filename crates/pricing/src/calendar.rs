//! Calendar arithmetic over local dates.
//!
//! Every function treats a range as `[start, end)` and returns 0 for empty or
//! inverted ranges.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use staysync_core::ValueObject;

/// Nights between check-in and check-out (date boundaries crossed).
pub fn night_count(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

fn days_in(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day < end)
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

fn count_where(start: NaiveDate, end: NaiveDate, pred: impl Fn(NaiveDate) -> bool) -> u32 {
    let count = days_in(start, end).filter(|day| pred(*day)).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Mondays through Fridays in `[start, end)`.
pub fn weekday_count(start: NaiveDate, end: NaiveDate) -> u32 {
    count_where(start, end, |day| !is_weekend(day))
}

/// Saturdays and Sundays in `[start, end)`.
pub fn weekend_day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    count_where(start, end, is_weekend)
}

/// Saturdays in `[start, end)`.
pub fn saturday_count(start: NaiveDate, end: NaiveDate) -> u32 {
    count_where(start, end, |day| day.weekday() == Weekday::Sat)
}

/// Weekdays in `[start + 1 day, end)`: the arrival day never needs a commute.
pub fn commute_day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    match start.succ_opt() {
        Some(first_commute) => weekday_count(first_commute, end),
        None => 0,
    }
}

/// A half-open date window `[start, end)`.
///
/// No ordering is enforced here; an inverted range simply contains no days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn nights(&self) -> u32 {
        night_count(self.start, self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// `start <= day < end`.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }

    /// True when the two windows share at least one night.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Nights shared with `other`.
    pub fn overlap_nights(&self, other: &DateRange) -> u32 {
        night_count(self.start.max(other.start), self.end.min(other.end))
    }
}

impl ValueObject for DateRange {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn night_count_counts_boundaries() {
        assert_eq!(night_count(date(2024, 5, 20), date(2024, 5, 23)), 3);
        assert_eq!(night_count(date(2024, 2, 28), date(2024, 3, 1)), 2);
    }

    #[test]
    fn inverted_and_empty_ranges_count_zero() {
        let d = date(2024, 5, 20);
        assert_eq!(night_count(d, d), 0);
        assert_eq!(night_count(date(2024, 5, 23), d), 0);
        assert_eq!(weekday_count(date(2024, 5, 23), d), 0);
        assert_eq!(saturday_count(d, d), 0);
        assert_eq!(commute_day_count(d, d), 0);
    }

    #[test]
    fn weekday_and_weekend_split_a_week() {
        // Monday 2024-05-20 through the following Monday.
        let start = date(2024, 5, 20);
        let end = date(2024, 5, 27);
        assert_eq!(weekday_count(start, end), 5);
        assert_eq!(weekend_day_count(start, end), 2);
        assert_eq!(saturday_count(start, end), 1);
    }

    #[test]
    fn saturday_count_excludes_checkout_day() {
        // Friday to Saturday: the Saturday is checkout, not a stayed day.
        assert_eq!(saturday_count(date(2024, 5, 24), date(2024, 5, 25)), 0);
        assert_eq!(saturday_count(date(2024, 5, 24), date(2024, 5, 27)), 1);
    }

    #[test]
    fn commute_days_skip_the_arrival_day() {
        // Arrive Monday, leave Friday: Tue, Wed, Thu.
        assert_eq!(commute_day_count(date(2024, 5, 20), date(2024, 5, 24)), 3);
        // Arrive Friday, leave Monday: nothing but the weekend.
        assert_eq!(commute_day_count(date(2024, 5, 24), date(2024, 5, 27)), 0);
    }

    #[test]
    fn date_range_overlap_is_half_open() {
        let a = DateRange::new(date(2024, 5, 20), date(2024, 5, 23));
        let b = DateRange::new(date(2024, 5, 23), date(2024, 5, 25));
        let c = DateRange::new(date(2024, 5, 22), date(2024, 5, 25));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert_eq!(a.overlap_nights(&c), 1);
        assert_eq!(a.overlap_nights(&b), 0);
        assert!(a.contains(date(2024, 5, 22)));
        assert!(!a.contains(date(2024, 5, 23)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: weekdays + weekend days always equals the night count.
        #[test]
        fn weekday_split_covers_every_night(offset in 0i64..3650, len in -30i64..120) {
            let start = date(2020, 1, 1) + chrono::Duration::days(offset);
            let end = start + chrono::Duration::days(len);
            prop_assert_eq!(
                weekday_count(start, end) + weekend_day_count(start, end),
                night_count(start, end)
            );
        }

        /// Property: restricted counts never exceed the night count.
        #[test]
        fn restricted_counts_are_bounded_by_nights(offset in 0i64..3650, len in 0i64..120) {
            let start = date(2020, 1, 1) + chrono::Duration::days(offset);
            let end = start + chrono::Duration::days(len);
            let nights = night_count(start, end);
            prop_assert!(saturday_count(start, end) <= nights);
            prop_assert!(commute_day_count(start, end) <= nights);
        }
    }
}
