//! Booked intervals expanded into individually unavailable calendar days.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::AuthPredicate;
use crate::booking::model::calendar_day;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("range starts on {start} after it ends on {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// Inclusive interval of calendar days.
///
/// Ranges decoded from the API are not checked; an inverted one covers no
/// days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(with = "calendar_day")]
    start_date: NaiveDate,
    #[serde(with = "calendar_day")]
    end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, BookingError> {
        if start_date > end_date {
            return Err(BookingError::InvertedRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Every day from start to end, both included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |day| *day <= end)
    }
}

/// Union of the days covered by a collection of [`DateRange`]s.
///
/// Order and duplicates in the input do not affect the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRangeSet {
    days: BTreeSet<NaiveDate>,
}

impl DateRangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<DateRange>,
    {
        let mut set = Self::new();
        for range in ranges {
            set.insert_range(range.borrow());
        }
        set
    }

    pub fn insert_range(&mut self, range: &DateRange) {
        self.days.extend(range.days());
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Unavailable days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    /// Whether any day in `[start, end]` is unavailable.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        if start > end {
            return false;
        }
        self.days.range(start..=end).next().is_some()
    }

    /// A stay is bookable when it spans at least one night, touches no
    /// unavailable day, and the caller is signed in.
    pub fn is_bookable(&self, start: NaiveDate, end: NaiveDate, auth: &dyn AuthPredicate) -> bool {
        start < end && !self.overlaps(start, end) && auth.is_authenticated()
    }

    /// Nights between `start` and `end` times `per_day_rate`.
    ///
    /// Uses the day difference, so a stay from the 1st to the 4th costs
    /// three units even though four calendar days are blocked.
    pub fn price_estimate(start: NaiveDate, end: NaiveDate, per_day_rate: i64) -> i64 {
        end.signed_duration_since(start).num_days() * per_day_rate
    }
}

impl<R: Borrow<DateRange>> FromIterator<R> for DateRangeSet {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::from_ranges(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    fn signed_in() -> bool {
        true
    }

    fn signed_out() -> bool {
        false
    }

    #[test]
    fn single_range_expands_inclusively() {
        let set = DateRangeSet::from_ranges([range(day(1, 1), day(1, 3))]);
        assert_eq!(set.days().collect::<Vec<_>>(), vec![day(1, 1), day(1, 2), day(1, 3)]);
    }

    #[test]
    fn overlapping_ranges_collapse() {
        let forward = DateRangeSet::from_ranges([
            range(day(1, 1), day(1, 3)),
            range(day(1, 2), day(1, 5)),
        ]);
        let backward = DateRangeSet::from_ranges([
            range(day(1, 2), day(1, 5)),
            range(day(1, 1), day(1, 3)),
            range(day(1, 1), day(1, 3)),
        ]);
        assert_eq!(forward.len(), 5);
        assert_eq!(forward, backward);
    }

    #[test]
    fn single_day_range() {
        let set: DateRangeSet = [range(day(2, 29), day(2, 29))].iter().collect();
        assert_eq!(set.len(), 1);
        assert!(set.contains(day(2, 29)));
    }

    #[test]
    fn range_crosses_month_end() {
        let set = DateRangeSet::from_ranges([range(day(1, 30), day(2, 2))]);
        assert_eq!(set.len(), 4);
        assert!(set.contains(day(2, 1)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            DateRange::new(day(1, 5), day(1, 1)),
            Err(BookingError::InvertedRange {
                start: day(1, 5),
                end: day(1, 1)
            })
        );
    }

    #[test]
    fn bookable_when_clear_of_unavailable_days() {
        let set = DateRangeSet::from_ranges([range(day(1, 1), day(1, 3))]);
        assert!(set.is_bookable(day(1, 4), day(1, 6), &signed_in));
        assert!(!set.is_bookable(day(1, 2), day(1, 6), &signed_in));
    }

    #[test]
    fn stay_ending_on_first_unavailable_day_is_rejected() {
        let set = DateRangeSet::from_ranges([range(day(1, 10), day(1, 12))]);
        assert!(!set.is_bookable(day(1, 8), day(1, 10), &signed_in));
    }

    #[test]
    fn zero_night_stay_is_never_bookable() {
        let set = DateRangeSet::new();
        assert!(!set.is_bookable(day(3, 1), day(3, 1), &signed_in));
        assert!(!set.is_bookable(day(3, 2), day(3, 1), &signed_in));
    }

    #[test]
    fn signed_out_caller_cannot_book() {
        let set = DateRangeSet::new();
        assert!(!set.is_bookable(day(3, 1), day(3, 4), &signed_out));
    }

    #[test]
    fn price_uses_day_difference() {
        assert_eq!(DateRangeSet::price_estimate(day(1, 1), day(1, 4), 100), 300);
        assert_eq!(DateRangeSet::price_estimate(day(1, 1), day(1, 1), 100), 0);
    }

    #[test]
    fn overlaps_ignores_inverted_query() {
        let set = DateRangeSet::from_ranges([range(day(1, 1), day(1, 3))]);
        assert!(!set.overlaps(day(1, 3), day(1, 1)));
    }
}
