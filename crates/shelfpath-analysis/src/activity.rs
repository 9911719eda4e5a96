//! Circulation activity by weekday and hour
//!
//! [`ActivityGrid`] counts timed circulation events in a 7 × 24 grid of
//! weekday (Monday first) by hour of day. [`ActivityGrid::from_dataset`] counts
//! every transaction kind and answers when the library is busiest;
//! [`ActivityGrid::from_checkouts`] counts checkouts only.
//!
//! Ties in the busiest-slot queries resolve to the earliest weekday and hour.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::dataset::CirculationDataset;

/// Weekdays in grid row order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Hours in a day; grid column count.
pub const HOURS: usize = 24;

/// Event counts by weekday and hour of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityGrid {
    /// `counts[weekday][hour]`, weekday 0 = Monday
    counts: [[u64; HOURS]; 7],
}

impl Default for ActivityGrid {
    fn default() -> Self {
        Self {
            counts: [[0; HOURS]; 7],
        }
    }
}

impl ActivityGrid {
    /// Counts all timed records of `dataset`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::{NaiveDate, Weekday};
    /// # use shelfpath_analysis::{activity::ActivityGrid, dataset::CirculationDataset, record::{CirculationRecord, TransactionKind::*}};
    /// // 2024-01-01 was a Monday
    /// let at = |d, h| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(h, 30, 0);
    /// let dataset = CirculationDataset::new(vec![
    ///     CirculationRecord::new("p1", at(1, 10), CheckOut, "Physics"),
    ///     CirculationRecord::new("p2", at(8, 10), CheckIn, "Physics"),
    ///     CirculationRecord::new("p3", at(2, 15), CheckOut, "Chemistry"),
    /// ]);
    /// let grid = ActivityGrid::from_dataset(&dataset);
    /// assert_eq!(grid.get(Weekday::Mon, 10), 2);
    /// assert_eq!(grid.busiest_weekday(), Some((Weekday::Mon, 2)));
    /// assert_eq!(grid.peak(), Some((Weekday::Mon, 10, 2)));
    /// ```
    #[must_use]
    pub fn from_dataset(dataset: &CirculationDataset) -> Self {
        Self::from_timestamps(dataset.records().iter().filter_map(|r| r.timestamp))
    }

    /// Counts timed checkout records of `dataset`.
    #[must_use]
    pub fn from_checkouts(dataset: &CirculationDataset) -> Self {
        Self::from_timestamps(dataset.checkouts().filter_map(|r| r.timestamp))
    }

    fn from_timestamps<I>(timestamps: I) -> Self
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        let mut grid = Self::default();
        for timestamp in timestamps {
            grid.counts[weekday_index(timestamp.weekday())][timestamp.hour() as usize] += 1;
        }
        grid
    }

    /// Returns the number of events on `weekday` during `hour` (0–23).
    ///
    /// Hours outside 0–23 have no events.
    #[must_use]
    pub fn get(&self, weekday: Weekday, hour: u32) -> u64 {
        self.counts[weekday_index(weekday)]
            .get(hour as usize)
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Returns the event count of each weekday, Monday first.
    #[must_use]
    pub fn weekday_totals(&self) -> [u64; 7] {
        self.counts.map(|hours| hours.iter().sum())
    }

    /// Returns the event count of each hour of day across all weekdays.
    #[must_use]
    pub fn hour_totals(&self) -> [u64; HOURS] {
        let mut totals = [0; HOURS];
        for hours in &self.counts {
            for (total, count) in totals.iter_mut().zip(hours) {
                *total += count;
            }
        }
        totals
    }

    /// Returns the weekday with the most events and its count.
    #[must_use]
    pub fn busiest_weekday(&self) -> Option<(Weekday, u64)> {
        first_max(WEEKDAYS.into_iter().zip(self.weekday_totals()))
    }

    /// Returns the hour of day with the most events and its count.
    #[must_use]
    pub fn busiest_hour(&self) -> Option<(u32, u64)> {
        first_max((0..).zip(self.hour_totals()))
    }

    /// Returns the single busiest weekday/hour slot and its count.
    #[must_use]
    pub fn peak(&self) -> Option<(Weekday, u32, u64)> {
        let slots = WEEKDAYS.into_iter().zip(&self.counts).flat_map(|(day, hours)| {
            (0..)
                .zip(hours.iter().copied())
                .map(move |(hour, count)| ((day, hour), count))
        });
        first_max(slots).map(|((day, hour), count)| (day, hour, count))
    }
}

/// Grid row of `weekday`.
pub(crate) fn weekday_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

/// Returns the first item with the largest non-zero count.
pub(crate) fn first_max<T, I>(items: I) -> Option<(T, u64)>
where
    I: IntoIterator<Item = (T, u64)>,
{
    let mut best: Option<(T, u64)> = None;
    for (item, count) in items {
        if count > best.as_ref().map_or(0, |(_, c)| *c) {
            best = Some((item, count));
        }
    }
    best
}
