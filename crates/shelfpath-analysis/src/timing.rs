//! When each subject is checked out
//!
//! [`SubjectTiming`] breaks timed checkouts down per subject by weekday, by
//! hour of day and by ISO week, and keeps a checkout-only weekday × hour grid
//! alongside. Checkouts without a timestamp are left out of every breakdown.
//!
//! # Examples
//!
//! ```
//! use chrono::Weekday;
//! use shelfpath_analysis::timing::SubjectTiming;
//! # use chrono::NaiveDate;
//! # use shelfpath_analysis::{dataset::CirculationDataset, record::{CirculationRecord, TransactionKind::CheckOut}};
//! # let at = |d, h| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(h, 0, 0);
//! # let dataset = [(1, 10, "Physics"), (8, 10, "Physics"), (3, 15, "Physics"), (3, 15, "Chemistry")]
//! #     .into_iter()
//! #     .map(|(d, h, s)| CirculationRecord::new("p", at(d, h), CheckOut, s))
//! #     .collect::<CirculationDataset>();
//!
//! // Physics: two Monday checkouts at 10:00, one Wednesday checkout at 15:00
//! let timing = SubjectTiming::from_dataset(&dataset);
//! assert_eq!(timing.busiest_weekday("Physics"), Some((Weekday::Mon, 2)));
//! assert_eq!(timing.busiest_hour("Chemistry"), Some((15, 1)));
//! assert_eq!(timing.busiest_hour("Biology"), None);
//! ```

use std::collections::BTreeMap;

use chrono::{Datelike, Timelike, Weekday};
use shelfpath_stats::frequency::FrequencyTable;

use crate::{
    activity::{self, ActivityGrid, HOURS, WEEKDAYS},
    dataset::CirculationDataset,
    record::Subject,
};

/// An ISO 8601 week.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, derive_more::Display,
)]
#[display("{year:04}-W{week:02}")]
pub struct YearWeek {
    /// ISO week-numbering year
    pub year: i32,
    /// 1-based week of the year
    pub week: u32,
}

/// Per-subject checkout counts by weekday, hour and week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectTiming {
    by_weekday: BTreeMap<Subject, [u64; 7]>,
    by_hour: BTreeMap<Subject, [u64; HOURS]>,
    by_week: BTreeMap<YearWeek, FrequencyTable<Subject>>,
    checkouts: ActivityGrid,
}

impl SubjectTiming {
    #[must_use]
    pub fn from_dataset(dataset: &CirculationDataset) -> Self {
        let mut by_weekday = BTreeMap::<_, [u64; 7]>::new();
        let mut by_hour = BTreeMap::<_, [u64; HOURS]>::new();
        let mut by_week = BTreeMap::<_, FrequencyTable<_>>::new();

        for record in dataset.checkouts() {
            let Some(timestamp) = record.timestamp else {
                continue;
            };
            let subject = &record.subject;
            by_weekday.entry(subject.clone()).or_default()
                [activity::weekday_index(timestamp.weekday())] += 1;
            by_hour.entry(subject.clone()).or_insert([0; HOURS])[timestamp.hour() as usize] += 1;

            let iso = timestamp.iso_week();
            let week = YearWeek {
                year: iso.year(),
                week: iso.week(),
            };
            by_week.entry(week).or_default().add(subject.clone());
        }

        tracing::debug!(
            subjects = by_weekday.len(),
            weeks = by_week.len(),
            "collected subject timing"
        );
        Self {
            by_weekday,
            by_hour,
            by_week,
            checkouts: ActivityGrid::from_checkouts(dataset),
        }
    }

    /// Iterates over subjects with timed checkouts, in name order.
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.by_weekday.keys()
    }

    /// Returns the checkouts of `subject` per weekday, Monday first.
    #[must_use]
    pub fn weekday_counts(&self, subject: &str) -> [u64; 7] {
        self.by_weekday.get(subject).copied().unwrap_or_default()
    }

    /// Returns the checkouts of `subject` per hour of day.
    #[must_use]
    pub fn hour_counts(&self, subject: &str) -> [u64; HOURS] {
        self.by_hour.get(subject).copied().unwrap_or([0; HOURS])
    }

    /// Returns the weekday `subject` is checked out most, ties to the earliest.
    #[must_use]
    pub fn busiest_weekday(&self, subject: &str) -> Option<(Weekday, u64)> {
        activity::first_max(WEEKDAYS.into_iter().zip(self.weekday_counts(subject)))
    }

    /// Returns the hour `subject` is checked out most, ties to the earliest.
    #[must_use]
    pub fn busiest_hour(&self, subject: &str) -> Option<(u32, u64)> {
        activity::first_max((0..).zip(self.hour_counts(subject)))
    }

    /// Iterates over ISO weeks in calendar order with their subject counts.
    pub fn weekly(&self) -> impl Iterator<Item = (YearWeek, &FrequencyTable<Subject>)> {
        self.by_week.iter().map(|(week, counts)| (*week, counts))
    }

    /// Weekday × hour grid of checkouts.
    #[must_use]
    pub fn checkout_grid(&self) -> &ActivityGrid {
        &self.checkouts
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        fixtures::at,
        record::{CirculationRecord, TransactionKind},
    };

    fn checkout(day: u32, hour: u32, subject: &str) -> CirculationRecord {
        CirculationRecord::new("p", Some(at(day, hour)), TransactionKind::CheckOut, subject)
    }

    fn sample() -> CirculationDataset {
        // January 2024 starts on a Monday
        CirculationDataset::new(vec![
            checkout(1, 10, "Physics"),
            checkout(2, 10, "Physics"),
            checkout(9, 14, "Physics"),
            checkout(9, 14, "Mathematics"),
            checkout(10, 9, "Mathematics"),
            CirculationRecord::new("p", Some(at(1, 10)), TransactionKind::CheckIn, "Chemistry"),
            CirculationRecord::new("p", None, TransactionKind::CheckOut, "Chemistry"),
        ])
    }

    #[test]
    fn test_weekday_and_hour_breakdowns() {
        let timing = SubjectTiming::from_dataset(&sample());
        assert_eq!(timing.weekday_counts("Physics"), [1, 2, 0, 0, 0, 0, 0]);
        assert_eq!(timing.weekday_counts("Mathematics"), [0, 1, 1, 0, 0, 0, 0]);
        assert_eq!(timing.hour_counts("Physics")[10], 2);
        assert_eq!(timing.hour_counts("Physics")[14], 1);
        assert_eq!(timing.busiest_weekday("Physics"), Some((Weekday::Tue, 2)));
        // Tuesday and Wednesday tie; the earlier day wins
        assert_eq!(timing.busiest_weekday("Mathematics"), Some((Weekday::Tue, 1)));
        assert_eq!(timing.busiest_hour("Mathematics"), Some((9, 1)));
    }

    #[test]
    fn test_checkins_and_untimed_are_excluded() {
        let timing = SubjectTiming::from_dataset(&sample());
        let subjects = timing.subjects().map(Subject::as_str).collect::<Vec<_>>();
        assert_eq!(subjects, ["Mathematics", "Physics"]);
        assert_eq!(timing.weekday_counts("Chemistry"), [0; 7]);
        assert_eq!(timing.busiest_hour("Chemistry"), None);
        assert_eq!(timing.checkout_grid().total(), 5);
        assert_eq!(timing.checkout_grid().get(Weekday::Mon, 10), 1);
    }

    #[test]
    fn test_iso_weeks() {
        let mut records = sample().records().to_vec();
        // a Sunday, counted in the last ISO week of 2023
        let sunday = NaiveDate::from_ymd_opt(2023, 12, 31).and_then(|d| d.and_hms_opt(12, 0, 0));
        records.push(CirculationRecord::new(
            "p",
            sunday,
            TransactionKind::CheckOut,
            "Physics",
        ));
        let timing = SubjectTiming::from_dataset(&CirculationDataset::new(records));

        let weeks = timing
            .weekly()
            .map(|(week, counts)| (week.to_string(), counts.total()))
            .collect::<Vec<_>>();
        assert_eq!(
            weeks,
            [
                ("2023-W52".to_owned(), 1),
                ("2024-W01".to_owned(), 2),
                ("2024-W02".to_owned(), 3),
            ]
        );
    }

    #[test]
    fn test_empty_dataset() {
        let timing = SubjectTiming::from_dataset(&CirculationDataset::default());
        assert_eq!(timing.subjects().count(), 0);
        assert_eq!(timing.weekly().count(), 0);
        assert_eq!(timing.checkout_grid().peak(), None);
    }
}
