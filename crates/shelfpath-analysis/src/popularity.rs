//! Subject popularity over the whole log and per calendar month

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;
use shelfpath_stats::frequency::{FrequencyTable, Ranked};

use crate::{dataset::CirculationDataset, record::Subject, top_subjects};

/// A calendar month.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
#[display("{year:04}-{month:02}")]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

/// Checkout counts per subject, overall and by month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectPopularity {
    totals: FrequencyTable<Subject>,
    monthly: BTreeMap<YearMonth, FrequencyTable<Subject>>,
}

impl SubjectPopularity {
    /// Counts checkouts per subject.
    ///
    /// Overall counts include checkouts without a timestamp; monthly counts
    /// cannot and leave them out.
    #[must_use]
    pub fn from_dataset(dataset: &CirculationDataset) -> Self {
        let mut monthly = BTreeMap::<_, FrequencyTable<_>>::new();
        for record in dataset.checkouts() {
            if let Some(timestamp) = record.timestamp {
                let month = YearMonth {
                    year: timestamp.year(),
                    month: timestamp.month(),
                };
                monthly.entry(month).or_default().add(record.subject.clone());
            }
        }
        Self {
            totals: top_subjects::checkout_counts(dataset),
            monthly,
        }
    }

    #[must_use]
    pub fn totals(&self) -> &FrequencyTable<Subject> {
        &self.totals
    }

    /// Returns the `n` most checked-out subjects.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<Ranked<Subject>> {
        self.totals.most_common(n)
    }

    /// Iterates over months in calendar order with their subject counts.
    pub fn monthly(&self) -> impl Iterator<Item = (YearMonth, &FrequencyTable<Subject>)> {
        self.monthly.iter().map(|(month, counts)| (*month, counts))
    }

    #[must_use]
    pub fn month(&self, month: YearMonth) -> Option<&FrequencyTable<Subject>> {
        self.monthly.get(&month)
    }
}
