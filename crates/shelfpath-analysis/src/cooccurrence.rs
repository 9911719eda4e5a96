//! Pairwise subject co-occurrence across patrons
//!
//! Two distinct subjects co-occur for a patron when the patron checked out
//! both, at any time and in any order. For every patron the miner takes the
//! set of distinct subjects over all their checkouts and adds one to each
//! unordered pair in that set. How many times a patron borrowed either
//! subject does not matter, and patrons with fewer than two distinct subjects
//! contribute nothing.
//!
//! Order is irrelevant here, so checkouts without a timestamp are included.
//!
//! # Examples
//!
//! ```
//! use shelfpath_analysis::cooccurrence::{CooccurrenceCounts, SubjectPair};
//! # use shelfpath_analysis::{dataset::CirculationDataset, record::{CirculationRecord, TransactionKind::CheckOut}};
//! # let dataset = [("p1", "A"), ("p1", "B"), ("p2", "C"), ("p2", "B"), ("p2", "A")]
//! #     .into_iter()
//! #     .map(|(p, s)| CirculationRecord::new(p, None, CheckOut, s))
//! #     .collect::<CirculationDataset>();
//!
//! // p1 borrowed {A, B}; p2 borrowed {A, B, C}
//! let counts = CooccurrenceCounts::mine(&dataset);
//! assert_eq!(counts.get(&SubjectPair::new("A", "B").unwrap()), 2);
//! assert_eq!(counts.get(&SubjectPair::new("C", "A").unwrap()), 1);
//! assert_eq!(counts.get(&SubjectPair::new("B", "C").unwrap()), 1);
//! ```

use std::{collections::BTreeSet, fmt};

use serde::Serialize;
use shelfpath_stats::frequency::{FrequencyTable, Ranked};

use crate::{dataset::CirculationDataset, record::Subject};

/// An unordered pair of distinct subjects.
///
/// The pair is stored canonically with `first < second`, so `(A, B)` and
/// `(B, A)` are the same pair. Displays as `A & B`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SubjectPair {
    first: Subject,
    second: Subject,
}

impl SubjectPair {
    /// Creates the canonical pair of `a` and `b`.
    ///
    /// Returns `None` if both subjects are the same.
    #[must_use]
    pub fn new(a: impl Into<Subject>, b: impl Into<Subject>) -> Option<Self> {
        let (a, b) = (a.into(), b.into());
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                first: a,
                second: b,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                first: b,
                second: a,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[must_use]
    pub fn first(&self) -> &Subject {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &Subject {
        &self.second
    }
}

impl fmt::Display for SubjectPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {}", self.first, self.second)
    }
}

/// Number of patrons who checked out both subjects of each pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooccurrenceCounts {
    table: FrequencyTable<SubjectPair>,
    contributing_patrons: usize,
}

impl CooccurrenceCounts {
    /// Counts subject pairs once per patron over all checkout records.
    #[must_use]
    pub fn mine(dataset: &CirculationDataset) -> Self {
        let mut table = FrequencyTable::new();
        let mut contributing_patrons = 0;

        for records in dataset.checkouts_by_patron().values() {
            let distinct = records
                .iter()
                .map(|record| &record.subject)
                .collect::<BTreeSet<_>>();
            if distinct.len() < 2 {
                continue;
            }
            contributing_patrons += 1;

            // ascending iteration yields canonical pairs directly
            let distinct = distinct.into_iter().collect::<Vec<_>>();
            for (i, &first) in distinct.iter().enumerate() {
                for &second in &distinct[i + 1..] {
                    table.add(SubjectPair {
                        first: first.clone(),
                        second: second.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            pairs = table.len(),
            contributing_patrons,
            "mined subject co-occurrence"
        );
        Self {
            table,
            contributing_patrons,
        }
    }

    /// Returns the number of patrons who checked out both subjects of `pair`.
    #[must_use]
    pub fn get(&self, pair: &SubjectPair) -> u64 {
        self.table.get(pair)
    }

    /// Number of patrons with at least two distinct subjects.
    #[must_use]
    pub fn contributing_patrons(&self) -> usize {
        self.contributing_patrons
    }

    /// Number of distinct pairs observed.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.table.len()
    }

    /// Returns the `n` most frequent pairs, ties ordered by pair.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<Ranked<SubjectPair>> {
        self.table.most_common(n)
    }
}
