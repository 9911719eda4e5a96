//! Per-patron reading sequences
//!
//! A [`PatronSequence`] is the time-ordered list of subjects one patron checked
//! out. [`SequenceSet::build`] reconstructs one sequence per patron:
//!
//! 1. keep checkout records only
//! 2. group them by patron
//! 3. sort each group by timestamp, ascending
//! 4. project each record to its subject
//!
//! # Untimed Records
//!
//! Records without a timestamp cannot be placed in a sequence. They are left
//! out and tallied in [`SequenceSet::skipped_untimed`]; analyses that do not
//! depend on order (subject counts, co-occurrence) still see them through the
//! dataset.
//!
//! # Ties
//!
//! Checkouts sharing a timestamp are ordered by subject name. This makes the
//! sequences independent of input record order.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    dataset::CirculationDataset,
    record::{PatronId, Subject},
};

/// Subjects one patron checked out, in checkout order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatronSequence {
    pub patron_id: PatronId,
    pub subjects: Vec<Subject>,
}

impl PatronSequence {
    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

/// All patron sequences of a dataset, ordered by patron id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SequenceSet {
    sequences: Vec<PatronSequence>,
    skipped_untimed: usize,
}

impl SequenceSet {
    /// Builds one sequence per patron with at least one timed checkout.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::NaiveDate;
    /// # use shelfpath_analysis::{dataset::CirculationDataset, record::{CirculationRecord, Subject, TransactionKind::*}, sequence::SequenceSet};
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap().and_hms_opt(9, 0, 0);
    /// let dataset = CirculationDataset::new(vec![
    ///     CirculationRecord::new("p1", day(2), CheckOut, "Mathematics"),
    ///     CirculationRecord::new("p1", day(1), CheckOut, "Physics"),
    ///     CirculationRecord::new("p1", day(3), CheckIn, "Physics"),
    ///     CirculationRecord::new("p1", None, CheckOut, "Chemistry"),
    /// ]);
    /// let sequences = SequenceSet::build(&dataset);
    /// let p1 = sequences.get(&"p1".into()).unwrap();
    /// assert_eq!(p1.subjects, [Subject::from("Physics"), Subject::from("Mathematics")]);
    /// assert_eq!(sequences.skipped_untimed(), 1);
    /// ```
    #[must_use]
    pub fn build(dataset: &CirculationDataset) -> Self {
        let mut timed = BTreeMap::<&PatronId, Vec<(NaiveDateTime, &Subject)>>::new();
        let mut skipped_untimed = 0;

        for record in dataset.checkouts() {
            match record.timestamp {
                Some(timestamp) => timed
                    .entry(&record.patron_id)
                    .or_default()
                    .push((timestamp, &record.subject)),
                None => {
                    tracing::debug!(
                        patron = %record.patron_id,
                        "checkout without timestamp left out of sequences"
                    );
                    skipped_untimed += 1;
                }
            }
        }

        let sequences = timed
            .into_iter()
            .map(|(patron_id, mut events)| {
                events.sort_unstable();
                PatronSequence {
                    patron_id: patron_id.clone(),
                    subjects: events
                        .into_iter()
                        .map(|(_, subject)| subject.clone())
                        .collect(),
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            patrons = sequences.len(),
            skipped_untimed,
            "built patron sequences"
        );
        Self {
            sequences,
            skipped_untimed,
        }
    }

    /// Returns the sequence of `patron_id`, if the patron has timed checkouts.
    #[must_use]
    pub fn get(&self, patron_id: &PatronId) -> Option<&PatronSequence> {
        self.sequences
            .binary_search_by(|s| s.patron_id.cmp(patron_id))
            .ok()
            .map(|i| &self.sequences[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatronSequence> {
        self.sequences.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Number of checkout records left out for lack of a timestamp.
    #[must_use]
    pub fn skipped_untimed(&self) -> usize {
        self.skipped_untimed
    }

    /// Number of sequences with at least `min_len` subjects.
    #[must_use]
    pub fn count_at_least(&self, min_len: usize) -> usize {
        self.sequences.iter().filter(|s| s.len() >= min_len).count()
    }

    /// Length of the longest sequence, or 0 if there are none.
    #[must_use]
    pub fn longest(&self) -> usize {
        self.sequences.iter().map(PatronSequence::len).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a SequenceSet {
    type Item = &'a PatronSequence;
    type IntoIter = std::slice::Iter<'a, PatronSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}
