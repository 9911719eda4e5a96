//! Frequent three-step reading paths
//!
//! A reading path is three subjects one patron checked out back to back. A
//! sequence of length `L` contributes its `L - 2` contiguous windows (none if
//! `L < 3`). All subjects are eligible; paths are not restricted to the Top-K
//! alphabet.
//!
//! Paths are ranked by how often they occur across all patrons. Paths with
//! equal counts rank lexicographically by their subjects, so the ranking does
//! not depend on the order patrons are visited in.

use std::fmt;

use serde::Serialize;
use shelfpath_stats::frequency::{FrequencyTable, Ranked};

use crate::{record::Subject, sequence::SequenceSet};

/// Three subjects checked out consecutively by one patron.
///
/// Displays as `A → B → C`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReadingPath([Subject; 3]);

impl ReadingPath {
    #[must_use]
    pub fn new(
        first: impl Into<Subject>,
        second: impl Into<Subject>,
        third: impl Into<Subject>,
    ) -> Self {
        Self([first.into(), second.into(), third.into()])
    }

    #[must_use]
    pub fn subjects(&self) -> &[Subject; 3] {
        &self.0
    }

    /// Iterates over the contiguous paths of `subjects`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shelfpath_analysis::{path::ReadingPath, record::Subject};
    /// let sequence = ["A", "B", "C", "D"].map(Subject::from);
    /// let paths = ReadingPath::windows(&sequence).collect::<Vec<_>>();
    /// assert_eq!(paths, [ReadingPath::new("A", "B", "C"), ReadingPath::new("B", "C", "D")]);
    /// ```
    pub fn windows(subjects: &[Subject]) -> impl Iterator<Item = Self> + '_ {
        subjects
            .windows(3)
            .map(|w| Self([w[0].clone(), w[1].clone(), w[2].clone()]))
    }
}

impl fmt::Display for ReadingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second, third] = &self.0;
        write!(f, "{first} → {second} → {third}")
    }
}

/// Occurrence counts of every reading path in a set of sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingPathCounts {
    table: FrequencyTable<ReadingPath>,
}

impl ReadingPathCounts {
    /// Counts every contiguous three-subject window of every sequence.
    #[must_use]
    pub fn mine(sequences: &SequenceSet) -> Self {
        let table = sequences
            .iter()
            .flat_map(|sequence| ReadingPath::windows(&sequence.subjects))
            .collect::<FrequencyTable<_>>();
        tracing::debug!(
            distinct = table.len(),
            total = table.total(),
            "mined reading paths"
        );
        Self { table }
    }

    /// Returns how often `path` occurred.
    #[must_use]
    pub fn get(&self, path: &ReadingPath) -> u64 {
        self.table.get(path)
    }

    /// Number of path occurrences across all sequences.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.table.total()
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.table.len()
    }

    /// Returns the `n` most frequent paths.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<Ranked<ReadingPath>> {
        self.table.most_common(n)
    }
}
