//! Selection of the most checked-out subjects
//!
//! Transition analysis is restricted to a small alphabet: the K subjects with
//! the highest global checkout counts. Counts cover every checkout record,
//! including ones without a timestamp. Subjects with equal counts rank by name.

use serde::Serialize;
use shelfpath_stats::frequency::{FrequencyTable, Ranked};

use crate::{dataset::CirculationDataset, record::Subject};

/// Counts checkouts per subject over the whole dataset.
#[must_use]
pub fn checkout_counts(dataset: &CirculationDataset) -> FrequencyTable<Subject> {
    dataset.checkouts().map(|r| r.subject.clone()).collect()
}

/// The K most checked-out subjects with their checkout counts, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TopKSubjects {
    entries: Vec<Ranked<Subject>>,
}

impl TopKSubjects {
    /// Selects the `k` most checked-out subjects of `dataset`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shelfpath_analysis::{dataset::CirculationDataset, record::{CirculationRecord, TransactionKind::*}, top_subjects::TopKSubjects};
    /// let dataset = ["Physics", "Chemistry", "Physics", "Biology", "Chemistry"]
    ///     .into_iter()
    ///     .map(|s| CirculationRecord::new("p1", None, CheckOut, s))
    ///     .collect::<CirculationDataset>();
    /// let top = TopKSubjects::select(&dataset, 2);
    /// let names = top.subjects().map(|s| s.as_str()).collect::<Vec<_>>();
    /// assert_eq!(names, ["Chemistry", "Physics"]);
    /// ```
    #[must_use]
    pub fn select(dataset: &CirculationDataset, k: usize) -> Self {
        Self::from_counts(&checkout_counts(dataset), k)
    }

    /// Selects the `k` highest entries of precomputed checkout counts.
    #[must_use]
    pub fn from_counts(counts: &FrequencyTable<Subject>, k: usize) -> Self {
        Self {
            entries: counts.most_common(k),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Ranked<Subject>] {
        &self.entries
    }

    /// Iterates over the selected subjects, most frequent first.
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.entries.iter().map(|entry| &entry.key)
    }

    #[must_use]
    pub fn contains(&self, subject: &str) -> bool {
        self.entries.iter().any(|entry| entry.key.as_str() == subject)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CirculationRecord, TransactionKind};

    fn dataset(rows: &[(&str, TransactionKind, &str)]) -> CirculationDataset {
        rows.iter()
            .map(|&(patron, kind, subject)| CirculationRecord::new(patron, None, kind, subject))
            .collect()
    }

    fn names(top: &TopKSubjects) -> Vec<(&str, u64)> {
        top.entries()
            .iter()
            .map(|e| (e.key.as_str(), e.count))
            .collect()
    }

    #[test]
    fn test_counts_checkouts_only() {
        use TransactionKind::*;
        let dataset = dataset(&[
            ("p1", CheckOut, "A"),
            ("p1", CheckIn, "B"),
            ("p2", CheckIn, "B"),
            ("p2", CheckOut, "C"),
            ("p3", CheckOut, "C"),
            ("p3", Other, "B"),
        ]);
        let top = TopKSubjects::select(&dataset, 8);
        assert_eq!(names(&top), [("C", 2), ("A", 1)]);
        assert!(!top.contains("B"));
    }

    #[test]
    fn test_ties_break_by_name() {
        use TransactionKind::CheckOut;
        let dataset = dataset(&[
            ("p1", CheckOut, "Zoology"),
            ("p1", CheckOut, "Botany"),
            ("p2", CheckOut, "Algebra"),
            ("p2", CheckOut, "Zoology"),
            ("p3", CheckOut, "Botany"),
            ("p3", CheckOut, "Algebra"),
            ("p3", CheckOut, "Optics"),
        ]);
        let top = TopKSubjects::select(&dataset, 3);
        assert_eq!(names(&top), [("Algebra", 2), ("Botany", 2), ("Zoology", 2)]);
    }

    #[test]
    fn test_k_bounds() {
        use TransactionKind::CheckOut;
        let dataset = dataset(&[("p1", CheckOut, "A"), ("p1", CheckOut, "B")]);
        assert!(TopKSubjects::select(&dataset, 0).is_empty());
        assert_eq!(TopKSubjects::select(&dataset, 10).len(), 2);
        assert!(TopKSubjects::select(&CirculationDataset::default(), 8).is_empty());
    }

    #[test]
    fn test_untimed_checkouts_count() {
        use TransactionKind::CheckOut;
        let dataset = dataset(&[("p1", CheckOut, "A"), ("p2", CheckOut, "A")]);
        let counts = checkout_counts(&dataset);
        assert_eq!(counts.get("A"), 2);
    }
}
