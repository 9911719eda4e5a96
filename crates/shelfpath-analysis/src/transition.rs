//! First-order subject transitions
//!
//! A transition is one patron checking out subject `to` immediately after
//! subject `from`. [`TransitionMatrix::count`] scans every patron sequence for
//! adjacent pairs and counts those where both subjects belong to the Top-K
//! alphabet. Pairs touching any other subject are skipped; they are not folded
//! into a catch-all row or column.
//!
//! [`ProbabilityMatrix`] row-normalizes the counts: cell `(from, to)` is the
//! share of `from`'s counted transitions that went to `to`. A subject with no
//! counted outgoing transitions has an all-zero row.
//!
//! # Examples
//!
//! ```
//! use shelfpath_analysis::{
//!     dataset::CirculationDataset, sequence::SequenceSet, top_subjects::TopKSubjects,
//!     transition::{ProbabilityMatrix, TransitionMatrix},
//! };
//! # use shelfpath_analysis::record::{CirculationRecord, TransactionKind::CheckOut};
//! # use chrono::NaiveDate;
//! # let dataset = ["CS", "Math", "CS", "Physics"]
//! #     .into_iter()
//! #     .zip(1..)
//! #     .map(|(s, d)| {
//! #         let ts = NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(9, 0, 0);
//! #         CirculationRecord::new("p1", ts, CheckOut, s)
//! #     })
//! #     .collect::<CirculationDataset>();
//!
//! // p1 checked out CS, Math, CS, Physics in that order
//! let sequences = SequenceSet::build(&dataset);
//! let top = TopKSubjects::select(&dataset, 3);
//! let counts = TransitionMatrix::count(&sequences, &top);
//! assert_eq!(counts.get("CS", "Math"), 1);
//! assert_eq!(counts.get("Math", "CS"), 1);
//! assert_eq!(counts.get("CS", "Physics"), 1);
//!
//! let probs = ProbabilityMatrix::from_counts(&counts);
//! assert_eq!(probs.get("CS", "Math"), 0.5);
//! assert_eq!(probs.get("Math", "CS"), 1.0);
//! ```

use std::collections::HashMap;

use serde::Serialize;
use shelfpath_stats::matrix::LabeledMatrix;

use crate::{record::Subject, sequence::SequenceSet, top_subjects::TopKSubjects};

/// Counts of transitions between Top-K subjects.
///
/// Rows and columns follow the Top-K order (most checked-out first).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransitionMatrix {
    matrix: LabeledMatrix<Subject, u64>,
}

impl TransitionMatrix {
    /// Counts adjacent Top-K pairs across all sequences.
    #[must_use]
    pub fn count(sequences: &SequenceSet, top: &TopKSubjects) -> Self {
        let labels = top.subjects().cloned().collect::<Vec<_>>();
        let mut matrix = LabeledMatrix::filled(labels, 0);

        let index = top
            .subjects()
            .enumerate()
            .map(|(i, subject)| (subject.as_str(), i))
            .collect::<HashMap<_, _>>();

        let mut counted = 0_u64;
        let mut skipped = 0_u64;
        for sequence in sequences {
            for pair in sequence.subjects.windows(2) {
                let from = index.get(pair[0].as_str());
                let to = index.get(pair[1].as_str());
                if let (Some(&i), Some(&j)) = (from, to) {
                    *matrix.cell_mut(i, j) += 1;
                    counted += 1;
                } else {
                    skipped += 1;
                }
            }
        }
        tracing::debug!(counted, skipped, "counted subject transitions");

        Self { matrix }
    }

    /// Returns the number of transitions from `from` to `to`.
    ///
    /// Subjects outside the Top-K alphabet have no cells and yield 0.
    #[must_use]
    pub fn get(&self, from: &str, to: &str) -> u64 {
        self.matrix.get(from, to).copied().unwrap_or(0)
    }

    /// Returns the Top-K subjects in row order.
    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        self.matrix.labels()
    }

    /// Returns the total number of counted transitions leaving `from`.
    #[must_use]
    pub fn row_total(&self, from: &str) -> u64 {
        self.matrix.row(from).map_or(0, |row| row.iter().sum())
    }

    /// Returns the most frequent destination of `from` and its count.
    ///
    /// Returns `None` when `from` has no counted transitions. Ties resolve to
    /// the destination that comes first in Top-K order.
    #[must_use]
    pub fn top_destination(&self, from: &str) -> Option<(&Subject, u64)> {
        let row = self.matrix.row(from)?;
        let (j, &count) = row
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, count)| **count)?;
        (count > 0).then(|| (&self.matrix.labels()[j], count))
    }

    #[must_use]
    pub fn matrix(&self) -> &LabeledMatrix<Subject, u64> {
        &self.matrix
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }
}

/// Row-normalized transition probabilities between Top-K subjects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProbabilityMatrix {
    matrix: LabeledMatrix<Subject, f64>,
}

impl ProbabilityMatrix {
    #[must_use]
    pub fn from_counts(counts: &TransitionMatrix) -> Self {
        Self {
            matrix: counts.matrix.row_normalized(),
        }
    }

    /// Returns the probability of moving from `from` to `to`.
    ///
    /// Subjects outside the Top-K alphabet yield 0.0.
    #[must_use]
    pub fn get(&self, from: &str, to: &str) -> f64 {
        self.matrix.get(from, to).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        self.matrix.labels()
    }

    #[must_use]
    pub fn matrix(&self) -> &LabeledMatrix<Subject, f64> {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{dataset::CirculationDataset, fixtures::journeys};

    fn analyze(dataset: &CirculationDataset, k: usize) -> (TransitionMatrix, TopKSubjects) {
        let sequences = SequenceSet::build(dataset);
        let top = TopKSubjects::select(dataset, k);
        (TransitionMatrix::count(&sequences, &top), top)
    }

    #[test]
    fn test_single_patron_scenario() {
        let dataset = journeys(&[("p1", &["CS", "Math", "CS", "Physics"])]);
        let (counts, top) = analyze(&dataset, 3);
        assert_eq!(top.len(), 3);

        let subjects = ["CS", "Math", "Physics"];
        for from in subjects {
            for to in subjects {
                let expected = match (from, to) {
                    ("CS", "Math") | ("Math", "CS") | ("CS", "Physics") => 1,
                    _ => 0,
                };
                assert_eq!(counts.get(from, to), expected, "{from} -> {to}");
            }
        }

        let probs = ProbabilityMatrix::from_counts(&counts);
        assert!((probs.get("CS", "Math") - 0.5).abs() < 1e-12);
        assert!((probs.get("CS", "Physics") - 0.5).abs() < 1e-12);
        assert!(probs.get("CS", "CS").abs() < f64::EPSILON);
        assert!((probs.get("Math", "CS") - 1.0).abs() < 1e-12);
        assert!(probs.get("Math", "Physics").abs() < f64::EPSILON);
        // Physics has no outgoing transition
        for to in subjects {
            assert!(probs.get("Physics", to).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_pairs_outside_top_k_are_skipped() {
        // D is the least frequent subject and falls outside the top 2
        let dataset = journeys(&[
            ("p1", &["A", "D", "B", "A"]),
            ("p2", &["B", "A", "B"]),
        ]);
        let (counts, top) = analyze(&dataset, 2);
        assert!(!top.contains("D"));
        assert_eq!(counts.get("A", "D"), 0);
        assert_eq!(counts.get("D", "B"), 0);
        // B -> A happens in p1 and p2; A -> B only in p2
        assert_eq!(counts.get("B", "A"), 2);
        assert_eq!(counts.get("A", "B"), 1);
        assert_eq!(counts.row_total("A"), 1);
        assert_eq!(counts.row_total("D"), 0);
    }

    #[test]
    fn test_short_sequences_contribute_nothing() {
        let dataset = journeys(&[("p1", &["A"]), ("p2", &["B"])]);
        let (counts, _) = analyze(&dataset, 8);
        assert_eq!(counts.len(), 2);
        assert!(counts.matrix().row_totals().iter().all(|&t| t == 0));
        assert_eq!(counts.top_destination("A"), None);
    }

    #[test]
    fn test_empty_inputs() {
        let (counts, top) = analyze(&CirculationDataset::default(), 8);
        assert!(top.is_empty());
        assert!(counts.is_empty());
        let probs = ProbabilityMatrix::from_counts(&counts);
        assert!(probs.subjects().is_empty());
        assert!(probs.get("A", "B").abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_k() {
        let dataset = journeys(&[("p1", &["A", "B", "A"])]);
        let (counts, _) = analyze(&dataset, 0);
        assert!(counts.is_empty());
        assert_eq!(counts.get("A", "B"), 0);
    }

    #[test]
    fn test_top_destination_ties_follow_top_k_order() {
        let dataset = journeys(&[("p1", &["A", "B", "A", "C", "A", "A"])]);
        let (counts, top) = analyze(&dataset, 3);
        // A: 4 checkouts, then B and C tie at 1 and order by name
        assert_eq!(top.subjects().map(Subject::as_str).collect::<Vec<_>>(), ["A", "B", "C"]);
        // A -> B, A -> C and A -> A are all 1; A comes first in Top-K order
        assert_eq!(counts.top_destination("A").map(|(s, n)| (s.as_str(), n)), Some(("A", 1)));
        assert_eq!(counts.top_destination("B").map(|(s, n)| (s.as_str(), n)), Some(("A", 1)));
    }

    #[test]
    fn test_serializes_with_labels() {
        let dataset = journeys(&[("p1", &["A", "B"])]);
        let (counts, _) = analyze(&dataset, 2);
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["labels"], serde_json::json!(["A", "B"]));
        assert_eq!(json["rows"], serde_json::json!([[0, 1], [0, 0]]));
    }

    fn subject_sequences() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
        let subject = prop::sample::select(vec!["A", "B", "C", "D", "E"]);
        prop::collection::vec(prop::collection::vec(subject, 0..12), 0..8)
    }

    proptest! {
        #[test]
        fn test_probability_rows_sum_to_one_or_zero(seqs in subject_sequences(), k in 0_usize..6) {
            let patrons = seqs
                .iter()
                .enumerate()
                .map(|(i, s)| (format!("p{i}"), s.as_slice()))
                .collect::<Vec<_>>();
            let patrons = patrons.iter().map(|(p, s)| (p.as_str(), *s)).collect::<Vec<_>>();
            let (counts, _) = analyze(&journeys(&patrons), k);
            let probs = ProbabilityMatrix::from_counts(&counts);
            for (_, row) in probs.matrix().rows() {
                let sum = row.iter().sum::<f64>();
                prop_assert!(sum == 0.0 || (sum - 1.0).abs() < 1e-9, "row sum {}", sum);
            }
        }

        #[test]
        fn test_row_total_matches_followed_by_top_k(seqs in subject_sequences(), k in 0_usize..6) {
            let patrons = seqs
                .iter()
                .enumerate()
                .map(|(i, s)| (format!("p{i}"), s.as_slice()))
                .collect::<Vec<_>>();
            let patrons = patrons.iter().map(|(p, s)| (p.as_str(), *s)).collect::<Vec<_>>();
            let dataset = journeys(&patrons);
            let (counts, top) = analyze(&dataset, k);
            for subject in top.subjects() {
                let expected = seqs
                    .iter()
                    .flat_map(|s| s.windows(2))
                    .filter(|w| w[0] == subject.as_str() && top.contains(w[1]))
                    .count();
                prop_assert_eq!(counts.row_total(subject.as_str()), expected as u64);
            }
        }
    }
}
