//! Reading-journey analysis pipeline
//!
//! [`ReadingJourneyReport::analyze`] runs every order-based analysis of this
//! crate over one dataset:
//!
//! 1. reconstruct patron sequences ([`SequenceSet`])
//! 2. select the Top-K subjects ([`TopKSubjects`])
//! 3. count transitions between them ([`TransitionMatrix`])
//! 4. normalize rows into probabilities ([`ProbabilityMatrix`])
//! 5. mine three-step reading paths ([`ReadingPathCounts`])
//! 6. mine subject co-occurrence ([`CooccurrenceCounts`])
//!
//! The report is a plain value. It can be serialized as a whole and carries
//! the dataset fingerprint, so equal fingerprints and configurations always
//! produce equal reports.

use serde::Serialize;
use shelfpath_stats::frequency::Ranked;

use crate::{
    config::AnalysisConfig,
    cooccurrence::{CooccurrenceCounts, SubjectPair},
    dataset::CirculationDataset,
    path::{ReadingPath, ReadingPathCounts},
    sequence::SequenceSet,
    top_subjects::TopKSubjects,
    transition::{ProbabilityMatrix, TransitionMatrix},
};

/// Sequence length statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SequenceSummary {
    /// Patrons with at least one timed checkout
    pub patrons: usize,
    /// Patrons contributing at least one transition
    pub with_transitions: usize,
    /// Patrons contributing at least one reading path
    pub with_paths: usize,
    pub longest: usize,
}

impl SequenceSummary {
    #[must_use]
    pub fn from_sequences(sequences: &SequenceSet) -> Self {
        Self {
            patrons: sequences.len(),
            with_transitions: sequences.count_at_least(2),
            with_paths: sequences.count_at_least(3),
            longest: sequences.longest(),
        }
    }
}

/// Results of a reading-journey analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingJourneyReport {
    /// Hex SHA-256 fingerprint of the analyzed dataset
    pub fingerprint: String,
    pub config: AnalysisConfig,
    pub record_count: usize,
    /// Records of any kind without a timestamp
    pub untimed_records: usize,
    pub checkout_count: usize,
    /// Patrons with at least one checkout, timed or not
    pub patron_count: usize,
    /// Checkouts left out of sequences for lack of a timestamp
    pub skipped_untimed: usize,
    pub sequences: SequenceSummary,
    pub top_subjects: TopKSubjects,
    pub transitions: TransitionMatrix,
    pub probabilities: ProbabilityMatrix,
    pub top_paths: Vec<Ranked<ReadingPath>>,
    /// Patrons who checked out at least two distinct subjects
    pub cooccurring_patrons: usize,
    pub top_pairs: Vec<Ranked<SubjectPair>>,
}

impl ReadingJourneyReport {
    /// Analyzes `dataset` with the limits of `config`.
    ///
    /// The analysis is total: an empty dataset yields an empty report, and a
    /// zero limit yields an empty section.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::NaiveDate;
    /// # use shelfpath_analysis::{config::AnalysisConfig, dataset::CirculationDataset, journey::ReadingJourneyReport, record::{CirculationRecord, TransactionKind::CheckOut}};
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 2, d).unwrap().and_hms_opt(11, 0, 0);
    /// let dataset = ["Mathematics", "Physics", "Engineering"]
    ///     .into_iter()
    ///     .zip(1..)
    ///     .map(|(s, d)| CirculationRecord::new("p1", day(d), CheckOut, s))
    ///     .collect::<CirculationDataset>();
    ///
    /// let report = ReadingJourneyReport::analyze(&dataset, &AnalysisConfig::default());
    /// assert_eq!(report.checkout_count, 3);
    /// assert_eq!(report.transitions.get("Mathematics", "Physics"), 1);
    /// assert_eq!(report.top_paths[0].key.to_string(), "Mathematics → Physics → Engineering");
    /// assert_eq!(report.top_pairs.len(), 3);
    /// ```
    #[must_use]
    pub fn analyze(dataset: &CirculationDataset, config: &AnalysisConfig) -> Self {
        tracing::info!(
            records = dataset.len(),
            top_k = config.top_k_subjects,
            "analyzing reading journeys"
        );

        let sequences = SequenceSet::build(dataset);
        let top_subjects = TopKSubjects::select(dataset, config.top_k_subjects);
        let transitions = TransitionMatrix::count(&sequences, &top_subjects);
        let probabilities = ProbabilityMatrix::from_counts(&transitions);
        let top_paths = ReadingPathCounts::mine(&sequences).top(config.top_paths);
        let cooccurrence = CooccurrenceCounts::mine(dataset);

        let report = Self {
            fingerprint: dataset.fingerprint(),
            config: *config,
            record_count: dataset.len(),
            untimed_records: dataset.untimed_count(),
            checkout_count: dataset.checkouts().count(),
            patron_count: dataset.checkouts_by_patron().len(),
            skipped_untimed: sequences.skipped_untimed(),
            sequences: SequenceSummary::from_sequences(&sequences),
            top_subjects,
            transitions,
            probabilities,
            top_paths,
            cooccurring_patrons: cooccurrence.contributing_patrons(),
            top_pairs: cooccurrence.top(config.top_pairs),
        };
        tracing::info!(
            patrons = report.patron_count,
            skipped_untimed = report.skipped_untimed,
            paths = report.top_paths.len(),
            pairs = report.top_pairs.len(),
            "reading journey analysis finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        fixtures::{at, journeys},
        record::{CirculationRecord, TransactionKind},
    };

    fn config(top_k_subjects: usize) -> AnalysisConfig {
        AnalysisConfig {
            top_k_subjects,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn test_report_counts() {
        let mut records = journeys(&[
            ("p1", &["CS", "Math", "CS", "Physics"]),
            ("p2", &["Math", "CS"]),
            ("p3", &["Physics"]),
        ])
        .records()
        .to_vec();
        records.push(CirculationRecord::new("p4", None, TransactionKind::CheckOut, "CS"));
        records.push(CirculationRecord::new("p5", Some(at(9, 9)), TransactionKind::CheckIn, "CS"));
        let dataset = CirculationDataset::new(records);

        let report = ReadingJourneyReport::analyze(&dataset, &config(3));
        assert_eq!(report.record_count, 9);
        assert_eq!(report.untimed_records, 1);
        assert_eq!(report.checkout_count, 8);
        assert_eq!(report.patron_count, 4);
        assert_eq!(report.skipped_untimed, 1);
        assert_eq!(
            report.sequences,
            SequenceSummary {
                patrons: 3,
                with_transitions: 2,
                with_paths: 1,
                longest: 4,
            }
        );
        assert_eq!(report.top_subjects.len(), 3);
        assert_eq!(report.transitions.get("Math", "CS"), 2);
        assert_eq!(report.transitions.get("CS", "Math"), 1);
        assert!((report.probabilities.get("Math", "CS") - 1.0).abs() < 1e-12);
        assert_eq!(report.top_paths.len(), 2);
        // p3 and p4 each borrowed a single subject
        assert_eq!(report.cooccurring_patrons, 2);
        assert_eq!(report.fingerprint, dataset.fingerprint());
    }

    #[test]
    fn test_limits_bound_sections() {
        let dataset = journeys(&[("p1", &["A", "B", "C", "D", "E", "F"])]);
        let config = AnalysisConfig {
            top_k_subjects: 2,
            top_paths: 2,
            top_pairs: 4,
        };
        let report = ReadingJourneyReport::analyze(&dataset, &config);
        assert_eq!(report.top_subjects.len(), 2);
        assert_eq!(report.transitions.len(), 2);
        assert_eq!(report.top_paths.len(), 2);
        assert_eq!(report.top_pairs.len(), 4);
        assert_eq!(report.config, config);
    }

    #[test]
    fn test_empty_dataset() {
        let report = ReadingJourneyReport::analyze(&CirculationDataset::default(), &config(8));
        assert_eq!(report.record_count, 0);
        assert_eq!(report.patron_count, 0);
        assert_eq!(report.untimed_records, 0);
        assert_eq!(report.cooccurring_patrons, 0);
        assert_eq!(report.sequences, SequenceSummary::default());
        assert!(report.top_subjects.is_empty());
        assert!(report.transitions.is_empty());
        assert!(report.top_paths.is_empty());
        assert!(report.top_pairs.is_empty());
    }

    #[test]
    fn test_serializes_sections() {
        let dataset = journeys(&[("p1", &["A", "B", "C"])]);
        let report = ReadingJourneyReport::analyze(&dataset, &config(2));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["fingerprint"].as_str().map(str::len), Some(64));
        assert_eq!(json["config"]["top_k_subjects"], 2);
        assert_eq!(json["top_subjects"][0]["key"], "A");
        assert_eq!(json["transitions"]["labels"], serde_json::json!(["A", "B"]));
        assert_eq!(json["top_paths"][0]["key"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(json["top_paths"][0]["count"], 1);
        assert_eq!(json["top_pairs"][0]["key"]["first"], "A");
        assert_eq!(json["sequences"]["longest"], 3);
        assert_eq!(json["cooccurring_patrons"], 1);
        assert_eq!(json["untimed_records"], 0);
    }

    fn records() -> impl Strategy<Value = Vec<CirculationRecord>> {
        let record = (
            prop::sample::select(vec!["p1", "p2", "p3", "p4"]),
            prop::option::weighted(0.9, (1_u32..6, 8_u32..11)),
            prop::sample::select(vec![
                TransactionKind::CheckOut,
                TransactionKind::CheckOut,
                TransactionKind::CheckIn,
                TransactionKind::Other,
            ]),
            prop::sample::select(vec!["A", "B", "C", "D", "E"]),
        )
            .prop_map(|(patron, time, kind, subject)| {
                let timestamp = time.map(|(day, hour)| at(day, hour));
                CirculationRecord::new(patron, timestamp, kind, subject)
            });
        prop::collection::vec(record, 0..40)
    }

    proptest! {
        #[test]
        fn test_input_order_does_not_change_report(
            (original, shuffled) in records()
                .prop_flat_map(|r| (Just(r.clone()), Just(r).prop_shuffle())),
            k in 0_usize..6,
        ) {
            let config = config(k);
            let original = ReadingJourneyReport::analyze(&CirculationDataset::new(original), &config);
            let shuffled = ReadingJourneyReport::analyze(&CirculationDataset::new(shuffled), &config);
            prop_assert_eq!(original, shuffled);
        }
    }
}
