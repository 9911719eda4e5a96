//! Reading-journey and co-occurrence analytics for library circulation logs
//!
//! This crate turns a log of circulation events (checkouts, check-ins) into
//! an account of how patrons move between subjects over time, and which
//! subjects are read by the same people.
//!
//! # Overview
//!
//! ## Reading Journey Workflow
//!
//! Order-based analyses over per-patron sequences:
//!
//! 1. **Load Records** ([`dataset::CirculationDataset`]): An immutable collection of
//!    [`record::CirculationRecord`]s, each already labeled with a subject
//! 2. **Build Sequences** ([`sequence::SequenceSet`]): Time-ordered subjects per patron
//! 3. **Select Alphabet** ([`top_subjects::TopKSubjects`]): The K most checked-out subjects
//! 4. **Count Transitions** ([`transition::TransitionMatrix`]): Adjacent Top-K pairs
//! 5. **Normalize** ([`transition::ProbabilityMatrix`]): Row-wise next-subject probabilities
//! 6. **Mine Paths** ([`path::ReadingPathCounts`]): Frequent three-step windows
//!
//! [`journey::ReadingJourneyReport::analyze`] runs all of these, plus
//! co-occurrence mining, in one call.
//!
//! ## Co-occurrence Workflow
//!
//! Order-free analyses over the set of subjects each patron borrowed:
//!
//! - **Pair Mining** ([`cooccurrence::CooccurrenceCounts`]): Patrons per unordered subject pair
//! - **Popularity** ([`popularity::SubjectPopularity`]): Checkouts per subject, overall and monthly
//! - **Profiles** ([`profile::PatronProfiles`]): Subject preferences by department and user type
//! - **Activity** ([`activity::ActivityGrid`]): Events by weekday and hour
//! - **Timing** ([`timing::SubjectTiming`]): Checkouts per subject by weekday, hour and ISO week
//!
//! # Determinism
//!
//! Every analysis is a pure function of the dataset. Ranked outputs break
//! count ties by key, and equal timestamps within a patron order by subject, so
//! permuting the input records never changes a result.
//!
//! # Subjects
//!
//! Subjects are opaque labels. [`categorizer::SubjectCategorizer`] derives one
//! from a title by keyword matching; `"Unknown"` and `"Other"` are treated
//! like any other subject.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use shelfpath_analysis::{
//!     categorizer::SubjectCategorizer,
//!     config::AnalysisConfig,
//!     dataset::CirculationDataset,
//!     journey::ReadingJourneyReport,
//!     record::{CirculationRecord, TransactionKind},
//! };
//!
//! let categorizer = SubjectCategorizer::default();
//! let day = |d| NaiveDate::from_ymd_opt(2024, 4, d).unwrap().and_hms_opt(10, 0, 0);
//! let loans = [
//!     ("p1", 1, "Introduction to Python Programming"),
//!     ("p1", 3, "Linear Algebra and Its Applications"),
//!     ("p1", 7, "Concepts of Physics"),
//!     ("p2", 2, "Data Structures in C"),
//!     ("p2", 5, "Calculus: Early Transcendentals"),
//! ];
//! let dataset = loans
//!     .into_iter()
//!     .map(|(patron, d, title)| {
//!         let subject = categorizer.categorize(Some(title));
//!         CirculationRecord::new(patron, day(d), TransactionKind::CheckOut, subject)
//!             .with_title(title)
//!     })
//!     .collect::<CirculationDataset>();
//!
//! let report = ReadingJourneyReport::analyze(&dataset, &AnalysisConfig::default());
//! assert_eq!(
//!     report.transitions.get("Computer Science & Programming", "Mathematics"),
//!     2
//! );
//! ```

pub mod activity;
pub mod categorizer;
pub mod config;
pub mod cooccurrence;
pub mod dataset;
pub mod journey;
pub mod path;
pub mod popularity;
pub mod profile;
pub mod record;
pub mod sequence;
pub mod timing;
pub mod top_subjects;
pub mod transition;

#[cfg(test)]
mod fixtures;
