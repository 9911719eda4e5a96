//! Counting and normalization primitives for the Shelfpath project.
//!
//! This crate provides the small set of statistical building blocks the
//! circulation analyses are assembled from:
//!
//! - **Frequency tables**: Count occurrences of keys and rank them with a
//!   deterministic tie-break
//! - **Labeled matrices**: Dense square matrices indexed by labels, with
//!   row-wise normalization into probabilities
//!
//! # Modules
//!
//! - [`frequency`]: Frequency counting and top-N ranking
//! - [`matrix`]: Square count matrices and row normalization
//!
//! # Examples
//!
//! ## Ranking the most common keys
//!
//! ```
//! use shelfpath_stats::frequency::FrequencyTable;
//!
//! let table = ["b", "a", "b", "c", "a", "b"].into_iter().collect::<FrequencyTable<_>>();
//! let top = table.most_common(2);
//! assert_eq!(top[0].key, "b");
//! assert_eq!(top[0].count, 3);
//! assert_eq!(top[1].key, "a");
//! ```
//!
//! ## Normalizing a count matrix
//!
//! ```
//! use shelfpath_stats::matrix::LabeledMatrix;
//!
//! let mut counts = LabeledMatrix::filled(vec!["x", "y"], 0_u64);
//! *counts.cell_mut(0, 1) += 3;
//! *counts.cell_mut(0, 0) += 1;
//! let probs = counts.row_normalized();
//! assert_eq!(probs.get(&"x", &"y"), Some(&0.75));
//! assert_eq!(probs.get(&"y", &"x"), Some(&0.0));
//! ```

pub mod frequency;
pub mod matrix;
