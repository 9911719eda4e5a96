//! Reading journey table display
//!
//! Matrix columns are too narrow for subject names, so columns are headed by
//! the subject's Top-K rank (`#1`, `#2`, ...) and each row label carries the
//! same rank.

use std::fmt::Display;

use shelfpath_analysis::{record::Subject, top_subjects::TopKSubjects};
use shelfpath_stats::{frequency::Ranked, matrix::LabeledMatrix};

const LABEL_WIDTH: usize = 36;
const CELL_WIDTH: usize = 8;

/// Print the Top-K subjects with their ranks and checkout counts
pub(super) fn print_top_subjects(top: &TopKSubjects) {
    println!("  {:>4} {:<LABEL_WIDTH$} {:>10}", "Rank", "Subject", "Checkouts");
    println!("  {}", "-".repeat(4 + LABEL_WIDTH + 10 + 2));
    if top.is_empty() {
        println!("  (no checkouts)");
    }
    for (rank, entry) in (1..).zip(top.entries()) {
        println!(
            "  {:>4} {:<LABEL_WIDTH$} {:>10}",
            format!("#{rank}"),
            fit(entry.key.as_str(), LABEL_WIDTH),
            entry.count
        );
    }
}

/// Print a square subject matrix
///
/// # Arguments
/// * `matrix` - Matrix whose labels are in Top-K order
/// * `format_cell` - Renders one cell value
pub(super) fn print_matrix<T, F>(matrix: &LabeledMatrix<Subject, T>, format_cell: F)
where
    F: Fn(&T) -> String,
{
    if matrix.is_empty() {
        println!("  (empty)");
        return;
    }

    let header = (1..=matrix.len())
        .map(|rank| format!("{:>CELL_WIDTH$}", format!("#{rank}")))
        .collect::<String>();
    println!("  {:<LABEL_WIDTH$}{header}", "From \\ To");
    println!("  {}", "-".repeat(LABEL_WIDTH + CELL_WIDTH * matrix.len()));

    for (rank, (label, row)) in (1..).zip(matrix.rows()) {
        let cells = row
            .iter()
            .map(|value| format!("{:>CELL_WIDTH$}", format_cell(value)))
            .collect::<String>();
        let label = fit(&format!("#{rank} {label}"), LABEL_WIDTH);
        println!("  {label:<LABEL_WIDTH$}{cells}");
    }
}

/// Print ranked items with their counts
pub(super) fn print_ranked<K>(label_col: &str, items: &[Ranked<K>], count_col: &str)
where
    K: Display,
{
    let width = items
        .iter()
        .map(|item| item.key.to_string().chars().count())
        .max()
        .unwrap_or(0)
        .max(label_col.len());
    println!("  {label_col:<width$} {count_col:>12}");
    println!("  {}", "-".repeat(width + 13));
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        println!("  {:<width$} {:>12}", item.key.to_string(), item.count);
    }
}

/// Truncates `text` to at most `width` characters, marking the cut with `…`.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut fitted = text.chars().take(width.saturating_sub(1)).collect::<String>();
    fitted.push('…');
    fitted
}
