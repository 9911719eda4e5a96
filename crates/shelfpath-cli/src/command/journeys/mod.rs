//! Reading journey command
//!
//! Runs the reading-journey analysis over a circulation log and prints the
//! Top-K subjects, transition counts and probabilities, frequent reading paths
//! and co-occurring subject pairs.

mod table;

use std::path::PathBuf;

use clap::Args;
use shelfpath_analysis::journey::ReadingJourneyReport;

use super::input::InputArg;
use crate::util::Sink;

#[derive(Debug, Clone, Args)]
pub(crate) struct JourneysArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// Also write the full report as JSON to this path (`-` for stdout)
    #[arg(long)]
    pub json: Option<PathBuf>,
}

pub(crate) fn run(arg: &JourneysArg) -> anyhow::Result<()> {
    let config = arg.input.analysis_config()?;
    let dataset = arg.input.load_dataset()?;
    let report = ReadingJourneyReport::analyze(&dataset, &config);

    println!("Reading Journey Report");
    println!("======================\n");

    print!("{}", overview(&report));
    println!();

    println!("{}", top_subjects_heading(&report));
    table::print_top_subjects(&report.top_subjects);
    println!();

    println!("Transition Counts (row: from, column: to)");
    table::print_matrix(report.transitions.matrix(), |count| count.to_string());
    println!();

    println!("Transition Probabilities (row: from, column: to)");
    table::print_matrix(report.probabilities.matrix(), |p| format!("{p:.3}"));
    println!();

    println!("Common Reading Paths");
    table::print_ranked("Path", &report.top_paths, "Occurrences");
    println!();

    println!("Subjects Read Together");
    table::print_ranked("Subject Pair", &report.top_pairs, "Patrons");

    if let Some(path) = &arg.json {
        Sink::create(Some(path.as_path()))?.write_json(&report)?;
        tracing::info!(path = %path.display(), "saved reading journey report");
    }

    Ok(())
}

/// Names the subjects actually selected, which may be fewer than configured.
fn top_subjects_heading(report: &ReadingJourneyReport) -> String {
    format!("Top {} Subjects", report.top_subjects.len())
}

fn overview(report: &ReadingJourneyReport) -> String {
    let sequences = &report.sequences;
    let mut lines = vec![
        "Overview:".to_owned(),
        format!(
            "  Records: {} total, {} checkouts",
            report.record_count, report.checkout_count
        ),
        format!(
            "  Patrons: {} with checkouts, {} with timed sequences, {} reading 2+ subjects",
            report.patron_count, sequences.patrons, report.cooccurring_patrons
        ),
        format!(
            "  Sequences: {} with 2+ checkouts, {} with 3+ checkouts, longest {}",
            sequences.with_transitions, sequences.with_paths, sequences.longest
        ),
    ];
    if report.untimed_records > 0 {
        lines.push(format!(
            "  Records without a timestamp: {}",
            report.untimed_records
        ));
    }
    if report.skipped_untimed > 0 {
        lines.push(format!(
            "  Untimed checkouts left out of sequences: {}",
            report.skipped_untimed
        ));
    }
    lines.push(format!("  Dataset fingerprint: {}", report.fingerprint));
    lines.into_iter().map(|line| line + "\n").collect()
}
