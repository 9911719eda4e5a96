//! Subject popularity and timing command
//!
//! Prints the most checked-out subjects, then when they are borrowed: per
//! month, per weekday, per ISO week and as a weekday × hour grid of all
//! checkouts. Subject columns are headed by the subject's overall rank.

use std::fmt::Write as _;

use clap::Args;
use shelfpath_analysis::{
    activity::{ActivityGrid, WEEKDAYS},
    popularity::SubjectPopularity,
    record::Subject,
    timing::SubjectTiming,
};
use shelfpath_stats::frequency::Ranked;

use super::input::InputArg;

const LABEL_WIDTH: usize = 32;
const CELL_WIDTH: usize = 7;

#[derive(Debug, Clone, Args)]
pub(crate) struct SubjectsArg {
    #[clap(flatten)]
    pub input: InputArg,
}

pub(crate) fn run(arg: &SubjectsArg) -> anyhow::Result<()> {
    let config = arg.input.analysis_config()?;
    let dataset = arg.input.load_dataset()?;
    let popularity = SubjectPopularity::from_dataset(&dataset);
    let timing = SubjectTiming::from_dataset(&dataset);
    let top = popularity.top(config.top_k_subjects);
    tracing::info!(
        subjects = popularity.totals().len(),
        months = popularity.monthly().count(),
        weeks = timing.weekly().count(),
        "built subject popularity"
    );

    println!("Subject Popularity");
    println!("==================\n");

    println!("Top {} Subjects", top.len());
    print!("{}", ranking_table(&top));
    println!();

    println!("Monthly Checkouts (column: subject rank)");
    print!("{}", monthly_table(&popularity, &top));
    println!();

    println!("Checkouts by Weekday");
    print!("{}", weekday_table(&timing, &top));
    println!();

    println!("Weekly Checkouts");
    print!("{}", weekly_table(&timing));
    println!();

    println!("Checkouts by Weekday and Hour");
    print!("{}", hour_grid(timing.checkout_grid()));

    Ok(())
}

fn ranking_table(top: &[Ranked<Subject>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:>4} {:<LABEL_WIDTH$} {:>10}", "Rank", "Subject", "Checkouts");
    let _ = writeln!(out, "  {}", "-".repeat(4 + LABEL_WIDTH + 10 + 2));
    if top.is_empty() {
        let _ = writeln!(out, "  (no checkouts)");
    }
    for (rank, entry) in (1..).zip(top) {
        let _ = writeln!(
            out,
            "  {:>4} {:<LABEL_WIDTH$} {:>10}",
            format!("#{rank}"),
            entry.key.as_str(),
            entry.count
        );
    }
    out
}

/// Months as rows, top subjects as columns; months with no timed checkouts
/// do not appear.
fn monthly_table(popularity: &SubjectPopularity, top: &[Ranked<Subject>]) -> String {
    let mut out = String::new();
    let months = popularity.monthly().map(|(month, _)| month).collect::<Vec<_>>();
    if months.is_empty() {
        let _ = writeln!(out, "  (no timed checkouts)");
        return out;
    }

    let header = (1..=top.len())
        .map(|rank| format!("{:>CELL_WIDTH$}", format!("#{rank}")))
        .collect::<String>();
    let _ = writeln!(out, "  {:<8}{header}{:>CELL_WIDTH$}", "Month", "Total");
    let _ = writeln!(out, "  {}", "-".repeat(8 + CELL_WIDTH * (top.len() + 1)));
    for month in months {
        let Some(counts) = popularity.month(month) else {
            continue;
        };
        let cells = top
            .iter()
            .map(|entry| format!("{:>CELL_WIDTH$}", counts.get(entry.key.as_str())))
            .collect::<String>();
        let _ = writeln!(
            out,
            "  {:<8}{cells}{:>CELL_WIDTH$}",
            month.to_string(),
            counts.total()
        );
    }
    out
}

fn weekday_table(timing: &SubjectTiming, top: &[Ranked<Subject>]) -> String {
    let mut out = String::new();
    let header = WEEKDAYS
        .iter()
        .map(|day| format!("{:>CELL_WIDTH$}", day.to_string()))
        .collect::<String>();
    let _ = writeln!(out, "  {:<LABEL_WIDTH$}{header}{:>10}", "Subject", "Peak Hour");
    let _ = writeln!(out, "  {}", "-".repeat(LABEL_WIDTH + CELL_WIDTH * 7 + 10));
    if top.is_empty() {
        let _ = writeln!(out, "  (no checkouts)");
    }
    for (rank, entry) in (1..).zip(top) {
        let subject = entry.key.as_str();
        let cells = timing
            .weekday_counts(subject)
            .iter()
            .map(|count| format!("{count:>CELL_WIDTH$}"))
            .collect::<String>();
        let peak = timing
            .busiest_hour(subject)
            .map_or_else(|| "-".to_owned(), |(hour, _)| format!("{hour:02}:00"));
        let label = format!("#{rank} {subject}");
        let _ = writeln!(out, "  {label:<LABEL_WIDTH$}{cells}{peak:>10}");
    }
    out
}

fn weekly_table(timing: &SubjectTiming) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:<10} {:>10}  {}", "Week", "Checkouts", "Top Subject");
    let _ = writeln!(out, "  {}", "-".repeat(10 + 10 + LABEL_WIDTH + 3));
    let mut any = false;
    for (week, counts) in timing.weekly() {
        any = true;
        let leader = counts
            .most_common(1)
            .into_iter()
            .next()
            .map_or_else(|| "-".to_owned(), |top| format!("{} ({})", top.key, top.count));
        let _ = writeln!(
            out,
            "  {:<10} {:>10}  {leader}",
            week.to_string(),
            counts.total()
        );
    }
    if !any {
        let _ = writeln!(out, "  (no timed checkouts)");
    }
    out
}

fn hour_grid(grid: &ActivityGrid) -> String {
    let mut out = String::new();
    let header = (0..24).map(|hour| format!("{hour:>4}")).collect::<String>();
    let _ = writeln!(out, "  {:<4}{header}", "");
    for day in WEEKDAYS {
        let cells = (0..24)
            .map(|hour| format!("{:>4}", grid.get(day, hour)))
            .collect::<String>();
        let _ = writeln!(out, "  {:<4}{cells}", day.to_string());
    }
    if let Some((day, hour, count)) = grid.peak() {
        let _ = writeln!(out, "  Peak: {day} {hour:02}:00 ({count} checkouts)");
    }
    out
}
