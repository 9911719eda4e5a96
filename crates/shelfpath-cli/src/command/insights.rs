//! Insight summary command

use std::path::PathBuf;

use chrono::Local;
use clap::Args;
use shelfpath_analysis::{
    activity::ActivityGrid, journey::ReadingJourneyReport, popularity::SubjectPopularity,
    profile::PatronProfiles,
};

use super::input::InputArg;
use crate::{insights::InsightSummary, util::Sink};

#[derive(Debug, Clone, Args)]
pub(crate) struct InsightsArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// Write the summary to this path instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &InsightsArg) -> anyhow::Result<()> {
    let config = arg.input.analysis_config()?;
    let dataset = arg.input.load_dataset()?;

    let report = ReadingJourneyReport::analyze(&dataset, &config);
    let popularity = SubjectPopularity::from_dataset(&dataset);
    let profiles = PatronProfiles::from_dataset(&dataset);
    let activity = ActivityGrid::from_dataset(&dataset);

    let summary = InsightSummary {
        report: &report,
        popularity: &popularity,
        profiles: &profiles,
        activity: &activity,
        generated_on: Local::now().date_naive(),
    };
    Sink::create(arg.output.as_deref())?.write_text(&summary.to_string())
}
