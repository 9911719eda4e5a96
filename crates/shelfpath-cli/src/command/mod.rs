use clap::{Parser, Subcommand};

use self::{
    insights::InsightsArg, journeys::JourneysArg, patrons::PatronsArg, subjects::SubjectsArg,
};
use crate::util;

mod input;
mod insights;
mod journeys;
mod patrons;
mod subjects;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// What analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Analyze reading journeys: subject transitions, paths and co-occurrence
    Journeys(#[clap(flatten)] JourneysArg),
    /// Show subject preferences by department and user type
    Patrons(#[clap(flatten)] PatronsArg),
    /// Show subject popularity by month, weekday, week and hour
    Subjects(#[clap(flatten)] SubjectsArg),
    /// Write a plain-text summary of insights and recommendations
    Insights(#[clap(flatten)] InsightsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_logging(args.verbose);
    match args.mode {
        Mode::Journeys(arg) => journeys::run(&arg)?,
        Mode::Patrons(arg) => patrons::run(&arg)?,
        Mode::Subjects(arg) => subjects::run(&arg)?,
        Mode::Insights(arg) => insights::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_journeys_with_overrides() {
        let args = CommandArgs::try_parse_from([
            "shelfpath",
            "journeys",
            "log.csv",
            "--top-k",
            "5",
            "--json",
            "report.json",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        let Mode::Journeys(arg) = args.mode else {
            panic!("expected journeys");
        };
        assert_eq!(arg.input.csv.to_str(), Some("log.csv"));
        assert_eq!(arg.input.top_k, Some(5));
        assert_eq!(arg.input.top_paths, None);
        assert_eq!(arg.json.as_deref().and_then(|p| p.to_str()), Some("report.json"));
    }

    #[test]
    fn test_parse_subjects() {
        let args =
            CommandArgs::try_parse_from(["shelfpath", "subjects", "log.csv", "--top-k", "3"])
                .unwrap();
        let Mode::Subjects(arg) = args.mode else {
            panic!("expected subjects");
        };
        assert_eq!(arg.input.csv.to_str(), Some("log.csv"));
        assert_eq!(arg.input.top_k, Some(3));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(CommandArgs::try_parse_from(["shelfpath"]).is_err());
    }
}
