//! Input options shared by every analysis command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use shelfpath_analysis::{config::AnalysisConfig, dataset::CirculationDataset};

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct InputArg {
    /// Path to the circulation log CSV file
    pub csv: PathBuf,

    /// Path to a JSON analysis configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of most checked-out subjects in the transition matrix
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Number of reading paths to report
    #[arg(long)]
    pub top_paths: Option<usize>,

    /// Number of co-occurring subject pairs to report
    #[arg(long)]
    pub top_pairs: Option<usize>,
}

impl InputArg {
    /// Loads the configuration file, if any, and applies flag overrides.
    pub fn analysis_config(&self) -> anyhow::Result<AnalysisConfig> {
        let base = match &self.config {
            Some(path) => util::read_json("analysis config", path)?,
            None => AnalysisConfig::default(),
        };
        let config = self.apply_overrides(base);
        config.validate().context("Invalid analysis configuration")?;
        tracing::debug!(?config, "resolved analysis configuration");
        Ok(config)
    }

    fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(top_k) = self.top_k {
            config.top_k_subjects = top_k;
        }
        if let Some(top_paths) = self.top_paths {
            config.top_paths = top_paths;
        }
        if let Some(top_pairs) = self.top_pairs {
            config.top_pairs = top_pairs;
        }
        config
    }

    pub fn load_dataset(&self) -> anyhow::Result<CirculationDataset> {
        let (dataset, summary) = util::read_circulation_file(&self.csv)?;
        if summary.rows_skipped > 0 {
            tracing::warn!(
                skipped = summary.rows_skipped,
                "some rows were skipped; rerun with -v for details"
            );
        }
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(top_k: Option<usize>, top_paths: Option<usize>) -> InputArg {
        InputArg {
            csv: PathBuf::from("log.csv"),
            config: None,
            top_k,
            top_paths,
            top_pairs: None,
        }
    }

    #[test]
    fn test_flags_override_file_values() {
        let file = AnalysisConfig {
            top_k_subjects: 4,
            top_paths: 3,
            top_pairs: 2,
        };
        let config = input(Some(6), None).apply_overrides(file);
        assert_eq!(
            config,
            AnalysisConfig {
                top_k_subjects: 6,
                top_paths: 3,
                top_pairs: 2,
            }
        );
    }

    #[test]
    fn test_defaults_without_file() {
        let config = input(None, None).analysis_config().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_zero_top_paths_is_rejected() {
        let err = input(None, Some(0)).analysis_config().unwrap_err();
        assert!(format!("{err:#}").contains("`top_paths` must be at least 1"));
    }

    #[test]
    fn test_zero_top_k_is_allowed() {
        let config = input(Some(0), None).analysis_config().unwrap();
        assert_eq!(config.top_k_subjects, 0);
    }
}
