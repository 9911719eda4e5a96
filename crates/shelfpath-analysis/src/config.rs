//! Analysis parameters
//!
//! [`AnalysisConfig`] carries the knobs of a reading-journey run. Every field
//! has a default, so a partial JSON document is a valid configuration:
//!
//! ```json
//! { "top_k_subjects": 5 }
//! ```

use serde::{Deserialize, Serialize};

/// Parameters of a reading-journey analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Number of most-checked-out subjects forming the transition matrix alphabet
    pub top_k_subjects: usize,
    /// Number of reading paths to report
    pub top_paths: usize,
    /// Number of co-occurring subject pairs to report
    pub top_pairs: usize,
}

impl AnalysisConfig {
    pub const DEFAULT_TOP_K_SUBJECTS: usize = 8;
    pub const DEFAULT_TOP_PATHS: usize = 10;
    pub const DEFAULT_TOP_PAIRS: usize = 10;

    /// Checks that the configuration asks for a non-empty report.
    ///
    /// `top_k_subjects` may be zero; the transition matrices are then empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_paths == 0 {
            return Err(ConfigError::ZeroLimit { field: "top_paths" });
        }
        if self.top_pairs == 0 {
            return Err(ConfigError::ZeroLimit { field: "top_pairs" });
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k_subjects: Self::DEFAULT_TOP_K_SUBJECTS,
            top_paths: Self::DEFAULT_TOP_PATHS,
            top_pairs: Self::DEFAULT_TOP_PAIRS,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("`{field}` must be at least 1")]
    ZeroLimit { field: &'static str },
}
