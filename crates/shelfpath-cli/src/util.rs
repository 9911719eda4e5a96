use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};
use shelfpath_analysis::{categorizer::SubjectCategorizer, dataset::CirculationDataset};
use tracing_subscriber::EnvFilter;

use crate::feed::{self, FeedSummary};

/// Where a command writes its result: a file, or stdout
pub struct Sink {
    writer: Box<dyn Write>,
    target: String,
}

impl Sink {
    /// Creates `path`, or writes to stdout when `path` is `None` or `-`.
    pub fn create(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) if path != Path::new("-") => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Self {
                    writer: Box::new(BufWriter::new(file)),
                    target: path.display().to_string(),
                })
            }
            _ => Ok(Self {
                writer: Box::new(io::stdout().lock()),
                target: "stdout".to_owned(),
            }),
        }
    }

    /// Writes `value` as pretty-printed JSON followed by a newline.
    pub fn write_json<T>(mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.target))?;
        self.write_text("\n")
    }

    pub fn write_text(mut self, text: &str) -> anyhow::Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to write to {}", self.target))?;
        tracing::debug!(output = %self.target, "wrote output");
        Ok(())
    }
}

/// Parses the JSON file at `path`; `what` names the file in errors.
pub fn read_json<T>(what: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what}: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {what} as JSON: {}", path.display()))
}

/// Read a circulation log CSV file
///
/// Subjects are assigned with the default categorizer unless the file has a
/// subject column.
///
/// # Errors
///
/// Returns error if the file cannot be opened or lacks a required column
pub fn read_circulation_file<P>(path: P) -> anyhow::Result<(CirculationDataset, FeedSummary)>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open circulation log: {}", path.display()))?;
    feed::read_csv(BufReader::new(file), &SubjectCategorizer::default())
        .with_context(|| format!("Failed to read circulation log: {}", path.display()))
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise logs at `info`, or `debug` when
/// `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
