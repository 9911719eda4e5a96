//! Circulation log ingestion from CSV
//!
//! Columns are bound by header name, never by position. Header names are
//! compared after lowercasing and dropping everything but letters and digits,
//! so `Patron ID`, `patron_id` and `PatronId` are the same column.
//!
//! Rows are decoded leniently:
//!
//! - a timestamp that matches none of the known formats becomes `None`
//! - a missing title yields the `Unknown` subject
//! - a missing department or user type yields `Unknown`
//!
//! Rows without a patron id, and rows the CSV reader cannot decode, are
//! skipped and counted in [`FeedSummary`].

use std::io;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use shelfpath_analysis::{
    categorizer::SubjectCategorizer,
    dataset::CirculationDataset,
    record::{CirculationRecord, Subject, TransactionKind},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum FeedError {
    #[display("failed to read CSV header")]
    Header(csv::Error),
    #[display("CSV must have a `{column}` column")]
    MissingColumn { column: &'static str },
}

/// Row accounting of one feed read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedSummary {
    /// Data rows seen, including skipped ones
    pub rows_read: usize,
    /// Rows dropped for lack of a patron id or undecodable content
    pub rows_skipped: usize,
    /// Kept rows whose timestamp was missing or unparseable
    pub untimed: usize,
}

/// Column indices of the fields a circulation record is built from.
#[derive(Debug, Default)]
struct ColumnMap {
    timestamp: Option<usize>,
    patron_id: Option<usize>,
    transaction: Option<usize>,
    title: Option<usize>,
    subject: Option<usize>,
    department: Option<usize>,
    user_type: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, FeedError> {
        let mut map = Self::default();

        for (i, header) in headers.iter().enumerate() {
            let slot = match normalize_header(header).as_str() {
                "date" | "timestamp" | "datetime" | "transactiondate" => &mut map.timestamp,
                "patronid" | "patron" | "memberid" | "userid" | "borrowerid" | "cardnumber" => {
                    &mut map.patron_id
                }
                "transaction" | "transactiontype" | "action" => &mut map.transaction,
                "title" | "booktitle" | "itemtitle" => &mut map.title,
                "subject" => &mut map.subject,
                "department" | "dept" => &mut map.department,
                "usertype" | "patrontype" | "category" => &mut map.user_type,
                _ => continue,
            };
            // first matching column wins
            slot.get_or_insert(i);
        }

        let required = [
            ("date", map.timestamp),
            ("patron id", map.patron_id),
            ("transaction", map.transaction),
        ];
        if let Some((column, _)) = required.into_iter().find(|(_, index)| index.is_none()) {
            return Err(FeedError::MissingColumn { column });
        }
        if map.title.is_none() && map.subject.is_none() {
            return Err(FeedError::MissingColumn { column: "title" });
        }
        Ok(map)
    }
}

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Reads a circulation log, assigning subjects with `categorizer`.
///
/// An explicit `subject` column takes precedence over categorizing the title.
pub fn read_csv<R>(
    reader: R,
    categorizer: &SubjectCategorizer,
) -> Result<(CirculationDataset, FeedSummary), FeedError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(FeedError::Header)?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut summary = FeedSummary::default();
    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        summary.rows_read += 1;
        let line = row + 2;
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(line, %err, "skipping undecodable row");
                summary.rows_skipped += 1;
                continue;
            }
        };
        let Some(record) = parse_record(&columns, &record, categorizer) else {
            tracing::debug!(line, "skipping row without patron id");
            summary.rows_skipped += 1;
            continue;
        };
        if record.timestamp.is_none() {
            summary.untimed += 1;
        }
        records.push(record);
    }

    tracing::info!(
        rows_read = summary.rows_read,
        rows_skipped = summary.rows_skipped,
        untimed = summary.untimed,
        "loaded circulation log"
    );
    Ok((CirculationDataset::new(records), summary))
}

fn parse_record(
    columns: &ColumnMap,
    record: &csv::StringRecord,
    categorizer: &SubjectCategorizer,
) -> Option<CirculationRecord> {
    let field = |index: Option<usize>| {
        index
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    let patron_id = field(columns.patron_id)?;
    let timestamp = field(columns.timestamp).and_then(parse_timestamp);
    let transaction = TransactionKind::from_label(field(columns.transaction).unwrap_or_default());
    let title = field(columns.title);
    let subject = field(columns.subject)
        .map_or_else(|| categorizer.categorize(title), Subject::from);

    let mut parsed = CirculationRecord::new(patron_id, timestamp, transaction, subject);
    if let Some(title) = title {
        parsed = parsed.with_title(title);
    }
    if let Some(department) = field(columns.department) {
        parsed = parsed.with_department(department);
    }
    if let Some(user_type) = field(columns.user_type) {
        parsed = parsed.with_user_type(user_type);
    }
    Some(parsed)
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Parses a log timestamp; date-only values fall at midnight.
///
/// RFC 3339 values keep the wall-clock time at their own offset and drop the
/// offset, so hour-of-day and weekday analyses see the hour the patron saw.
/// Sequence order between values with different offsets follows wall-clock
/// time, not the instant.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
