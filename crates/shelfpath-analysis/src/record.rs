//! Circulation records as consumed by the analyses
//!
//! A [`CirculationRecord`] is one row of a circulation log with its subject
//! already resolved. Records are immutable once built; every analysis in this
//! crate only reads them.
//!
//! # Transaction Kinds
//!
//! Circulation exports label transactions with free-form strings ("Check out",
//! "CHECKOUT", "check-in", ...). [`TransactionKind::from_label`] is the single
//! rule used to map those labels onto [`TransactionKind`]:
//!
//! 1. lowercase the label and drop whitespace, `-` and `_`
//! 2. contains `"checkout"` → [`TransactionKind::CheckOut`]
//! 3. contains `"checkin"` → [`TransactionKind::CheckIn`]
//! 4. anything else → [`TransactionKind::Other`]

use std::borrow::Borrow;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a library patron.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PatronId(String);

impl PatronId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PatronId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Subject category assigned to a checked-out title.
///
/// Subjects order lexicographically by name, which is the tie-break used by
/// every ranking in this crate.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// Subject assigned to records without a title.
    pub const UNKNOWN: &'static str = "Unknown";
    /// Subject assigned to titles matching no category.
    pub const OTHER: &'static str = "Other";

    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Subject {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for Subject {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Kind of a circulation transaction.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum TransactionKind {
    #[display("Check out")]
    CheckOut,
    #[display("Check in")]
    CheckIn,
    #[display("Other")]
    Other,
}

impl TransactionKind {
    /// Maps a free-form transaction label onto a kind.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shelfpath_analysis::record::TransactionKind;
    /// assert_eq!(TransactionKind::from_label("Check out"), TransactionKind::CheckOut);
    /// assert_eq!(TransactionKind::from_label("CHECKOUT"), TransactionKind::CheckOut);
    /// assert_eq!(TransactionKind::from_label("check-in"), TransactionKind::CheckIn);
    /// assert_eq!(TransactionKind::from_label("Renewal"), TransactionKind::Other);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect::<String>();
        if normalized.contains("checkout") {
            Self::CheckOut
        } else if normalized.contains("checkin") {
            Self::CheckIn
        } else {
            Self::Other
        }
    }
}

/// One row of a circulation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CirculationRecord {
    /// Patron who performed the transaction
    pub patron_id: PatronId,
    /// When the transaction happened; `None` if missing or unparseable
    pub timestamp: Option<NaiveDateTime>,
    /// What kind of transaction this is
    pub transaction: TransactionKind,
    /// Title of the item, if the log carried one
    pub title: Option<String>,
    /// Subject category of the item
    pub subject: Subject,
    /// Department of the patron
    pub department: String,
    /// Patron category (e.g. UG, PG, staff)
    pub user_type: String,
}

impl CirculationRecord {
    /// Value used for a missing department or user type.
    pub const UNSPECIFIED: &'static str = "Unknown";

    /// Creates a record with no title and unspecified department and user type.
    #[must_use]
    pub fn new(
        patron_id: impl Into<PatronId>,
        timestamp: Option<NaiveDateTime>,
        transaction: TransactionKind,
        subject: impl Into<Subject>,
    ) -> Self {
        Self {
            patron_id: patron_id.into(),
            timestamp,
            transaction,
            title: None,
            subject: subject.into(),
            department: Self::UNSPECIFIED.to_owned(),
            user_type: Self::UNSPECIFIED.to_owned(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    #[must_use]
    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = user_type.into();
        self
    }

    /// Returns `true` if this record is a checkout.
    #[must_use]
    pub fn is_checkout(&self) -> bool {
        self.transaction.is_check_out()
    }
}
