//! Immutable circulation dataset shared by all analyses
//!
//! Every analysis takes a [`CirculationDataset`] explicitly; nothing in this
//! crate keeps loaded tables in global state. The dataset is a plain owned
//! collection of [`CirculationRecord`]s plus a few grouping helpers.
//!
//! # Fingerprint
//!
//! [`CirculationDataset::fingerprint`] digests the record contents with
//! SHA-256. Records are digested individually and the sorted digests are
//! hashed again, so the fingerprint does not depend on record order, matching
//! the analyses themselves. Callers that memoize results can key them by it.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::record::{CirculationRecord, PatronId};

/// An immutable collection of circulation records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CirculationDataset {
    records: Vec<CirculationRecord>,
}

impl CirculationDataset {
    #[must_use]
    pub fn new(records: Vec<CirculationRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[CirculationRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over checkout records in input order.
    pub fn checkouts(&self) -> impl Iterator<Item = &CirculationRecord> {
        self.records.iter().filter(|r| r.is_checkout())
    }

    /// Groups checkout records by patron.
    ///
    /// Patrons are ordered by id; each patron's records keep input order.
    /// Patrons without checkouts do not appear.
    #[must_use]
    pub fn checkouts_by_patron(&self) -> BTreeMap<&PatronId, Vec<&CirculationRecord>> {
        let mut groups = BTreeMap::<_, Vec<_>>::new();
        for record in self.checkouts() {
            groups.entry(&record.patron_id).or_default().push(record);
        }
        groups
    }

    /// Returns the number of records whose timestamp is missing.
    #[must_use]
    pub fn untimed_count(&self) -> usize {
        self.records.iter().filter(|r| r.timestamp.is_none()).count()
    }

    /// Returns a hex-encoded SHA-256 digest of the dataset contents.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shelfpath_analysis::{dataset::CirculationDataset, record::{CirculationRecord, TransactionKind}};
    /// let a = CirculationRecord::new("p1", None, TransactionKind::CheckOut, "Physics");
    /// let b = CirculationRecord::new("p2", None, TransactionKind::CheckIn, "Chemistry");
    /// let forward = CirculationDataset::new(vec![a.clone(), b.clone()]);
    /// let backward = CirculationDataset::new(vec![b, a]);
    /// assert_eq!(forward.fingerprint(), backward.fingerprint());
    /// assert_eq!(forward.fingerprint().len(), 64);
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut digests = self.records.iter().map(record_digest).collect::<Vec<_>>();
        digests.sort_unstable();

        let mut hasher = Sha256::new();
        hasher.update((digests.len() as u64).to_le_bytes());
        for digest in &digests {
            hasher.update(digest);
        }
        hex::encode(hasher.finalize())
    }
}

impl From<Vec<CirculationRecord>> for CirculationDataset {
    fn from(records: Vec<CirculationRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<CirculationRecord> for CirculationDataset {
    fn from_iter<I: IntoIterator<Item = CirculationRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn record_digest(record: &CirculationRecord) -> [u8; 32] {
    let timestamp = record
        .timestamp
        .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    let transaction = record.transaction.to_string();
    let fields = [
        Some(record.patron_id.as_str()),
        timestamp.as_deref(),
        Some(transaction.as_str()),
        record.title.as_deref(),
        Some(record.subject.as_str()),
        Some(record.department.as_str()),
        Some(record.user_type.as_str()),
    ];

    let mut hasher = Sha256::new();
    for field in fields {
        // length prefix keeps field boundaries unambiguous; absent fields use a
        // marker no present field can produce
        match field {
            Some(value) => {
                hasher.update((value.len() as u64).to_le_bytes());
                hasher.update(value.as_bytes());
            }
            None => hasher.update(u64::MAX.to_le_bytes()),
        }
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixtures::at, record::TransactionKind};

    fn sample() -> CirculationDataset {
        CirculationDataset::new(vec![
            CirculationRecord::new("p2", Some(at(1, 9)), TransactionKind::CheckOut, "Physics"),
            CirculationRecord::new("p1", Some(at(1, 10)), TransactionKind::CheckIn, "Physics"),
            CirculationRecord::new("p1", None, TransactionKind::CheckOut, "Mathematics"),
            CirculationRecord::new("p1", Some(at(2, 8)), TransactionKind::CheckOut, "Chemistry"),
            CirculationRecord::new("p3", Some(at(2, 8)), TransactionKind::Other, "Chemistry"),
        ])
    }

    #[test]
    fn test_checkouts_filter() {
        let dataset = sample();
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.checkouts().count(), 3);
        assert_eq!(dataset.untimed_count(), 1);
    }

    #[test]
    fn test_checkouts_by_patron() {
        let dataset = sample();
        let groups = dataset.checkouts_by_patron();
        let patrons = groups.keys().map(|p| p.as_str()).collect::<Vec<_>>();
        assert_eq!(patrons, ["p1", "p2"]);
        let p1 = groups[&PatronId::new("p1")]
            .iter()
            .map(|r| r.subject.as_str())
            .collect::<Vec<_>>();
        assert_eq!(p1, ["Mathematics", "Chemistry"]);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = CirculationDataset::default();
        assert!(dataset.is_empty());
        assert!(dataset.checkouts_by_patron().is_empty());
        assert_eq!(dataset.fingerprint().len(), 64);
    }

    #[test]
    fn test_fingerprint_detects_changes() {
        let dataset = sample();
        let mut records = dataset.records().to_vec();
        records[0].subject = "Chemistry".into();
        let changed = CirculationDataset::new(records);
        assert_ne!(dataset.fingerprint(), changed.fingerprint());
    }

    #[test]
    fn test_fingerprint_distinguishes_missing_timestamp() {
        let timed = CirculationDataset::new(vec![CirculationRecord::new(
            "p1",
            Some(at(1, 9)),
            TransactionKind::CheckOut,
            "Physics",
        )]);
        let untimed = CirculationDataset::new(vec![CirculationRecord::new(
            "p1",
            None,
            TransactionKind::CheckOut,
            "Physics",
        )]);
        assert_ne!(timed.fingerprint(), untimed.fingerprint());
    }
}
