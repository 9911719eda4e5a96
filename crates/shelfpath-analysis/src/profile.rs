//! Subject preferences by patron group
//!
//! Groups checkouts by a patron attribute (department or user type) and
//! counts subjects within each group. Groups are bound by the named record
//! fields, never by column position.
//!
//! # Examples
//!
//! ```
//! use shelfpath_analysis::profile::PatronProfiles;
//! # use shelfpath_analysis::{dataset::CirculationDataset, record::{CirculationRecord, TransactionKind::CheckOut}};
//! # let dataset = [
//! #     ("CSE", "Computer Science & Programming"),
//! #     ("CSE", "Mathematics"),
//! #     ("CSE", "Computer Science & Programming"),
//! #     ("MECH", "Engineering"),
//! # ]
//! #     .into_iter()
//! #     .map(|(d, s)| CirculationRecord::new("p", None, CheckOut, s).with_department(d))
//! #     .collect::<CirculationDataset>();
//!
//! let profiles = PatronProfiles::from_dataset(&dataset);
//! let busiest = profiles.departments().busiest(1);
//! assert_eq!(busiest[0].key, "CSE");
//! assert_eq!(
//!     profiles.departments().favorite_subject("CSE").map(|s| s.as_str()),
//!     Some("Computer Science & Programming")
//! );
//! ```

use std::collections::BTreeMap;

use shelfpath_stats::frequency::{FrequencyTable, Ranked};

use crate::{
    dataset::CirculationDataset,
    record::{CirculationRecord, Subject},
};

/// Subject checkout counts for each value of one patron attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedSubjects {
    groups: BTreeMap<String, FrequencyTable<Subject>>,
}

impl GroupedSubjects {
    /// Groups checkouts by the attribute `key` returns.
    pub fn collect_by<F>(dataset: &CirculationDataset, mut key: F) -> Self
    where
        F: FnMut(&CirculationRecord) -> &str,
    {
        let mut groups = BTreeMap::<String, FrequencyTable<Subject>>::new();
        for record in dataset.checkouts() {
            let group = key(record);
            match groups.get_mut(group) {
                Some(counts) => counts.add(record.subject.clone()),
                None => {
                    let mut counts = FrequencyTable::new();
                    counts.add(record.subject.clone());
                    groups.insert(group.to_owned(), counts);
                }
            }
        }
        Self { groups }
    }

    /// Iterates over groups in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrequencyTable<Subject>)> {
        self.groups.iter().map(|(name, counts)| (name.as_str(), counts))
    }

    #[must_use]
    pub fn get(&self, group: &str) -> Option<&FrequencyTable<Subject>> {
        self.groups.get(group)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the `n` groups with the most checkouts, ties by name.
    #[must_use]
    pub fn busiest(&self, n: usize) -> Vec<Ranked<String>> {
        self.rank_by(n, FrequencyTable::total)
    }

    /// Returns the `n` groups reading the most distinct subjects, ties by name.
    #[must_use]
    pub fn most_diverse(&self, n: usize) -> Vec<Ranked<String>> {
        self.rank_by(n, |counts| counts.len() as u64)
    }

    /// Returns the most checked-out subject of `group`, ties by name.
    #[must_use]
    pub fn favorite_subject(&self, group: &str) -> Option<&Subject> {
        self.groups
            .get(group)?
            .ranked()
            .into_iter()
            .next()
            .map(|r| r.key)
    }

    fn rank_by<F>(&self, n: usize, mut measure: F) -> Vec<Ranked<String>>
    where
        F: FnMut(&FrequencyTable<Subject>) -> u64,
    {
        let mut table = FrequencyTable::new();
        for (name, counts) in &self.groups {
            table.add_count(name.clone(), measure(counts));
        }
        table.most_common(n)
    }
}

/// Subject preferences by department and by user type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatronProfiles {
    departments: GroupedSubjects,
    user_types: GroupedSubjects,
}

impl PatronProfiles {
    #[must_use]
    pub fn from_dataset(dataset: &CirculationDataset) -> Self {
        Self {
            departments: GroupedSubjects::collect_by(dataset, |r| r.department.as_str()),
            user_types: GroupedSubjects::collect_by(dataset, |r| r.user_type.as_str()),
        }
    }

    #[must_use]
    pub fn departments(&self) -> &GroupedSubjects {
        &self.departments
    }

    #[must_use]
    pub fn user_types(&self) -> &GroupedSubjects {
        &self.user_types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TransactionKind;

    fn record(department: &str, user_type: &str, subject: &str) -> CirculationRecord {
        CirculationRecord::new("p", None, TransactionKind::CheckOut, subject)
            .with_department(department)
            .with_user_type(user_type)
    }

    fn sample() -> CirculationDataset {
        CirculationDataset::new(vec![
            record("CSE", "UG", "Computer Science"),
            record("CSE", "UG", "Mathematics"),
            record("CSE", "PG", "Computer Science"),
            record("ECE", "UG", "Engineering"),
            record("ECE", "UG", "Physics"),
            record("ECE", "ST", "Mathematics"),
            record("MBA", "PG", "Management"),
            CirculationRecord::new("p", None, TransactionKind::CheckIn, "Physics")
                .with_department("MBA"),
        ])
    }

    #[test]
    fn test_groups_count_checkouts_only() {
        let profiles = PatronProfiles::from_dataset(&sample());
        let mba = profiles.departments().get("MBA").unwrap();
        assert_eq!(mba.total(), 1);
        assert_eq!(mba.get("Physics"), 0);
        assert_eq!(profiles.departments().len(), 3);
        assert_eq!(profiles.user_types().len(), 3);
    }

    #[test]
    fn test_busiest_departments() {
        let profiles = PatronProfiles::from_dataset(&sample());
        let busiest = profiles
            .departments()
            .busiest(3)
            .into_iter()
            .map(|r| (r.key, r.count))
            .collect::<Vec<_>>();
        assert_eq!(
            busiest,
            [("CSE".to_owned(), 3), ("ECE".to_owned(), 3), ("MBA".to_owned(), 1)]
        );
    }

    #[test]
    fn test_diversity() {
        let profiles = PatronProfiles::from_dataset(&sample());
        let diverse = profiles
            .departments()
            .most_diverse(2)
            .into_iter()
            .map(|r| (r.key, r.count))
            .collect::<Vec<_>>();
        assert_eq!(diverse, [("ECE".to_owned(), 3), ("CSE".to_owned(), 2)]);
    }

    #[test]
    fn test_favorite_subject() {
        let profiles = PatronProfiles::from_dataset(&sample());
        let departments = profiles.departments();
        assert_eq!(
            departments.favorite_subject("CSE").map(Subject::as_str),
            Some("Computer Science")
        );
        // three-way tie resolves by subject name
        assert_eq!(
            departments.favorite_subject("ECE").map(Subject::as_str),
            Some("Engineering")
        );
        assert_eq!(departments.favorite_subject("LAW"), None);
        assert_eq!(
            profiles.user_types().favorite_subject("UG").map(Subject::as_str),
            Some("Computer Science")
        );
    }

    #[test]
    fn test_empty_dataset() {
        let profiles = PatronProfiles::from_dataset(&CirculationDataset::default());
        assert!(profiles.departments().is_empty());
        assert!(profiles.departments().busiest(5).is_empty());
    }
}
