use std::{borrow::Borrow, collections::BTreeMap};

use serde::{Deserialize, Serialize};

/// A key paired with the number of times it was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranked<K> {
    /// The counted key.
    pub key: K,
    /// Number of observations of `key`.
    pub count: u64,
}

/// Occurrence counts for a set of ordered keys.
///
/// Keys are stored in a [`BTreeMap`], so iteration is always in ascending key
/// order regardless of the order observations were added in. Rankings built
/// from the table inherit that order as their tie-break, which keeps top-N
/// selections reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K> {
    counts: BTreeMap<K, u64>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K> FrequencyTable<K>
where
    K: Ord,
{
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation of `key`.
    pub fn add(&mut self, key: K) {
        self.add_count(key, 1);
    }

    /// Records `count` observations of `key`.
    ///
    /// Adding a zero count still registers the key in the table.
    pub fn add_count(&mut self, key: K, count: u64) {
        *self.counts.entry(key).or_insert(0) += count;
    }

    /// Returns the number of observations of `key`, or 0 if it was never added.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no key has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates over `(key, count)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }

    /// Returns every key ranked by count, descending.
    ///
    /// Keys with equal counts appear in ascending key order.
    #[must_use]
    pub fn ranked(&self) -> Vec<Ranked<&K>> {
        let mut ranked = self
            .iter()
            .map(|(key, count)| Ranked { key, count })
            .collect::<Vec<_>>();
        // stable sort keeps ascending key order within equal counts
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    /// Returns the `n` most frequent keys, ranked as in [`ranked`](Self::ranked).
    ///
    /// # Examples
    ///
    /// ```
    /// # use shelfpath_stats::frequency::FrequencyTable;
    /// let table = [3, 1, 2, 1, 3].into_iter().collect::<FrequencyTable<i32>>();
    /// let top = table.most_common(2);
    /// // 1 and 3 are tied; the smaller key ranks first
    /// assert_eq!(top.iter().map(|r| r.key).collect::<Vec<_>>(), [1, 3]);
    /// ```
    #[must_use]
    pub fn most_common(&self, n: usize) -> Vec<Ranked<K>>
    where
        K: Clone,
    {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
            .into_iter()
            .map(|Ranked { key, count }| Ranked {
                key: key.clone(),
                count,
            })
            .collect()
    }
}

impl<K> FromIterator<K> for FrequencyTable<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K> Extend<K> for FrequencyTable<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K> IntoIterator for FrequencyTable<K> {
    type Item = (K, u64);
    type IntoIter = std::collections::btree_map::IntoIter<K, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
