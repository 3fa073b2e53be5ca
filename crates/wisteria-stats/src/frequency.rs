//! Ordered containers that count or total observations per key.
//!
//! All containers are backed by [`BTreeMap`], so iteration is in key order
//! and each distinct key appears exactly once. Use [`Real`](crate::key::Real)
//! or [`NoCase`](crate::key::NoCase) as the key type for floating point or
//! case-insensitive keys.
//!
//! # Examples
//!
//! ```
//! use wisteria_stats::{frequency::FrequencySet, key::NoCase};
//!
//! let mut drinks = FrequencySet::new();
//! for drink in ["Coke", "pepsi", "coke", "Sprite"] {
//!     drinks.insert(NoCase::from(drink));
//! }
//! assert_eq!(drinks.count(&NoCase::from("COKE")), 2);
//! assert_eq!(drinks.len(), 3);
//! ```

use std::{
    collections::{BTreeMap, BTreeSet, btree_map},
    ops::AddAssign,
};

/// Counts how many times each value was inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencySet<T> {
    table: BTreeMap<T, usize>,
}

impl<T> Default for FrequencySet<T> {
    fn default() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }
}

impl<T: Ord> FrequencySet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `value` and returns its updated count.
    pub fn insert(&mut self, value: T) -> usize {
        let count = self.table.entry(value).or_insert(0);
        *count += 1;
        *count
    }

    /// Returns how many times `value` was inserted.
    #[must_use]
    pub fn count(&self, value: &T) -> usize {
        self.table.get(value).copied().unwrap_or(0)
    }

    /// The number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, T, usize> {
        self.table.iter()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// The highest count of any value, or zero when empty.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.table.values().copied().max().unwrap_or(0)
    }
}

impl<T: Ord> FromIterator<T> for FrequencySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T> IntoIterator for FrequencySet<T> {
    type Item = (T, usize);
    type IntoIter = btree_map::IntoIter<T, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a FrequencySet<T> {
    type Item = (&'a T, &'a usize);
    type IntoIter = btree_map::Iter<'a, T, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}

/// Keeps two counts per value: every insertion bumps the first, and
/// selected insertions bump the second.
///
/// Useful for tallying e.g. "occurrences" and "occurrences that were flagged".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleFrequencySet<T> {
    table: BTreeMap<T, (usize, usize)>,
}

impl<T> Default for DoubleFrequencySet<T> {
    fn default() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }
}

impl<T: Ord> DoubleFrequencySet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value`, also bumping its second count if `increment_second` is set.
    pub fn insert(&mut self, value: T, increment_second: bool) {
        self.insert_with_custom_increment(value, 1, usize::from(increment_second));
    }

    /// Records `value`, adding the given increments to its two counts.
    pub fn insert_with_custom_increment(
        &mut self,
        value: T,
        first_increment: usize,
        second_increment: usize,
    ) {
        let counts = self.table.entry(value).or_insert((0, 0));
        counts.0 += first_increment;
        counts.1 += second_increment;
    }

    #[must_use]
    pub fn counts(&self, value: &T) -> Option<(usize, usize)> {
        self.table.get(value).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, T, (usize, usize)> {
        self.table.iter()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl<T: Ord> AddAssign for DoubleFrequencySet<T> {
    fn add_assign(&mut self, rhs: Self) {
        for (value, (first, second)) in rhs.table {
            self.insert_with_custom_increment(value, first, second);
        }
    }
}

/// A count together with a running total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregate {
    pub count: usize,
    pub total: f64,
}

/// Counts each value and sums an amount associated with each insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateFrequencySet<T> {
    table: BTreeMap<T, Aggregate>,
}

impl<T> Default for AggregateFrequencySet<T> {
    fn default() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }
}

impl<T: Ord> AggregateFrequencySet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `value`, adding `amount` to its total.
    pub fn insert(&mut self, value: T, amount: f64) {
        let aggregate = self.table.entry(value).or_default();
        aggregate.count += 1;
        aggregate.total += amount;
    }

    #[must_use]
    pub fn get(&self, value: &T) -> Option<&Aggregate> {
        self.table.get(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, T, Aggregate> {
        self.table.iter()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl<'a, T> IntoIterator for &'a AggregateFrequencySet<T> {
    type Item = (&'a T, &'a Aggregate);
    type IntoIter = btree_map::Iter<'a, T, Aggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}

/// Counts keys while remembering the value first associated with each key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap<K, V> {
    table: BTreeMap<K, (V, usize)>,
}

impl<K, V> Default for FrequencyMap<K, V> {
    fn default() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V> FrequencyMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `key`. `value` is stored only on the key's first insertion.
    pub fn insert(&mut self, key: K, value: V) -> usize {
        let entry = self.table.entry(key).or_insert((value, 0));
        entry.1 += 1;
        entry.1
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<(&V, usize)> {
        self.table.get(key).map(|(value, count)| (value, *count))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, (V, usize)> {
        self.table.iter()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

/// A key's retained sub-values and its running total.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiValueEntry<S> {
    pub values: S,
    pub total: f64,
}

/// Maps each key to a set of distinct sub-values and a running total.
///
/// The number of sub-values kept per key can be capped; further values are
/// dropped while the total keeps accumulating.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::frequency::MultiValueAggregateMap;
/// let mut bins = MultiValueAggregateMap::new();
/// bins.set_values_list_max_size(Some(2));
/// for id in ["ann", "bob", "cal"] {
///     bins.insert(10, id, 1.0);
/// }
/// let entry = bins.get(&10).unwrap();
/// assert_eq!(entry.values.len(), 2);
/// assert_eq!(entry.total, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MultiValueAggregateMap<K, V> {
    table: BTreeMap<K, MultiValueEntry<BTreeSet<V>>>,
    values_max_size: Option<usize>,
}

impl<K, V> Default for MultiValueAggregateMap<K, V> {
    fn default() -> Self {
        Self {
            table: BTreeMap::new(),
            values_max_size: None,
        }
    }
}

impl<K: Ord, V: Ord> MultiValueAggregateMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of sub-values kept per key, trimming existing entries.
    ///
    /// `None` removes the cap.
    pub fn set_values_list_max_size(&mut self, max_size: Option<usize>) {
        self.values_max_size = max_size;
        if let Some(max_size) = max_size {
            for entry in self.table.values_mut() {
                while entry.values.len() > max_size {
                    entry.values.pop_last();
                }
            }
        }
    }

    #[must_use]
    pub fn values_list_max_size(&self) -> Option<usize> {
        self.values_max_size
    }

    /// Adds `value` to `key`'s sub-values (space permitting) and `amount` to its total.
    pub fn insert(&mut self, key: K, value: V, amount: f64) {
        let entry = self.table.entry(key).or_insert_with(|| MultiValueEntry {
            values: BTreeSet::new(),
            total: 0.0,
        });
        if self
            .values_max_size
            .is_none_or(|max_size| entry.values.len() < max_size)
        {
            entry.values.insert(value);
        }
        entry.total += amount;
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&MultiValueEntry<BTreeSet<V>>> {
        self.table.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, MultiValueEntry<BTreeSet<V>>> {
        self.table.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, K, MultiValueEntry<BTreeSet<V>>> {
        self.table.keys()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl<'a, K, V> IntoIterator for &'a MultiValueAggregateMap<K, V> {
    type Item = (&'a K, &'a MultiValueEntry<BTreeSet<V>>);
    type IntoIter = btree_map::Iter<'a, K, MultiValueEntry<BTreeSet<V>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}

/// Maps each key to a frequency count of its sub-values and a running total.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiValueFrequencyAggregateMap<K, V> {
    table: BTreeMap<K, MultiValueEntry<FrequencySet<V>>>,
}

impl<K, V> Default for MultiValueFrequencyAggregateMap<K, V> {
    fn default() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V: Ord> MultiValueFrequencyAggregateMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, value: V, amount: f64) {
        let entry = self.table.entry(key).or_insert_with(|| MultiValueEntry {
            values: FrequencySet::new(),
            total: 0.0,
        });
        entry.values.insert(value);
        entry.total += amount;
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&MultiValueEntry<FrequencySet<V>>> {
        self.table.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, MultiValueEntry<FrequencySet<V>>> {
        self.table.iter()
    }
}

/// Maps each key to sub-values that carry their own count and total, plus a
/// running total for the key.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiValueFrequencyDoubleAggregateMap<K, V> {
    table: BTreeMap<K, MultiValueEntry<AggregateFrequencySet<V>>>,
}

impl<K, V> Default for MultiValueFrequencyDoubleAggregateMap<K, V> {
    fn default() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V: Ord> MultiValueFrequencyDoubleAggregateMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value_amount` to the sub-value's total and `key_amount` to the key's total.
    pub fn insert(&mut self, key: K, value: V, value_amount: f64, key_amount: f64) {
        let entry = self.table.entry(key).or_insert_with(|| MultiValueEntry {
            values: AggregateFrequencySet::new(),
            total: 0.0,
        });
        entry.values.insert(value, value_amount);
        entry.total += key_amount;
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&MultiValueEntry<AggregateFrequencySet<V>>> {
        self.table.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, MultiValueEntry<AggregateFrequencySet<V>>> {
        self.table.iter()
    }
}
