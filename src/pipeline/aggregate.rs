//! Generic grouping and counting primitives.
//!
//! Both containers keep their keys in first-seen order so that printed output
//! is deterministic across runs.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::{EnrichedLaunch, LaunchField};

/// Items that expose named fields usable as a grouping key
pub trait Keyed {
    type Field: Copy;

    fn key_for(&self, field: Self::Field) -> String;
}

impl Keyed for EnrichedLaunch {
    type Field = LaunchField;

    fn key_for(&self, field: LaunchField) -> String {
        self.field(field)
    }
}

/// How [`group_by`] derives a key: a named field, or a function of the item
pub enum GroupKey<'f, T: Keyed> {
    Field(T::Field),
    With(Box<dyn Fn(&T) -> String + 'f>),
}

impl<'f, T: Keyed> GroupKey<'f, T> {
    pub fn with<F>(f: F) -> Self
    where
        F: Fn(&T) -> String + 'f,
    {
        GroupKey::With(Box::new(f))
    }

    fn key(&self, item: &T) -> String {
        match self {
            GroupKey::Field(field) => item.key_for(*field),
            GroupKey::With(f) => f(item),
        }
    }
}

/// Items partitioned by key. Groups are created on first occurrence and never empty.
#[derive(Debug)]
pub struct Groups<'a, T> {
    groups: Vec<(String, Vec<&'a T>)>,
    index: HashMap<String, usize>,
}

impl<'a, T> Default for Groups<'a, T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<'a, T> Groups<'a, T> {
    fn push(&mut self, key: String, item: &'a T) {
        match self.index.get(&key) {
            Some(&pos) => self.groups[pos].1.push(item),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![item]));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[&'a T]> {
        self.index.get(key).map(|&pos| self.groups[pos].1.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a T])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Partition `items` by key, keeping input order inside each group
pub fn group_by<'a, T: Keyed>(items: &'a [T], key: &GroupKey<'_, T>) -> Groups<'a, T> {
    let mut groups = Groups::default();
    for item in items {
        groups.push(key.key(item), item);
    }
    groups
}

/// Occurrence counts per distinct value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) {
        match self.index.get(value) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(value.to_string(), self.entries.len());
                self.entries.push((value.to_string(), 1));
            }
        }
    }

    /// Count for `value`, zero when it never occurred
    pub fn get(&self, value: &str) -> usize {
        self.index.get(value).map_or(0, |&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts; equals the number of values tallied
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// The `n` most frequent values, highest count first.
    ///
    /// The sort is stable, so equal counts keep first-seen order.
    pub fn top_n(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// [`Tally::top_n`] rendered as `"<value>: <count>"`
    pub fn top_n_labels(&self, n: usize) -> Vec<String> {
        self.top_n(n)
            .into_iter()
            .map(|(value, count)| format!("{}: {}", value, count))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Tally {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for value in iter {
            tally.add(value.as_ref());
        }
        tally
    }
}

impl Serialize for Tally {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Count occurrences of each distinct value
pub fn frequency<I, S>(items: I) -> Tally
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().collect()
}
