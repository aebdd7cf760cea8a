use super::error::LibraryError;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Values kept by a filter-transform over a record set, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSequence<T> {
    name: String,
    values: Vec<T>,
}

impl<T> DerivedSequence<T> {
    pub fn build<R, F>(name: &str, records: &[Arc<R>], transform: F) -> Self
    where
        F: Fn(&Arc<R>) -> Option<T>,
    {
        Self {
            name: name.to_string(),
            values: records.iter().filter_map(transform).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.values.get(position)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a DerivedSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Key-value pairs kept by a filter-transform over a record set.
///
/// Entries keep declaration order. Keys are unique: a transform that yields
/// the same key for two records fails the build, as an attribute index does.
#[derive(Debug, Clone)]
pub struct DerivedMap<K, V> {
    name: String,
    entries: Vec<(K, V)>,
    positions: HashMap<K, usize>,
}

impl<K, V> DerivedMap<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn build<R, F>(name: &str, records: &[Arc<R>], transform: F) -> Result<Self, LibraryError>
    where
        F: Fn(&Arc<R>) -> Option<(K, V)>,
    {
        let mut entries: Vec<(K, V)> = Vec::new();
        let mut positions = HashMap::new();
        // declaration position of the record behind each entry, for error reporting
        let mut sources = Vec::new();

        for (position, record) in records.iter().enumerate() {
            let Some((key, value)) = transform(record) else {
                continue;
            };
            if let Some(&existing) = positions.get(&key) {
                return Err(LibraryError::DuplicateKey {
                    name: name.to_string(),
                    key: format!("{:?}", key),
                    first: sources[existing],
                    second: position,
                });
            }
            positions.insert(key.clone(), entries.len());
            sources.push(position);
            entries.push((key, value));
        }

        Ok(Self {
            name: name.to_string(),
            entries,
            positions,
        })
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(key)
    }
}

impl<K, V> DerivedMap<K, V> {
    /// Reverse lookup: the key of the first entry whose value equals `value`.
    pub fn key_of(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.entries
            .iter()
            .find(|(_, candidate)| candidate == value)
            .map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for DerivedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.entries == other.entries
    }
}
