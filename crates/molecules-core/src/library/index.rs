use super::error::LibraryError;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Unique-key lookup over a closed set of records.
///
/// Records for which the accessor yields `None` are left out of the index;
/// a key produced by two records fails the build instead of overwriting.
#[derive(Debug)]
pub struct AttributeIndex<K, R> {
    name: String,
    entries: HashMap<K, (usize, Arc<R>)>,
    keys: Vec<K>,
}

impl<K, R> AttributeIndex<K, R>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn build<F>(name: &str, records: &[Arc<R>], accessor: F) -> Result<Self, LibraryError>
    where
        F: Fn(&R) -> Option<K>,
    {
        let mut entries = HashMap::with_capacity(records.len());
        let mut keys = Vec::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            let Some(key) = accessor(record.as_ref()) else {
                continue;
            };
            match entries.entry(key.clone()) {
                Entry::Occupied(existing) => {
                    let (first, _): &(usize, Arc<R>) = existing.get();
                    return Err(LibraryError::DuplicateKey {
                        name: name.to_string(),
                        key: format!("{:?}", key),
                        first: *first,
                        second: position,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert((position, Arc::clone(record)));
                    keys.push(key);
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            entries,
            keys,
        })
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Arc<R>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|(_, record)| record)
    }

    /// Declaration position of the record stored under `key`.
    pub fn position_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|(position, _)| *position)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Keys in the declaration order of the records that produced them.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
