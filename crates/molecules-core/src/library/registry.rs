use super::collection::{DerivedMap, DerivedSequence};
use super::error::LibraryError;
use super::index::AttributeIndex;
use std::any::{Any, type_name};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

type View = Box<dyn Any + Send + Sync>;

/// A closed set of records together with named views built over it.
///
/// The record set is fixed when the library is constructed. Indices and
/// collections are built eagerly when they are registered and kept for the
/// lifetime of the library, so every view reflects the complete record set.
/// Registration needs `&mut self`; once built, a library is an immutable
/// snapshot that can be shared between threads.
pub struct Library<R> {
    records: Vec<Arc<R>>,
    indices: HashMap<String, View>,
    collections: HashMap<String, View>,
}

impl<R> Library<R>
where
    R: Send + Sync + 'static,
{
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
            indices: HashMap::new(),
            collections: HashMap::new(),
        }
    }

    /// All records, in declaration order.
    pub fn records(&self) -> &[Arc<R>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Builds a unique-key index named `name`. Records for which `accessor`
    /// returns `None` are not indexed.
    pub fn register_index<K, F>(&mut self, name: &str, accessor: F) -> Result<(), LibraryError>
    where
        K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
        F: Fn(&R) -> Option<K>,
    {
        let slot = vacant(&mut self.indices, name)?;
        let index = AttributeIndex::build(name, &self.records, accessor)?;
        debug!(index = name, entries = index.len(), "Built attribute index.");
        slot.insert(Box::new(index));
        Ok(())
    }

    /// Builds a derived sequence named `name` from every record the transform accepts.
    pub fn register_sequence<T, F>(&mut self, name: &str, transform: F) -> Result<(), LibraryError>
    where
        T: Send + Sync + 'static,
        F: Fn(&Arc<R>) -> Option<T>,
    {
        let slot = vacant(&mut self.collections, name)?;
        let sequence = DerivedSequence::build(name, &self.records, transform);
        debug!(
            collection = name,
            entries = sequence.len(),
            "Built derived sequence."
        );
        slot.insert(Box::new(sequence));
        Ok(())
    }

    /// Builds a derived map named `name`. Collections share one namespace, so
    /// a map cannot reuse the name of a sequence.
    pub fn register_map<K, V, F>(&mut self, name: &str, transform: F) -> Result<(), LibraryError>
    where
        K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
        V: Send + Sync + 'static,
        F: Fn(&Arc<R>) -> Option<(K, V)>,
    {
        let slot = vacant(&mut self.collections, name)?;
        let map = DerivedMap::build(name, &self.records, transform)?;
        debug!(collection = name, entries = map.len(), "Built derived map.");
        slot.insert(Box::new(map));
        Ok(())
    }

    pub fn index<K>(&self, name: &str) -> Result<&AttributeIndex<K, R>, LibraryError>
    where
        K: 'static,
    {
        lookup(&self.indices, name)
    }

    pub fn sequence<T>(&self, name: &str) -> Result<&DerivedSequence<T>, LibraryError>
    where
        T: 'static,
    {
        lookup(&self.collections, name)
    }

    pub fn map<K, V>(&self, name: &str) -> Result<&DerivedMap<K, V>, LibraryError>
    where
        K: 'static,
        V: 'static,
    {
        lookup(&self.collections, name)
    }

    pub fn index_names(&self) -> impl Iterator<Item = &str> {
        self.indices.keys().map(String::as_str)
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }
}

fn vacant<'a>(
    views: &'a mut HashMap<String, View>,
    name: &str,
) -> Result<std::collections::hash_map::VacantEntry<'a, String, View>, LibraryError> {
    match views.entry(name.to_string()) {
        Entry::Occupied(_) => Err(LibraryError::DuplicateRegistration {
            name: name.to_string(),
        }),
        Entry::Vacant(slot) => Ok(slot),
    }
}

fn lookup<'a, T: 'static>(
    views: &'a HashMap<String, View>,
    name: &str,
) -> Result<&'a T, LibraryError> {
    let view = views.get(name).ok_or_else(|| LibraryError::UnknownName {
        name: name.to_string(),
    })?;
    view.downcast_ref::<T>()
        .ok_or_else(|| LibraryError::TypeMismatch {
            name: name.to_string(),
            expected: type_name::<T>(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Item {
        code: Option<char>,
        label: &'static str,
        weight: f64,
    }

    fn library() -> Library<Item> {
        Library::new([
            Item {
                code: Some('A'),
                label: "Ala",
                weight: 71.04,
            },
            Item {
                code: Some('G'),
                label: "Gly",
                weight: 57.02,
            },
            Item {
                code: None,
                label: "Orn",
                weight: 114.08,
            },
        ])
    }

    #[test]
    fn registered_views_are_retrievable_by_name() {
        let mut lib = library();
        lib.register_index("code", |item| item.code).unwrap();
        lib.register_sequence("coded", |item| item.code.map(|_| Arc::clone(item)))
            .unwrap();
        lib.register_map("weight_by_byte", |item| {
            item.code.map(|c| (c as u8, item.weight))
        })
        .unwrap();

        let by_code = lib.index::<char>("code").unwrap();
        assert_eq!(by_code.get(&'G').unwrap().label, "Gly");
        assert_eq!(lib.sequence::<Arc<Item>>("coded").unwrap().len(), 2);
        assert_eq!(
            lib.map::<u8, f64>("weight_by_byte").unwrap().get(&b'A'),
            Some(&71.04)
        );
    }

    #[test]
    fn reusing_a_name_is_rejected() {
        let mut lib = library();
        lib.register_index("code", |item| item.code).unwrap();
        assert_eq!(
            lib.register_index("code", |item| Some(item.label)),
            Err(LibraryError::DuplicateRegistration {
                name: "code".to_string()
            })
        );

        lib.register_sequence("labels", |item| Some(item.label)).unwrap();
        assert!(matches!(
            lib.register_map("labels", |item| Some((item.label, item.weight))),
            Err(LibraryError::DuplicateRegistration { .. })
        ));
    }

    #[test]
    fn indices_and_collections_have_separate_namespaces() {
        let mut lib = library();
        lib.register_index("label", |item| Some(item.label)).unwrap();
        lib.register_sequence("label", |item| Some(item.label)).unwrap();
        assert!(lib.index::<&'static str>("label").is_ok());
        assert!(lib.sequence::<&'static str>("label").is_ok());
    }

    #[test]
    fn unknown_names_are_reported() {
        let lib = library();
        assert_eq!(
            lib.index::<char>("code").unwrap_err(),
            LibraryError::UnknownName {
                name: "code".to_string()
            }
        );
        assert!(matches!(
            lib.sequence::<f64>("common"),
            Err(LibraryError::UnknownName { .. })
        ));
    }

    #[test]
    fn requesting_the_wrong_type_is_reported() {
        let mut lib = library();
        lib.register_index("code", |item| item.code).unwrap();
        assert!(matches!(
            lib.index::<String>("code"),
            Err(LibraryError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn failed_build_leaves_the_name_unregistered() {
        let mut lib = library();
        let err = lib
            .register_index("has_code", |item| Some(item.code.is_some()))
            .unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateKey { first: 0, second: 1, .. }));
        assert!(matches!(
            lib.index::<bool>("has_code"),
            Err(LibraryError::UnknownName { .. })
        ));
        lib.register_index("has_code", |item| item.code.map(|_| item.label))
            .unwrap();
    }

    #[test]
    fn records_are_closed_and_kept_in_order() {
        let lib = library();
        assert_eq!(lib.len(), 3);
        let labels: Vec<_> = lib.records().iter().map(|item| item.label).collect();
        assert_eq!(labels, vec!["Ala", "Gly", "Orn"]);
    }

    #[test]
    fn finished_library_is_shareable_across_threads() {
        let mut lib = library();
        lib.register_index("label", |item| Some(item.label)).unwrap();
        let lib = Arc::new(lib);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lib = Arc::clone(&lib);
                std::thread::spawn(move || {
                    lib.index::<&'static str>("label")
                        .unwrap()
                        .get("Orn")
                        .map(|item| item.weight)
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(114.08));
        }
    }
}
