use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// Two records produced the same key for a view that requires unique keys.
    /// `first` and `second` are the records' positions in declaration order.
    #[error("Duplicate key {key} in '{name}': records #{first} and #{second} collide")]
    DuplicateKey {
        name: String,
        key: String,
        first: usize,
        second: usize,
    },

    #[error("A view named '{name}' is already registered")]
    DuplicateRegistration { name: String },

    #[error("No view named '{name}' is registered")]
    UnknownName { name: String },

    #[error("View '{name}' was registered with a different type than {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },
}
