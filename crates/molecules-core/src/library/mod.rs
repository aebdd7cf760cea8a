//! # Library Module
//!
//! Generic machinery for turning a fixed set of records into named, read-only
//! lookup views.
//!
//! ## Overview
//!
//! A [`Library`] owns a closed record set. Views are registered against it by
//! name and built immediately:
//!
//! - **Attribute indices** ([`AttributeIndex`]) - unique key to record. Records
//!   without the attribute are skipped; two records with the same key are an error.
//! - **Derived sequences** ([`DerivedSequence`]) - the values a filter-transform
//!   keeps, in declaration order.
//! - **Derived maps** ([`DerivedMap`]) - key-value pairs a filter-transform keeps,
//!   with lookup by key and reverse lookup by value.
//!
//! All views are computed once and never change afterwards.
//!
//! ## Usage
//!
//! ```
//! use molecules::library::Library;
//!
//! struct Code { letter: char, weight: f64 }
//!
//! let mut library = Library::new([
//!     Code { letter: 'A', weight: 71.04 },
//!     Code { letter: 'G', weight: 57.02 },
//! ]);
//! library.register_index("letter", |code| Some(code.letter)).unwrap();
//! library
//!     .register_map("weights", |code| Some((code.letter as u8, code.weight)))
//!     .unwrap();
//!
//! let glycine = library.index::<char>("letter").unwrap().get(&'G').unwrap();
//! assert_eq!(glycine.weight, 57.02);
//! assert_eq!(library.map::<u8, f64>("weights").unwrap().get(&65), Some(&71.04));
//! ```

pub mod collection;
pub mod error;
pub mod index;
pub mod registry;

pub use collection::{DerivedMap, DerivedSequence};
pub use error::LibraryError;
pub use index::AttributeIndex;
pub use registry::Library;
