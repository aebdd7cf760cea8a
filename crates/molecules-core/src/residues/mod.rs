//! # Residues Module
//!
//! Amino acid residues and the residue library built over them.
//!
//! ## Overview
//!
//! A residue is defined by its side chain formula; its full formula adds the
//! peptide [`residue::BACKBONE`], and its masses are computed once against an
//! element table when it is constructed. Residue definitions come from a
//! [`catalog::ResidueCatalog`], either the built-in one or one read from TOML or
//! CSV text.
//!
//! ## Key Components
//!
//! - [`residue`] - The immutable [`residue::Residue`] record and formula constants
//! - [`catalog`] - Residue definitions as supplied by configuration
//! - [`library`] - [`library::ResidueLibrary`], the indexed residue set
//! - [`error`] - Catalog and residue errors
//!
//! ## Usage
//!
//! ```
//! use molecules::residues::library::ResidueLibrary;
//!
//! let residues = ResidueLibrary::standard().unwrap();
//! let alanine = residues.by_letter('A').unwrap().unwrap();
//! assert_eq!(alanine.name(), "Alanine");
//! assert!((alanine.residue_mass() - 71.03711).abs() < 1e-5);
//! ```

pub mod catalog;
pub mod error;
pub mod library;
pub mod residue;
