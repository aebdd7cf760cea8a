//! # Molecules Core Library
//!
//! Empirical formula algebra and indexed libraries of amino acid residues.
//!
//! ## Architectural Philosophy
//!
//! The crate is split into three layers, each depending only on the ones above it:
//!
//! - **[`core`]: The Chemistry.** Element mass tables and empirical formulas with
//!   parsing, arithmetic and mass evaluation. Pure functions over strings and values.
//!
//! - **[`library`]: The Views.** A generic registry that takes a closed set of records
//!   and builds named attribute indices and derived collections over it, once.
//!
//! - **[`residues`]: The Domain.** Amino acid residues, their catalog, and the
//!   residue library with lookups by code, abbreviation and name, and the byte-keyed
//!   collections used for peptide mass calculations.
//!
//! Nothing in this crate reads files or touches the network; catalogs and formulas
//! are parsed from in-memory text.

pub mod core;
pub mod library;
pub mod residues;
