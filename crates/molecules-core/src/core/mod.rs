//! # Core Module
//!
//! Chemical building blocks shared by every other layer of the crate.
//!
//! ## Key Components
//!
//! - [`elements`] - Element mass tables and the [`elements::ElementTable`] lookup trait
//! - [`formula`] - Empirical formulas with parsing, addition, subtraction and mass evaluation
//!
//! Nothing in this module performs I/O; parsing works on in-memory strings only.

pub mod elements;
pub mod formula;
