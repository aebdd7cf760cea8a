//! # Formula Module
//!
//! Empirical formulas: parsing, arithmetic and mass evaluation.
//!
//! ## Grammars
//!
//! - **Simple** - element symbols, each optionally followed by a parenthesized
//!   positive count, all added together: `C(2)H(2)NO`.
//! - **Signed** - simple fragments joined by `+` and `-`, with an optional sign
//!   before the first fragment: `-CO+H`.
//!
//! Element symbols are checked against an [`ElementTable`](crate::core::elements::ElementTable)
//! while parsing, so a parsed formula always has a mass in the table it was parsed with.
//!
//! ## Usage
//!
//! ```
//! use molecules::core::formula::EmpiricalFormula;
//!
//! let side_chain = EmpiricalFormula::parse_simple("CH(3)").unwrap();
//! let backbone = EmpiricalFormula::parse_simple("C(2)H(2)NO").unwrap();
//! let alanine = &side_chain + &backbone;
//! assert_eq!(alanine.to_string(), "C(3)H(5)NO");
//! ```

pub mod composition;
pub mod error;
mod parser;

pub use composition::{EmpiricalFormula, MAX_COUNT};
pub use error::{FormulaError, ParseError};
