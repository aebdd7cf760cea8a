use crate::core::formula::FormulaError;
use crate::library::LibraryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TOML parsing error in residue catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV parsing error in residue catalog: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ResidueError {
    #[error("Invalid side chain formula for residue '{residue}': {source}")]
    Formula {
        residue: String,
        #[source]
        source: FormulaError,
    },

    #[error("Residue '{residue}' has a non-ASCII code '{code}'")]
    NonAsciiCode { residue: String, code: char },

    #[error("Residues '{first}' and '{second}' share the same {attribute} ({key})")]
    DuplicateKey {
        attribute: String,
        key: String,
        first: String,
        second: String,
    },

    #[error("Unknown residue code '{code}' at position {position}")]
    UnknownResidueCode { code: char, position: usize },

    #[error(transparent)]
    Mass(#[from] FormulaError),

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
