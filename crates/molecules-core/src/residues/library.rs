use super::catalog::ResidueCatalog;
use super::error::ResidueError;
use super::residue::{Residue, WATER};
use crate::core::elements::{ElementTable, MassKind};
use crate::library::{AttributeIndex, DerivedMap, DerivedSequence, Library, LibraryError};
use std::sync::Arc;
use tracing::info;

pub const LETTER_INDEX: &str = "letter";
pub const ABBR_INDEX: &str = "abbr";
pub const NAME_INDEX: &str = "name";
pub const COMMON: &str = "common";
pub const RESIDUE_INDEX: &str = "residue_index";
pub const RESIDUE_MASS_INDEX: &str = "residue_mass_index";

/// Amino acid residues with lookup by code, abbreviation and name, plus the
/// derived collections used for sequence mass calculations.
///
/// Views are registered in a fixed order when the library is built:
///
/// | name                 | kind     | contents                                   |
/// |----------------------|----------|--------------------------------------------|
/// | `letter`             | index    | one-letter code → residue (coded only)     |
/// | `abbr`               | index    | abbreviation → residue                     |
/// | `name`               | index    | full name → residue                        |
/// | `common`             | sequence | residues classified as common              |
/// | `residue_index`      | map      | code byte → residue (coded only)           |
/// | `residue_mass_index` | map      | code byte → residue mass (coded only)      |
pub struct ResidueLibrary {
    library: Library<Residue>,
    water_mass: f64,
}

impl std::fmt::Debug for ResidueLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResidueLibrary")
            .field("residues", &self.library.records())
            .field("water_mass", &self.water_mass)
            .finish_non_exhaustive()
    }
}

impl ResidueLibrary {
    /// Builds every residue of `catalog` against `table`, then registers all views.
    ///
    /// # Errors
    ///
    /// Returns `ResidueError::Formula` if a side chain does not parse or its
    /// elements are missing from `table`, `ResidueError::NonAsciiCode` for a
    /// code outside ASCII, and `ResidueError::DuplicateKey` when two residues
    /// share a code, abbreviation or name.
    pub fn new(catalog: &ResidueCatalog, table: &dyn ElementTable) -> Result<Self, ResidueError> {
        let residues = catalog
            .definitions()
            .iter()
            .map(|definition| Residue::new(definition, table))
            .collect::<Result<Vec<_>, _>>()?;
        let water_mass = WATER.mass(table)?;

        let mut library = Library::new(residues);

        library
            .register_index(LETTER_INDEX, |residue| residue.letter())
            .map_err(|e| describe(&library, e))?;
        library
            .register_index(ABBR_INDEX, |residue| Some(residue.abbr().to_string()))
            .map_err(|e| describe(&library, e))?;
        library
            .register_index(NAME_INDEX, |residue| Some(residue.name().to_string()))
            .map_err(|e| describe(&library, e))?;

        library.register_sequence(COMMON, |residue| {
            residue.is_common().then(|| Arc::clone(residue))
        })?;
        library
            .register_map(RESIDUE_INDEX, |residue| {
                residue.byte().map(|byte| (byte, Arc::clone(residue)))
            })
            .map_err(|e| describe(&library, e))?;
        library
            .register_map(RESIDUE_MASS_INDEX, |residue| {
                residue.byte().map(|byte| (byte, residue.residue_mass()))
            })
            .map_err(|e| describe(&library, e))?;

        info!(
            residues = library.len(),
            "Built residue library with {} indices and {} collections.",
            library.index_names().count(),
            library.collection_names().count()
        );

        Ok(Self {
            library,
            water_mass,
        })
    }

    /// The built-in catalog with monoisotopic masses.
    pub fn standard() -> Result<Self, ResidueError> {
        Self::new(&ResidueCatalog::standard()?, &MassKind::Monoisotopic)
    }

    /// The underlying registry, for views beyond the typed accessors below.
    pub fn library(&self) -> &Library<Residue> {
        &self.library
    }

    /// Every residue in declaration order, with or without a one-letter code.
    pub fn residues(&self) -> &[Arc<Residue>] {
        self.library.records()
    }

    pub fn by_letter(&self, letter: char) -> Result<Option<&Arc<Residue>>, ResidueError> {
        Ok(self.library.index::<char>(LETTER_INDEX)?.get(&letter))
    }

    pub fn by_abbr(&self, abbr: &str) -> Result<Option<&Arc<Residue>>, ResidueError> {
        Ok(self.library.index::<String>(ABBR_INDEX)?.get(abbr))
    }

    pub fn by_name(&self, name: &str) -> Result<Option<&Arc<Residue>>, ResidueError> {
        Ok(self.library.index::<String>(NAME_INDEX)?.get(name))
    }

    pub fn letter_index(&self) -> Result<&AttributeIndex<char, Residue>, ResidueError> {
        Ok(self.library.index(LETTER_INDEX)?)
    }

    pub fn common(&self) -> Result<&DerivedSequence<Arc<Residue>>, ResidueError> {
        Ok(self.library.sequence(COMMON)?)
    }

    pub fn residue_index(&self) -> Result<&DerivedMap<u8, Arc<Residue>>, ResidueError> {
        Ok(self.library.map(RESIDUE_INDEX)?)
    }

    pub fn residue_mass_index(&self) -> Result<&DerivedMap<u8, f64>, ResidueError> {
        Ok(self.library.map(RESIDUE_MASS_INDEX)?)
    }

    pub fn residue_mass_of(&self, byte: u8) -> Result<Option<f64>, ResidueError> {
        Ok(self.residue_mass_index()?.get(&byte).copied())
    }

    /// Sum of the residue masses of a one-letter sequence such as `"PEPTIDE"`.
    pub fn sequence_residue_mass(&self, sequence: &str) -> Result<f64, ResidueError> {
        let masses = self.residue_mass_index()?;
        let mut total = 0.0;
        for (position, code) in sequence.char_indices() {
            let mass = u8::try_from(code)
                .ok()
                .and_then(|byte| masses.get(&byte))
                .ok_or(ResidueError::UnknownResidueCode { code, position })?;
            total += mass;
        }
        Ok(total)
    }

    /// Neutral mass of a free peptide: residue masses plus one water.
    pub fn peptide_mass(&self, sequence: &str) -> Result<f64, ResidueError> {
        Ok(self.sequence_residue_mass(sequence)? + self.water_mass)
    }
}

/// Replaces record positions in a duplicate-key error with residue abbreviations.
fn describe(library: &Library<Residue>, error: LibraryError) -> ResidueError {
    match error {
        LibraryError::DuplicateKey {
            name,
            key,
            first,
            second,
        } => {
            let abbr = |position: usize| {
                library
                    .records()
                    .get(position)
                    .map(|residue| residue.abbr().to_string())
                    .unwrap_or_else(|| format!("#{}", position))
            };
            ResidueError::DuplicateKey {
                attribute: name,
                key,
                first: abbr(first),
                second: abbr(second),
            }
        }
        other => ResidueError::Library(other),
    }
}
