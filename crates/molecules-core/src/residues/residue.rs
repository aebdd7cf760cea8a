use super::catalog::ResidueDefinition;
use super::error::ResidueError;
use crate::core::elements::ElementTable;
use crate::core::formula::EmpiricalFormula;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::trace;

/// The peptide backbone added to every side chain: `C(2)H(2)NO`.
pub static BACKBONE: LazyLock<EmpiricalFormula> =
    LazyLock::new(|| EmpiricalFormula::from_counts([("C", 2), ("H", 2), ("N", 1), ("O", 1)]));

/// Added to a residue to obtain its immonium ion: `-CO+H`.
pub static DELTA_IMMONIUM: LazyLock<EmpiricalFormula> =
    LazyLock::new(|| EmpiricalFormula::from_counts([("C", -1), ("O", -1), ("H", 1)]));

/// The termini of a free peptide: `H(2)O`.
pub static WATER: LazyLock<EmpiricalFormula> =
    LazyLock::new(|| EmpiricalFormula::from_counts([("H", 2), ("O", 1)]));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    // The 20 amino acids of the standard genetic code
    Common,
    // Genetically encoded, but only through recoding (Sec, Pyl)
    Standard,
    Uncommon,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Common => "common",
            Classification::Standard => "standard",
            Classification::Uncommon => "uncommon",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    letter: Option<char>,
    byte: Option<u8>,
    abbr: String,
    name: String,
    classification: Option<Classification>,
    side_chain: EmpiricalFormula,
    formula: EmpiricalFormula, // side chain plus backbone
    side_chain_mass: f64,
    residue_mass: f64,
    immonium_ion_mass: f64,
}

impl Residue {
    pub fn new(
        definition: &ResidueDefinition,
        table: &dyn ElementTable,
    ) -> Result<Self, ResidueError> {
        let invalid = |source| ResidueError::Formula {
            residue: definition.abbr.clone(),
            source,
        };
        let side_chain =
            EmpiricalFormula::parse_simple_with(&definition.side_chain, table).map_err(invalid)?;
        let formula = side_chain.checked_add(&BACKBONE).map_err(invalid)?;

        let side_chain_mass = side_chain.mass(table).map_err(invalid)?;
        let residue_mass = formula.mass(table).map_err(invalid)?;
        let immonium_ion_mass = residue_mass + DELTA_IMMONIUM.mass(table)?;

        let byte = match definition.letter {
            Some(code) if code.is_ascii() => Some(code as u8),
            Some(code) => {
                return Err(ResidueError::NonAsciiCode {
                    residue: definition.abbr.clone(),
                    code,
                });
            }
            None => None,
        };

        trace!(
            residue = %definition.abbr,
            formula = %formula,
            residue_mass,
            "Constructed residue."
        );

        Ok(Self {
            letter: definition.letter,
            byte,
            abbr: definition.abbr.clone(),
            name: definition.name.clone(),
            classification: definition.classification,
            side_chain,
            formula,
            side_chain_mass,
            residue_mass,
            immonium_ion_mass,
        })
    }

    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    /// The ASCII byte of the one-letter code.
    pub fn byte(&self) -> Option<u8> {
        self.byte
    }

    pub fn abbr(&self) -> &str {
        &self.abbr
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classification(&self) -> Option<Classification> {
        self.classification
    }

    pub fn side_chain(&self) -> &EmpiricalFormula {
        &self.side_chain
    }

    /// Side chain plus backbone, without termini.
    pub fn formula(&self) -> &EmpiricalFormula {
        &self.formula
    }

    pub fn side_chain_mass(&self) -> f64 {
        self.side_chain_mass
    }

    /// Uncharged residue mass: backbone plus side chain, no N- or C-terminus.
    pub fn residue_mass(&self) -> f64 {
        self.residue_mass
    }

    pub fn immonium_ion_mass(&self) -> f64 {
        self.immonium_ion_mass
    }

    pub fn is_common(&self) -> bool {
        self.classification == Some(Classification::Common)
    }

    pub fn is_standard(&self) -> bool {
        matches!(
            self.classification,
            Some(Classification::Common | Classification::Standard)
        )
    }
}
