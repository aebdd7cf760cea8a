use super::error::CatalogError;
use super::residue::Classification;
use serde::Deserialize;

const STANDARD_CATALOG: &str = include_str!("../../data/residues.toml");

/// One residue as written in a catalog: everything needed to build a
/// [`Residue`](super::residue::Residue), before any formula is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResidueDefinition {
    #[serde(default)]
    pub letter: Option<char>,
    pub abbr: String,
    pub name: String,
    pub side_chain: String,
    #[serde(default)]
    pub classification: Option<Classification>,
}

impl ResidueDefinition {
    pub fn new(
        letter: Option<char>,
        abbr: &str,
        name: &str,
        side_chain: &str,
        classification: Option<Classification>,
    ) -> Self {
        Self {
            letter,
            abbr: abbr.to_string(),
            name: name.to_string(),
            side_chain: side_chain.to_string(),
            classification,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    residue: Vec<ResidueDefinition>,
}

/// An ordered list of residue definitions. Declaration order is preserved
/// into every view a [`ResidueLibrary`](super::library::ResidueLibrary) builds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueCatalog {
    definitions: Vec<ResidueDefinition>,
}

impl ResidueCatalog {
    /// The 36 built-in residues: 20 common, 2 standard (Sec, Pyl), 14 uncommon
    /// without one-letter codes.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_toml_str(STANDARD_CATALOG)
    }

    /// Reads a `[[residue]]` array of tables.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Ok(Self {
            definitions: file.residue,
        })
    }

    /// Reads CSV with a `letter,abbr,name,side-chain,classification` header.
    /// Empty `letter` or `classification` cells mean the value is absent.
    pub fn from_csv_str(text: &str) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        let definitions = reader
            .deserialize::<ResidueDefinition>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { definitions })
    }

    pub fn definitions(&self) -> &[ResidueDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<ResidueDefinition> for ResidueCatalog {
    fn from_iter<I: IntoIterator<Item = ResidueDefinition>>(iter: I) -> Self {
        Self {
            definitions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_all_residues_in_order() {
        let catalog = ResidueCatalog::standard().unwrap();
        assert_eq!(catalog.len(), 36);

        let first = &catalog.definitions()[0];
        assert_eq!(
            first,
            &ResidueDefinition::new(
                Some('A'),
                "Ala",
                "Alanine",
                "CH(3)",
                Some(Classification::Common)
            )
        );
        let last = catalog.definitions().last().unwrap();
        assert_eq!(last.abbr, "Sar");
        assert_eq!(last.letter, None);
    }

    #[test]
    fn standard_catalog_classifications_add_up() {
        let catalog = ResidueCatalog::standard().unwrap();
        let count = |class| {
            catalog
                .definitions()
                .iter()
                .filter(|d| d.classification == Some(class))
                .count()
        };
        assert_eq!(count(Classification::Common), 20);
        assert_eq!(count(Classification::Standard), 2);
        assert_eq!(count(Classification::Uncommon), 14);
        assert_eq!(
            catalog.definitions().iter().filter(|d| d.letter.is_some()).count(),
            22
        );
    }

    #[test]
    fn toml_catalog_allows_missing_letter_and_classification() {
        let text = r#"
            [[residue]]
            abbr = "Orn"
            name = "Ornithine"
            side-chain = "C(3)H(8)N"
        "#;
        let catalog = ResidueCatalog::from_toml_str(text).unwrap();
        assert_eq!(
            catalog.definitions(),
            &[ResidueDefinition::new(None, "Orn", "Ornithine", "C(3)H(8)N", None)]
        );
    }

    #[test]
    fn toml_catalog_rejects_unknown_fields() {
        let text = r#"
            [[residue]]
            abbr = "Ala"
            name = "Alanine"
            side-chain = "CH(3)"
            charge = 1
        "#;
        assert!(matches!(
            ResidueCatalog::from_toml_str(text),
            Err(CatalogError::Toml(_))
        ));
    }

    #[test]
    fn toml_catalog_rejects_multi_character_letters() {
        let text = r#"
            [[residue]]
            letter = "AB"
            abbr = "Ala"
            name = "Alanine"
            side-chain = "CH(3)"
        "#;
        assert!(ResidueCatalog::from_toml_str(text).is_err());
    }

    #[test]
    fn csv_catalog_reads_empty_cells_as_absent() {
        let text = "\
letter,abbr,name,side-chain,classification
A, Ala, Alanine, CH(3), common
,Sar,Sarcosine,CH(3),
";
        let catalog = ResidueCatalog::from_csv_str(text).unwrap();
        assert_eq!(
            catalog.definitions(),
            &[
                ResidueDefinition::new(
                    Some('A'),
                    "Ala",
                    "Alanine",
                    "CH(3)",
                    Some(Classification::Common)
                ),
                ResidueDefinition::new(None, "Sar", "Sarcosine", "CH(3)", None),
            ]
        );
    }

    #[test]
    fn csv_catalog_rejects_unknown_classification() {
        let text = "letter,abbr,name,side-chain,classification\nA,Ala,Alanine,CH(3),rare\n";
        assert!(matches!(
            ResidueCatalog::from_csv_str(text),
            Err(CatalogError::Csv(_))
        ));
    }
}
