use crate::error::{CliError, Result};
use molecules::core::elements::MassKind;
use molecules::residues::catalog::ResidueCatalog;
use molecules::residues::error::ResidueError;
use molecules::residues::library::ResidueLibrary;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    Toml(PathBuf),
    Csv(PathBuf),
}

impl CatalogSource {
    /// Picks the catalog format from the file extension; anything but `.csv` is TOML.
    pub fn from_path(path: &Path) -> Self {
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Self::Csv(path.to_path_buf())
        } else {
            Self::Toml(path.to_path_buf())
        }
    }

    pub fn load(&self) -> Result<ResidueCatalog> {
        let (path, is_csv) = match self {
            Self::Builtin => {
                debug!("Using the built-in residue catalog.");
                return Ok(ResidueCatalog::standard().map_err(ResidueError::from)?);
            }
            Self::Toml(path) => (path, false),
            Self::Csv(path) => (path, true),
        };
        info!("Loading residue catalog from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let parsed = if is_csv {
            ResidueCatalog::from_csv_str(&content)
        } else {
            ResidueCatalog::from_toml_str(&content)
        };
        parsed.map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub catalog: CatalogSource,
    pub mass_table: MassKind,
    /// The selected mass table with per-element overrides applied.
    pub elements: HashMap<String, f64>,
}

impl AppConfig {
    pub fn residue_library(&self) -> Result<ResidueLibrary> {
        let catalog = self.catalog.load()?;
        Ok(ResidueLibrary::new(&catalog, &self.elements)?)
    }
}
