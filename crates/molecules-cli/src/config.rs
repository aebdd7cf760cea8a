pub mod defaults;
pub mod models;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use models::{AppConfig, CatalogSource};
use molecules::core::elements::MassKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    catalog: Option<PathBuf>,
    #[serde(rename = "mass-table")]
    mass_table: Option<MassKind>,
    elements: Option<HashMap<String, f64>>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Combines file settings with command-line flags (flags win) and defaults.
    /// A relative catalog path in the file is taken relative to the file itself.
    pub fn merge_with_cli(self, cli: &Cli) -> Result<AppConfig> {
        let defaults = DefaultsConfig::default();

        let mass_table = cli
            .mass_table
            .map(MassKind::from)
            .or(self.mass_table)
            .unwrap_or(defaults.mass_table);

        let catalog = match (&cli.catalog, &self.catalog) {
            (Some(path), _) => CatalogSource::from_path(path),
            (None, Some(path)) => CatalogSource::from_path(&self.resolve(path)),
            (None, None) => CatalogSource::Builtin,
        };

        let mut elements = mass_table.to_table();
        for (symbol, mass) in self.elements.unwrap_or_default() {
            if !is_element_symbol(&symbol) {
                return Err(CliError::Config(format!(
                    "`elements.{}` is not a valid element symbol (expected e.g. 'C' or 'Se').",
                    symbol
                )));
            }
            if !(mass.is_finite() && mass > 0.0) {
                return Err(CliError::Config(format!(
                    "`elements.{}` must be a positive mass, got {}.",
                    symbol, mass
                )));
            }
            debug!("Overriding mass of element {} with {}", symbol, mass);
            elements.insert(symbol, mass);
        }

        Ok(AppConfig {
            catalog,
            mass_table,
            elements,
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// One uppercase ASCII letter, optionally followed by one lowercase letter.
fn is_element_symbol(symbol: &str) -> bool {
    let bytes = symbol.as_bytes();
    match bytes {
        [first] => first.is_ascii_uppercase(),
        [first, second] => first.is_ascii_uppercase() && second.is_ascii_lowercase(),
        _ => false,
    }
}

pub fn load(cli: &Cli) -> Result<AppConfig> {
    let partial = match &cli.config {
        Some(path) => PartialAppConfig::from_file(path)?,
        None => PartialAppConfig::default(),
    };
    partial.merge_with_cli(cli)
}
