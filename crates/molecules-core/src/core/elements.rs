use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;

static MONOISOTOPIC_MASSES: Map<&'static str, f64> = phf_map! {
    "H" => 1.00782503207,
    "He" => 4.00260325415,
    "Li" => 7.01600455,
    "B" => 11.0093054,
    "C" => 12.0,
    "N" => 14.0030740048,
    "O" => 15.99491461956,
    "F" => 18.99840322,
    "Na" => 22.9897692809,
    "Mg" => 23.9850417,
    "Si" => 27.9769265325,
    "P" => 30.97376163,
    "S" => 31.97207100,
    "Cl" => 34.96885268,
    "K" => 38.96370668,
    "Ca" => 39.96259098,
    "Fe" => 55.9349375,
    "Cu" => 62.9295975,
    "Zn" => 63.9291422,
    "Br" => 78.9183371,
    "Se" => 79.9165213,
    "I" => 126.904473,
};

static AVERAGE_MASSES: Map<&'static str, f64> = phf_map! {
    "H" => 1.00794,
    "He" => 4.002602,
    "Li" => 6.941,
    "B" => 10.811,
    "C" => 12.0107,
    "N" => 14.0067,
    "O" => 15.9994,
    "F" => 18.9984032,
    "Na" => 22.98976928,
    "Mg" => 24.305,
    "Si" => 28.0855,
    "P" => 30.973762,
    "S" => 32.065,
    "Cl" => 35.453,
    "K" => 39.0983,
    "Ca" => 40.078,
    "Fe" => 55.845,
    "Cu" => 63.546,
    "Zn" => 65.38,
    "Br" => 79.904,
    "Se" => 78.96,
    "I" => 126.90447,
};

/// Lookup of atomic masses by element symbol.
///
/// Formulas only ever ask a table for single symbols, so any read-only mapping
/// can serve as a table. Symbols are case-sensitive (`"Co"` is cobalt, `"CO"`
/// is not a symbol).
pub trait ElementTable {
    fn mass_of(&self, symbol: &str) -> Option<f64>;

    fn contains(&self, symbol: &str) -> bool {
        self.mass_of(symbol).is_some()
    }
}

/// The built-in mass tables.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MassKind {
    /// Mass of the most abundant isotope of each element.
    #[default]
    Monoisotopic,
    /// Standard atomic weight, averaged over natural isotopic abundance.
    Average,
}

impl MassKind {
    fn table(self) -> &'static Map<&'static str, f64> {
        match self {
            MassKind::Monoisotopic => &MONOISOTOPIC_MASSES,
            MassKind::Average => &AVERAGE_MASSES,
        }
    }

    pub fn symbols(self) -> impl Iterator<Item = &'static str> {
        self.table().keys().copied()
    }

    /// Copies the built-in table into an owned map, e.g. to layer overrides on top.
    pub fn to_table(self) -> HashMap<String, f64> {
        self.table()
            .entries()
            .map(|(symbol, mass)| (symbol.to_string(), *mass))
            .collect()
    }
}

impl ElementTable for MassKind {
    fn mass_of(&self, symbol: &str) -> Option<f64> {
        self.table().get(symbol).copied()
    }
}

impl ElementTable for HashMap<String, f64> {
    fn mass_of(&self, symbol: &str) -> Option<f64> {
        self.get(symbol).copied()
    }
}

impl<T: ElementTable + ?Sized> ElementTable for &T {
    fn mass_of(&self, symbol: &str) -> Option<f64> {
        (**self).mass_of(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monoisotopic_is_default_and_carbon_is_exactly_twelve() {
        assert_eq!(MassKind::default(), MassKind::Monoisotopic);
        assert_eq!(MassKind::Monoisotopic.mass_of("C"), Some(12.0));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(MassKind::Monoisotopic.contains("Se"));
        assert!(!MassKind::Monoisotopic.contains("SE"));
        assert!(!MassKind::Monoisotopic.contains("se"));
    }

    #[test]
    fn average_and_monoisotopic_tables_cover_the_same_symbols() {
        let mut mono: Vec<_> = MassKind::Monoisotopic.symbols().collect();
        let mut avg: Vec<_> = MassKind::Average.symbols().collect();
        mono.sort_unstable();
        avg.sort_unstable();
        assert_eq!(mono, avg);
    }

    #[test]
    fn average_hydrogen_is_heavier_than_monoisotopic() {
        let mono = MassKind::Monoisotopic.mass_of("H").unwrap();
        let avg = MassKind::Average.mass_of("H").unwrap();
        assert!(avg > mono);
    }

    #[test]
    fn owned_table_accepts_overrides() {
        let mut table = MassKind::Monoisotopic.to_table();
        table.insert("D".to_string(), 2.01410177812);
        assert_eq!(table.mass_of("D"), Some(2.01410177812));
        assert_eq!(table.mass_of("C"), Some(12.0));
        assert_eq!(table.mass_of("Xx"), None);
    }

    #[test]
    fn mass_kind_deserializes_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: MassKind,
        }
        let parsed: Wrapper = toml::from_str("kind = \"average\"").unwrap();
        assert_eq!(parsed.kind, MassKind::Average);
    }
}
