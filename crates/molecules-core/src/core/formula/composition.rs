use super::error::FormulaError;
use super::parser;
use crate::core::elements::{ElementTable, MassKind};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// Largest magnitude a single count may reach, in either direction.
///
/// `i64::MIN` is excluded so that every count can be negated and every
/// formula can be written out in the signed grammar and read back.
pub const MAX_COUNT: i64 = i64::MAX;

/// Adds two counts, failing when the result leaves `-MAX_COUNT..=MAX_COUNT`.
pub(crate) fn add_counts(a: i64, b: i64) -> Option<i64> {
    a.checked_add(b).filter(|sum| *sum != i64::MIN)
}

fn overflow(symbol: &str) -> FormulaError {
    FormulaError::CountOverflow {
        symbol: symbol.to_string(),
    }
}

/// An immutable chemical composition: element symbol to signed count.
///
/// Counts are never zero. Every constructor and every arithmetic operation
/// drops elements whose net count reaches zero, so two formulas with the same
/// composition always compare equal.
///
/// The binary operators `+` and `-` panic if a count would leave
/// `-MAX_COUNT..=MAX_COUNT`; [`checked_add`](Self::checked_add) and
/// [`checked_sub`](Self::checked_sub) report that case as an error instead.
/// Negation cannot leave the range.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct EmpiricalFormula {
    counts: BTreeMap<String, i64>,
}

impl EmpiricalFormula {
    /// The empty formula.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a formula from `(symbol, count)` pairs. Repeated symbols are
    /// summed and zero totals dropped. Symbols are not checked against any
    /// element table; that happens when the mass is computed.
    ///
    /// # Panics
    ///
    /// Panics if a count or a per-symbol total is outside
    /// `-MAX_COUNT..=MAX_COUNT`. Use [`try_from_counts`](Self::try_from_counts)
    /// for counts that are not known in advance.
    pub fn from_counts<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self::try_from_counts(pairs).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Like [`from_counts`](Self::from_counts), but reports an out-of-range
    /// count as [`FormulaError::CountOverflow`].
    pub fn try_from_counts<I, S>(pairs: I) -> Result<Self, FormulaError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for (symbol, count) in pairs {
            let symbol: String = symbol.into();
            let total = counts.get(&symbol).copied().unwrap_or(0);
            let total = add_counts(total, count).ok_or_else(|| overflow(&symbol))?;
            counts.insert(symbol, total);
        }
        Ok(Self::from_map(counts))
    }

    fn from_map(mut counts: BTreeMap<String, i64>) -> Self {
        counts.retain(|_, count| *count != 0);
        Self { counts }
    }

    /// Parses the signed grammar (`"-CO+H"`) against the monoisotopic table.
    pub fn parse(text: &str) -> Result<Self, FormulaError> {
        Self::parse_with(text, &MassKind::Monoisotopic)
    }

    pub fn parse_with(text: &str, table: &dyn ElementTable) -> Result<Self, FormulaError> {
        parser::parse_signed(text, table)
            .map(Self::from_map)
            .map_err(|e| FormulaError::parse(text, e))
    }

    /// Parses the simple grammar (`"C(2)H(2)NO"`) against the monoisotopic table.
    pub fn parse_simple(text: &str) -> Result<Self, FormulaError> {
        Self::parse_simple_with(text, &MassKind::Monoisotopic)
    }

    pub fn parse_simple_with(text: &str, table: &dyn ElementTable) -> Result<Self, FormulaError> {
        parser::parse_simple(text, table)
            .map(Self::from_map)
            .map_err(|e| FormulaError::parse(text, e))
    }

    /// Count of `symbol`; zero when absent.
    pub fn count(&self, symbol: &str) -> i64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Non-zero counts, ordered by symbol.
    pub fn counts(&self) -> impl Iterator<Item = (&str, i64)> {
        self.counts.iter().map(|(symbol, count)| (symbol.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn mass(&self, table: &dyn ElementTable) -> Result<f64, FormulaError> {
        let mut total = 0.0;
        for (symbol, count) in &self.counts {
            let mass = table
                .mass_of(symbol)
                .ok_or_else(|| FormulaError::UnknownElement {
                    symbol: symbol.clone(),
                })?;
            total += *count as f64 * mass;
        }
        Ok(total)
    }

    pub fn monoisotopic_mass(&self) -> Result<f64, FormulaError> {
        self.mass(&MassKind::Monoisotopic)
    }

    /// `self + other`, or [`FormulaError::CountOverflow`] if a count leaves
    /// the supported range.
    pub fn checked_add(&self, other: &Self) -> Result<Self, FormulaError> {
        self.combine(other, 1)
    }

    /// `self - other`, or [`FormulaError::CountOverflow`] if a count leaves
    /// the supported range.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, FormulaError> {
        self.combine(other, -1)
    }

    // sign * count never overflows: stored counts exclude i64::MIN
    fn combine(&self, other: &Self, sign: i64) -> Result<Self, FormulaError> {
        let mut counts = self.counts.clone();
        for (symbol, count) in &other.counts {
            let total = counts.get(symbol).copied().unwrap_or(0);
            let total = add_counts(total, sign * count).ok_or_else(|| overflow(symbol))?;
            counts.insert(symbol.clone(), total);
        }
        Ok(Self::from_map(counts))
    }

    /// Symbols in Hill order: carbon, then hydrogen, then the rest
    /// alphabetically. Without carbon the order is purely alphabetical.
    fn hill_order(&self) -> Vec<(&str, i64)> {
        let mut ordered: Vec<_> = self.counts().collect();
        if self.counts.contains_key("C") {
            let rank = |symbol: &str| match symbol {
                "C" => 0,
                "H" => 1,
                _ => 2,
            };
            ordered.sort_by(|a, b| rank(a.0).cmp(&rank(b.0)).then(a.0.cmp(b.0)));
        }
        ordered
    }
}

impl fmt::Display for EmpiricalFormula {
    /// Renders the signed grammar: positive counts first, then one `-` term per
    /// negative count, so that parsing the output restores the formula.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ordered = self.hill_order();
        let write_term = |f: &mut fmt::Formatter<'_>, symbol: &str, count: i64| {
            if count == 1 {
                write!(f, "{}", symbol)
            } else {
                write!(f, "{}({})", symbol, count)
            }
        };
        for &(symbol, count) in ordered.iter().filter(|(_, c)| *c > 0) {
            write_term(f, symbol, count)?;
        }
        for &(symbol, count) in ordered.iter().filter(|(_, c)| *c < 0) {
            f.write_str("-")?;
            write_term(f, symbol, -count)?;
        }
        Ok(())
    }
}

impl FromStr for EmpiricalFormula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for &EmpiricalFormula {
    type Output = EmpiricalFormula;

    fn add(self, rhs: Self) -> EmpiricalFormula {
        self.checked_add(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Sub for &EmpiricalFormula {
    type Output = EmpiricalFormula;

    fn sub(self, rhs: Self) -> EmpiricalFormula {
        self.checked_sub(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Add for EmpiricalFormula {
    type Output = EmpiricalFormula;

    fn add(self, rhs: Self) -> EmpiricalFormula {
        &self + &rhs
    }
}

impl Sub for EmpiricalFormula {
    type Output = EmpiricalFormula;

    fn sub(self, rhs: Self) -> EmpiricalFormula {
        &self - &rhs
    }
}

impl Neg for &EmpiricalFormula {
    type Output = EmpiricalFormula;

    fn neg(self) -> EmpiricalFormula {
        EmpiricalFormula {
            counts: self
                .counts
                .iter()
                .map(|(symbol, count)| (symbol.clone(), -count))
                .collect(),
        }
    }
}

impl Neg for EmpiricalFormula {
    type Output = EmpiricalFormula;

    fn neg(self) -> EmpiricalFormula {
        -&self
    }
}
