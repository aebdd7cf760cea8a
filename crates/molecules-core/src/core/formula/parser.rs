use super::composition::add_counts;
use super::error::ParseError;
use crate::core::elements::ElementTable;
use std::collections::BTreeMap;

/// Single-pass scanner over formula text.
///
/// Both grammars share the same term scanner; the signed grammar only adds the
/// `+`/`-` separators between terms.
struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    table: &'a dyn ElementTable,
    counts: BTreeMap<String, i64>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, table: &'a dyn ElementTable) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            table,
            counts: BTreeMap::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn unexpected(&self) -> ParseError {
        let found = self.text[self.pos..].chars().next().unwrap_or('\0');
        ParseError::UnexpectedCharacter {
            found,
            position: self.pos,
        }
    }

    /// Scans `Symbol[(count)]` pairs until the end of input or a sign, adding
    /// `sign * count` for each. Returns the number of symbols scanned.
    fn term(&mut self, sign: i64) -> Result<usize, ParseError> {
        let mut scanned = 0;
        while let Some(byte) = self.peek() {
            match byte {
                b'+' | b'-' => break,
                b')' => {
                    return Err(ParseError::UnbalancedParenthesis { position: self.pos });
                }
                b'A'..=b'Z' => {
                    let start = self.pos;
                    let symbol = self.symbol()?;
                    let count = self.count()?;
                    let total = self.counts.get(&symbol).copied().unwrap_or(0);
                    let Some(total) = add_counts(total, sign * count) else {
                        return Err(ParseError::CountOverflow {
                            symbol,
                            position: start,
                        });
                    };
                    self.counts.insert(symbol, total);
                    scanned += 1;
                }
                _ => return Err(self.unexpected()),
            }
        }
        Ok(scanned)
    }

    fn symbol(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.pos += 1;
        if matches!(self.peek(), Some(b'a'..=b'z')) {
            self.pos += 1;
        }
        let symbol = &self.text[start..self.pos];
        if !self.table.contains(symbol) {
            return Err(ParseError::UnknownElement {
                symbol: symbol.to_string(),
                position: start,
            });
        }
        Ok(symbol.to_string())
    }

    fn count(&mut self) -> Result<i64, ParseError> {
        if self.peek() != Some(b'(') {
            return Ok(1);
        }
        let open = self.pos;
        let digits_start = open + 1;
        let mut close = digits_start;
        loop {
            match self.bytes.get(close) {
                Some(b')') => break,
                Some(b'(') | None => {
                    return Err(ParseError::UnbalancedParenthesis { position: open });
                }
                Some(_) => close += 1,
            }
        }
        let raw = &self.text[digits_start..close];
        self.pos = close + 1;

        let invalid = || ParseError::InvalidCount {
            count: raw.to_string(),
            position: digits_start,
        };
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        match raw.parse::<i64>() {
            Ok(0) | Err(_) => Err(invalid()),
            Ok(n) => Ok(n),
        }
    }

    fn finish(mut self) -> BTreeMap<String, i64> {
        self.counts.retain(|_, count| *count != 0);
        self.counts
    }
}

/// Parses the simple grammar: `Symbol[(count)]...`, all counts added.
pub(crate) fn parse_simple(
    text: &str,
    table: &dyn ElementTable,
) -> Result<BTreeMap<String, i64>, ParseError> {
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut scanner = Scanner::new(text, table);
    scanner.term(1)?;
    if !scanner.at_end() {
        return Err(scanner.unexpected());
    }
    Ok(scanner.finish())
}

/// Parses the signed grammar: `[+|-]term(+term|-term)*` where each term is a
/// simple-grammar fragment.
pub(crate) fn parse_signed(
    text: &str,
    table: &dyn ElementTable,
) -> Result<BTreeMap<String, i64>, ParseError> {
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut scanner = Scanner::new(text, table);
    let mut sign = match scanner.peek() {
        Some(b'-') => {
            scanner.pos += 1;
            -1
        }
        Some(b'+') => {
            scanner.pos += 1;
            1
        }
        _ => 1,
    };
    loop {
        let start = scanner.pos;
        if scanner.term(sign)? == 0 {
            return Err(ParseError::EmptyTerm { position: start });
        }
        match scanner.peek() {
            None => break,
            Some(b'+') => sign = 1,
            Some(b'-') => sign = -1,
            Some(_) => return Err(scanner.unexpected()),
        }
        scanner.pos += 1;
    }
    Ok(scanner.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::elements::MassKind;

    const TABLE: MassKind = MassKind::Monoisotopic;

    fn counts(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs.iter().map(|(s, n)| (s.to_string(), *n)).collect()
    }

    #[test]
    fn simple_parses_counts_and_implicit_ones() {
        let parsed = parse_simple("C(2)H(2)NO", &TABLE).unwrap();
        assert_eq!(parsed, counts(&[("C", 2), ("H", 2), ("N", 1), ("O", 1)]));
    }

    #[test]
    fn simple_accumulates_repeated_symbols() {
        let parsed = parse_simple("CH(3)C", &TABLE).unwrap();
        assert_eq!(parsed, counts(&[("C", 2), ("H", 3)]));
    }

    #[test]
    fn simple_reads_two_letter_symbols() {
        let parsed = parse_simple("CH(3)Se", &TABLE).unwrap();
        assert_eq!(parsed, counts(&[("C", 1), ("H", 3), ("Se", 1)]));
    }

    #[test]
    fn simple_rejects_signs() {
        assert_eq!(
            parse_simple("-CO+H", &TABLE),
            Err(ParseError::UnexpectedCharacter {
                found: '-',
                position: 0
            })
        );
        assert!(matches!(
            parse_simple("C+H", &TABLE),
            Err(ParseError::UnexpectedCharacter { found: '+', position: 1 })
        ));
    }

    #[test]
    fn signed_cancels_and_prunes_zero_counts() {
        let parsed = parse_signed("-CO+H", &TABLE).unwrap();
        assert_eq!(parsed, counts(&[("C", -1), ("O", -1), ("H", 1)]));

        let cancelled = parse_signed("CO-CO+H", &TABLE).unwrap();
        assert_eq!(cancelled, counts(&[("H", 1)]));
        assert!(!cancelled.contains_key("C"));
    }

    #[test]
    fn signed_accepts_leading_plus() {
        assert_eq!(
            parse_signed("+H(2)O", &TABLE).unwrap(),
            counts(&[("H", 2), ("O", 1)])
        );
    }

    #[test]
    fn full_cancellation_yields_empty_counts() {
        assert!(parse_signed("H(2)O-H(2)O", &TABLE).unwrap().is_empty());
    }

    #[test]
    fn empty_input_and_empty_terms_are_rejected() {
        assert_eq!(parse_simple("", &TABLE), Err(ParseError::Empty));
        assert_eq!(parse_signed("", &TABLE), Err(ParseError::Empty));
        assert_eq!(
            parse_signed("-", &TABLE),
            Err(ParseError::EmptyTerm { position: 1 })
        );
        assert_eq!(
            parse_signed("C+", &TABLE),
            Err(ParseError::EmptyTerm { position: 2 })
        );
        assert_eq!(
            parse_signed("C+-H", &TABLE),
            Err(ParseError::EmptyTerm { position: 2 })
        );
    }

    #[test]
    fn unknown_symbols_are_reported_with_position() {
        assert_eq!(
            parse_simple("CH(2)Xx", &TABLE),
            Err(ParseError::UnknownElement {
                symbol: "Xx".to_string(),
                position: 5
            })
        );
        assert!(matches!(
            parse_simple("Q", &TABLE),
            Err(ParseError::UnknownElement { .. })
        ));
    }

    #[test]
    fn symbols_are_case_sensitive() {
        assert!(matches!(
            parse_simple("co", &TABLE),
            Err(ParseError::UnexpectedCharacter { found: 'c', position: 0 })
        ));
        assert!(matches!(
            parse_simple("Co", &TABLE),
            Err(ParseError::UnknownElement { .. })
        ));
    }

    #[test]
    fn counts_must_be_positive_integers() {
        for bad in ["C(0)", "C(-1)", "C(1.5)", "C()", "C(x)", "C(9223372036854775808)"] {
            assert!(
                matches!(
                    parse_simple(bad, &TABLE),
                    Err(ParseError::InvalidCount { position: 2, .. })
                ),
                "expected invalid count for {bad}"
            );
        }
    }

    #[test]
    fn counts_up_to_the_full_range_are_accepted() {
        assert_eq!(
            parse_simple("C(5000000000)", &TABLE).unwrap(),
            counts(&[("C", 5_000_000_000)])
        );
        assert_eq!(
            parse_signed("-C(9223372036854775807)", &TABLE).unwrap(),
            counts(&[("C", -i64::MAX)])
        );
    }

    #[test]
    fn accumulated_counts_that_overflow_are_rejected() {
        assert_eq!(
            parse_simple("C(9223372036854775807)HC", &TABLE),
            Err(ParseError::CountOverflow {
                symbol: "C".to_string(),
                position: 23
            })
        );
        assert_eq!(
            parse_signed("-C(9223372036854775807)-C", &TABLE),
            Err(ParseError::CountOverflow {
                symbol: "C".to_string(),
                position: 24
            })
        );
    }

    #[test]
    fn parentheses_must_balance() {
        assert_eq!(
            parse_simple("C(2", &TABLE),
            Err(ParseError::UnbalancedParenthesis { position: 1 })
        );
        assert_eq!(
            parse_simple("C2)", &TABLE),
            Err(ParseError::UnexpectedCharacter {
                found: '2',
                position: 1
            })
        );
        assert_eq!(
            parse_simple("CH)", &TABLE),
            Err(ParseError::UnbalancedParenthesis { position: 2 })
        );
        assert_eq!(
            parse_simple("C((2))", &TABLE),
            Err(ParseError::UnbalancedParenthesis { position: 1 })
        );
    }

    #[test]
    fn stray_characters_are_rejected() {
        assert!(matches!(
            parse_simple("C H", &TABLE),
            Err(ParseError::UnexpectedCharacter { found: ' ', position: 1 })
        ));
        assert!(matches!(
            parse_simple("C(2)(3)", &TABLE),
            Err(ParseError::UnexpectedCharacter { found: '(', position: 4 })
        ));
        assert!(matches!(
            parse_signed("CÅ", &TABLE),
            Err(ParseError::UnexpectedCharacter { found: 'Å', position: 1 })
        ));
    }
}
