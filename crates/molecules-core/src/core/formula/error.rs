use thiserror::Error;

/// Malformed formula text. Positions are byte offsets into the parsed string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Formula text is empty")]
    Empty,

    #[error("Expected a formula term at position {position}")]
    EmptyTerm { position: usize },

    #[error("Unknown element symbol '{symbol}' at position {position}")]
    UnknownElement { symbol: String, position: usize },

    #[error("Invalid count '{count}' at position {position}: counts must be positive integers")]
    InvalidCount { count: String, position: usize },

    #[error("Count of '{symbol}' at position {position} exceeds the supported range")]
    CountOverflow { symbol: String, position: usize },

    #[error("Unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },

    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { found: char, position: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Failed to parse formula '{text}': {source}")]
    Parse {
        text: String,
        #[source]
        source: ParseError,
    },

    #[error("No atomic mass is known for element '{symbol}'")]
    UnknownElement { symbol: String },

    #[error("Count of '{symbol}' exceeds the supported range")]
    CountOverflow { symbol: String },
}

impl FormulaError {
    pub(crate) fn parse(text: &str, source: ParseError) -> Self {
        Self::Parse {
            text: text.to_string(),
            source,
        }
    }
}
