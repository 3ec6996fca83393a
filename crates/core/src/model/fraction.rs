use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while building or parsing a fraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FractionError {
    #[error("numerator must be at least 1, got {0}")]
    NumeratorTooSmall(u64),
    #[error("denominator must be at least 2, got {0}")]
    DenominatorTooSmall(u64),
    #[error("not a fraction notation: {0:?}")]
    InvalidNotation(String),
}

//
// ─── FRACTION PAIR ────────────────────────────────────────────────────────────
//

/// A proper-or-improper fraction used as the source of one question.
///
/// Invariant: `numerator >= 1` and `denominator >= 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FractionPair {
    numerator: u64,
    denominator: u64,
}

impl FractionPair {
    /// Build a validated pair.
    ///
    /// # Errors
    ///
    /// Returns `FractionError` when either bound is violated.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, FractionError> {
        if numerator < 1 {
            return Err(FractionError::NumeratorTooSmall(numerator));
        }
        if denominator < 2 {
            return Err(FractionError::DenominatorTooSmall(denominator));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    #[must_use]
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    #[must_use]
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Markup understood by the math renderer, e.g. `\frac{7}{13}`.
    #[must_use]
    pub fn notation(&self) -> String {
        format!("\\frac{{{}}}{{{}}}", self.numerator, self.denominator)
    }

    /// Parse the `\frac{n}{d}` markup back into a pair.
    ///
    /// # Errors
    ///
    /// Returns `FractionError::InvalidNotation` when the text is not exactly one
    /// `\frac` with two unsigned integer arguments, or a bound error when the
    /// parsed values are out of range.
    pub fn from_notation(text: &str) -> Result<Self, FractionError> {
        let invalid = || FractionError::InvalidNotation(text.to_string());

        let rest = text.trim().strip_prefix("\\frac{").ok_or_else(invalid)?;
        let (numerator, rest) = rest.split_once("}{").ok_or_else(invalid)?;
        let denominator = rest.strip_suffix('}').ok_or_else(invalid)?;

        let numerator = parse_digits(numerator).ok_or_else(invalid)?;
        let denominator = parse_digits(denominator).ok_or_else(invalid)?;
        Self::new(numerator, denominator)
    }
}

fn parse_digits(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

impl fmt::Display for FractionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for FractionPair {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
