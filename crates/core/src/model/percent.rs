use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::formatter::gcd;

/// Error returned when percent notation cannot be read back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("not a percent notation: {raw:?}")]
pub struct PercentParseError {
    raw: String,
}

/// An exact non-negative percent, written as a whole part plus an optional
/// proper fraction in lowest terms.
///
/// Values are always normalized on construction: the fractional numerator is
/// strictly between 0 and the denominator and shares no factor with it. An
/// exact percent is stored with `numerator == 0` and `denominator == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MixedPercent {
    whole: u128,
    numerator: u64,
    denominator: u64,
}

impl MixedPercent {
    /// Build a percent from possibly unreduced or improper parts.
    ///
    /// A zero denominator is treated as "no fractional part".
    #[must_use]
    pub fn new(whole: u128, numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            return Self::exact(whole);
        }
        let whole = whole.saturating_add(u128::from(numerator / denominator));
        let numerator = numerator % denominator;
        if numerator == 0 {
            return Self::exact(whole);
        }
        let common = gcd(numerator, denominator);
        Self {
            whole,
            numerator: numerator / common,
            denominator: denominator / common,
        }
    }

    #[must_use]
    pub fn exact(whole: u128) -> Self {
        Self {
            whole,
            numerator: 0,
            denominator: 1,
        }
    }

    #[must_use]
    pub fn whole(&self) -> u128 {
        self.whole
    }

    /// Fractional numerator, `0` when exact.
    #[must_use]
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Fractional denominator, `1` when exact.
    #[must_use]
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.numerator == 0
    }

    /// Same fractional part, different whole.
    #[must_use]
    pub fn with_whole(&self, whole: u128) -> Self {
        Self { whole, ..*self }
    }

    /// Human-readable form without markup, e.g. `53 11/13%`.
    #[must_use]
    pub fn plain(&self) -> String {
        if self.is_exact() {
            format!("{}%", self.whole)
        } else {
            format!("{} {}/{}%", self.whole, self.numerator, self.denominator)
        }
    }
}

impl fmt::Display for MixedPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            write!(f, "{}\\%", self.whole)
        } else {
            write!(
                f,
                "{}\\frac{{{}}}{{{}}}\\%",
                self.whole, self.numerator, self.denominator
            )
        }
    }
}

impl FromStr for MixedPercent {
    type Err = PercentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PercentParseError { raw: s.to_string() };
        let number = |raw: &str| -> Option<u128> {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            raw.parse().ok()
        };

        let body = s.trim().strip_suffix("\\%").ok_or_else(invalid)?;
        let Some((whole, fraction)) = body.split_once("\\frac{") else {
            return number(body).map(Self::exact).ok_or_else(invalid);
        };

        let (numerator, denominator) = fraction
            .strip_suffix('}')
            .and_then(|inner| inner.split_once("}{"))
            .ok_or_else(invalid)?;
        let whole = number(whole).ok_or_else(invalid)?;
        let numerator = number(numerator)
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(invalid)?;
        let denominator = number(denominator)
            .and_then(|d| u64::try_from(d).ok())
            .filter(|d| *d > 0)
            .ok_or_else(invalid)?;
        Ok(Self::new(whole, numerator, denominator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_reduces_and_carries() {
        let p = MixedPercent::new(12, 2, 8);
        assert_eq!((p.whole(), p.numerator(), p.denominator()), (12, 1, 4));

        let carried = MixedPercent::new(66, 3, 3);
        assert_eq!(carried, MixedPercent::exact(67));

        let improper = MixedPercent::new(1, 7, 3);
        assert_eq!((improper.whole(), improper.numerator(), improper.denominator()), (3, 1, 3));

        assert!(MixedPercent::new(5, 0, 9).is_exact());
        assert!(MixedPercent::new(5, 4, 0).is_exact());
    }

    #[test]
    fn renders_notation_and_plain_text() {
        let p = MixedPercent::new(53, 11, 13);
        assert_eq!(p.to_string(), r"53\frac{11}{13}\%");
        assert_eq!(p.plain(), "53 11/13%");
        assert_eq!(MixedPercent::exact(50).to_string(), r"50\%");
        assert_eq!(MixedPercent::exact(50).plain(), "50%");
    }

    #[test]
    fn parses_rendered_notation() {
        for raw in [r"50\%", r"33\frac{1}{3}\%", r"0\frac{4}{7}\%"] {
            let parsed: MixedPercent = raw.parse().unwrap();
            assert_eq!(parsed.to_string(), raw);
        }
    }

    #[test]
    fn parse_normalizes_unreduced_input() {
        let parsed: MixedPercent = r"12\frac{2}{8}\%".parse().unwrap();
        assert_eq!(parsed.to_string(), r"12\frac{1}{4}\%");
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["50%", r"\%", r"x\%", r"1\frac{1}{0}\%", r"1\frac{1}\%"] {
            assert!(raw.parse::<MixedPercent>().is_err(), "{raw:?}");
        }
    }
}
