use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use percent_core::model::{FractionError, FractionPair};

use crate::error::PairSourceError;

/// A numerator/denominator pair exactly as an external source reported it.
///
/// Fields are optional so that a payload entry with missing or non-numeric
/// values still decodes and can be rejected on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPair {
    #[serde(default, deserialize_with = "lenient_int")]
    pub num: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub den: Option<i64>,
}

/// Why a `RawPair` could not become a `FractionPair`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PairRejection {
    #[error("missing or non-numeric value")]
    Missing,
    #[error("negative value {0}")]
    Negative(i64),
    #[error(transparent)]
    Fraction(#[from] FractionError),
}

impl RawPair {
    #[must_use]
    pub fn new(num: i64, den: i64) -> Self {
        Self {
            num: Some(num),
            den: Some(den),
        }
    }

    /// Validate against the `FractionPair` bounds.
    ///
    /// # Errors
    ///
    /// Returns `PairRejection` for missing, negative, or out-of-range values.
    pub fn validate(&self) -> Result<FractionPair, PairRejection> {
        let (Some(num), Some(den)) = (self.num, self.den) else {
            return Err(PairRejection::Missing);
        };
        let num = u64::try_from(num).map_err(|_| PairRejection::Negative(num))?;
        let den = u64::try_from(den).map_err(|_| PairRejection::Negative(den))?;
        Ok(FractionPair::new(num, den)?)
    }
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Capability the assembler depends on to fetch fractions from outside.
///
/// Implementations may return fewer or more pairs than asked for, and any of
/// them may be invalid; the assembler sorts that out. Retries, if any, belong
/// to the implementation.
#[async_trait]
pub trait PairSource: Send + Sync {
    /// Ask for up to `count` numerator/denominator pairs.
    ///
    /// # Errors
    ///
    /// Returns `PairSourceError` when the source is unavailable or its reply
    /// cannot be used.
    async fn request_pairs(&self, count: usize) -> Result<Vec<RawPair>, PairSourceError>;
}
