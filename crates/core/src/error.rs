use thiserror::Error;

use crate::model::{FractionError, PercentParseError, QuestionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fraction(#[from] FractionError),
    #[error(transparent)]
    Percent(#[from] PercentParseError),
    #[error(transparent)]
    Question(#[from] QuestionError),
}
