mod fraction;
mod percent;
mod question;

pub use fraction::{FractionError, FractionPair};
pub use percent::{MixedPercent, PercentParseError};
pub use question::{OPTION_COUNT, Question, QuestionBatch, QuestionError};
