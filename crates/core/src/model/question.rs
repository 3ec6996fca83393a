use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of answer options shown for every question.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("expected 4 options, got {0}")]
    WrongOptionCount(usize),
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    #[error("correct answer {0} is not among the options")]
    MissingAnswer(String),
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// One multiple-choice item: a fraction and four percent options.
///
/// `fraction` and every percent are renderer markup (`\frac{7}{13}`,
/// `53\frac{11}{13}\%`). The correct answer appears in `options` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    fraction: String,
    percent: String,
    options: Vec<String>,
}

impl Question {
    /// Build a question, checking option count, distinctness, and that the
    /// answer is present.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when any of those checks fails.
    pub fn new(
        fraction: impl Into<String>,
        percent: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let percent = percent.into();
        if options.len() != OPTION_COUNT {
            return Err(QuestionError::WrongOptionCount(options.len()));
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }
        if !options.contains(&percent) {
            return Err(QuestionError::MissingAnswer(percent));
        }
        Ok(Self {
            fraction: fraction.into(),
            percent,
            options,
        })
    }

    #[must_use]
    pub fn fraction(&self) -> &str {
        &self.fraction
    }

    #[must_use]
    pub fn percent(&self) -> &str {
        &self.percent
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Position of the correct answer within `options`.
    #[must_use]
    pub fn answer_index(&self) -> usize {
        self.options
            .iter()
            .position(|o| *o == self.percent)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.percent
    }
}

//
// ─── BATCH ────────────────────────────────────────────────────────────────────
//

/// Questions for one quiz session, in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBatch(Vec<Question>);

impl QuestionBatch {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self(questions)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.0.iter()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Question> {
        self.0
    }
}

impl<'a> IntoIterator for &'a QuestionBatch {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for QuestionBatch {
    type Item = Question;
    type IntoIter = std::vec::IntoIter<Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Question> for QuestionBatch {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
