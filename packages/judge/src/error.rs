use common::language::ParseLanguageError;
use thiserror::Error;

/// Errors surfaced by the submission pipeline.
///
/// Judging outcomes (wrong answer, limit violations, crashes) are not
/// errors; they are verdict data. This enum covers the cases where judging
/// could not run or its result could not be recorded.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    UnsupportedLanguage(ParseLanguageError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Source rejected by safety scan: {0}")]
    UnsafeSource(String),

    #[error("Judging canceled")]
    Canceled,

    #[error("Question store error: {0}")]
    Store(String),

    /// The submission was judged but the result could not be saved. The
    /// verdict is not committed; callers may retry persistence.
    #[error("Judged but not recorded: {0}")]
    Persistence(String),
}

impl From<ParseLanguageError> for JudgeError {
    fn from(e: ParseLanguageError) -> Self {
        JudgeError::UnsupportedLanguage(e)
    }
}

pub type Result<T> = std::result::Result<T, JudgeError>;
