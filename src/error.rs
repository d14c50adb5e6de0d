use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The question id is not part of the bank
    #[error("unknown question: {0}")]
    IllegalQuestion(String),

    /// The answer does not fit the question's type
    #[error("illegal answer for {question_id}: {reason}")]
    IllegalAnswer { question_id: String, reason: String },

    #[error("invalid question bank: {0}")]
    InvalidBank(String),

    /// Scoring was requested before the last section was traversed
    #[error("assessment is not completed yet")]
    NotCompleted,

    #[error("assessment is already completed")]
    AlreadyCompleted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn illegal_answer(question_id: &str, reason: impl Into<String>) -> Self {
        Error::IllegalAnswer {
            question_id: question_id.to_string(),
            reason: reason.into(),
        }
    }
}
