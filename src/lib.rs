//! CareerFit readiness assessment for wearable developers.
//!
//! A fixed question bank in three sections (psychometric, technical, WISCAR)
//! is walked by an [`AssessmentSession`]; the collected answers are scored
//! into category scores, WISCAR dimensions, an overall confidence and a
//! Yes/Maybe/No recommendation with follow-up guidance.

pub mod answer;
pub mod bulk;
mod error;
pub mod guidance;
pub mod logging;
pub mod question;
pub mod report;
pub mod scoring;
pub mod session;
pub mod storage;

pub use answer::{Answer, AnswerStore, AnswerValue};
pub use bulk::read_bulk;
pub use error::Error;
pub use question::{Category, CategoryGroup, Question, QuestionBank, QuestionType, Section, QUESTIONS};
pub use report::{write_report, FitBand, Report};
pub use scoring::{
    calculate_results, AssessmentResult, FixedJitter, Jitter, NoJitter, Recommendation, RngJitter,
    WiscarScores,
};
pub use session::{AssessmentSession, Step};
pub use storage::{JsonFileStore, MemoryStore, ResultStore};
