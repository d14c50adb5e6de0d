use chrono::{DateTime, Utc};

use crate::answer::{AnswerStore, AnswerValue};
use crate::question::{Question, QuestionBank, Section};
use crate::scoring::{calculate_results, AssessmentResult, Jitter};
use crate::Error;

/// Outcome of [`AssessmentSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Next question in the same section
    Question,
    /// First question of the next section
    Section(Section),
    Completed,
}

/// One run through the assessment. Moves forward only; start over with
/// [`AssessmentSession::reset`].
#[derive(Debug)]
pub struct AssessmentSession<'a> {
    bank: &'a QuestionBank,
    section_index: usize,
    question_index: usize,
    answers: AnswerStore,
    started_at: DateTime<Utc>,
    completed: bool,
    result: Option<AssessmentResult>,
}

impl<'a> AssessmentSession<'a> {
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self {
            bank,
            section_index: 0,
            question_index: 0,
            answers: AnswerStore::default(),
            started_at: Utc::now(),
            completed: false,
            result: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.bank);
    }

    pub fn bank(&self) -> &'a QuestionBank {
        self.bank
    }

    pub fn current_section(&self) -> Section {
        Section::ALL[self.section_index]
    }

    pub fn section_number(&self) -> usize {
        self.section_index + 1
    }

    pub fn question_number(&self) -> usize {
        self.question_index + 1
    }

    pub fn section_questions(&self) -> Vec<&'a Question> {
        self.bank.by_section(self.current_section())
    }

    /// `None` once the assessment is completed.
    pub fn current_question(&self) -> Option<&'a Question> {
        if self.completed {
            return None;
        }
        self.section_questions().get(self.question_index).copied()
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Answers the current question.
    pub fn answer(&mut self, value: AnswerValue) -> Result<(), Error> {
        let question = self.current_question().ok_or(Error::AlreadyCompleted)?;
        self.answers.record(self.bank, &question.id, value)
    }

    pub fn advance(&mut self) -> Result<Step, Error> {
        if self.completed {
            return Err(Error::AlreadyCompleted);
        }
        if self.question_index + 1 < self.section_questions().len() {
            self.question_index += 1;
            Ok(Step::Question)
        } else if self.section_index + 1 < Section::ALL.len() {
            self.section_index += 1;
            self.question_index = 0;
            let section = self.current_section();
            tracing::info!(?section, "section started");
            Ok(Step::Section(section))
        } else {
            self.completed = true;
            tracing::info!(answers = self.answers.len(), "assessment completed");
            Ok(Step::Completed)
        }
    }

    /// Overall progress in percent.
    pub fn progress(&self) -> f64 {
        if self.completed {
            return 100.0;
        }
        let in_section = self.question_index as f64 / self.section_questions().len() as f64;
        (self.section_index as f64 * 100.0 + in_section * 100.0) / Section::ALL.len() as f64
    }

    /// Scores the run. The result is computed once and kept; later calls
    /// return the same result.
    pub fn finish(&mut self, jitter: &mut dyn Jitter) -> Result<&AssessmentResult, Error> {
        if !self.completed {
            return Err(Error::NotCompleted);
        }
        let (bank, answers) = (self.bank, &self.answers);
        Ok(self
            .result
            .get_or_insert_with(|| calculate_results(bank, answers, jitter)))
    }
}
