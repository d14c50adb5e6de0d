use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::question::{Question, QuestionBank};
use crate::Error;

/// A selected option, or a likert/rating value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Numeric(u8),
    Choice(String),
}

impl AnswerValue {
    /// Parses raw input for the given question.
    ///
    /// Numeric questions take an integer. Choice questions take either a
    /// 1-based option number or the exact option text.
    pub fn parse_for(question: &Question, input: &str) -> Result<Self, Error> {
        let input = input.trim();
        if question.kind.numeric_range().is_some() {
            let value = input
                .parse::<u8>()
                .map_err(|_| Error::illegal_answer(&question.id, format!("not a number: {:?}", input)))?;
            return Ok(AnswerValue::Numeric(value));
        }
        if let Ok(number) = input.parse::<usize>() {
            return question
                .options()
                .get(number.wrapping_sub(1))
                .map(|option| AnswerValue::Choice(option.clone()))
                .ok_or_else(|| Error::illegal_answer(&question.id, format!("no option {}", number)));
        }
        Ok(AnswerValue::Choice(input.to_string()))
    }

    /// Checks the answer against the question's type and options.
    pub fn validate(&self, question: &Question) -> Result<(), Error> {
        match (self, question.kind.numeric_range()) {
            (AnswerValue::Numeric(value), Some(range)) if range.contains(value) => Ok(()),
            (AnswerValue::Numeric(value), Some(range)) => Err(Error::illegal_answer(
                &question.id,
                format!("{} is outside {}..={}", value, range.start(), range.end()),
            )),
            (AnswerValue::Choice(choice), None) if question.options().contains(choice) => Ok(()),
            (AnswerValue::Choice(choice), None) => Err(Error::illegal_answer(
                &question.id,
                format!("{:?} is not one of the options", choice),
            )),
            (AnswerValue::Numeric(_), None) => {
                Err(Error::illegal_answer(&question.id, "an option is expected"))
            }
            (AnswerValue::Choice(_), Some(_)) => {
                Err(Error::illegal_answer(&question.id, "a number is expected"))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub answer: AnswerValue,
    pub timestamp: DateTime<Utc>,
}

/// Latest answer per question, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    answers: Vec<Answer>,
}

impl AnswerStore {
    /// Records an answer, replacing any earlier answer to the same question.
    /// Unknown questions and answers that do not fit the question are rejected.
    pub fn record(
        &mut self,
        bank: &QuestionBank,
        question_id: &str,
        answer: AnswerValue,
    ) -> Result<(), Error> {
        let question = bank
            .question(question_id)
            .ok_or_else(|| Error::IllegalQuestion(question_id.to_string()))?;
        answer.validate(question)?;

        let before = self.answers.len();
        self.answers.retain(|a| a.question_id != question_id);
        tracing::debug!(
            question_id,
            replaced = before != self.answers.len(),
            "answer recorded"
        );
        self.answers.push(Answer {
            question_id: question_id.to_string(),
            answer,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    pub fn all(&self) -> &[Answer] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}
