//! Career fit scoring.
//!
//! Category scores are weighted averages of per-answer normalized scores:
//!
//! - a question with a correct answer scores 100 when matched exactly and 20
//!   otherwise (wrong answers keep a partial-credit floor)
//! - an ungraded numeric answer is scaled by its group (likert x20, rating x10)
//! - an ungraded choice scores 60
//!
//! A group without answers scores a neutral 50. The six WISCAR dimensions are
//! derived from the two category scores plus bounded noise from a [`Jitter`]
//! source, then clamped to 0..=100. The noise is intentional: it keeps the
//! result from looking more precise than the questionnaire is.

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::answer::{AnswerStore, AnswerValue};
use crate::guidance::{alternative_roles, next_steps, top_roles};
use crate::question::{CategoryGroup, Question, QuestionBank};

pub const NEUTRAL_SCORE: f64 = 50.0;
pub const CORRECT_SCORE: f64 = 100.0;
pub const INCORRECT_SCORE: f64 = 20.0;
pub const UNGRADED_CHOICE_SCORE: f64 = 60.0;

const PSYCHOMETRIC_SPREAD: f64 = 10.0;
const TECHNICAL_SPREAD: f64 = 7.5;
const LEARNING_SPREAD: f64 = 7.5;
const ALIGNMENT_SPREAD: f64 = 10.0;

/// Source of the bounded noise added to each WISCAR dimension.
pub trait Jitter {
    /// Returns an offset within `-spread..=spread`.
    fn jitter(&mut self, spread: f64) -> f64;
}

/// No noise at all; scores are exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn jitter(&mut self, _spread: f64) -> f64 {
        0.0
    }
}

/// A constant offset, limited to the allowed spread.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn jitter(&mut self, spread: f64) -> f64 {
        self.0.clamp(-spread, spread)
    }
}

/// Uniform noise drawn from a random number generator.
#[derive(Debug, Clone)]
pub struct RngJitter<R> {
    rng: R,
}

impl<R: Rng> RngJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngJitter<Mcg128Xsl64> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(Mcg128Xsl64::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(Mcg128Xsl64::from_entropy())
    }
}

impl<R: Rng> Jitter for RngJitter<R> {
    fn jitter(&mut self, spread: f64) -> f64 {
        self.rng.gen_range(-spread..=spread)
    }
}

/// Picks the noise source from command line settings: exact scores, a
/// reproducible seed, or fresh entropy.
pub fn jitter_source(seed: Option<u64>, exact: bool) -> Box<dyn Jitter> {
    match (exact, seed) {
        (true, _) => Box::new(NoJitter),
        (false, Some(seed)) => Box::new(RngJitter::seeded(seed)),
        (false, None) => Box::new(RngJitter::from_entropy()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WiscarScores {
    pub will: f64,
    pub interest: f64,
    pub skill: f64,
    pub cognitive: f64,
    pub ability_to_learn: f64,
    pub real_world_alignment: f64,
}

impl WiscarScores {
    /// Derives the six dimensions. Noise is drawn in field order.
    pub fn derive(psychometric: f64, technical: f64, jitter: &mut dyn Jitter) -> Self {
        let blended = (psychometric + technical) / 2.0;
        let mut perturb = |base: f64, spread: f64| clamp_score(base + jitter.jitter(spread));
        Self {
            will: perturb(psychometric, PSYCHOMETRIC_SPREAD),
            interest: perturb(psychometric, PSYCHOMETRIC_SPREAD),
            skill: perturb(technical, TECHNICAL_SPREAD),
            cognitive: perturb(technical, TECHNICAL_SPREAD),
            ability_to_learn: perturb(blended, LEARNING_SPREAD),
            real_world_alignment: perturb(blended, ALIGNMENT_SPREAD),
        }
    }

    pub fn values(&self) -> [f64; 6] {
        [
            self.will,
            self.interest,
            self.skill,
            self.cognitive,
            self.ability_to_learn,
            self.real_world_alignment,
        ]
    }

    pub fn mean(&self) -> f64 {
        self.values().iter().sum::<f64>() / 6.0
    }

    pub fn rounded(&self) -> Self {
        Self {
            will: self.will.round(),
            interest: self.interest.round(),
            skill: self.skill.round(),
            cognitive: self.cognitive.round(),
            ability_to_learn: self.ability_to_learn.round(),
            real_world_alignment: self.real_world_alignment.round(),
        }
    }
}

fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Yes,
    Maybe,
    No,
}

impl Recommendation {
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence {
            75..=u8::MAX => Recommendation::Yes,
            55..=74 => Recommendation::Maybe,
            _ => Recommendation::No,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub user_id: String,
    pub domain: String,
    pub psychometric_score: u8,
    pub technical_readiness_score: u8,
    pub wiscars: WiscarScores,
    pub overall_confidence: u8,
    pub recommendation: Recommendation,
    pub next_steps: Vec<String>,
    pub top_roles: Vec<String>,
    pub alternative_roles: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Normalized 0..=100 score of a single answer within a group.
pub fn normalized_score(question: &Question, answer: &AnswerValue, group: CategoryGroup) -> f64 {
    match (&question.correct_answer, answer) {
        (Some(correct), AnswerValue::Choice(choice)) if choice == correct => CORRECT_SCORE,
        (Some(_), _) => INCORRECT_SCORE,
        (None, AnswerValue::Numeric(value)) => f64::from(*value) * group.numeric_scale(),
        (None, AnswerValue::Choice(_)) => UNGRADED_CHOICE_SCORE,
    }
}

/// Weighted average score of the answered questions in `group`, unrounded.
/// Answers to questions outside the bank are ignored.
pub fn category_score(bank: &QuestionBank, answers: &AnswerStore, group: CategoryGroup) -> f64 {
    let (weighted, weights) = answers
        .all()
        .iter()
        .filter_map(|answer| {
            bank.question(&answer.question_id)
                .filter(|question| group.contains(question.category))
                .map(|question| (question, &answer.answer))
        })
        .fold((0.0, 0.0), |(weighted, weights), (question, answer)| {
            (
                weighted + normalized_score(question, answer, group) * question.weight,
                weights + question.weight,
            )
        });
    if weights > 0.0 {
        clamp_score(weighted / weights)
    } else {
        NEUTRAL_SCORE
    }
}

/// Scores a finished answer set. Never fails: missing groups fall back to
/// the neutral score.
pub fn calculate_results(
    bank: &QuestionBank,
    answers: &AnswerStore,
    jitter: &mut dyn Jitter,
) -> AssessmentResult {
    let psychometric = category_score(bank, answers, CategoryGroup::Psychometric);
    let technical = category_score(bank, answers, CategoryGroup::TechnicalCombined);
    let wiscars = WiscarScores::derive(psychometric, technical, jitter);
    let overall_confidence = wiscars.mean().round() as u8;
    let recommendation = Recommendation::from_confidence(overall_confidence);

    tracing::info!(
        psychometric,
        technical,
        overall_confidence,
        ?recommendation,
        "assessment scored"
    );

    AssessmentResult {
        user_id: "anonymous_user".to_string(),
        domain: bank.domain().to_string(),
        psychometric_score: psychometric.round() as u8,
        technical_readiness_score: technical.round() as u8,
        wiscars: wiscars.rounded(),
        overall_confidence,
        recommendation,
        next_steps: next_steps(recommendation, technical, psychometric),
        top_roles: top_roles(overall_confidence),
        alternative_roles: alternative_roles(),
        timestamp: Utc::now(),
    }
}
