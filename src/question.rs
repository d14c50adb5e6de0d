use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Bundled wearable developer question bank.
pub static QUESTIONS: Lazy<QuestionBank> = Lazy::new(|| {
    QuestionBank::from_reader(include_str!("../resources/questions.json").as_bytes())
        .expect("bundled question bank is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    Likert,
    Scenario,
    Rating,
}

impl QuestionType {
    /// Whether answers are picked from `options`.
    pub fn needs_options(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::Scenario)
    }

    /// Accepted numeric answer range, if the type takes a number.
    pub fn numeric_range(&self) -> Option<std::ops::RangeInclusive<u8>> {
        match self {
            QuestionType::Likert => Some(1..=5),
            QuestionType::Rating => Some(1..=10),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Psychometric,
    Technical,
    Aptitude,
    DomainSpecific,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Psychometric,
    Technical,
    Wiscar,
}

impl Section {
    /// Sections in the order they are presented.
    pub const ALL: [Section; 3] = [Section::Psychometric, Section::Technical, Section::Wiscar];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Psychometric => "Psychological Fit Assessment",
            Section::Technical => "Technical Readiness Evaluation",
            Section::Wiscar => "WISCAR Framework Analysis",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Section::Psychometric => {
                "Understanding your motivation, interests, and personality fit for wearable development"
            }
            Section::Technical => {
                "Evaluating your current technical knowledge and problem-solving abilities"
            }
            Section::Wiscar => "Comprehensive analysis using our proven career-fit framework",
        }
    }
}

/// Revision of the category group table below. Bump when membership changes.
pub const CATEGORY_GROUPS_VERSION: u32 = 1;

/// Grading groups used as the unit of weighted averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryGroup {
    Psychometric,
    /// technical, aptitude and domain-specific questions together
    TechnicalCombined,
}

impl CategoryGroup {
    pub fn members(&self) -> &'static [Category] {
        match self {
            CategoryGroup::Psychometric => &[Category::Psychometric],
            CategoryGroup::TechnicalCombined => &[
                Category::Technical,
                Category::Aptitude,
                Category::DomainSpecific,
            ],
        }
    }

    pub fn contains(&self, category: Category) -> bool {
        self.members().contains(&category)
    }

    /// Multiplier mapping an ungraded numeric answer onto 0..=100.
    /// Likert 1..5 maps to 20..100, rating 1..10 maps to 10..100.
    pub fn numeric_scale(&self) -> f64 {
        match self {
            CategoryGroup::Psychometric => 20.0,
            CategoryGroup::TechnicalCombined => 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub category: Category,
    pub section: Section,
    #[serde(rename = "question")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    pub weight: f64,
}

impl Question {
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    fn validate(&self) -> Result<(), Error> {
        let invalid = |reason: &str| Error::InvalidBank(format!("{}: {}", self.id, reason));
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(invalid("weight must be positive"));
        }
        if self.kind.needs_options() && self.options().is_empty() {
            return Err(invalid("options are required"));
        }
        if let Some(ref correct) = self.correct_answer {
            if !self.options().contains(correct) {
                return Err(invalid("correct answer is not one of the options"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawBank {
    domain: String,
    questions: Vec<Question>,
}

/// Read-only, ordered question bank.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    domain: String,
    questions: Vec<Question>,
    index: HashMap<String, usize>,
}

impl QuestionBank {
    /// Builds a bank, checking id uniqueness, option sanity and that every
    /// section has at least one question.
    pub fn new(domain: impl Into<String>, questions: Vec<Question>) -> Result<Self, Error> {
        let mut index = HashMap::with_capacity(questions.len());
        for (offset, question) in questions.iter().enumerate() {
            question.validate()?;
            if index.insert(question.id.clone(), offset).is_some() {
                return Err(Error::InvalidBank(format!(
                    "duplicated question id {}",
                    question.id
                )));
            }
        }
        let sections: HashSet<Section> = questions.iter().map(|q| q.section).collect();
        if let Some(missing) = Section::ALL.iter().find(|s| !sections.contains(*s)) {
            return Err(Error::InvalidBank(format!("section {:?} is empty", missing)));
        }
        Ok(Self {
            domain: domain.into(),
            questions,
            index,
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let raw: RawBank = serde_json::from_reader(reader)?;
        let bank = Self::new(raw.domain, raw.questions)?;
        tracing::debug!(domain = %bank.domain, questions = bank.len(), "question bank loaded");
        Ok(bank)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let f = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Looks a question up by id
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.index.get(id).map(|&offset| &self.questions[offset])
    }

    pub fn by_section(&self, section: Section) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.section == section)
            .collect()
    }

    pub fn by_category(&self, category: Category) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.category == category)
            .collect()
    }

    pub fn by_group(&self, group: CategoryGroup) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| group.contains(q.category))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub(crate) fn question(id: &str, kind: QuestionType, category: Category, section: Section) -> Question {
        Question {
            id: id.to_string(),
            kind,
            category,
            section,
            text: format!("question {}", id),
            options: None,
            correct_answer: None,
            weight: 1.0,
        }
    }

    fn minimal() -> Vec<Question> {
        vec![
            question("p", QuestionType::Likert, Category::Psychometric, Section::Psychometric),
            question("t", QuestionType::Rating, Category::Technical, Section::Technical),
            question("w", QuestionType::Likert, Category::Psychometric, Section::Wiscar),
        ]
    }

    #[test]
    fn test_bundled_bank() {
        assert_eq!(QUESTIONS.len(), 16);
        assert_eq!(QUESTIONS.domain(), "wearable_developer");
        assert_eq!(QUESTIONS.questions()[0].id, "psych_1");
        assert_eq!(QUESTIONS.questions()[15].id, "wiscar_real_1");
    }

    #[test]
    fn test_question() {
        let q = QUESTIONS.question("tech_1").unwrap();
        assert_eq!(q.kind, QuestionType::MultipleChoice);
        assert_eq!(q.correct_answer.as_deref(), Some("C/C++"));
        assert!(QUESTIONS.question("tech_99").is_none());
    }

    #[test]
    fn test_by_section_keeps_bank_order() {
        let ids: Vec<&str> = QUESTIONS
            .by_section(Section::Technical)
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, ["tech_1", "tech_2", "tech_3", "tech_4", "tech_5"]);
        for section in Section::ALL {
            assert!(!QUESTIONS.by_section(section).is_empty());
        }
    }

    #[test]
    fn test_by_group() {
        assert_eq!(QUESTIONS.by_group(CategoryGroup::Psychometric).len(), 8);
        assert_eq!(QUESTIONS.by_group(CategoryGroup::TechnicalCombined).len(), 8);
        assert_eq!(QUESTIONS.by_category(Category::Aptitude).len(), 2);
        assert!(CategoryGroup::TechnicalCombined.contains(Category::DomainSpecific));
        assert!(!CategoryGroup::Psychometric.contains(Category::Technical));
    }

    #[test]
    fn test_bundled_invariants() {
        for q in QUESTIONS.questions() {
            if q.kind.needs_options() {
                assert!(!q.options().is_empty(), "{}", q.id);
            }
            if let Some(ref correct) = q.correct_answer {
                assert!(q.options().contains(correct), "{}", q.id);
            }
        }
    }

    #[test]
    fn test_duplicated_id() {
        let mut questions = minimal();
        questions.push(question("p", QuestionType::Likert, Category::Psychometric, Section::Wiscar));
        assert!(matches!(
            QuestionBank::new("x", questions),
            Err(Error::InvalidBank(_))
        ));
    }

    #[test]
    fn test_empty_section() {
        let mut questions = minimal();
        questions.pop();
        assert!(QuestionBank::new("x", questions).is_err());
    }

    #[test]
    fn test_missing_options() {
        let mut questions = minimal();
        questions.push(question("mc", QuestionType::MultipleChoice, Category::Technical, Section::Technical));
        assert!(QuestionBank::new("x", questions).is_err());
    }

    #[test]
    fn test_correct_answer_outside_options() {
        let mut mc = question("mc", QuestionType::MultipleChoice, Category::Technical, Section::Technical);
        mc.options = Some(vec!["a".into(), "b".into()]);
        mc.correct_answer = Some("c".into());
        let mut questions = minimal();
        questions.push(mc);
        assert!(QuestionBank::new("x", questions).is_err());
    }

    #[test]
    fn test_non_positive_weight() {
        let mut questions = minimal();
        questions[0].weight = 0.0;
        assert!(QuestionBank::new("x", questions).is_err());
    }
}
