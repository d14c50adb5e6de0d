use careerfit::scoring::category_score;
use careerfit::{
    calculate_results, AnswerStore, AnswerValue, CategoryGroup, FixedJitter, NoJitter, Question,
    Recommendation, RngJitter, WiscarScores, QUESTIONS,
};
use proptest::prelude::*;

/// Maps an arbitrary byte onto a legal answer for the question.
fn legal_answer(question: &Question, pick: u8) -> AnswerValue {
    match question.kind.numeric_range() {
        Some(range) => AnswerValue::Numeric(range.start() + pick % range.end()),
        None => {
            let options = question.options();
            AnswerValue::Choice(options[pick as usize % options.len()].clone())
        }
    }
}

fn store_from(picks: &[Option<u8>]) -> AnswerStore {
    let mut store = AnswerStore::default();
    for (question, pick) in QUESTIONS.questions().iter().zip(picks) {
        if let Some(pick) = *pick {
            store
                .record(&QUESTIONS, &question.id, legal_answer(question, pick))
                .unwrap();
        }
    }
    store
}

fn picks() -> impl Strategy<Value = Vec<Option<u8>>> {
    proptest::collection::vec(proptest::option::of(any::<u8>()), QUESTIONS.len())
}

proptest! {
    #[test]
    fn category_scores_stay_in_range(picks in picks()) {
        let store = store_from(&picks);
        for group in [CategoryGroup::Psychometric, CategoryGroup::TechnicalCombined] {
            let score = category_score(&QUESTIONS, &store, group);
            prop_assert!((0.0..=100.0).contains(&score), "{:?} = {}", group, score);
        }
    }

    #[test]
    fn unanswered_group_is_neutral(picks in picks()) {
        // keep only technical-combined answers
        let picks: Vec<Option<u8>> = QUESTIONS
            .questions()
            .iter()
            .zip(picks)
            .map(|(q, pick)| pick.filter(|_| CategoryGroup::TechnicalCombined.contains(q.category)))
            .collect();
        let store = store_from(&picks);
        prop_assert_eq!(category_score(&QUESTIONS, &store, CategoryGroup::Psychometric), 50.0);
    }

    #[test]
    fn wiscar_dimensions_are_clamped(
        psychometric in 0.0f64..=100.0,
        technical in 0.0f64..=100.0,
        offset in -50.0f64..50.0,
        seed in any::<u64>(),
    ) {
        let fixed = WiscarScores::derive(psychometric, technical, &mut FixedJitter(offset));
        let random = WiscarScores::derive(psychometric, technical, &mut RngJitter::seeded(seed));
        for value in fixed.values().into_iter().chain(random.values()) {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn result_is_consistent(picks in picks(), seed in any::<u64>()) {
        let store = store_from(&picks);
        let result = calculate_results(&QUESTIONS, &store, &mut RngJitter::seeded(seed));
        prop_assert!(result.overall_confidence <= 100);
        prop_assert_eq!(
            result.recommendation,
            Recommendation::from_confidence(result.overall_confidence)
        );
        let expected_roles = if result.overall_confidence >= 70 { 3 } else { 2 };
        prop_assert_eq!(result.top_roles.len(), expected_roles);
        prop_assert_eq!(result.alternative_roles.len(), 4);
    }

    #[test]
    fn exact_confidence_is_mean_of_dimensions(picks in picks()) {
        let store = store_from(&picks);
        let psychometric = category_score(&QUESTIONS, &store, CategoryGroup::Psychometric);
        let technical = category_score(&QUESTIONS, &store, CategoryGroup::TechnicalCombined);
        let wiscars = WiscarScores::derive(psychometric, technical, &mut NoJitter);
        let result = calculate_results(&QUESTIONS, &store, &mut NoJitter);
        prop_assert_eq!(f64::from(result.overall_confidence), wiscars.mean().round());
    }

    #[test]
    fn recommendation_is_monotonic(a in 0u8..=100, b in 0u8..=100) {
        let rank = |r: Recommendation| match r {
            Recommendation::No => 0,
            Recommendation::Maybe => 1,
            Recommendation::Yes => 2,
        };
        let (low, high) = (a.min(b), a.max(b));
        prop_assert!(rank(Recommendation::from_confidence(low)) <= rank(Recommendation::from_confidence(high)));
    }

    #[test]
    fn last_answer_wins(first in any::<u8>(), second in any::<u8>()) {
        let question = QUESTIONS.question("wiscar_skill_1").unwrap();
        let mut store = AnswerStore::default();
        store.record(&QUESTIONS, &question.id, legal_answer(question, first)).unwrap();
        store.record(&QUESTIONS, &question.id, legal_answer(question, second)).unwrap();
        prop_assert_eq!(store.len(), 1);

        let mut only_second = AnswerStore::default();
        only_second.record(&QUESTIONS, &question.id, legal_answer(question, second)).unwrap();
        prop_assert_eq!(
            category_score(&QUESTIONS, &store, CategoryGroup::TechnicalCombined),
            category_score(&QUESTIONS, &only_second, CategoryGroup::TechnicalCombined)
        );
    }
}
