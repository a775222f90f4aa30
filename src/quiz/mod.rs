use rand::{
    seq::SliceRandom,
    Rng,
};

use crate::core::models::{
    TermField,
    TermRecord,
};

pub const MAX_QUESTIONS: usize = 5;
pub const MAX_OPTIONS: usize = 4;
const MAX_DISTRACTOR_ATTEMPTS: usize = 20;

/// A prompt/answer pair plus the identity of the term it came from, so an
/// answered question can update the matching review item.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizCard {
    pub prompt: String,
    pub answer: String,
    pub term_id: Option<String>,
    pub term_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuizQuestion {
    pub card: QuizCard,
    pub options: Vec<String>,
}

/// Collects every record (base glossary + user terms) that has both the
/// source and the target field filled in.
pub fn build_pool(
    base: &[TermRecord],
    user_terms: &[TermRecord],
    from: TermField,
    to: TermField,
) -> Vec<QuizCard> {
    base.iter()
        .chain(user_terms.iter())
        .filter_map(|term| {
            let prompt = term.field(from)?.trim();
            let answer = term.field(to)?.trim();
            if prompt.is_empty() || answer.is_empty() {
                return None;
            }

            Some(QuizCard {
                prompt: prompt.to_string(),
                answer: answer.to_string(),
                term_id: term.id.clone(),
                term_key: crate::glossary::natural_key(term),
            })
        })
        .collect()
}

/// Draws up to `MAX_QUESTIONS` cards without replacement. Each question gets
/// the correct answer plus up to 3 random distinct distractors from the pool,
/// capped at `MAX_DISTRACTOR_ATTEMPTS` draws.
pub fn generate_quiz(pool: &[QuizCard], rng: &mut impl Rng) -> Vec<QuizQuestion> {
    let mut indices: Vec<usize> = (0..pool.len()).collect();
    indices.shuffle(rng);
    indices.truncate(MAX_QUESTIONS);

    indices
        .into_iter()
        .map(|index| {
            let card = pool[index].clone();
            let mut options = vec![card.answer.clone()];

            let mut attempts = 0;
            while options.len() < MAX_OPTIONS && attempts < MAX_DISTRACTOR_ATTEMPTS {
                attempts += 1;
                let candidate = &pool[rng.random_range(0..pool.len())].answer;
                if !options.iter().any(|option| option == candidate) {
                    options.push(candidate.clone());
                }
            }

            options.shuffle(rng);
            QuizQuestion { card, options }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;

    fn term(english: &str, latin: &str) -> TermRecord {
        let mut term = TermRecord::default();
        term.set_field(TermField::English, english.to_string());
        term.set_field(TermField::Latin, latin.to_string());
        term
    }

    #[test]
    fn pool_requires_both_fields() {
        let base = vec![term("kidney", "ren"), term("liver", "")];
        let pool = build_pool(&base, &[], TermField::English, TermField::Latin);

        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].prompt, "kidney");
        assert_eq!(pool[0].answer, "ren");
        assert_eq!(pool[0].term_key.as_deref(), Some("kidney"));
    }

    #[test]
    fn pool_includes_user_terms() {
        let base = vec![term("kidney", "ren")];
        let mine = vec![term("heart", "cor")];
        let pool = build_pool(&base, &mine, TermField::English, TermField::Latin);

        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn single_pair_pool_yields_one_option() {
        let pool = build_pool(&[term("kidney", "ren")], &[], TermField::English, TermField::Latin);
        let mut rng = StdRng::seed_from_u64(7);

        let quiz = generate_quiz(&pool, &mut rng);

        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].options, vec!["ren".to_string()]);
    }

    #[test]
    fn questions_are_capped_and_unique() {
        let base: Vec<TermRecord> =
            (0..12).map(|i| term(&format!("term{i}"), &format!("latin{i}"))).collect();
        let pool = build_pool(&base, &[], TermField::English, TermField::Latin);
        let mut rng = StdRng::seed_from_u64(7);

        let quiz = generate_quiz(&pool, &mut rng);

        assert_eq!(quiz.len(), MAX_QUESTIONS);
        let mut prompts: Vec<&str> = quiz.iter().map(|q| q.card.prompt.as_str()).collect();
        prompts.sort();
        prompts.dedup();
        assert_eq!(prompts.len(), MAX_QUESTIONS);
    }

    #[test]
    fn options_are_deduplicated_and_contain_the_answer() {
        let base: Vec<TermRecord> =
            (0..8).map(|i| term(&format!("term{i}"), &format!("latin{i}"))).collect();
        let pool = build_pool(&base, &[], TermField::English, TermField::Latin);
        let mut rng = StdRng::seed_from_u64(11);

        for question in generate_quiz(&pool, &mut rng) {
            assert!(question.options.len() <= MAX_OPTIONS);
            assert!(question.options.contains(&question.card.answer));

            let mut seen = question.options.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), question.options.len());
        }
    }

    #[test]
    fn duplicate_answers_limit_option_count() {
        // Three cards, all sharing one answer: only the correct option can
        // ever be collected.
        let base = vec![term("a", "same"), term("b", "same"), term("c", "same")];
        let pool = build_pool(&base, &[], TermField::English, TermField::Latin);
        let mut rng = StdRng::seed_from_u64(3);

        for question in generate_quiz(&pool, &mut rng) {
            assert_eq!(question.options, vec!["same".to_string()]);
        }
    }
}
