// Reference example selection: relevance by keyword overlap plus one random pick

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::constants::{EXAMPLES_PER_PROMPT, MIN_EXAMPLE_CHARS};
use crate::content::{Brief, ReferenceExample};
use crate::text::extract_keywords;

/// Top-scoring examples taken before the random pick
const RELEVANT_PICKS: usize = 2;

/// Drop examples too short to carry a style signal
pub fn usable_examples(pool: &[ReferenceExample]) -> Vec<ReferenceExample> {
    pool.iter()
        .filter(|e| e.text.chars().count() > MIN_EXAMPLE_CHARS)
        .cloned()
        .collect()
}

/// Relevance of `example` to `keywords`: one point per contained keyword
/// plus a 0.5 bonus per matched keyword.
pub fn score_example(example: &str, keywords: &[String]) -> f64 {
    let lower = example.to_lowercase();
    let matched = keywords.iter().filter(|kw| lower.contains(kw.as_str())).count();
    matched as f64 + matched as f64 * 0.5
}

/// Choose up to three examples for conditioning the writer.
///
/// With matching disabled this is a uniform random sample. Otherwise the two
/// most relevant examples (score > 0) are kept, one random example from the
/// rest is added, and the next highest-scoring examples fill any gap.
pub fn select_examples<R: Rng + ?Sized>(
    brief: &Brief,
    pool: &[ReferenceExample],
    matching_enabled: bool,
    rng: &mut R,
) -> Vec<ReferenceExample> {
    if pool.is_empty() {
        return Vec::new();
    }

    let wanted = EXAMPLES_PER_PROMPT.min(pool.len());

    if !matching_enabled {
        let picked: Vec<ReferenceExample> = pool.choose_multiple(rng, wanted).cloned().collect();
        tracing::debug!("[examples] Using {} random examples", picked.len());
        return picked;
    }

    let keywords = extract_keywords(&brief.matching_text());

    let mut scored: Vec<(usize, f64)> = pool
        .iter()
        .enumerate()
        .map(|(idx, e)| (idx, score_example(&e.text, &keywords)))
        .collect();
    // stable: ties keep pool order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut selected: Vec<usize> = scored
        .iter()
        .take(RELEVANT_PICKS)
        .filter(|(_, score)| *score > 0.0)
        .map(|(idx, _)| *idx)
        .collect();

    if selected.len() < wanted {
        let remainder: Vec<usize> = scored
            .iter()
            .map(|(idx, _)| *idx)
            .filter(|idx| !selected.contains(idx))
            .collect();
        if let Some(pick) = remainder.choose(rng) {
            selected.push(*pick);
        }
    }

    for (idx, _) in &scored {
        if selected.len() >= wanted {
            break;
        }
        if !selected.contains(idx) {
            selected.push(*idx);
        }
    }

    tracing::debug!(
        "[examples] Selected {} of {} examples ({} keywords)",
        selected.len(),
        pool.len(),
        keywords.len()
    );

    selected.into_iter().map(|idx| pool[idx].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(texts: &[&str]) -> Vec<ReferenceExample> {
        texts.iter().map(|t| ReferenceExample::new(*t)).collect()
    }

    fn brief() -> Brief {
        Brief {
            fact: Some("Hiring managers value curiosity".into()),
            ..Brief::new("Hiring for Curiosity")
        }
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_examples(&brief(), &[], true, &mut rng).is_empty());
        assert!(select_examples(&brief(), &[], false, &mut rng).is_empty());
    }

    #[test]
    fn test_random_mode_samples_three_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = pool(&["a", "b", "c", "d", "e"]);
        let picked = select_examples(&brief(), &pool, false, &mut rng);
        assert_eq!(picked.len(), 3);
        let mut texts: Vec<&str> = picked.iter().map(|e| e.text.as_str()).collect();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), 3);
    }

    #[test]
    fn test_random_mode_small_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = select_examples(&brief(), &pool(&["only"]), false, &mut rng);
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn test_matching_keeps_two_most_relevant() {
        let pool = pool(&[
            "Our quarterly numbers and nothing else",
            "Curiosity beats credentials when hiring",
            "Weather report for Tuesday",
            "Hiring managers: test for curiosity, not trivia",
            "Lunch menu",
        ]);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_examples(&brief(), &pool, true, &mut rng);
            assert_eq!(picked.len(), 3);
            assert_eq!(picked[0].text, "Hiring managers: test for curiosity, not trivia");
            assert_eq!(picked[1].text, "Curiosity beats credentials when hiring");
        }
    }

    #[test]
    fn test_single_relevant_example_then_random_then_backfill() {
        let texts = [
            "Weather report for Tuesday",
            "Lunch menu",
            "Quarterly numbers",
            "Hiring managers: test for curiosity, not trivia",
            "Parking rules",
        ];
        let pool = pool(&texts);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_examples(&brief(), &pool, true, &mut rng);
            assert_eq!(picked.len(), 3);
            assert_eq!(picked[0].text, texts[3]);

            // ties at zero keep pool order, so the backfill is the first one not yet picked
            let random = picked[1].text.as_str();
            assert_ne!(random, texts[3]);
            let expected_backfill = texts
                .iter()
                .find(|t| **t != texts[3] && **t != random)
                .unwrap();
            assert_eq!(picked[2].text, *expected_backfill);
        }
    }

    #[test]
    fn test_no_relevant_examples_still_fills_three() {
        let pool = pool(&["alpha", "beta", "gamma", "delta"]);
        let mut rng = StdRng::seed_from_u64(3);
        let picked = select_examples(&brief(), &pool, true, &mut rng);
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_seeded_selection_is_deterministic() {
        let pool = pool(&["alpha", "beta", "gamma", "delta", "epsilon"]);
        let a = select_examples(&brief(), &pool, true, &mut StdRng::seed_from_u64(42));
        let b = select_examples(&brief(), &pool, true, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_example() {
        let keywords = vec!["hiring".to_string(), "curiosity".to_string()];
        assert!((score_example("Curiosity and HIRING", &keywords) - 3.0).abs() < 1e-9);
        assert_eq!(score_example("nothing here", &keywords), 0.0);
    }

    #[test]
    fn test_usable_examples_filters_short_texts() {
        let pool = vec![
            ReferenceExample::new("short"),
            ReferenceExample::new("x".repeat(MIN_EXAMPLE_CHARS)),
            ReferenceExample::new("y".repeat(MIN_EXAMPLE_CHARS + 1)),
        ];
        let usable = usable_examples(&pool);
        assert_eq!(usable.len(), 1);
        assert!(usable[0].text.starts_with('y'));
    }
}
