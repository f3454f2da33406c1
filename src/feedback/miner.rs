// Lesson mining over past critiques

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::constants::APPROVAL_THRESHOLD;
use crate::engine::GenerationResult;
use crate::text::truncate_chars;

/// Leading words stripped before comparing improvement notes
const FILLER_PREFIXES: &[&str] = &[
    "der ", "die ", "das ", "mehr ", "weniger ", "zu ", "the ", "a ", "an ", "more ", "less ",
    "too ",
];

const KEY_CHARS: usize = 50;
const RECURRING_TOP: usize = 10;
const CRITICAL_TOP: usize = 5;
const CRITICAL_LESSON_ITEMS: usize = 3;
const RECURRING_LESSON_ITEMS: usize = 4;
const MIN_MENTIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    /// Drawn from results below the approval threshold
    Critical,
    Recurring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub kind: LessonKind,
    pub message: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternStats {
    pub avg_score: f64,
    pub posts_analyzed: usize,
    pub recurring_count: usize,
    pub critical_count: usize,
}

/// Guidance derived from a subject's recent history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackLessons {
    pub lessons: Vec<Lesson>,
    pub stats: PatternStats,
}

impl FeedbackLessons {
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Writer prompt section; empty when there is nothing to teach
    pub fn to_prompt_section(&self) -> String {
        if self.lessons.is_empty() {
            return String::new();
        }

        let mut section = String::from("6. LESSONS LEARNED (from past posts - RESPECT THESE!):\n");
        if self.stats.posts_analyzed > 0 {
            section.push_str(&format!(
                "\n(Based on {} analysed posts, average score: {:.0}/100)\n",
                self.stats.posts_analyzed, self.stats.avg_score
            ));
        }

        for lesson in &self.lessons {
            match lesson.kind {
                LessonKind::Critical => {
                    section.push_str(&format!("\n⚠️ CRITICAL - {}\n", lesson.message));
                    for item in &lesson.items {
                        section.push_str(&format!("  ❌ {}\n", item));
                    }
                }
                LessonKind::Recurring => {
                    section.push_str(&format!("\n📝 {}\n", lesson.message));
                    for item in &lesson.items {
                        section.push_str(&format!("  • {}\n", item));
                    }
                }
            }
        }

        section.push_str("\nAddress these points PROACTIVELY while writing!");
        section
    }
}

/// Dedup key for an improvement note
pub fn normalize_improvement(text: &str) -> String {
    let mut key = text.trim().to_lowercase();
    loop {
        let stripped = FILLER_PREFIXES
            .iter()
            .find_map(|prefix| key.strip_prefix(prefix))
            .map(|rest| rest.trim_start().to_string());
        match stripped {
            Some(rest) => key = rest,
            None => break,
        }
    }
    truncate_chars(&key, KEY_CHARS).trim_end().to_string()
}

/// Counts keys preserving first-seen order for ties
#[derive(Default)]
struct OrderedCounter {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl OrderedCounter {
    fn add(&mut self, key: String) {
        match self.counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.clone(), 1);
                self.order.push(key);
            }
        }
    }

    /// Top `n` keys by count (stable), keeping those with at least `min` mentions
    fn most_common(&self, n: usize, min: usize) -> Vec<String> {
        let mut ranked: Vec<(&String, usize)> = self
            .order
            .iter()
            .map(|key| (key, self.counts.get(key).copied().unwrap_or(0)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .filter(|(_, count)| *count >= min)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

/// Mine lessons from `history`, newest first.
///
/// Only the final critique of each result is considered.
pub fn mine_lessons(history: &[GenerationResult]) -> FeedbackLessons {
    let mut all = OrderedCounter::default();
    let mut low_score = OrderedCounter::default();
    let mut scores: Vec<f64> = Vec::new();
    let mut improvement_total = 0usize;

    for result in history {
        let Some(critique) = result.final_critique() else {
            continue;
        };
        scores.push(f64::from(critique.overall_score));

        let low = critique.overall_score < APPROVAL_THRESHOLD;
        for improvement in &critique.improvements {
            let key = normalize_improvement(improvement);
            if key.is_empty() {
                continue;
            }
            improvement_total += 1;
            if low {
                low_score.add(key.clone());
            }
            all.add(key);
        }
    }

    if improvement_total == 0 {
        return FeedbackLessons::default();
    }

    let recurring = all.most_common(RECURRING_TOP, MIN_MENTIONS);
    let critical = low_score.most_common(CRITICAL_TOP, MIN_MENTIONS);

    let mut lessons = Vec::new();
    if !critical.is_empty() {
        lessons.push(Lesson {
            kind: LessonKind::Critical,
            message: "These points led to low scores - AVOID them at all costs:".to_string(),
            items: critical.iter().take(CRITICAL_LESSON_ITEMS).cloned().collect(),
        });
    }

    let non_critical: Vec<String> = recurring
        .iter()
        .filter(|key| !critical.contains(key))
        .take(RECURRING_LESSON_ITEMS)
        .cloned()
        .collect();
    if !non_critical.is_empty() {
        lessons.push(Lesson {
            kind: LessonKind::Recurring,
            message: "Frequently noted improvements from past posts:".to_string(),
            items: non_critical,
        });
    }

    let avg_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    let stats = PatternStats {
        avg_score,
        posts_analyzed: history.len(),
        recurring_count: recurring.len(),
        critical_count: critical.len(),
    };

    tracing::info!(
        "[feedback] Mined {} past results: {} lesson groups, avg score {:.1}",
        stats.posts_analyzed,
        lessons.len(),
        stats.avg_score
    );

    FeedbackLessons { lessons, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critic::{CriticResult, ScoreBreakdown};
    use crate::engine::{IterationRecord, Termination};
    use crate::writer::Draft;

    fn past(score: u8, improvements: &[&str]) -> GenerationResult {
        let mut critique = CriticResult::new(score, ScoreBreakdown::default());
        critique.improvements = improvements.iter().map(|s| s.to_string()).collect();
        // an earlier iteration whose notes must be ignored
        let mut early = CriticResult::new(40, ScoreBreakdown::default());
        early.improvements = vec!["ignored early note".into(), "ignored early note".into()];

        GenerationResult::from_records(
            "acme",
            "Topic",
            Termination::Exhausted,
            vec![
                IterationRecord {
                    iteration: 1,
                    draft: Draft::new(1, "single", 0.6, "v1"),
                    critique: early,
                },
                IterationRecord {
                    iteration: 2,
                    draft: Draft::new(1, "single", 0.6, "v2"),
                    critique,
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_strips_fillers_and_truncates() {
        assert_eq!(normalize_improvement("Der Hook ist schwach"), "hook ist schwach");
        assert_eq!(normalize_improvement("  hook ist schwach "), "hook ist schwach");
        assert_eq!(normalize_improvement("More of the personal story"), "of the personal story");
        assert_eq!(normalize_improvement("Too the long intro"), "long intro");
        assert_eq!(normalize_improvement(&"x".repeat(80)).chars().count(), 50);
    }

    #[test]
    fn test_dedup_counts_variants_as_one_key() {
        let history = vec![
            past(70, &["Der Hook ist schwach"]),
            past(75, &["hook ist schwach"]),
        ];
        let lessons = mine_lessons(&history);
        assert_eq!(lessons.lessons.len(), 1);
        assert_eq!(lessons.lessons[0].kind, LessonKind::Critical);
        assert_eq!(lessons.lessons[0].items, vec!["hook ist schwach"]);
        assert_eq!(lessons.stats.critical_count, 1);
        assert_eq!(lessons.stats.recurring_count, 1);
    }

    #[test]
    fn test_recurring_excludes_critical() {
        let history = vec![
            past(90, &["CTA is generic", "Shorter paragraphs"]),
            past(88, &["cta is generic", "Shorter paragraphs"]),
            past(60, &["Add a concrete number"]),
            past(62, &["add a concrete number"]),
        ];
        let lessons = mine_lessons(&history);

        let critical = &lessons.lessons[0];
        assert_eq!(critical.kind, LessonKind::Critical);
        assert_eq!(critical.items, vec!["add a concrete number"]);

        let recurring = &lessons.lessons[1];
        assert_eq!(recurring.kind, LessonKind::Recurring);
        assert_eq!(recurring.items, vec!["cta is generic", "shorter paragraphs"]);

        assert_eq!(lessons.stats.posts_analyzed, 4);
        assert!((lessons.stats.avg_score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_high_scores_never_produce_critical() {
        let history = vec![past(90, &["Hook"]), past(95, &["hook"])];
        let lessons = mine_lessons(&history);
        assert_eq!(lessons.lessons.len(), 1);
        assert_eq!(lessons.lessons[0].kind, LessonKind::Recurring);
    }

    #[test]
    fn test_single_mentions_give_no_lessons_but_stats() {
        let lessons = mine_lessons(&[past(70, &["a"]), past(80, &["b"])]);
        assert!(lessons.lessons.is_empty());
        assert_eq!(lessons.stats.posts_analyzed, 2);
    }

    #[test]
    fn test_empty_history_or_no_improvements() {
        assert_eq!(mine_lessons(&[]), FeedbackLessons::default());
        assert_eq!(mine_lessons(&[past(70, &[])]), FeedbackLessons::default());
    }

    #[test]
    fn test_prompt_section() {
        assert!(FeedbackLessons::default().to_prompt_section().is_empty());

        let history = vec![past(70, &["Weak hook"]), past(72, &["weak hook"])];
        let section = mine_lessons(&history).to_prompt_section();
        assert!(section.contains("CRITICAL"));
        assert!(section.contains("❌ weak hook"));
        assert!(section.contains("average score: 71/100"));
    }
}
