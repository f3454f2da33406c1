// Writer prompt construction
//
// The system prompt samples a fresh subset of each phrase list per call so that
// consecutive posts do not reuse the same phrasing.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::constants::APPROVAL_THRESHOLD;
use crate::content::{Brief, ReferenceExample, StyleProfile};
use crate::critic::{CriticResult, SpecificChange};
use crate::feedback::FeedbackLessons;
use crate::text::truncate_chars;

use super::palette::DraftApproach;

/// Writer sees at most this much of each reference example
const WRITER_EXAMPLE_CHARS: usize = 1800;

fn sample_phrases<R: Rng + ?Sized>(phrases: &[String], max: usize, rng: &mut R) -> String {
    if phrases.is_empty() {
        return "None available".to_string();
    }
    phrases
        .choose_multiple(rng, max)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n  - ")
}

fn list_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn examples_section(examples: &[ReferenceExample]) -> String {
    if examples.is_empty() {
        return String::new();
    }
    let mut section = String::from("\nREFERENCE POSTS BY THIS PERSON (match the style!):\n");
    for (i, example) in examples.iter().enumerate() {
        let text = truncate_chars(&example.text, WRITER_EXAMPLE_CHARS);
        let ellipsis = if text.len() < example.text.len() { "..." } else { "" };
        section.push_str(&format!("\n--- Example {} ---\n{}{}\n", i + 1, text, ellipsis));
    }
    section.push_str("--- End of examples ---\n");
    section
}

/// Writer system prompt: persona, style rules, phrase library, guardrails, lessons
pub fn system_prompt<R: Rng + ?Sized>(
    profile: &StyleProfile,
    examples: &[ReferenceExample],
    lessons: &FeedbackLessons,
    platform: &str,
    rng: &mut R,
) -> String {
    let style = &profile.writing_style;
    let linguistic = &profile.linguistic;
    let visual = &profile.visual;
    let audience = &profile.audience;
    let phrases = &profile.phrase_library;
    let structure = &profile.structure_templates;

    let phrase_section = if phrases.is_empty() {
        String::new()
    } else {
        format!(
            "\n2. PHRASE LIBRARY (pick fitting ones - do NOT use them all!):\n\n\
             HOOK TEMPLATES (get inspired, do not copy 1:1):\n  - {hooks}\n\n\
             TRANSITIONS (use 1-2):\n  - {transitions}\n\n\
             EMOTIONAL EXPRESSIONS (use 1-2 fitting ones):\n  - {emotional}\n\n\
             CTA WORDINGS (pick one):\n  - {cta}\n\n\
             FILLER EXPRESSIONS (for natural flow):\n  - {fillers}\n\n\
             SIGNATURE PHRASES (at most 1-2, used ORGANICALLY):\n  - {signature}\n\n\
             IMPORTANT: Vary! Do NOT always use the same phrases. Pick the ones that fit the topic.\n",
            hooks = sample_phrases(&phrases.hook_phrases, 4, rng),
            transitions = sample_phrases(&phrases.transition_phrases, 3, rng),
            emotional = sample_phrases(&phrases.emotional_expressions, 4, rng),
            cta = sample_phrases(&phrases.cta_phrases, 3, rng),
            fillers = sample_phrases(&phrases.filler_expressions, 3, rng),
            signature = sample_phrases(&linguistic.signature_phrases, 4, rng),
        )
    };

    let structure_section = format!(
        "\n3. STRUCTURE TEMPLATE:\n\n\
         Primary structure: {primary}\n\n\
         Typical sentence starters (use similar ones):\n  - {starters}\n\n\
         Paragraph transitions:\n  - {transitions}\n",
        primary = structure.primary_structure,
        starters = sample_phrases(&structure.typical_sentence_starters, 4, rng),
        transitions = sample_phrases(&structure.paragraph_transitions, 3, rng),
    );

    let lessons_section = lessons.to_prompt_section();

    format!(
        "ROLE: You are a first-class {platform} ghostwriter. Your job is to write a post that sounds \
         exactly like the digital twin of the person described below. You adapt 100% to the provided profile.\n\
         {examples}\n\
         1. STYLE & ENERGY:\n\n\
         Energy level (1-10): {energy}\n\
         (IMPORTANT: match the intensity and passion of the text to EXACTLY this value. \
         9-10 = highly emotional, 5-6 = factual and professional)\n\n\
         Rhetorical shouting: {shouting}\n\
         (Use CAPITALS for single words exactly as described here to create emphasis, and for NO other words!)\n\n\
         Tone: {tone}\n\n\
         Form of address (STRICTLY FOLLOW): {address}\n\n\
         Perspective (STRICTLY FOLLOW): {perspective}\n\n\
         Sentence dynamics: {dynamics}\n\
         Punctuation: {punctuation}\n\n\
         Industry: {industry}\n\n\
         Target audience: {audience}\n\
         {phrase_section}\
         {structure_section}\n\
         4. VISUAL RULES:\n\n\
         Unicode bold: use bold unicode characters for the first sentence (hook) if it fits the person: {unicode}\n\n\
         Emoji logic: use these emojis: {emojis}\n\
         Placement: {placement}\n\
         Frequency: {frequency}\n\n\
         Narrative anchors: weave in elements such as: {anchors}\n\
         (If 'PS lines', 'dialogues' or 'flashbacks' are named, integrate them where they fit.)\n\n\
         Layout: {layout}\n\n\
         Length: about {words} words\n\n\
         CTA: end the post with a variant of: {cta_style}\n\n\
         5. GUARDRAILS (FORBIDDEN!):\n\n\
         ALWAYS avoid these typical AI patterns:\n\
         - \"In today's fast-paced world\", \"Let's dive in\", \"It's no secret that\"\n\
         - \"Imagine a world where\", \"Let us explore\", \"It is important to understand\"\n\
         - Dashes (–) to join clauses; use commas or full stops instead\n\
         - Lecturing wording when the person writes in the first person\n\
         - Exaggerated superlatives without substance\n\
         - Overly polished, smooth wording; real people write with rough edges\n\
         {lessons}\n\n\
         YOUR BRIEF: write the post so that it gives the target audience ({audience}) clear value \
         and addresses their pain points ({pain_points}). Make the personality of the linguistic \
         fingerprint tangible.\n\n\
         Start DIRECTLY with the hook. No introductory sentences, no \"Here is the post\".",
        platform = platform,
        examples = examples_section(examples),
        energy = linguistic.energy_level,
        shouting = linguistic.shouting_usage,
        tone = profile.tone.primary_tone,
        address = style.form_of_address,
        perspective = style.perspective,
        dynamics = style.sentence_dynamics,
        punctuation = linguistic.punctuation_patterns,
        industry = audience.industry_context,
        audience = audience.target_audience,
        phrase_section = phrase_section,
        structure_section = structure_section,
        unicode = visual.unicode_formatting,
        emojis = visual.emoji_usage.emojis.join(" "),
        placement = visual.emoji_usage.placement,
        frequency = visual.emoji_usage.frequency,
        anchors = list_or(&linguistic.narrative_anchors, "Storytelling"),
        layout = visual.structure_preferences,
        words = style.average_word_count,
        cta_style = profile.content_strategy.cta_style,
        lessons = if lessons_section.is_empty() {
            String::new()
        } else {
            format!("\n{}", lessons_section)
        },
        pain_points = list_or(&audience.pain_points_addressed, "industry-specific challenges"),
    )
}

fn brief_section(brief: &Brief) -> String {
    let mut section = format!("TOPIC: {}\n\nCATEGORY: {}\n", brief.title, brief.category);

    if let Some(angle) = &brief.angle {
        section.push_str(&format!("\nANGLE / PERSPECTIVE:\n{}\n", angle));
    }
    if let Some(hook) = &brief.hook_idea {
        section.push_str(&format!("\nHOOK IDEA (inspiration only):\n\"{}\"\n", hook));
    }

    section.push_str(&format!(
        "\nCORE FACT / CONTENT:\n{}\n",
        brief.fact.as_deref().unwrap_or("")
    ));

    if !brief.key_facts.is_empty() {
        section.push_str("\nKEY FACTS (use these!):\n");
        for fact in &brief.key_facts {
            section.push_str(&format!("- {}\n", fact));
        }
    }

    section.push_str(&format!(
        "\nWHY IT MATTERS:\n{}\n",
        brief
            .relevance
            .as_deref()
            .unwrap_or("Current topic for the target audience")
    ));

    if let Some(rationale) = &brief.rationale {
        section.push_str(&format!("\nWHY YOU SHOULD WRITE ABOUT IT:\n{}\n", rationale));
    }

    section
}

/// First-draft user prompt; `approach` is set for parallel drafts
pub fn initial_prompt(brief: &Brief, platform: &str, approach: Option<&DraftApproach>) -> String {
    let approach_section = approach
        .map(|a| format!("\nYOUR APPROACH FOR THIS DRAFT ({}):\n{}\n", a.label, a.emphasis))
        .unwrap_or_default();

    format!(
        "Write a {platform} post on the following topic:\n\n\
         {brief}{approach}\n\
         TASK:\n\
         Write an authentic {platform} post that:\n\
         1. Opens with a STRONG, unexpected hook (use the hook idea as inspiration, NOT verbatim!)\n\
         2. Picks up the fact or topic and delivers value\n\
         3. Works in the key facts where they fit\n\
         4. Contains a personal note or opinion\n\
         5. Ends with a fitting CTA\n\n\
         IMPORTANT:\n\
         - Avoid typical AI wording (\"In today's fast-paced world\", \"Let's dive in\", ...)\n\
         - Write naturally and humanly\n\
         - The post should reach {threshold}+ points in review IMMEDIATELY\n\n\
         Return ONLY the finished post.",
        platform = platform,
        brief = brief_section(brief),
        approach = approach_section,
        threshold = APPROVAL_THRESHOLD,
    )
}

fn literal_changes_section(changes: &[&SpecificChange]) -> String {
    if changes.is_empty() {
        return String::new();
    }
    let mut section = String::from("\nCONCRETE CHANGES (APPLY THESE EXACTLY!):\n");
    for (i, change) in changes.iter().enumerate() {
        section.push_str(&format!(
            "\n{}. REPLACE:\n   \"{}\"\n   WITH:\n   \"{}\"\n",
            i + 1,
            change.original,
            change.replacement
        ));
        if !change.reason.is_empty() {
            section.push_str(&format!("   (Reason: {})\n", change.reason));
        }
    }
    section
}

fn advisory_changes_section(changes: &[&SpecificChange]) -> String {
    if changes.is_empty() {
        return String::new();
    }
    let mut section = String::from("\nSUGGESTED REWORDINGS (apply in spirit where they fit):\n");
    for change in changes {
        let mut line = format!("- {}", change.replacement);
        if !change.reason.is_empty() {
            line.push_str(&format!(" ({})", change.reason));
        }
        section.push_str(&line);
        section.push('\n');
    }
    section
}

/// Revision user prompt built from the previous draft and its critique.
///
/// Changes whose `original` occurs verbatim are listed as literal
/// replacements; the rest are passed on as suggestions.
pub fn revision_prompt(previous: &str, critique: &CriticResult) -> String {
    let (literal, advisory) = critique.partition_changes(previous);

    let improvements = if critique.improvements.is_empty() {
        String::new()
    } else {
        let mut section = String::from("\nFURTHER IMPROVEMENTS:\n");
        for improvement in &critique.improvements {
            section.push_str(&format!("- {}\n", improvement));
        }
        section
    };

    format!(
        "REVISE the post based on the critic's feedback.\n\n\
         PREVIOUS VERSION:\n\
         {previous}\n\n\
         CURRENT SCORE: {score}/100\n\n\
         FEEDBACK:\n\
         {feedback}\n\
         {literal}{advisory}{improvements}\n\
         YOUR TASK:\n\
         1. Apply the concrete changes EXACTLY\n\
         2. Keep everything that was rated GOOD\n\
         3. The revised post should reach at least {threshold} points\n\n\
         Return ONLY the revised post, no comments.",
        previous = previous,
        score = critique.overall_score,
        feedback = critique.feedback,
        literal = literal_changes_section(&literal),
        advisory = advisory_changes_section(&advisory),
        improvements = improvements,
        threshold = APPROVAL_THRESHOLD,
    )
}
