// Critic prompt construction

use crate::config::constants::{APPROVAL_THRESHOLD, AUTO_APPROVE_THRESHOLD};
use crate::content::{Brief, ReferenceExample, StyleProfile};
use crate::text::truncate_chars;

use super::types::{AUTHENTICITY_MAX, CONTENT_QUALITY_MAX, TECHNICAL_EXECUTION_MAX};

/// Critic sees at most this much of each reference example
const CRITIC_EXAMPLE_CHARS: usize = 1200;

/// Where the critic is in the refinement budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationPhase {
    First,
    Middle,
    Final,
}

impl IterationPhase {
    /// The final iteration takes precedence, so a budget of one is `Final`.
    ///
    /// This deliberately differs from picking the strict first-iteration
    /// rubric whenever `iteration == 1`: a lone iteration gets the lenient
    /// final calibration that matches the auto-approve cut.
    pub fn of(iteration: usize, max_iterations: usize) -> Self {
        if iteration >= max_iterations {
            IterationPhase::Final
        } else if iteration <= 1 {
            IterationPhase::First
        } else {
            IterationPhase::Middle
        }
    }
}

fn iteration_guidance(iteration: usize, max_iterations: usize) -> String {
    match IterationPhase::of(iteration, max_iterations) {
        IterationPhase::First => "FIRST ITERATION: focus on the most important improvements.\n\
             - Name at most 2-3 critical points\n\
             - Give very specific edit instructions (e.g. \"change the hook from 'X' to 'Y'\")\n\
             - Small style nuances can be polished later"
            .to_string(),
        IterationPhase::Middle => format!(
            "ITERATION {}/{}: acknowledge progress.\n\
             - Check whether earlier points were addressed\n\
             - Focus on the remaining improvements\n\
             - Again give specific edit instructions",
            iteration, max_iterations
        ),
        IterationPhase::Final => format!(
            "FINAL ITERATION: be generous in your assessment.\n\
             - The post has already been revised\n\
             - Accept the post if it is fundamentally good (score >= {})\n\
             - Small imperfections are fine; no post is perfect\n\
             - Judge whether the post is publishable, not whether it is perfect",
            AUTO_APPROVE_THRESHOLD
        ),
    }
}

pub fn system_prompt(
    profile: &StyleProfile,
    examples: &[ReferenceExample],
    platform: &str,
    iteration: usize,
    max_iterations: usize,
) -> String {
    let mut examples_section = String::new();
    if !examples.is_empty() {
        examples_section.push_str("\nREAL POSTS BY THIS PERSON (compare the style!):\n");
        for (i, example) in examples.iter().enumerate() {
            let text = truncate_chars(&example.text, CRITIC_EXAMPLE_CHARS);
            let ellipsis = if text.len() < example.text.len() { "..." } else { "" };
            examples_section.push_str(&format!(
                "\n--- Real example {} ---\n{}{}\n",
                i + 1,
                text,
                ellipsis
            ));
        }
        examples_section.push_str("--- End of examples ---\n");
    }

    format!(
        "You are an experienced {platform} content editor.\n\n\
         Your job: score posts and propose CONCRETE, ACTIONABLE improvements.\n\
         {examples_section}\n\
         {guidance}\n\n\
         REFERENCE PROFILE:\n\
         - Tone: {tone}\n\
         - Perspective: {perspective}\n\
         - Form of address: {address}\n\
         - Energy level: {energy}/10\n\n\
         SCORING RUBRIC (100 points total):\n\n\
         1. Authenticity & style ({a_max} points)\n\
         \x20  - Sounds natural and human, not like an AI\n\
         \x20  - Matches the person's tone\n\
         \x20  - No AI clichés (\"In today's fast-paced world\", \"Let's dive in\", ...)\n\n\
         2. Content quality ({c_max} points)\n\
         \x20  - Strong, attention-grabbing hook\n\
         \x20  - Clear value for the audience\n\
         \x20  - Good structure and flow\n\
         \x20  - Fitting call to action\n\n\
         3. Technical execution ({t_max} points)\n\
         \x20  - Correct perspective and form of address\n\
         \x20  - Appropriate length\n\
         \x20  - Correct formatting\n\n\
         APPROVAL THRESHOLDS:\n\
         - >= {approve} points: APPROVED (ready to publish)\n\
         - 75-{almost} points: almost there, small adjustments\n\
         - < 75 points: needs revision\n\n\
         IMPORTANT FOR YOUR FEEDBACK:\n\
         - Give EXACT wording suggestions (not \"improve the hook\" but \"change 'X' to 'Y'\")\n\
         - At most 3 improvement points per iteration\n\
         - Acknowledge improvements when the post has been revised\n\n\
         Answer as JSON.",
        platform = platform,
        examples_section = examples_section,
        guidance = iteration_guidance(iteration, max_iterations),
        tone = profile.tone.primary_tone,
        perspective = profile.writing_style.perspective,
        address = profile.writing_style.form_of_address,
        energy = profile.linguistic.energy_level,
        a_max = AUTHENTICITY_MAX,
        c_max = CONTENT_QUALITY_MAX,
        t_max = TECHNICAL_EXECUTION_MAX,
        approve = APPROVAL_THRESHOLD,
        almost = APPROVAL_THRESHOLD - 1,
    )
}

pub fn user_prompt(
    draft: &str,
    brief: &Brief,
    platform: &str,
    iteration: usize,
    max_iterations: usize,
) -> String {
    let mut note = String::new();
    if iteration > 1 {
        note.push_str(&format!(
            "\nNOTE: This is iteration {} of {}. The post has already been revised.\n",
            iteration, max_iterations
        ));
    }
    if IterationPhase::of(iteration, max_iterations) == IterationPhase::Final {
        note.push_str(&format!(
            "LAST CHANCE: score generously and approve if the post is fundamentally good (>= {} points).\n",
            AUTO_APPROVE_THRESHOLD
        ));
    }

    format!(
        "Score this {platform} post:\n\
         {note}\n\
         TOPIC: {title}\n\n\
         POST:\n\
         {draft}\n\n\
         ---\n\n\
         Answer in this JSON format:\n\n\
         {{\n\
         \x20 \"approved\": true/false,\n\
         \x20 \"overall_score\": 0-100,\n\
         \x20 \"scores\": {{\n\
         \x20   \"authenticity_and_style\": 0-{a_max},\n\
         \x20   \"content_quality\": 0-{c_max},\n\
         \x20   \"technical_execution\": 0-{t_max}\n\
         \x20 }},\n\
         \x20 \"strengths\": [\"Strength 1\", \"Strength 2\"],\n\
         \x20 \"improvements\": [\"Improvement 1\", \"Improvement 2\"],\n\
         \x20 \"feedback\": \"Short summary\",\n\
         \x20 \"specific_changes\": [\n\
         \x20   {{\n\
         \x20     \"original\": \"Exact text from the post that should change\",\n\
         \x20     \"replacement\": \"The new suggested text\",\n\
         \x20     \"reason\": \"Why this change\"\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\n\
         IMPORTANT for specific_changes:\n\
         - Quote EXACT passages that should change\n\
         - At most 3 changes per iteration\n\
         - The \"original\" text must appear VERBATIM in the post",
        platform = platform,
        note = note,
        title = brief.title,
        draft = draft,
        a_max = AUTHENTICITY_MAX,
        c_max = CONTENT_QUALITY_MAX,
        t_max = TECHNICAL_EXECUTION_MAX,
    )
}
