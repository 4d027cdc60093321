//! Turns (text, emotion, goals) into a short coaching message.

use crate::services::llm::{GenerationError, TextGenerator};
use crate::utils::shorten_words;
use tracing::warn;

/// Outcome of a composition. Either the generator answered, or the local
/// template was used because it could not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoachResponse {
    Generated(String),
    Fallback { message: String, reason: String },
}

impl CoachResponse {
    /// Text to show (and optionally speak).
    pub fn text(&self) -> &str {
        match self {
            CoachResponse::Generated(t) => t,
            CoachResponse::Fallback { message, .. } => message,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CoachResponse::Fallback { .. })
    }
}

pub struct Coach {
    generator: Box<dyn TextGenerator>,
    /// Budget written into the prompt.
    prompt_words: usize,
    /// Hard cut applied to whatever comes back.
    max_words: usize,
}

impl Coach {
    pub fn new(generator: Box<dyn TextGenerator>, prompt_words: usize, max_words: usize) -> Self {
        Self {
            generator,
            prompt_words,
            max_words,
        }
    }

    pub fn build_coach_response(&self, text: &str, emotion: &str, goals: &[String]) -> CoachResponse {
        let prompt = build_prompt(text, emotion, goals, self.prompt_words);

        match self.generator.generate(&prompt) {
            Ok(reply) => CoachResponse::Generated(shorten_words(&reply, self.max_words)),
            Err(e) => {
                warn!(error = %e, "generation failed, using template response");
                fallback(emotion, goals, &e)
            }
        }
    }
}

fn goal_bullets(goals: &[String]) -> String {
    goals
        .iter()
        .map(|g| format!("- {g}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(text: &str, emotion: &str, goals: &[String], word_budget: usize) -> String {
    // goal lines are spliced in after dedent so their indentation is irrelevant
    let template = textwrap::dedent(
        r#"
        You are an upbeat, energetic, productivity-focused life coach (not a therapist).

        Context:
        - Detected emotion: {emotion}
        - Suggested small, realistic goals:
        {goals}

        User's message:
        """{text}"""

        Write a very short response with this exact structure:
        1) One short sentence acknowledging how they feel (no more than 20 words).
        2) Then two bullet points, each a specific, practical action using or adapting the suggested goals.
        3) One final short motivational sentence encouraging them to take action now.

        Style rules:
        - Max {words} words total.
        - Sound energetic and optimistic.
        - Focus on action and productivity, not therapy or deep emotions.
        - No long explanations, no disclaimers, no emojis.
        "#,
    );

    fill(
        &template,
        &[
            ("emotion", emotion),
            ("goals", &goal_bullets(goals)),
            ("words", &word_budget.to_string()),
            ("text", text),
        ],
    )
}

/// Single left-to-right pass over `template`: each known `{name}` is
/// replaced once, inserted values are never scanned again.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let known = tail.find('}').and_then(|close| {
            values
                .iter()
                .find(|(name, _)| *name == &tail[1..close])
                .map(|(_, value)| (close, *value))
        });

        match known {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn fallback(emotion: &str, goals: &[String], err: &GenerationError) -> CoachResponse {
    let message = format!(
        "I hear you. It sounds like you’re feeling **{emotion}** right now.\n\n\
         Here are two quick actions you can try:\n\
         {}\n\n\
         Pick one and start now. Small steps create momentum.\n\n\
         *(Local LLM is currently unavailable: {err})*",
        goal_bullets(goals)
    );

    CoachResponse::Fallback {
        message,
        reason: err.to_string(),
    }
}
