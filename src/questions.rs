//! Prompt construction and response validation for question generation.

use serde::Deserialize;

use crate::llm::{GenerateRequest, LlmError, LlmManager};
use crate::types::{ChaosLevel, PromptConfig, VibeFilter};

/// Number of questions a list-mode generation must return
pub const LIST_LENGTH: usize = 10;

/// Shown in the view when list generation fails
pub const LIST_FAILED_MESSAGE: &str = "The chaos engine stalled. Please try again.";
/// Shown in the view when the post-spin question fails
pub const TARGETED_FAILED_MESSAGE: &str = "The bottle broke. Try spinning again.";
/// Shown when no provider is configured at all
pub const NOT_CONFIGURED_MESSAGE: &str =
    "No language model is configured. Set GEMINI_API_KEY or OPENAI_API_KEY.";

/// System instruction shared by both generation operations
pub const SYSTEM_INSTRUCTION: &str = r#"You are the "Icebreaker Machine," a witty, slightly chaotic, but helpful assistant designed to generate conversation starter questions.

Your goal is to generate questions based on the user's context, chaos level, and vibe filters.

Chaos Levels Guide:
1. Safe & Wholesome: Polite, family-friendly, standard icebreakers.
2. A Little Spicy: Slightly more personal or opinionated, but very safe.
3. Fun & Unhinged: Quirky, unexpected scenarios, "would you rather."
4. Bold & Chaotic: Provocative, deep, or weird. Pushes boundaries slightly.
5. Max Chaos: Absurdist, intensely deep, or humorously controversial (but never offensive, racist, or harmful).

Return the response strictly as a JSON object."#;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("model request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("malformed model response: {0}")]
    Malformed(String),
}

fn vibe_list(filters: &[VibeFilter]) -> String {
    if filters.is_empty() {
        "None".to_string()
    } else {
        filters
            .iter()
            .map(VibeFilter::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Hotter sampling at higher chaos levels
fn list_temperature(chaos: ChaosLevel) -> f32 {
    0.8 + 0.05 * chaos.get() as f32
}

fn targeted_temperature(chaos: ChaosLevel) -> f32 {
    0.85 + 0.05 * chaos.get() as f32
}

pub fn build_list_prompt(cfg: &PromptConfig) -> String {
    format!(
        "Context: {}\n\
         Chaos Level: {}/5\n\
         Vibe Filters: {}\n\n\
         Generate {} conversation starter questions that fit these parameters perfectly. \
         Keep them concise and readable. \
         Respond with a JSON object of the form {{\"questions\": [\"...\"]}}.",
        cfg.context.label(),
        cfg.chaos_level.get(),
        vibe_list(&cfg.filters),
        LIST_LENGTH
    )
}

pub fn build_targeted_prompt(target: &str, cfg: &PromptConfig) -> String {
    format!(
        "Context: {}\n\
         Chaos Level: {}/5\n\
         Vibe Filters: {}\n\
         Target Person: \"{target}\"\n\n\
         Generate exactly ONE (1) conversation starter question specifically addressed to {target}. \
         Use their name in the question naturally if possible, or frame it for them to answer. \
         Respond with a JSON object of the form {{\"question\": \"...\"}}.",
        cfg.context.label(),
        cfg.chaos_level.get(),
        vibe_list(&cfg.filters),
    )
}

#[derive(Debug, Deserialize)]
struct QuestionListPayload {
    questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TargetedPayload {
    question: String,
}

/// Strip a markdown code fence if the model wrapped its JSON in one
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_end()
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Parse and validate a list-mode response: exactly LIST_LENGTH non-empty strings
pub fn parse_question_list(text: &str) -> Result<Vec<String>, GenerateError> {
    let payload: QuestionListPayload = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| GenerateError::Malformed(e.to_string()))?;

    if payload.questions.len() != LIST_LENGTH {
        return Err(GenerateError::Malformed(format!(
            "expected {} questions, got {}",
            LIST_LENGTH,
            payload.questions.len()
        )));
    }
    if payload.questions.iter().any(|q| q.trim().is_empty()) {
        return Err(GenerateError::Malformed("empty question text".to_string()));
    }

    Ok(payload
        .questions
        .into_iter()
        .map(|q| q.trim().to_string())
        .collect())
}

/// Parse and validate a targeted response: one non-empty question
pub fn parse_targeted_question(text: &str) -> Result<String, GenerateError> {
    let payload: TargetedPayload = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| GenerateError::Malformed(e.to_string()))?;

    let question = payload.question.trim().to_string();
    if question.is_empty() {
        return Err(GenerateError::Malformed("empty question text".to_string()));
    }
    Ok(question)
}

/// Request a batch of questions for the given parameters
pub async fn generate_question_list(
    llm: &LlmManager,
    cfg: &PromptConfig,
) -> Result<Vec<String>, GenerateError> {
    let request = GenerateRequest {
        system: Some(SYSTEM_INSTRUCTION.to_string()),
        temperature: Some(list_temperature(cfg.chaos_level)),
        json_response: true,
        ..llm.request(build_list_prompt(cfg))
    };

    let response = llm.generate(request).await?;
    parse_question_list(&response.text)
}

/// Request a single question addressed to `target`
pub async fn generate_targeted_question(
    llm: &LlmManager,
    target: &str,
    cfg: &PromptConfig,
) -> Result<String, GenerateError> {
    let request = GenerateRequest {
        system: Some(SYSTEM_INSTRUCTION.to_string()),
        temperature: Some(targeted_temperature(cfg.chaos_level)),
        json_response: true,
        ..llm.request(build_targeted_prompt(target, cfg))
    };

    let response = llm.generate(request).await?;
    parse_targeted_question(&response.text)
}
