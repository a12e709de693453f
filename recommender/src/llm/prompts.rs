//! Prompt template and invocation payload for objective recommendations.
//!
//! The payload follows the Anthropic messages format accepted by the
//! Bedrock runtime `InvokeModel` API.

use serde::Serialize;
use serde_json::Value;

use crate::error::{RecommenderError, Result};
use crate::models::ObjectiveRequest;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Generation parameters are fixed: deterministic output, short answers.
pub const TEMPERATURE: f32 = 0.0;
pub const MAX_TOKENS: u32 = 512;

pub const RECOMMENDATION_SYSTEM_PROMPT: &str = r#"You are a helpful assistant that improves an objective into a clearer, testable defining objective.

Input: You will receive a JSON payload containing:
  - objective: string
  - context: optional object with fields like persona, domain, instructions, satisfactionCriteria, extraNotes

Output: You MUST return ONLY valid JSON with EXACTLY these keys:
{
  "reason": string,
  "suggestedDefiningObjective": string,
  "alternativeDefiningObjective": string
}

Do not wrap your JSON in markdown. Do not include any other keys.
"#;

#[derive(Debug, Serialize)]
struct InvocationBody<'a> {
    anthropic_version: &'static str,
    system: &'static str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Render the request as the user turn: pretty-printed with a two-space
/// indent, declaration order kept, unset fields as `null`.
pub fn user_prompt(request: &ObjectiveRequest) -> Result<String> {
    serde_json::to_string_pretty(request)
        .map_err(|e| RecommenderError::Internal(format!("Failed to serialize request: {e}")))
}

/// Build the full `InvokeModel` body for a validated request.
///
/// # Example
/// ```
/// use recommender::llm::prompts::recommendation_body;
/// use recommender::models::ObjectiveRequest;
///
/// let body = recommendation_body(&ObjectiveRequest::new("make the button better")).unwrap();
/// assert_eq!(body["max_tokens"], 512);
/// ```
pub fn recommendation_body(request: &ObjectiveRequest) -> Result<Value> {
    let text = user_prompt(request)?;

    let body = InvocationBody {
        anthropic_version: ANTHROPIC_VERSION,
        system: RECOMMENDATION_SYSTEM_PROMPT,
        messages: vec![Message {
            role: "user",
            content: vec![ContentBlock {
                kind: "text",
                text: &text,
            }],
        }],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    };

    serde_json::to_value(&body)
        .map_err(|e| RecommenderError::Internal(format!("Failed to build invocation body: {e}")))
}
