// src/llm/structured.rs
//! Schema-constrained summary extraction over a transcript snapshot.
//!
//! The model call is locked to a strict five-field JSON schema; fields the
//! transcript cannot support must come back empty rather than invented. The
//! caller defensively strips code-fence wrapping and turns unparsable output
//! into `LlmError::Parse`, distinct from upstream failure.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::api::types::ChatMessage;
use crate::llm::error::LlmError;

/// Five-field structured record extracted from a full transcript. Each field
/// is independently allowed to be empty. Immutable once produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryRecord {
    pub issue: String,
    pub emotion: String,
    pub short_term_goal: String,
    pub long_term_goal: String,
    pub summary: String,
}

const EXTRACTION_SYSTEM_PROMPT: &str = "You summarise wellbeing chats. \
Your task is to extract key information ONLY from the actual chat content provided. \
Return a valid JSON object with exactly these keys: issue, emotion, shortTermGoal, longTermGoal, summary. \
If the chat text contains no meaningful user input, or if any field cannot be confidently identified from user-provided text, \
you must leave that field blank. \
Never invent, imagine, or infer content that was not explicitly mentioned in the chat. \
If the chat is empty or generic (e.g. greetings only), return all fields as empty strings. \
Keep all extracted text short, natural, and in plain language.";

/// Strict response schema for the extraction call.
fn summary_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["issue", "emotion", "shortTermGoal", "longTermGoal", "summary"],
        "properties": {
            "issue": { "type": "string" },
            "emotion": { "type": "string" },
            "shortTermGoal": { "type": "string" },
            "longTermGoal": { "type": "string" },
            "summary": { "type": "string" }
        }
    })
}

/// Request body for the extraction call. The transcript is flattened to
/// `ROLE: content` lines and passed as a single user turn.
pub fn build_summary_request(transcript: &[ChatMessage], model: &str, temperature: f32) -> Value {
    let chat_text = transcript
        .iter()
        .map(|m| format!("{}: {}", format!("{:?}", m.role).to_uppercase(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    json!({
        "model": model,
        "temperature": temperature,
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "WellspringChatSummary",
                "strict": true,
                "schema": summary_schema()
            }
        },
        "messages": [
            { "role": "system", "content": EXTRACTION_SYSTEM_PROMPT },
            { "role": "user", "content": chat_text }
        ]
    })
}

/// Parse the model's structured reply, tolerating ```json fences.
pub fn parse_summary(raw: &str) -> Result<SummaryRecord, LlmError> {
    let stripped = strip_code_fences(raw);
    serde_json::from_str(stripped).map_err(|_| LlmError::Parse)
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline, and the closing fence.
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    body.trim().trim_end_matches("```").trim()
}
