// src/routing/prompt.rs
//! Prompt stack assembly and the canned safety/scope replies.
//!
//! A forwarded stack is always `[persona, optional protocol, ..transcript]`.
//! The ordering is load-bearing: later instructions take precedence in the
//! model's instruction following, so the protocol lock must sit after the
//! persona and before any transcript content. The builder enforces that
//! instead of leaving it to ad hoc concatenation.

use crate::api::types::{ChatMessage, Role};
use crate::config::CONFIG;
use crate::persona::Persona;
use crate::routing::protocol::{MOOD_ITEMS, MOOD_SCALE, ProtocolState, SAFETY_ITEM};

/// Fallback user turn appended when the assembled stack would otherwise carry
/// no user-authored content (the provider requires at least one user turn).
const SYNTHETIC_USER_TURN: &str = "Hello";

/// Fixed reply for medical emergencies. Never forwarded to the model.
pub const MEDICAL_EMERGENCY_REPLY: &str =
    "This may be a medical emergency. Please call your local emergency number now or seek urgent in-person care.";

/// Fixed reply for out-of-scope requests. Never forwarded to the model.
pub const OUT_OF_SCOPE_REPLY: &str =
    "I focus on mental health and wellbeing. If you'd like, we can explore what's behind this request - how it's affecting you - and work on coping or next steps from a wellbeing angle.";

/// Fixed crisis reply naming the configured regional helpline.
/// Never forwarded to the model.
pub fn crisis_reply() -> String {
    format!(
        "I'm really glad you reached out. You deserve immediate support. If you're in danger or might act on these thoughts, please call your local emergency number now. {}. I'm here to listen - would you like to share what you're going through?",
        CONFIG.crisis_line
    )
}

/// Orders the system-message sections ahead of the transcript.
#[derive(Debug)]
pub struct PromptStackBuilder {
    persona: Persona,
    protocol: Option<String>,
    transcript: Vec<ChatMessage>,
}

impl PromptStackBuilder {
    pub fn new(persona: Persona) -> Self {
        Self { persona, protocol: None, transcript: Vec::new() }
    }

    /// Attach the active protocol's system message. It will land immediately
    /// after the persona message regardless of call order.
    pub fn protocol(mut self, instructions: impl Into<String>) -> Self {
        self.protocol = Some(instructions.into());
        self
    }

    /// Append the full prior transcript, unmodified and in original order.
    pub fn transcript(mut self, messages: &[ChatMessage]) -> Self {
        self.transcript.extend_from_slice(messages);
        self
    }

    pub fn build(self) -> Vec<ChatMessage> {
        let mut stack = Vec::with_capacity(self.transcript.len() + 3);
        stack.push(ChatMessage::system(self.persona.prompt()));
        if let Some(protocol) = self.protocol {
            stack.push(ChatMessage::system(protocol));
        }
        stack.extend(self.transcript);

        if !stack.iter().any(|m| m.role == Role::User) {
            stack.push(ChatMessage::user(SYNTHETIC_USER_TURN));
        }

        stack
    }
}

/// Protocol system message for an active protocol, if any.
pub fn protocol_instructions(state: ProtocolState) -> Option<String> {
    match state {
        ProtocolState::Inactive => None,
        ProtocolState::MoodCheckin { .. } => Some(mood_checkin_instructions()),
        ProtocolState::Mindfulness => Some(MINDFULNESS_INSTRUCTIONS.to_string()),
    }
}

/// Locks the model into the 11-item sequence: verbatim wording, fixed order,
/// scale restated each time, re-ask on invalid input, safety override on the
/// seventh item, no scoring or diagnosis at completion.
fn mood_checkin_instructions() -> String {
    let items_list = MOOD_ITEMS
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}) {} (1-4)", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"PROTOCOL = MOOD_CHECKIN_ACTIVE
You must run the mood check-in as a strict sequence. Follow these rules:

SCALE (for EVERY item; repeat the scale with each question):
{scale}.

SEQUENCE & WORDING:
- Ask exactly ONE question at a time.
- Provide the detail of the scale for each question.
- Do NOT diagnose during the mood check.
- Do NOT discuss responses during the mood check.
- Use the following 11 questions VERBATIM and IN THIS ORDER (do NOT paraphrase, add, skip, or reorder):
{items}

INPUT VALIDATION:
- After each question, wait for a single number 1-4. If the reply is anything else, gently remind the scale and re-ask the SAME item until a valid 1-4 is given.

SAFETY OVERRIDE (Q{safety}):
- On item {safety} ("{safety_item}"), if the user answers 1, pause the questionnaire and provide a short, supportive safety message encouraging immediate help if at risk. Ask whether they'd like to stop here or continue later. Do not resume unless they clearly wish to continue; if they do, continue with item {resume}.

COMPLETION:
- When all 11 items are answered (without crisis pause), do NOT compute or present any scores. Do NOT diagnose. Do NOT summarise results numerically or qualitatively.
- Close the protocol with a single, gentle invitation that sets the tone for the chat, e.g.:
  "Thanks for sharing that. What would feel most supportive next - keep talking, try a tiny gentle step, or a brief pause together?"
- Only then return to normal counsellor behaviour.
"#,
        scale = MOOD_SCALE,
        items = items_list,
        safety = SAFETY_ITEM,
        safety_item = MOOD_ITEMS[(SAFETY_ITEM - 1) as usize],
        resume = SAFETY_ITEM + 1,
    )
}

/// Restricts the model to one short guided exercise, no diagnostics, no
/// eyes-closed instruction, closing with a reflection prompt.
const MINDFULNESS_INSTRUCTIONS: &str = r#"PROTOCOL = MINDFULNESS_ACTIVE
While this protocol is active:
- Do NOT ask general clarifying questions.
- Guide a short, step-by-step breathing/grounding exercise (~1 minute) in plain language.
- Keep timing approximate; avoid counting every second.
- Do NOT diagnose or evaluate.
- Do NOT ask the user to close their eyes.
- Close by inviting a brief reflection on how they feel now, then ask what they'd like next.
- Only then return to normal counsellor behaviour.
"#;
