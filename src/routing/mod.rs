// src/routing/mod.rs
//! The conversation router: intent gate, protocol detection, prompt assembly.
//!
//! One entry point, `ConversationRouter::route`, inspects the running
//! transcript and either short-circuits with a canned safety/scope reply
//! (the model is never called) or assembles the prompt stack to forward to
//! the model gateway. Intent is checked before protocol state on purpose:
//! crisis and medical emergencies short-circuit even mid-protocol.

pub mod intent;
pub mod prompt;
pub mod protocol;

pub use intent::{IntentCategory, IntentClassifier};
pub use protocol::{ProtocolDetector, ProtocolState};

use tracing::info;

use crate::api::types::{ChatMessage, latest_user_text};
use crate::persona::Persona;
use prompt::{
    MEDICAL_EMERGENCY_REPLY, OUT_OF_SCOPE_REPLY, PromptStackBuilder, crisis_reply,
    protocol_instructions,
};

/// What to do with one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Reply with this text directly; the model gateway is bypassed.
    Canned(String),
    /// Forward this prompt stack to the model gateway.
    Forward(Vec<ChatMessage>),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConversationRouter {
    classifier: IntentClassifier,
    detector: ProtocolDetector,
    persona: Persona,
}

impl ConversationRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, transcript: &[ChatMessage]) -> RouteOutcome {
        let latest = latest_user_text(transcript);

        match self.classifier.classify(latest) {
            IntentCategory::MedicalEmergency => {
                info!(intent = "medical_emergency", "turn short-circuited");
                RouteOutcome::Canned(MEDICAL_EMERGENCY_REPLY.to_string())
            }
            IntentCategory::Crisis => {
                info!(intent = "crisis", "turn short-circuited");
                RouteOutcome::Canned(crisis_reply())
            }
            IntentCategory::OutOfScope => {
                info!(intent = "out_of_scope", "turn short-circuited");
                RouteOutcome::Canned(OUT_OF_SCOPE_REPLY.to_string())
            }
            IntentCategory::Wellbeing => {
                let state = self.detector.detect(latest, transcript);
                info!(intent = "wellbeing", protocol = ?state, "forwarding to model");

                let mut builder = PromptStackBuilder::new(self.persona);
                if let Some(instructions) = protocol_instructions(state) {
                    builder = builder.protocol(instructions);
                }
                RouteOutcome::Forward(builder.transcript(transcript).build())
            }
        }
    }
}
