// src/routing/protocol.rs
//! Scripted protocol detection: mood check-in and mindfulness pause.
//!
//! Protocol progress is never stored as session state. An in-progress mood
//! check-in is recovered by scanning the transcript backward for the most
//! recent assistant message that opens with a question marker, so the
//! transcript itself is the source of truth and the protocol self-resumes
//! after a reload.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::types::{ChatMessage, Role};

/// The 11 fixed-wording mood check-in items. The model is instructed to use
/// this wording VERBATIM and IN THIS ORDER.
pub const MOOD_ITEMS: [&str; 11] = [
    "How calm do you feel right now?",
    "How energetic do you feel?",
    "How focused or clear-headed are you at this moment?",
    "How positive or hopeful do you feel?",
    "How connected do you feel to others right now?",
    "How motivated do you feel to do tasks or activities?",
    "How safe and secure do you feel in yourself?",
    "How balanced or in control of your emotions do you feel?",
    "How rested or physically well do you feel?",
    "How interested or engaged do you feel in your surroundings?",
    "How resilient do you feel if something stressful came up right now?",
];

/// Scale wording, restated with every item.
pub const MOOD_SCALE: &str = "1 = Not at all, 2 = A little, 3 = Quite a bit, 4 = Extremely";

/// Item carrying the safety override ("How safe and secure do you feel in
/// yourself?"). An answer of 1 pauses the sequence.
pub const SAFETY_ITEM: u8 = 7;

pub const FIRST_ITEM: u8 = 1;
pub const LAST_ITEM: u8 = 11;

/// Active protocol, derived from the latest user turn and the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    Inactive,
    /// Mood check-in in progress; `current_question` is in [1, 11].
    MoodCheckin { current_question: u8 },
    Mindfulness,
}

// Opt-in trigger phrases for the mood check-in.
static MOOD_TRIGGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"begin a brief mood check[-\s]?in now|start a brief mood check[-\s]?in|mood check[-\s]?in.*begin|^yes, please begin a brief mood check[-\s]?in",
    )
    .unwrap()
});

// Opt-in trigger phrases for the mindfulness pause.
static MINDFULNESS_TRIGGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"guide a gentle 1[-\s]?minute breathing pause now|mindfulness pause.*guide|breathing pause.*guide|^yes, please guide a gentle 1[-\s]?minute breathing pause",
    )
    .unwrap()
});

// Question markers an assistant turn may open with: "Question 7", "Q7:", "7)".
// The bare-number form is restricted to "N)" - the shape of the numbered item
// list - to avoid matching ordinary numbered prose.
static QUESTION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:(?:question|q)\s*(\d{1,2})\s*[).:-]?|(\d{1,2})\))").unwrap()
});

/// Pure protocol detector: latest user text plus transcript in, state out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtocolDetector;

impl ProtocolDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, latest_user_text: &str, transcript: &[ChatMessage]) -> ProtocolState {
        let t = latest_user_text.to_lowercase();

        if MOOD_TRIGGER.is_match(&t) {
            return ProtocolState::MoodCheckin { current_question: FIRST_ITEM };
        }
        if MINDFULNESS_TRIGGER.is_match(&t) {
            return ProtocolState::Mindfulness;
        }
        if let Some(n) = question_in_progress(transcript) {
            return ProtocolState::MoodCheckin { current_question: n };
        }

        ProtocolState::Inactive
    }
}

/// Backward scan for the most recent assistant message opening with a question
/// marker. Out-of-range markers are clamped into [1, 11] rather than ever
/// yielding an out-of-range index.
fn question_in_progress(transcript: &[ChatMessage]) -> Option<u8> {
    transcript
        .iter()
        .rev()
        .filter(|m| m.role == Role::Assistant)
        .find_map(|m| question_marker(&m.content))
}

fn question_marker(content: &str) -> Option<u8> {
    let caps = QUESTION_MARKER.captures(content)?;
    let digits = caps.get(1).or_else(|| caps.get(2))?.as_str();
    let n: u8 = digits.parse().ok()?;
    Some(n.clamp(FIRST_ITEM, LAST_ITEM))
}
