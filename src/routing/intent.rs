// src/routing/intent.rs
//! Lexical intent gate over the latest user turn.
//!
//! Ordered, first match wins. The priority order is a safety invariant:
//! crisis > medical_emergency > wellbeing > out_of_scope > default wellbeing.
//! Matching is case-insensitive substring/pattern matching, not semantic;
//! a turn with no match fails open toward the supportive path.

use once_cell::sync::Lazy;
use regex::Regex;

/// Safety/scope category for one user turn. Derived fresh per turn,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentCategory {
    Crisis,
    MedicalEmergency,
    OutOfScope,
    Wellbeing,
}

// Self-harm and suicide phrasing. Checked before everything else.
static CRISIS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"suicide|self[-\s]?harm|kill myself|end my life|overdose").unwrap()
});

// Acute medical emergencies. The `.?` tolerates both apostrophe styles in
// "can't breathe".
static MEDICAL_EMERGENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"chest pain|can.?t breathe|not breathing|stroke symptoms|unconscious").unwrap()
});

// Broad wellbeing topic vocabulary. Deliberately checked before the
// out-of-scope list: a turn matching both ("my lawsuit is stressing me out")
// stays on the supportive path.
static WELLBEING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"anx|depress|stress|burnout|overwhelm|panic|sleep|mindful|mindfulness|breath(?:ing)?|meditat(?:e|ion)|ground(?:ing)?|mood|check[-\s]?in|coping|relationship|argu(?:ment|ing)|lonely|grief|values|purpose|motivation|habits|therapy|counsell(?:or|ing)|confidence|self[-\s]?esteem",
    )
    .unwrap()
});

// Explicit out-of-scope requests: trades, coding, finance, legal, weapons.
static OUT_OF_SCOPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"change the oil|car repair|code this|write my assignment|tax return|stock tip|day trade|weapon|gun|rifle|build an app|lawsuit|visa|immigration|roofing|plumbing|electrical",
    )
    .unwrap()
});

/// Pure, injectable classifier: latest user text in, exactly one category out.
/// No network access, no side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> IntentCategory {
        let t = text.to_lowercase();

        if CRISIS.is_match(&t) {
            return IntentCategory::Crisis;
        }
        if MEDICAL_EMERGENCY.is_match(&t) {
            return IntentCategory::MedicalEmergency;
        }
        if WELLBEING.is_match(&t) {
            return IntentCategory::Wellbeing;
        }
        if OUT_OF_SCOPE.is_match(&t) {
            return IntentCategory::OutOfScope;
        }

        IntentCategory::Wellbeing
    }
}
