// src/persona/mod.rs
// Persona system for the coaching voice.
// Currently only the counsellor-style coach persona is implemented.

pub mod coach;

pub use coach::COACH_PERSONA_PROMPT;

/// Persona overlays define the base system instructions prepended to every
/// forwarded prompt stack. Protocol instructions, when active, are appended
/// after the persona and before the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persona {
    /// Counsellor-style wellbeing coach - warm, exploratory, user-led
    #[default]
    Coach,
}

impl Persona {
    /// Returns the base system prompt for this persona.
    pub fn prompt(&self) -> &'static str {
        match self {
            Persona::Coach => COACH_PERSONA_PROMPT,
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Persona::Coach => "coach",
            }
        )
    }
}

impl std::str::FromStr for Persona {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coach" | "default" => Ok(Persona::Coach),
            _ => Err(()),
        }
    }
}
