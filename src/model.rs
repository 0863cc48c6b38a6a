use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub endpoint: String,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

/// Reply style hint. Passed to the service verbatim as the `tone` field.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Let the service infer the tone. Sent as an empty string.
    #[default]
    #[value(name = "auto")]
    #[serde(rename = "")]
    Unspecified,
    Professional,
    Casual,
    Friendly,
    Formal,
    Humorous,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Unspecified,
        Tone::Professional,
        Tone::Casual,
        Tone::Friendly,
        Tone::Formal,
        Tone::Humorous,
    ];

    /// Value sent on the wire.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            Tone::Unspecified => "",
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Friendly => "friendly",
            Tone::Formal => "formal",
            Tone::Humorous => "humorous",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tone::Unspecified => "Auto (Neutral)",
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Friendly => "Friendly",
            Tone::Formal => "Formal",
            Tone::Humorous => "Humorous",
        }
    }

    pub fn next(self) -> Tone {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tone {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// User-editable input pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub email_content: String,
    pub tone: Tone,
}

impl Draft {
    pub fn new(email_content: impl Into<String>, tone: Tone) -> Self {
        Self {
            email_content: email_content.into(),
            tone,
        }
    }

    pub fn is_submittable(&self) -> bool {
        !self.email_content.is_empty()
    }
}

/// Immutable snapshot of a [`Draft`] taken at submit time.
///
/// Can only be built from a draft with non-empty content, so every request that
/// reaches the orchestrator satisfies the input constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    generation: u64,
    email_content: String,
    tone: Tone,
}

impl GenerationRequest {
    pub fn from_draft(draft: &Draft, generation: u64) -> Option<Self> {
        if !draft.is_submittable() {
            return None;
        }
        Some(Self {
            generation,
            email_content: draft.email_content.clone(),
            tone: draft.tone,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn email_content(&self) -> &str {
        &self.email_content
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn payload(&self) -> GenerationPayload<'_> {
        GenerationPayload {
            email_content: &self.email_content,
            tone: self.tone.as_wire_str(),
        }
    }
}

/// JSON body posted to the generation endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPayload<'a> {
    pub email_content: &'a str,
    pub tone: &'a str,
}

/// Result of exactly one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationOutcome {
    Success { reply: String },
    Failure { message: String },
}

/// Events emitted by the orchestrator and consumed by presentation layers.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Settled {
        generation: u64,
        outcome: GenerationOutcome,
    },
}
