//! Core memory type definitions.
//!
//! Defines [`ChatMessage`] (one turn of a transcript) and the [`UserMemory`]
//! profile extracted from a conversation, along with its three sections:
//! [`UserPreferences`], [`EmotionalPatterns`], and [`ImportantFacts`].
//!
//! Every list field defaults to empty and every nested section defaults to its
//! empty value, so a deserialized profile is always fully populated.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Summary text used when a model response could not be turned into a profile.
pub const UNAVAILABLE_SUMMARY: &str = "Unable to extract memory";

/// Default value for [`EmotionalPatterns::communication_style`].
pub const DEFAULT_COMMUNICATION_STYLE: &str = "neutral";

/// A single chat message. Order within a transcript is chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    /// The message text.
    pub content: String,
    /// Who sent the message. Defaults to `"user"`.
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Optional timestamp as supplied by the caller (not interpreted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

fn default_sender() -> String {
    "user".into()
}

impl ChatMessage {
    /// A message sent by `"user"` with no timestamp.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender: default_sender(),
            timestamp: None,
        }
    }

    /// A message from an arbitrary sender.
    pub fn from_sender(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender: sender.into(),
            timestamp: None,
        }
    }
}

/// Things the user likes, avoids, does routinely, or is curious about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UserPreferences {
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub habits: Vec<String>,
    pub interests: Vec<String>,
}

/// How the user tends to feel and express themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EmotionalPatterns {
    pub dominant_emotions: Vec<String>,
    pub emotional_triggers: Vec<String>,
    /// Free-text description, `"neutral"` when unknown.
    pub communication_style: String,
    pub stress_indicators: Vec<String>,
}

impl Default for EmotionalPatterns {
    fn default() -> Self {
        Self {
            dominant_emotions: Vec::new(),
            emotional_triggers: Vec::new(),
            communication_style: DEFAULT_COMMUNICATION_STYLE.into(),
            stress_indicators: Vec::new(),
        }
    }
}

/// Factual details the user has shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ImportantFacts {
    pub personal_info: Vec<String>,
    pub relationships: Vec<String>,
    pub goals: Vec<String>,
    pub events: Vec<String>,
}

/// The complete profile extracted from a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UserMemory {
    pub preferences: UserPreferences,
    pub emotional_patterns: EmotionalPatterns,
    pub facts: ImportantFacts,
    /// Short free-text description of the user.
    pub summary: String,
}

impl UserMemory {
    /// The empty profile returned when extraction output was unusable.
    pub fn unavailable() -> Self {
        Self {
            summary: UNAVAILABLE_SUMMARY.into(),
            ..Self::default()
        }
    }

    /// `true` if this is the [`UserMemory::unavailable`] sentinel.
    pub fn is_unavailable(&self) -> bool {
        *self == Self::unavailable()
    }
}
