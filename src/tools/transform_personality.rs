use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::memory::types::{ChatMessage, UserMemory};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TransformPersonalityParams {
    #[schemars(description = "The user message to respond to")]
    pub message: String,

    #[schemars(
        description = "Personality key: 'calm_mentor', 'witty_friend', 'therapist', 'professional_coach', 'curious_explorer'. Unknown keys use 'calm_mentor'."
    )]
    pub personality: String,

    #[schemars(description = "Optional user memory profile from extract_memory; its summary is used as context")]
    pub context: Option<UserMemory>,

    #[schemars(description = "Optional prior conversation turns, oldest first")]
    pub history: Option<Vec<ChatMessage>>,
}
