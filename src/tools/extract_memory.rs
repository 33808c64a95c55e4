//! MCP `extract_memory` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::memory::types::ChatMessage;

/// Parameters for the `extract_memory` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExtractMemoryParams {
    /// Chat messages in chronological order (1–50).
    #[schemars(description = "Chat messages in chronological order (1-50). Each has 'content', optional 'sender' (default 'user') and 'timestamp'.")]
    pub messages: Vec<ChatMessage>,
}
