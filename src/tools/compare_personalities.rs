use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::memory::types::UserMemory;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ComparePersonalitiesParams {
    #[schemars(description = "The user message every personality responds to")]
    pub message: String,

    #[schemars(description = "Optional user memory profile from extract_memory")]
    pub context: Option<UserMemory>,
}
