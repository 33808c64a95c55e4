//! Structured memory extraction from chat transcripts.

pub mod extract;
pub mod parse;
pub mod prompt;
pub mod types;

pub use extract::MemoryExtractor;
pub use parse::ParsedMemory;
pub use types::{ChatMessage, EmotionalPatterns, ImportantFacts, UserMemory, UserPreferences};
