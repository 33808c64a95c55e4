//! Personality voices: the catalog, prompt builders, and the generation engine.

pub mod catalog;
pub mod engine;
pub mod prompt;

pub use catalog::{CatalogError, PersonalityCatalog, PersonalityProfile, PersonalitySummary};
pub use engine::{PersonalityComparison, PersonalityEngine, Transformation};
pub use prompt::Conversation;
