//! AI companion core: structured memory extraction and personality voices.
//!
//! The crate orchestrates calls to a generative language model to:
//!
//! - extract a [`UserMemory`](memory::UserMemory) profile (preferences,
//!   emotional patterns, facts, summary) from a chat transcript, and
//! - answer a message in one of five fixed personality voices, or in all of
//!   them at once.
//!
//! | Key | Name | Tone |
//! |-----|------|------|
//! | `calm_mentor` (default) | Calm Mentor | calm, wise, encouraging, patient |
//! | `witty_friend` | Witty Friend | casual, funny, relatable, friendly |
//! | `therapist` | Therapist | empathetic, gentle, validating, supportive |
//! | `professional_coach` | Professional Coach | direct, motivating, energetic, results-focused |
//! | `curious_explorer` | Curious Explorer | curious, enthusiastic, exploratory, wonder-filled |
//!
//! # Failure handling
//!
//! Model output that cannot be parsed never fails a request: extraction
//! degrades to an empty profile and personality generation falls back to
//! placeholder text. Only an unreachable model during extraction is reported
//! as an error.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`model`]: The model client seam and its Gemini implementation
//! - [`memory`]: Extraction prompt, response parser, and extractor
//! - [`personality`]: Personality catalog, prompts, and the generation engine
//! - [`server`] / [`http`] / [`tools`]: HTTP and MCP surfaces over the core

pub mod config;
pub mod http;
pub mod memory;
pub mod model;
pub mod personality;
pub mod server;
pub mod tools;
