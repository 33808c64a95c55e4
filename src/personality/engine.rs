//! Two-stage personality pipeline and the all-voices comparison.
//!
//! [`PersonalityEngine::transform`] never fails: each model call that errors or
//! returns blank text is replaced by deterministic placeholder text.
//! [`PersonalityEngine::compare_all`] runs one `transform` per catalog entry on
//! a `JoinSet`; a branch that dies is recorded as a placeholder so the result
//! always has exactly one entry per personality.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::catalog::{PersonalityCatalog, PersonalityProfile, PersonalitySummary};
use super::prompt::{base_response_prompt, transform_prompt, Conversation};
use crate::memory::types::UserMemory;
use crate::model::ModelClient;

/// Display name → generated text, one entry per catalog profile.
pub type PersonalityComparison = BTreeMap<String, String>;

/// Output of the two-stage pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    /// The neutral base answer.
    pub original: String,
    /// The base answer rewritten in the chosen voice.
    pub transformed: String,
}

pub fn base_placeholder(message: &str) -> String {
    format!("[Base response] {message}")
}

pub fn transform_placeholder(name: &str, base_response: &str) -> String {
    format!("[{name}] {base_response}")
}

pub fn branch_failure_placeholder(name: &str) -> String {
    format!("[{name}] (Generation failed)")
}

#[derive(Clone)]
pub struct PersonalityEngine {
    model: Arc<dyn ModelClient>,
    catalog: Arc<PersonalityCatalog>,
    max_concurrency: usize,
}

impl PersonalityEngine {
    /// `max_concurrency == 0` allows one concurrent branch per catalog entry.
    pub fn new(
        model: Arc<dyn ModelClient>,
        catalog: Arc<PersonalityCatalog>,
        max_concurrency: usize,
    ) -> Self {
        let max_concurrency = if max_concurrency == 0 {
            catalog.len()
        } else {
            max_concurrency.min(catalog.len())
        };
        Self {
            model,
            catalog,
            max_concurrency,
        }
    }

    pub fn catalog(&self) -> &PersonalityCatalog {
        &self.catalog
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn list_personalities(&self) -> Vec<PersonalitySummary> {
        self.catalog.summaries()
    }

    /// Answer `message` neutrally, then rewrite the answer in the voice named by
    /// `personality_key`. Unknown keys use the catalog's default profile.
    pub async fn transform(
        &self,
        message: &str,
        personality_key: &str,
        conversation: Conversation<'_>,
    ) -> Transformation {
        let original = self.generate_base_response(message, conversation).await;
        let profile = self.catalog.resolve(personality_key);
        let transformed = self
            .apply_personality(message, &original, profile, conversation)
            .await;
        Transformation {
            original,
            transformed,
        }
    }

    /// Run [`transform`](Self::transform) for every profile concurrently.
    ///
    /// Returns only after every branch has finished or failed.
    pub async fn compare_all(
        &self,
        message: &str,
        context: Option<&UserMemory>,
    ) -> PersonalityComparison {
        let started = Instant::now();
        let message: Arc<str> = Arc::from(message);
        let context: Option<Arc<UserMemory>> = context.cloned().map(Arc::new);
        let permits = Arc::new(Semaphore::new(self.max_concurrency));

        let mut set: JoinSet<String> = JoinSet::new();
        let mut branch_names = HashMap::with_capacity(self.catalog.len());

        for profile in self.catalog.profiles() {
            let engine = self.clone();
            let message = Arc::clone(&message);
            let context = context.clone();
            let permits = Arc::clone(&permits);
            let key = profile.key.clone();

            let handle = set.spawn(async move {
                // The semaphore is never closed, so this only waits.
                let _permit = permits.acquire_owned().await.ok();
                let conversation = Conversation {
                    context: context.as_deref(),
                    history: &[],
                };
                engine.transform(&message, &key, conversation).await.transformed
            });
            branch_names.insert(handle.id(), (profile.key.clone(), profile.name.clone()));
        }

        let mut responses = PersonalityComparison::new();
        while let Some(joined) = set.join_next_with_id().await {
            match joined {
                Ok((id, text)) => {
                    if let Some((_, name)) = branch_names.get(&id) {
                        responses.insert(name.clone(), text);
                    }
                }
                Err(e) => {
                    if let Some((key, name)) = branch_names.get(&e.id()) {
                        tracing::warn!(
                            operation = "compare_personalities",
                            personality = %key,
                            error = %e,
                            "branch failed"
                        );
                        responses.insert(name.clone(), branch_failure_placeholder(name));
                    }
                }
            }
        }

        // Every profile gets an entry even if its branch was never matched above.
        for profile in self.catalog.profiles() {
            responses
                .entry(profile.name.clone())
                .or_insert_with(|| branch_failure_placeholder(&profile.name));
        }

        tracing::info!(
            branches = responses.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "personality comparison complete"
        );
        responses
    }

    async fn generate_base_response(&self, message: &str, conversation: Conversation<'_>) -> String {
        let prompt = base_response_prompt(message, conversation);
        match self.model.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                tracing::warn!(operation = "base_response", "model returned blank text, using placeholder");
                base_placeholder(message)
            }
            Err(e) => {
                tracing::warn!(operation = "base_response", error = %e, "generation failed, using placeholder");
                base_placeholder(message)
            }
        }
    }

    async fn apply_personality(
        &self,
        message: &str,
        base_response: &str,
        profile: &PersonalityProfile,
        conversation: Conversation<'_>,
    ) -> String {
        let prompt = transform_prompt(message, base_response, profile, conversation);
        match self.model.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                tracing::warn!(
                    operation = "apply_personality",
                    personality = %profile.key,
                    "model returned blank text, using placeholder"
                );
                transform_placeholder(&profile.name, base_response)
            }
            Err(e) => {
                tracing::warn!(
                    operation = "apply_personality",
                    personality = %profile.key,
                    error = %e,
                    "generation failed, using placeholder"
                );
                transform_placeholder(&profile.name, base_response)
            }
        }
    }
}
