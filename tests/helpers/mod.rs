#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use companion::model::{ModelClient, ModelError};
use companion::personality::{PersonalityCatalog, PersonalityEngine, PersonalityProfile};

/// Extraction JSON for "I love hiking but hate crowded places".
pub const HIKING_JSON: &str = r#"{
  "preferences": {
    "likes": ["hiking"],
    "dislikes": ["crowded places"],
    "habits": [],
    "interests": ["outdoors"]
  },
  "emotional_patterns": {
    "dominant_emotions": ["enthusiastic"],
    "emotional_triggers": ["crowds"],
    "communication_style": "direct",
    "stress_indicators": []
  },
  "facts": {
    "personal_info": [],
    "relationships": [],
    "goals": [],
    "events": []
  },
  "summary": "Enjoys hiking and avoids crowds."
}"#;

/// Pull the display name out of a transform prompt's `PERSONALITY:` line.
pub fn personality_in(prompt: &str) -> Option<&str> {
    prompt
        .lines()
        .find_map(|line| line.strip_prefix("PERSONALITY: "))
}

/// Deterministic model: a fixed reply for extraction prompts, `"Base answer"`
/// for base prompts, and `"<Name> says: Base answer"` for transform prompts.
/// Records every prompt it receives.
pub struct ScriptedModel {
    pub extraction_reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(extraction_reply: &str) -> Self {
        Self {
            extraction_reply: extraction_reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if prompt.contains("CONVERSATION:") {
            return Ok(self.extraction_reply.clone());
        }
        Ok(match personality_in(prompt) {
            Some(name) => format!("  {name} says: Base answer\n"),
            None => "Base answer".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Fails every call with the given error constructor.
pub struct FailingModel(pub fn() -> ModelError);

#[async_trait]
impl ModelClient for FailingModel {
    async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        Err((self.0)())
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

/// Answers every prompt successfully, but with nothing but whitespace.
pub struct BlankModel;

#[async_trait]
impl ModelClient for BlankModel {
    async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        Ok("  \n\t".to_string())
    }

    fn model_name(&self) -> &str {
        "blank"
    }
}

/// Behaves like [`ScriptedModel`] but panics on transform prompts for the
/// listed personality names (or for all of them when `names` is empty).
pub struct PanickingModel {
    pub names: Vec<&'static str>,
}

#[async_trait]
impl ModelClient for PanickingModel {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        if let Some(name) = personality_in(prompt) {
            if self.names.is_empty() || self.names.iter().any(|n| *n == name) {
                panic!("model exploded for {name}");
            }
            return Ok(format!("{name} says: Base answer"));
        }
        Ok("Base answer".to_string())
    }

    fn model_name(&self) -> &str {
        "panicking"
    }
}

/// Sleeps on every call and records the peak number of concurrent calls.
#[derive(Default)]
pub struct SlowModel {
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
}

#[async_trait]
impl ModelClient for SlowModel {
    async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok("done".to_string())
    }

    fn model_name(&self) -> &str {
        "slow"
    }
}

/// Engine over the builtin catalog.
pub fn engine(model: Arc<dyn ModelClient>) -> PersonalityEngine {
    PersonalityEngine::new(model, Arc::new(PersonalityCatalog::builtin()), 0)
}

/// A minimal profile for alternate catalogs.
pub fn profile(key: &str, name: &str) -> PersonalityProfile {
    PersonalityProfile {
        key: key.into(),
        name: name.into(),
        description: format!("{name} description"),
        traits: vec!["Speaks plainly".into()],
        tone: "plain".into(),
    }
}
