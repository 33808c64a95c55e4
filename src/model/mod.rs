//! Text-completion model client.
//!
//! Provides the [`ModelClient`] trait and a Gemini implementation over the
//! Generative Language REST API. The client is created via [`create_client`]
//! from configuration and shared as `Arc<dyn ModelClient>`.

pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;

/// Errors from a single model call.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("no API key configured (set GOOGLE_API_KEY)")]
    MissingApiKey,

    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model API error: {0}")]
    Api(String),

    #[error("model returned no text")]
    EmptyResponse,
}

impl ModelError {
    /// `true` when the model could not be reached or refused the call, as
    /// opposed to answering with nothing usable.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::EmptyResponse)
    }
}

/// Trait for turning a prompt into generated text.
///
/// One call is one round trip; implementations do not retry.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Create a model client from config.
///
/// Currently only `"gemini"` is supported.
pub fn create_client(config: &crate::config::ModelConfig) -> anyhow::Result<Arc<dyn ModelClient>> {
    match config.provider.as_str() {
        "gemini" => {
            let client = gemini::GeminiClient::new(config)?;
            Ok(Arc::new(client))
        }
        other => anyhow::bail!("unknown model provider: {other}. Supported: gemini"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;

    #[test]
    fn only_empty_response_is_not_transport() {
        assert!(!ModelError::EmptyResponse.is_transport());
        assert!(ModelError::MissingApiKey.is_transport());
        assert!(ModelError::Api("quota".into()).is_transport());
        assert!(ModelError::Status { status: 503, body: String::new() }.is_transport());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = ModelConfig {
            provider: "other".into(),
            ..ModelConfig::default()
        };
        let err = create_client(&config).err().unwrap();
        assert!(err.to_string().contains("unknown model provider"));
    }

    #[test]
    fn gemini_provider_is_created_without_key() {
        let client = create_client(&ModelConfig::default()).unwrap();
        assert_eq!(client.model_name(), "gemini-2.5-flash");
    }
}
