pub mod compare_personalities;
pub mod extract_memory;
pub mod transform_personality;

use compare_personalities::ComparePersonalitiesParams;
use extract_memory::ExtractMemoryParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use std::sync::Arc;
use transform_personality::TransformPersonalityParams;

use crate::personality::Conversation;
use crate::server::{validate_messages, AppState};

/// The companion MCP tool handler. Holds the shared extractor and engine and
/// exposes them via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct CompanionTools {
    tool_router: ToolRouter<Self>,
    state: Arc<AppState>,
}

#[tool_router]
impl CompanionTools {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            state,
        }
    }

    /// Extract a structured memory profile from chat messages.
    #[tool(description = "Extract preferences, emotional patterns, facts, and a summary about the user from 1-50 chat messages.")]
    async fn extract_memory(
        &self,
        Parameters(params): Parameters<ExtractMemoryParams>,
    ) -> Result<String, String> {
        validate_messages(&params.messages)?;

        tracing::info!(message_count = params.messages.len(), "extract_memory called");

        let memory = self
            .state
            .extractor
            .extract(&params.messages)
            .await
            .map_err(|e| format!("extraction failed: {e}"))?;

        serde_json::to_string(&memory).map_err(|e| format!("serialization failed: {e}"))
    }

    /// Answer a message in one personality's voice.
    #[tool(description = "Generate a neutral answer to a message and rewrite it in a personality's voice. Returns both texts.")]
    async fn transform_personality(
        &self,
        Parameters(params): Parameters<TransformPersonalityParams>,
    ) -> Result<String, String> {
        tracing::info!(personality = %params.personality, "transform_personality called");

        let history = params.history.unwrap_or_default();
        let conversation = Conversation {
            context: params.context.as_ref(),
            history: &history,
        };
        let result = self
            .state
            .engine
            .transform(&params.message, &params.personality, conversation)
            .await;

        Ok(serde_json::json!({
            "original_response": result.original,
            "transformed_response": result.transformed,
            "personality_used": params.personality,
        })
        .to_string())
    }

    /// Answer a message in every personality's voice.
    #[tool(description = "Answer a message in all five personality voices concurrently. Returns a map of personality name to response.")]
    async fn compare_personalities(
        &self,
        Parameters(params): Parameters<ComparePersonalitiesParams>,
    ) -> Result<String, String> {
        tracing::info!("compare_personalities called");

        let responses = self
            .state
            .engine
            .compare_all(&params.message, params.context.as_ref())
            .await;

        Ok(serde_json::json!({
            "message": params.message,
            "responses": responses,
        })
        .to_string())
    }

    /// List the available personalities.
    #[tool(description = "List available personalities with their keys, names, and descriptions.")]
    async fn list_personalities(&self) -> Result<String, String> {
        serde_json::to_string(&self.state.engine.list_personalities())
            .map_err(|e| format!("serialization failed: {e}"))
    }
}

#[tool_handler]
impl ServerHandler for CompanionTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "AI companion server. Use extract_memory to build a user profile from chat \
                 messages, transform_personality to answer in one voice, and \
                 compare_personalities to see every voice side by side."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::types::ChatMessage;
    use crate::model::{ModelClient, ModelError};
    use crate::personality::PersonalityCatalog;
    use async_trait::async_trait;

    /// Echoes a fixed JSON profile for every prompt.
    struct Fixed(&'static str);

    #[async_trait]
    impl ModelClient for Fixed {
        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            Ok(self.0.to_string())
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn tools(reply: &'static str) -> CompanionTools {
        CompanionTools::new(Arc::new(AppState::new(
            Arc::new(Fixed(reply)),
            Arc::new(PersonalityCatalog::builtin()),
            0,
        )))
    }

    #[tokio::test]
    async fn extract_memory_validates_bounds() {
        let err = tools("{}")
            .extract_memory(Parameters(ExtractMemoryParams { messages: vec![] }))
            .await
            .unwrap_err();
        assert!(err.contains("between 1 and 50"));
    }

    #[tokio::test]
    async fn extract_memory_returns_profile_json() {
        let out = tools(r#"{"preferences": {"likes": ["tea"]}, "summary": "Tea fan."}"#)
            .extract_memory(Parameters(ExtractMemoryParams {
                messages: vec![ChatMessage::user("I love tea")],
            }))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["preferences"]["likes"][0], "tea");
        assert_eq!(value["summary"], "Tea fan.");
    }

    #[tokio::test]
    async fn compare_personalities_lists_all_names() {
        let out = tools("Sure thing.")
            .compare_personalities(Parameters(ComparePersonalitiesParams {
                message: "hi".into(),
                context: None,
            }))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["responses"].as_object().unwrap().len(), 5);
        assert_eq!(value["responses"]["Witty Friend"], "Sure thing.");
    }

    #[tokio::test]
    async fn list_personalities_returns_catalog() {
        let out = tools("").list_personalities().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["key"], "calm_mentor");
    }
}
