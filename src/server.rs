//! Server initialization for the HTTP and MCP stdio surfaces.
//!
//! Provides [`serve_http`] and [`serve_stdio`] entry points that wire up the
//! model client, personality catalog, extractor, and engine into a running
//! server.

use crate::config::CompanionConfig;
use crate::memory::types::ChatMessage;
use crate::memory::MemoryExtractor;
use crate::model;
use crate::personality::{PersonalityCatalog, PersonalityEngine};
use crate::tools::CompanionTools;
use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

/// Inclusive bounds on the number of messages accepted for extraction.
pub const MIN_MESSAGES: usize = 1;
pub const MAX_MESSAGES: usize = 50;

/// Shared per-process state. Everything inside is immutable or cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    pub extractor: MemoryExtractor,
    pub engine: PersonalityEngine,
}

impl AppState {
    pub fn new(
        model: Arc<dyn model::ModelClient>,
        catalog: Arc<PersonalityCatalog>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            extractor: MemoryExtractor::new(Arc::clone(&model)),
            engine: PersonalityEngine::new(model, catalog, max_concurrency),
        }
    }
}

/// Shared setup: create the model client and the builtin catalog.
pub fn setup_shared_state(config: &CompanionConfig) -> Result<Arc<AppState>> {
    let client = model::create_client(&config.model)?;
    tracing::info!(
        provider = %config.model.provider,
        model = %client.model_name(),
        "model client ready"
    );

    let catalog = Arc::new(PersonalityCatalog::builtin());
    tracing::info!(personalities = catalog.len(), "personality catalog loaded");

    Ok(Arc::new(AppState::new(
        client,
        catalog,
        config.engine.max_concurrency,
    )))
}

/// Check an extraction request's message count.
pub fn validate_messages(messages: &[ChatMessage]) -> Result<(), String> {
    let count = messages.len();
    if !(MIN_MESSAGES..=MAX_MESSAGES).contains(&count) {
        return Err(format!(
            "messages must contain between {MIN_MESSAGES} and {MAX_MESSAGES} entries, got {count}"
        ));
    }
    Ok(())
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: CompanionConfig) -> Result<()> {
    tracing::info!("starting companion MCP server on stdio");

    let state = setup_shared_state(&config)?;

    let tools = CompanionTools::new(state);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the HTTP API server.
pub async fn serve_http(config: CompanionConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "starting companion HTTP server");

    let state = setup_shared_state(&config)?;
    let router = crate::http::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "HTTP server listening at http://{bind_addr}/api");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_bounds_are_inclusive() {
        let one = vec![ChatMessage::user("hi")];
        let fifty = vec![ChatMessage::user("hi"); 50];
        let fifty_one = vec![ChatMessage::user("hi"); 51];

        assert!(validate_messages(&one).is_ok());
        assert!(validate_messages(&fifty).is_ok());
        assert!(validate_messages(&[]).is_err());
        let err = validate_messages(&fifty_one).unwrap_err();
        assert!(err.contains("got 51"));
    }

    #[test]
    fn setup_uses_builtin_catalog() {
        let state = setup_shared_state(&CompanionConfig::default()).unwrap();
        assert_eq!(state.engine.catalog().len(), 5);
        assert_eq!(state.engine.max_concurrency(), 5);
    }
}
