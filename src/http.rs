//! HTTP API: routes, request/response bodies, and error mapping.
//!
//! All routes live under `/api/`. CORS is open to any origin.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::memory::types::{ChatMessage, UserMemory};
use crate::model::ModelError;
use crate::personality::{Conversation, PersonalityComparison};
use crate::server::{validate_messages, AppState};

#[derive(Debug, Deserialize)]
pub struct ExtractMemoryRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TransformRequest {
    pub message: String,
    pub personality: String,
    pub context: Option<UserMemory>,
    pub history: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransformResponse {
    pub original_response: String,
    pub transformed_response: String,
    /// The key as requested, even if it fell back to the default profile.
    pub personality_used: String,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub message: String,
    pub context: Option<UserMemory>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompareResponse {
    pub message: String,
    pub responses: PersonalityComparison,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonalityInfo {
    pub name: String,
    pub description: String,
}

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Request failed boundary validation.
    Validation(String),
    /// The model could not be reached during extraction.
    Model(ModelError),
}

/// Malformed or mistyped bodies get the same envelope as other validation failures.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        ApiError::Model(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::Model(ModelError::MissingApiKey) => {
                (StatusCode::SERVICE_UNAVAILABLE, "MISSING_API_KEY")
            }
            ApiError::Model(_) => (StatusCode::BAD_GATEWAY, "MODEL_UNAVAILABLE"),
        };
        let message = match self {
            ApiError::Validation(msg) => msg,
            ApiError::Model(e) => e.to_string(),
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });
        (status, Json(body)).into_response()
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health))
        .route("/personalities", get(list_personalities))
        .route("/extract-memory", post(extract_memory))
        .route("/transform-personality", post(transform_personality))
        .route("/compare-personalities", post(compare_personalities));

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .with_state(state)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "AI Companion System",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Keyed by identifier, in catalog order.
pub async fn list_personalities(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Map<String, serde_json::Value>> {
    let map = state
        .engine
        .list_personalities()
        .into_iter()
        .map(|s| {
            let info = PersonalityInfo {
                name: s.name,
                description: s.description,
            };
            (s.key, json!(info))
        })
        .collect();
    Json(map)
}

pub async fn extract_memory(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractMemoryRequest>, JsonRejection>,
) -> Result<Json<UserMemory>, ApiError> {
    let Json(request) = payload?;
    validate_messages(&request.messages).map_err(ApiError::Validation)?;
    let memory = state.extractor.extract(&request.messages).await?;
    Ok(Json(memory))
}

pub async fn transform_personality(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TransformRequest>, JsonRejection>,
) -> Result<Json<TransformResponse>, ApiError> {
    let Json(request) = payload?;
    let history = request.history.unwrap_or_default();
    let conversation = Conversation {
        context: request.context.as_ref(),
        history: &history,
    };
    let result = state
        .engine
        .transform(&request.message, &request.personality, conversation)
        .await;

    Ok(Json(TransformResponse {
        original_response: result.original,
        transformed_response: result.transformed,
        personality_used: request.personality,
    }))
}

pub async fn compare_personalities(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<CompareResponse>, ApiError> {
    let Json(request) = payload?;
    let responses = state
        .engine
        .compare_all(&request.message, request.context.as_ref())
        .await;
    Ok(Json(CompareResponse {
        message: request.message,
        responses,
    }))
}
