//! Prompt builders for the two-stage personality pipeline.

use super::catalog::PersonalityProfile;
use crate::memory::types::{ChatMessage, UserMemory};

/// Optional context shared by both stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conversation<'a> {
    /// Previously extracted profile; only its summary is used.
    pub context: Option<&'a UserMemory>,
    /// Prior turns, oldest first.
    pub history: &'a [ChatMessage],
}

fn context_block(context: Option<&UserMemory>) -> String {
    match context {
        Some(memory) => format!("\n\nUser Context:\n{}", memory.summary),
        None => String::new(),
    }
}

fn history_block(history: &[ChatMessage]) -> String {
    if history.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = history
        .iter()
        .map(|msg| format!("{}: {}", msg.sender, msg.content))
        .collect();
    format!("\n\nPrevious Conversation:\n{}", lines.join("\n"))
}

/// Stage one: ask for a neutral, informative answer.
pub fn base_response_prompt(message: &str, conversation: Conversation<'_>) -> String {
    format!(
        "Generate a helpful, neutral response to the user's message.{context}{history}\n\
         \n\
         User Message: {message}\n\
         \n\
         Provide a clear, informative response that addresses their message.",
        context = context_block(conversation.context),
        history = history_block(conversation.history),
    )
}

/// Stage two: rewrite `base_response` in the voice of `profile`.
pub fn transform_prompt(
    message: &str,
    base_response: &str,
    profile: &PersonalityProfile,
    conversation: Conversation<'_>,
) -> String {
    let traits = profile
        .traits
        .iter()
        .map(|t| format!("- {t}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are transforming a response to match a specific personality profile.\n\
         \n\
         PERSONALITY: {name}\n\
         DESCRIPTION: {description}\n\
         TONE: {tone}\n\
         \n\
         KEY TRAITS:\n\
         {traits}\n\
         \n\
         USER MESSAGE: {message}{history}\n\
         \n\
         BASE RESPONSE: {base_response}{context}\n\
         \n\
         Transform the base response to fully embody the {name} personality.\n\
         - Rewrite it completely in this personality's voice and style\n\
         - Maintain the core helpful information\n\
         - Make it feel authentic to this personality\n\
         - Keep it natural and conversational\n\
         - Use the personality's characteristic language patterns and approach\n\
         - DO NOT include the personality name or \"[Base response]\" in your output.\n\
         - DO NOT prefix the response with \"TRANSFORMED RESPONSE:\".\n\
         - Just provide the transformed message directly.\n\
         \n\
         TRANSFORMED RESPONSE:",
        name = profile.name,
        description = profile.description,
        tone = profile.tone,
        history = history_block(conversation.history),
        context = context_block(conversation.context),
    )
}
