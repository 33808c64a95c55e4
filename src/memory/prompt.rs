//! Extraction prompt construction.
//!
//! Pure functions: a transcript goes in, a model-ready instruction string comes
//! out. Nothing is truncated here; message-count limits are enforced by the
//! request boundary.

use super::types::ChatMessage;

/// Render messages as `Message {n}: {content}` lines, numbered from 1.
pub fn format_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .enumerate()
        .map(|(i, msg)| format!("Message {}: {}", i + 1, msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full extraction prompt for a transcript.
pub fn extraction_prompt(messages: &[ChatMessage]) -> String {
    let conversation = format_transcript(messages);
    format!(
        r#"You are an expert at analyzing conversations and extracting meaningful insights about users.

Analyze the following conversation and extract structured information about the user.

CONVERSATION:
{conversation}

Extract the following information in JSON format:

1. PREFERENCES:
   - likes: Things the user enjoys, prefers, or shows positive sentiment toward
   - dislikes: Things the user dislikes, avoids, or shows negative sentiment toward
   - habits: Recurring behaviors, routines, or patterns
   - interests: Topics, hobbies, or areas the user is interested in

2. EMOTIONAL_PATTERNS:
   - dominant_emotions: Most frequently expressed emotions (e.g., anxious, excited, frustrated, happy)
   - emotional_triggers: Topics or situations that evoke strong emotions
   - communication_style: How the user communicates (e.g., direct, verbose, casual, formal)
   - stress_indicators: Signs of stress, worry, or overwhelm

3. FACTS:
   - personal_info: Factual information about the user (name, age, location, occupation, etc.)
   - relationships: Information about family, friends, colleagues, pets
   - goals: Aspirations, objectives, or things they're working toward
   - events: Important events, milestones, or experiences mentioned

4. SUMMARY: A brief 2-3 sentence summary of the user's overall profile

Return ONLY valid JSON in this exact structure:
{{
  "preferences": {{
    "likes": ["item1", "item2"],
    "dislikes": ["item1", "item2"],
    "habits": ["habit1", "habit2"],
    "interests": ["interest1", "interest2"]
  }},
  "emotional_patterns": {{
    "dominant_emotions": ["emotion1", "emotion2"],
    "emotional_triggers": ["trigger1", "trigger2"],
    "communication_style": "description",
    "stress_indicators": ["indicator1", "indicator2"]
  }},
  "facts": {{
    "personal_info": ["fact1", "fact2"],
    "relationships": ["relationship1", "relationship2"],
    "goals": ["goal1", "goal2"],
    "events": ["event1", "event2"]
  }},
  "summary": "Brief summary of the user"
}}

Be specific and extract actual details from the conversation. If a category has no information, use an empty list or empty string."#
    )
}
