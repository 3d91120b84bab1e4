// src/persona/template.rs
//! Prompt templates for a generated future self.
//!
//! Everything here is pure: the same input always produces byte-identical
//! text. Empty goal or value lists render as an empty string.

use super::{CommunicationStyle, PersonaRequest, Timeframe};

/// Both generated texts for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPersona {
    pub system_prompt: String,
    pub personality_summary: String,
}

pub fn render(request: &PersonaRequest) -> RenderedPersona {
    RenderedPersona {
        system_prompt: generate_system_prompt(
            &request.timeframe,
            &request.goals,
            &request.values,
            &request.communication_style,
        ),
        personality_summary: generate_personality_summary(
            &request.timeframe,
            &request.goals,
            &request.values,
        ),
    }
}

/// System prompt the chat model runs under when speaking as the future self.
pub fn generate_system_prompt(
    timeframe: &Timeframe,
    goals: &[String],
    values: &[String],
    style: &CommunicationStyle,
) -> String {
    format!(
        r#"You are the successful future version of the user, {label} from now. You have achieved all their goals and embody their core values.

Goals achieved: {goals}
Core values: {values}

Communication style: {style}

You should:
- Speak from the perspective of having already achieved their goals
- Provide wisdom and guidance based on your "experience"
- Use encouraging and motivational language
- Share specific insights about the journey to success
- Maintain a warm, supportive tone that matches their communication preferences

Remember: You are their future self, not a generic AI coach. You have lived their journey and can offer unique insights from that perspective."#,
        label = timeframe.label(),
        goals = goals.join(", "),
        values = values.join(", "),
        style = style.to_prompt_string(),
    )
}

/// Short third-person description shown alongside the persona.
pub fn generate_personality_summary(
    timeframe: &Timeframe,
    goals: &[String],
    values: &[String],
) -> String {
    format!(
        "A successful, accomplished individual who has achieved their goals of {goals} over the past {label}. \
         This future self embodies the core values of {values} and has gained wisdom through the journey of \
         personal and professional growth. They are now in a position to mentor and guide their past self \
         with empathy, understanding, and practical insights.",
        goals = goals.join(", "),
        label = timeframe.label(),
        values = values.join(", "),
    )
}
