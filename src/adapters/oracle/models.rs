//! Wire types for the translation oracle API
//!
//! The oracle speaks the OpenAI-compatible chat-completions protocol. Only
//! the fields this crate reads or writes are modelled; extraneous response
//! fields are ignored by serde.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One translation job as handed to the oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Source text to translate
    pub text: String,

    /// Locale the source text is written in
    pub source_locale: String,

    /// Locales to translate into (never includes the source locale)
    pub target_locales: Vec<String>,

    /// Prompt context describing the entity being translated
    pub context: String,
}

/// Translations produced by the oracle
///
/// The map may cover only a subset of the requested locales; callers treat
/// missing locales as "not translated this time", not as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationResponse {
    /// Produced translations, keyed by locale code
    pub translations: BTreeMap<String, String>,
}

/// Chat-completions request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub response_format: ResponseFormat,
    pub messages: Vec<ChatMessage>,
}

/// Forces the model to emit a JSON object
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// One chat message
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completions response body (the parts this crate reads)
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}
