//! HTTP translation oracle client
//!
//! This module provides the reqwest-based client for an OpenAI-compatible
//! chat-completions endpoint. One job maps to one POST; the pipeline owns
//! the no-retry policy, so this client never retries on its own.

use crate::adapters::oracle::models::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
    TranslationRequest, TranslationResponse,
};
use crate::adapters::oracle::traits::TranslationOracle;
use crate::config::OracleConfig;
use crate::domain::{KartotekaError, OracleError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Output-format directive appended to the entity context in the system
/// message. The JSON-only contract is what makes the response parseable.
const SYSTEM_DIRECTIVE: &str = "You will be given text in a source language and a list of target \
     language codes. Respond ONLY with a valid JSON object, where each key is a language code \
     from the target list and each value is the translated string. Do not include the source \
     language key, and do not add any explanations.";

/// Translation oracle client over HTTP
///
/// # Example
///
/// ```no_run
/// use kartoteka::adapters::oracle::HttpOracleClient;
/// use kartoteka::config::OracleConfig;
///
/// # fn example() -> kartoteka::domain::Result<()> {
/// let config = OracleConfig::default();
/// let client = HttpOracleClient::new(config)?;
/// # Ok(())
/// # }
/// ```
pub struct HttpOracleClient {
    /// HTTP client for making requests
    client: Client,

    /// Oracle configuration
    config: OracleConfig,
}

impl HttpOracleClient {
    /// Create a new oracle client from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Oracle configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: OracleConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            KartotekaError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self { client, config })
    }

    /// Get the endpoint URL this client posts to
    pub fn endpoint_url(&self) -> &str {
        &self.config.endpoint_url
    }

    fn build_chat_request(&self, request: &TranslationRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            response_format: ResponseFormat::json_object(),
            messages: vec![
                ChatMessage::system(format!("{} {SYSTEM_DIRECTIVE}", request.context)),
                ChatMessage::user(format!(
                    "Translate from \"{}\" into \"{}\".\n\nText: \"{}\"",
                    request.source_locale,
                    request.target_locales.join(", "),
                    request.text
                )),
            ],
        }
    }

    fn map_transport_error(e: reqwest::Error) -> OracleError {
        if e.is_timeout() {
            OracleError::Timeout(e.to_string())
        } else {
            OracleError::ConnectionFailed(e.to_string())
        }
    }
}

/// Parses the model's JSON content into a locale → translation map
///
/// Non-string values are dropped rather than rejected; the model contract
/// only guarantees string values for the keys it chose to answer.
fn parse_translations(content: &str) -> std::result::Result<BTreeMap<String, String>, OracleError> {
    let value: Value = serde_json::from_str(content).map_err(|e| {
        OracleError::InvalidResponse(format!("Oracle content is not valid JSON: {e}"))
    })?;

    let object = value.as_object().ok_or_else(|| {
        OracleError::InvalidResponse("Oracle content is not a JSON object".to_string())
    })?;

    Ok(object
        .iter()
        .filter_map(|(locale, translated)| {
            translated
                .as_str()
                .map(|s| (locale.clone(), s.to_string()))
        })
        .collect())
}

#[async_trait]
impl TranslationOracle for HttpOracleClient {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> std::result::Result<TranslationResponse, OracleError> {
        tracing::debug!(
            source_locale = %request.source_locale,
            target_count = request.target_locales.len(),
            model = %self.config.model,
            "Calling translation oracle"
        );

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose_secret().as_ref()),
            )
            .json(&self.build_chat_request(request))
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(if status.is_server_error() {
                OracleError::ServerError {
                    status: status.as_u16(),
                    message,
                }
            } else {
                OracleError::ClientError {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        let content = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .unwrap_or("{}");

        Ok(TranslationResponse {
            translations: parse_translations(content)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn test_config(endpoint_url: String) -> OracleConfig {
        OracleConfig {
            endpoint_url,
            api_key: secret_string("test-key".to_string()),
            model: "gpt-4o-mini".to_string(),
            timeout_seconds: 5,
            tls_verify: true,
        }
    }

    fn test_request() -> TranslationRequest {
        TranslationRequest {
            text: "Surgeon".to_string(),
            source_locale: "en".to_string(),
            target_locales: vec!["ru".to_string()],
            context: "professions".to_string(),
        }
    }

    #[test]
    fn test_parse_translations_drops_non_string_values() {
        let map =
            parse_translations(r#"{"ru": "Хирург", "sr-Latn": 5, "note": null}"#).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("ru").map(String::as_str), Some("Хирург"));
    }

    #[test]
    fn test_parse_translations_rejects_non_object() {
        assert!(parse_translations("[1, 2]").is_err());
        assert!(parse_translations("nonsense").is_err());
    }

    #[tokio::test]
    async fn test_translate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant",
                    "content": "{\"ru\": \"Хирург\"}"}}]}"#,
            )
            .create_async()
            .await;

        let client = HttpOracleClient::new(test_config(format!(
            "{}/v1/chat/completions",
            server.url()
        )))
        .unwrap();
        let response = client.translate(&test_request()).await.unwrap();

        assert_eq!(
            response.translations.get("ru").map(String::as_str),
            Some("Хирург")
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_translate_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(503)
            .with_body("upstream model unavailable")
            .create_async()
            .await;

        let client = HttpOracleClient::new(test_config(format!(
            "{}/v1/chat/completions",
            server.url()
        )))
        .unwrap();
        let err = client.translate(&test_request()).await.unwrap_err();

        assert!(matches!(err, OracleError::ServerError { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_translate_unparseable_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant", "content": "not json"}}]}"#,
            )
            .create_async()
            .await;

        let client = HttpOracleClient::new(test_config(format!(
            "{}/v1/chat/completions",
            server.url()
        )))
        .unwrap();
        let err = client.translate(&test_request()).await.unwrap_err();

        assert!(matches!(err, OracleError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_translate_empty_choices_is_empty_map() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = HttpOracleClient::new(test_config(format!(
            "{}/v1/chat/completions",
            server.url()
        )))
        .unwrap();
        let response = client.translate(&test_request()).await.unwrap();

        assert!(response.translations.is_empty());
    }
}
