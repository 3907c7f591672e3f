//! Chat-completion backend.
//!
//! The whole (already masked) document is wrapped in a single instruction and
//! sent as one user message to an OpenAI-compatible `/chat/completions`
//! endpoint. The API key comes from an environment variable and is checked
//! before any request is made.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::Translator;
use crate::config::ApiConfig;
use crate::error::{ReadmeError, Result};
use crate::language::LanguageTarget;
use crate::terms::{MARKER_DELIMITER, ProtectedTerms};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

pub struct ChatTranslator {
    client: Client,
    config: ApiConfig,
    terms: Vec<String>,
}

impl ChatTranslator {
    pub fn new(config: ApiConfig, terms: &ProtectedTerms) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            terms: terms.terms().map(str::to_string).collect(),
        })
    }

    /// Read the API key; a missing or blank variable is a configuration error
    fn api_key(&self) -> Result<String> {
        match std::env::var(&self.config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ReadmeError::Config(format!(
                "{} environment variable not set",
                self.config.api_key_env
            ))),
        }
    }

    /// Build the translation instruction followed by the document
    pub fn build_prompt(&self, text: &str, language_name: &str) -> String {
        let mut prompt = format!(
            "Translate the following Markdown document into {}.\n\
             \n\
             Rules:\n\
             - Keep all Markdown formatting, links, images, HTML tags and code blocks exactly as they are.\n\
             - Keep every word wrapped in {} markers exactly as written, including the markers.\n",
            language_name, MARKER_DELIMITER
        );

        if !self.terms.is_empty() {
            prompt.push_str(&format!(
                "- Do not translate these terms: {}.\n",
                self.terms.join(", ")
            ));
        }

        prompt.push_str(
            "- Reply with the translated document only, without any introduction or explanation.\n\
             \n\
             [Document]\n",
        );
        prompt.push_str(text);
        prompt
    }

    /// Single user message carrying instruction and document
    pub fn build_request(&self, text: &str, target: &LanguageTarget) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: self.build_prompt(text, &target.name),
            }],
            temperature: self.config.temperature,
        }
    }

    fn endpoint_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Translator for ChatTranslator {
    async fn translate(&self, text: &str, target: &LanguageTarget) -> Result<String> {
        let api_key = self.api_key()?;

        let request = self.build_request(text, target);

        let url = self.endpoint_url();
        debug!("Sending chat completion request to: {} (model {})", url, request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReadmeError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ReadmeError::Translation(format!("Failed to parse response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ReadmeError::Translation("Response contained no choices".to_string()))?;

        debug!("Received {} characters for {}", content.len(), target.name);
        Ok(content)
    }

    fn provider_name(&self) -> &'static str {
        "Chat Completion API"
    }
}

impl std::fmt::Debug for ChatTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatTranslator")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .field("api_key_env", &self.config.api_key_env)
            .finish()
    }
}
