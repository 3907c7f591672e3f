//! Google Translate web endpoint provider.
//!
//! This is the backend translation libraries use under the hood: the public
//! `translate_a/single` endpoint with `client=gtx`. It needs no API key. The
//! document goes out as-is, split on line boundaries into chunks small enough
//! for a single request.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::Translator;
use crate::config::LibraryConfig;
use crate::error::{ReadmeError, Result};
use crate::language::LanguageTarget;

#[derive(Clone)]
pub struct GoogleTranslator {
    client: Client,
    config: LibraryConfig,
}

impl GoogleTranslator {
    pub fn new(config: LibraryConfig) -> Result<Self> {
        if config.max_chunk_chars == 0 {
            return Err(ReadmeError::Config(
                "max_chunk_chars must be greater than zero".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Translate one chunk with a single request
    async fn translate_chunk(&self, chunk: &str, target_code: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_code),
                ("dt", "t"),
            ])
            .form(&[("q", chunk)])
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

        let json: Value = response.json().await.map_err(|e| {
            ReadmeError::Translation(format!("Failed to parse API response: {}", e))
        })?;

        parse_response(&json)
    }
}

/// Split text into chunks of at most `max_chars` characters on line boundaries.
///
/// Line endings stay attached to their line so concatenating the chunks gives
/// back the input. A single line longer than `max_chars` becomes its own chunk.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut end = 0;
    let mut chars = 0;

    for line in text.split_inclusive('\n') {
        let line_chars = line.chars().count();
        if chars > 0 && chars + line_chars > max_chars {
            chunks.push(&text[start..end]);
            start = end;
            chars = 0;
        }
        end += line.len();
        chars += line_chars;
    }

    if end > start {
        chunks.push(&text[start..end]);
    }

    chunks
}

/// Concatenate the translated segments of a `translate_a/single` response
pub fn parse_response(json: &Value) -> Result<String> {
    let segments = json
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ReadmeError::Translation("Invalid API response: missing segment list".to_string())
        })?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(text);
        }
    }

    Ok(translated)
}

impl std::fmt::Debug for GoogleTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslator")
            .field("endpoint", &self.config.endpoint)
            .field("max_chunk_chars", &self.config.max_chunk_chars)
            .finish()
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &LanguageTarget) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let chunks = split_into_chunks(text, self.config.max_chunk_chars);
        debug!("Translating {} chunk(s) to {}", chunks.len(), target.code);

        let mut translated = String::with_capacity(text.len());
        for chunk in chunks {
            translated.push_str(&self.translate_chunk(chunk, &target.code).await?);
        }

        Ok(translated)
    }

    fn provider_name(&self) -> &'static str {
        "Google Translate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn library_config(endpoint: &str, max_chunk_chars: usize) -> LibraryConfig {
        LibraryConfig {
            endpoint: endpoint.to_string(),
            timeout_secs: 5,
            max_chunk_chars,
        }
    }

    // ========== Chunking Tests ==========

    #[test]
    fn test_chunk_under_limit() {
        let chunks = split_into_chunks("one\ntwo\n", 100);
        assert_eq!(chunks, vec!["one\ntwo\n"]);
    }

    #[test]
    fn test_chunk_splits_on_lines() {
        let text = "aaaa\nbbbb\ncccc";
        let chunks = split_into_chunks(text, 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n", "cccc"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_chunk_long_line_stands_alone() {
        let text = "short\nthis line is far too long\nend";
        let chunks = split_into_chunks(text, 8);
        assert_eq!(chunks, vec!["short\n", "this line is far too long\n", "end"]);
    }

    #[test]
    fn test_chunk_counts_characters_not_bytes() {
        let text = "日本語\nテキスト\n";
        let chunks = split_into_chunks(text, 9);
        assert_eq!(chunks, vec!["日本語\nテキスト\n"]);
    }

    #[test]
    fn test_chunk_empty() {
        assert!(split_into_chunks("", 10).is_empty());
    }

    // ========== Response Parsing Tests ==========

    #[test]
    fn test_parse_response_joins_segments() {
        let json = json!([
            [["Bonjour le monde.\n", "Hello world.\n", null, null, 10], ["Au revoir.", "Goodbye.", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(parse_response(&json).unwrap(), "Bonjour le monde.\nAu revoir.");
    }

    #[test]
    fn test_parse_response_skips_non_text_segments() {
        let json = json!([[["Salut", "Hi"], [null, null, "Salut"]]]);
        assert_eq!(parse_response(&json).unwrap(), "Salut");
    }

    #[test]
    fn test_parse_response_invalid() {
        assert!(matches!(
            parse_response(&json!({"error": "nope"})),
            Err(ReadmeError::Translation(_))
        ));
    }

    // ========== Provider Tests ==========

    #[test]
    fn test_new_rejects_zero_chunk_size() {
        let result = GoogleTranslator::new(library_config("http://localhost", 0));
        assert!(matches!(result, Err(ReadmeError::Config(_))));
    }

    #[tokio::test]
    async fn test_translate_empty_text() {
        let provider = GoogleTranslator::new(library_config("http://localhost", 100)).unwrap();
        let result = provider
            .translate("", &LanguageTarget::new("fr", "French"))
            .await
            .unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn test_translate_sends_target_code() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/translate_a/single")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("client".into(), "gtx".into()),
                mockito::Matcher::UrlEncoded("tl".into(), "zh-CN".into()),
            ]))
            .match_body(mockito::Matcher::UrlEncoded("q".into(), "Hello".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([[["你好", "Hello"]]]).to_string())
            .create_async()
            .await;

        let endpoint = format!("{}/translate_a/single", server.url());
        let provider = GoogleTranslator::new(library_config(&endpoint, 100)).unwrap();
        let result = provider
            .translate("Hello", &LanguageTarget::new("zh-CN", "Chinese Simplified"))
            .await
            .unwrap();

        assert_eq!(result, "你好");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_translate_reports_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/translate_a/single")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let endpoint = format!("{}/translate_a/single", server.url());
        let provider = GoogleTranslator::new(library_config(&endpoint, 100)).unwrap();
        let result = provider
            .translate("Hello", &LanguageTarget::new("fr", "French"))
            .await;

        assert!(matches!(result, Err(ReadmeError::HttpStatus { status: 503, .. })));
    }
}
