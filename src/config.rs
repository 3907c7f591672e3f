use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ReadmeError, Result};
use crate::language::{LanguageTarget, default_languages};

/// Config file picked up from the current directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "readme-translate.toml";

// Default values for optional fields
fn default_output_pattern() -> String {
    "README.{code}.md".to_string()
}

fn default_max_chunk_chars() -> usize {
    4500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Translation backend to use
    pub backend: Backend,
    /// Terms that are never translated (API backend only)
    #[serde(default)]
    pub protected_terms: Vec<String>,
    pub document: DocumentConfig,
    pub library: LibraryConfig,
    pub api: ApiConfig,
    /// Target languages, processed in order
    #[serde(default = "default_languages")]
    pub languages: Vec<LanguageTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    /// Library: machine translation service, document sent as-is
    Library,
    /// Api: chat-completion LLM with term protection and preamble stripping
    Api,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Source document
    pub input: PathBuf,
    /// Directory for translated files (defaults to the input's directory)
    pub output_dir: Option<PathBuf>,
    /// Output file name; `{code}` is replaced by the language code
    #[serde(default = "default_output_pattern")]
    pub output_pattern: String,
    /// Language of the source document; targets with this code get a verbatim copy
    pub source_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Translation endpoint URL
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum characters sent per request
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the chat-completion API (without `/chat/completions`)
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature; kept low for stable output
    pub temperature: f64,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Api,
            protected_terms: [
                "GitHub", "Docker", "Rust", "Windows", "Linux", "macOS", "API", "JSON", "Markdown",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            document: DocumentConfig {
                input: PathBuf::from("README.md"),
                output_dir: None,
                output_pattern: default_output_pattern(),
                source_language: "en".to_string(),
            },
            library: LibraryConfig {
                endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
                timeout_secs: 30,
                max_chunk_chars: default_max_chunk_chars(),
            },
            api: ApiConfig {
                endpoint: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                temperature: 0.3,
                api_key_env: "OPENAI_API_KEY".to_string(),
                timeout_secs: 300,
            },
            languages: default_languages(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReadmeError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ReadmeError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ReadmeError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Reject settings no run could succeed with
    pub fn validate(&self) -> Result<()> {
        if !self.document.output_pattern.contains("{code}") {
            return Err(ReadmeError::Config(format!(
                "Output pattern '{}' must contain {{code}}",
                self.document.output_pattern
            )));
        }
        if self.languages.is_empty() {
            return Err(ReadmeError::Config("No target languages configured".to_string()));
        }
        if self.library.max_chunk_chars == 0 {
            return Err(ReadmeError::Config("max_chunk_chars must be greater than zero".to_string()));
        }
        if !(0.0..=2.0).contains(&self.api.temperature) {
            return Err(ReadmeError::Config(format!(
                "Temperature {} is out of range 0.0-2.0",
                self.api.temperature
            )));
        }
        Ok(())
    }

    /// Output file name for a language code
    pub fn output_file_name(&self, code: &str) -> String {
        self.document.output_pattern.replace("{code}", code)
    }

    /// Directory translated files are written to
    pub fn output_dir(&self) -> PathBuf {
        match &self.document.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .document
                .input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend, Backend::Api);
        assert_eq!(config.output_file_name("fr"), "README.fr.md");
    }

    #[test]
    fn test_output_dir_defaults_to_input_parent() {
        let mut config = Config::default();
        assert_eq!(config.output_dir(), PathBuf::new());

        config.document.input = PathBuf::from("docs/README.md");
        assert_eq!(config.output_dir(), PathBuf::from("docs"));

        config.document.output_dir = Some(PathBuf::from("out"));
        assert_eq!(config.output_dir(), PathBuf::from("out"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let mut config = Config::default();
        config.backend = Backend::Library;
        config.protected_terms = vec!["Sunshine".to_string()];
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.backend, Backend::Library);
        assert_eq!(loaded.protected_terms, vec!["Sunshine"]);
        assert_eq!(loaded.languages, config.languages);
        assert_eq!(loaded.api.model, config.api.model);
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let toml = r#"
            backend = "Library"

            [document]
            input = "README.md"
            source_language = "en"

            [library]
            endpoint = "http://localhost:8080"
            timeout_secs = 5

            [api]
            endpoint = "http://localhost:8081/v1"
            model = "test-model"
            temperature = 0.2
            api_key_env = "TEST_KEY"
            timeout_secs = 5
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.protected_terms.is_empty());
        assert_eq!(config.document.output_pattern, "README.{code}.md");
        assert_eq!(config.library.max_chunk_chars, 4500);
        assert_eq!(config.languages.len(), 5);
    }

    #[test]
    fn test_validate_rejects_pattern_without_code() {
        let mut config = Config::default();
        config.document.output_pattern = "README.translated.md".to_string();
        assert!(matches!(config.validate(), Err(ReadmeError::Config(_))));
    }

    #[test]
    fn test_from_file_reports_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "backend = [unterminated").unwrap();

        let result = Config::from_file(&path);
        assert!(matches!(result, Err(ReadmeError::Toml(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("/nonexistent/readme-translate.toml");
        assert!(matches!(result, Err(ReadmeError::Config(_))));
    }
}
