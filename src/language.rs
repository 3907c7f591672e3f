use serde::{Deserialize, Serialize};

use crate::error::{ReadmeError, Result};

/// A translation target: the code names the output file, the name goes into prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTarget {
    /// Language code (e.g., "fr", "zh-CN")
    pub code: String,
    /// Display name (e.g., "French")
    pub name: String,
}

impl LanguageTarget {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Build a target from a code alone, looking up its English name
    pub fn from_code(code: &str) -> Self {
        Self::new(code, language_code_to_name(code))
    }

    /// Whether this target's code denotes the given language
    pub fn matches_code(&self, code: &str) -> bool {
        normalize_code(&self.code) == normalize_code(code)
    }
}

impl std::fmt::Display for LanguageTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Targets used when neither the config file nor the command line names any
pub fn default_languages() -> Vec<LanguageTarget> {
    vec![
        LanguageTarget::new("en", "English"),
        LanguageTarget::new("zh-CN", "Chinese Simplified"),
        LanguageTarget::new("fr", "French"),
        LanguageTarget::new("de", "German"),
        LanguageTarget::new("ja", "Japanese"),
    ]
}

/// Normalize a language code for comparison: `zh_CN`, `zh-cn` and `zh-CN` are the same
pub fn normalize_code(code: &str) -> String {
    code.trim().replace('_', "-").to_lowercase()
}

/// Parse a comma-separated list of `code` or `code=Name` entries
pub fn parse_language_list(list: &str) -> Result<Vec<LanguageTarget>> {
    let mut targets = Vec::new();

    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let target = match entry.split_once('=') {
            Some((code, name)) => {
                let code = code.trim();
                let name = name.trim();
                if code.is_empty() || name.is_empty() {
                    return Err(ReadmeError::Config(format!(
                        "Invalid language entry '{}'. Expected 'code' or 'code=Name'",
                        entry
                    )));
                }
                LanguageTarget::new(code, name)
            }
            None => LanguageTarget::from_code(entry),
        };
        targets.push(target);
    }

    if targets.is_empty() {
        return Err(ReadmeError::Config("No target languages given".to_string()));
    }

    Ok(targets)
}

/// Convert language code to full language name for clearer prompts
pub fn language_code_to_name(code: &str) -> String {
    let name = match normalize_code(code).as_str() {
        "en" => "English",
        "zh" | "zh-cn" | "zh-hans" => "Chinese Simplified",
        "zh-tw" | "zh-hant" => "Chinese Traditional",
        "ja" => "Japanese",
        "ko" => "Korean",
        "fr" => "French",
        "de" => "German",
        "es" => "Spanish",
        "ru" => "Russian",
        "it" => "Italian",
        "pt" => "Portuguese",
        "pt-br" => "Brazilian Portuguese",
        "pl" => "Polish",
        "nl" => "Dutch",
        "tr" => "Turkish",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "th" => "Thai",
        "vi" => "Vietnamese",
        "sv" => "Swedish",
        "da" => "Danish",
        "no" => "Norwegian",
        "fi" => "Finnish",
        "he" => "Hebrew",
        "hu" => "Hungarian",
        "cs" => "Czech",
        "uk" => "Ukrainian",
        "id" => "Indonesian",
        _ => return code.to_string(),
    };
    name.to_string()
}
