// Translation backends
//
// Both backends implement the Translator trait and are picked by the factory:
// - Library: machine translation service, text sent as-is
// - Api: chat-completion LLM driven by a natural-language instruction

pub mod chat;
pub mod google;

use async_trait::async_trait;

use crate::config::{Backend, Config};
use crate::error::Result;
use crate::language::LanguageTarget;
use crate::terms::ProtectedTerms;

/// Main trait for translation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a whole document into the target language
    async fn translate(&self, text: &str, target: &LanguageTarget) -> Result<String>;

    /// Human readable backend name for logs
    fn provider_name(&self) -> &'static str;
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translator for the configured backend
    pub fn create_translator(config: &Config, terms: &ProtectedTerms) -> Result<Box<dyn Translator>> {
        let translator: Box<dyn Translator> = match config.backend {
            Backend::Library => Box::new(google::GoogleTranslator::new(config.library.clone())?),
            Backend::Api => Box::new(chat::ChatTranslator::new(config.api.clone(), terms)?),
        };
        Ok(translator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_picks_backend() {
        let terms = ProtectedTerms::new(["Sunshine"]).unwrap();
        let mut config = Config::default();

        config.backend = Backend::Library;
        let translator = TranslatorFactory::create_translator(&config, &terms).unwrap();
        assert_eq!(translator.provider_name(), "Google Translate");

        config.backend = Backend::Api;
        let translator = TranslatorFactory::create_translator(&config, &terms).unwrap();
        assert_eq!(translator.provider_name(), "Chat Completion API");
    }
}
