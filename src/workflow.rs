use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::{Backend, Config};
use crate::error::{ReadmeError, Result};
use crate::language::LanguageTarget;
use crate::sanitize::strip_preamble;
use crate::terms::ProtectedTerms;
use crate::translate::{Translator, TranslatorFactory};

/// What happened to one target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageStatus {
    /// Translated and written to `path`
    Translated { path: PathBuf },
    /// Target is the source language; document copied verbatim to `path`
    Copied { path: PathBuf },
    /// Translation or writing failed; nothing else was affected
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOutcome {
    pub target: LanguageTarget,
    pub status: LanguageStatus,
}

impl LanguageOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self.status, LanguageStatus::Failed { .. })
    }
}

/// Per-language results of one run, in configured order
#[derive(Debug, Clone, Default)]
pub struct TranslationReport {
    pub outcomes: Vec<LanguageOutcome>,
}

impl TranslationReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn outcome(&self, code: &str) -> Option<&LanguageOutcome> {
        self.outcomes.iter().find(|o| o.target.matches_code(code))
    }
}

pub struct Workflow {
    config: Config,
    terms: ProtectedTerms,
    translator: Box<dyn Translator>,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let terms = ProtectedTerms::new(&config.protected_terms)?;
        let translator = TranslatorFactory::create_translator(&config, &terms)?;
        Ok(Self {
            config,
            terms,
            translator,
        })
    }

    /// Build a workflow around an already constructed backend
    pub fn with_translator(config: Config, translator: Box<dyn Translator>) -> Result<Self> {
        let terms = ProtectedTerms::new(&config.protected_terms)?;
        Ok(Self {
            config,
            terms,
            translator,
        })
    }

    /// Only the API backend gets term masking and preamble stripping
    fn post_processes(&self) -> bool {
        self.config.backend == Backend::Api
    }

    /// Translate the input document into every configured language.
    ///
    /// A missing input document aborts the run; failures for a single language
    /// are recorded in the report and the next language is attempted.
    pub async fn run(&self) -> Result<TranslationReport> {
        let input = &self.config.document.input;
        if !input.exists() {
            return Err(ReadmeError::FileNotFound(input.display().to_string()));
        }

        let document = fs::read_to_string(input).await?;
        info!(
            "Loaded {} ({} bytes), backend: {}",
            input.display(),
            document.len(),
            self.translator.provider_name()
        );

        let output_dir = self.config.output_dir();
        if !output_dir.as_os_str().is_empty() {
            fs::create_dir_all(&output_dir).await?;
        }

        let mut report = TranslationReport::default();

        for target in &self.config.languages {
            let spinner = language_spinner(target);
            let result = self.process_language(&document, target, &output_dir).await;
            spinner.finish_and_clear();

            let status = match result {
                Ok(status) => {
                    println!("✓ Translated to {} ({})", target.name, target.code);
                    status
                }
                Err(e) => {
                    println!("✗ Failed to translate to {}: {}", target.name, e);
                    warn!("Translation to {} failed: {}", target, e);
                    LanguageStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            report.outcomes.push(LanguageOutcome {
                target: target.clone(),
                status,
            });
        }

        info!(
            "Finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    async fn process_language(
        &self,
        document: &str,
        target: &LanguageTarget,
        output_dir: &Path,
    ) -> Result<LanguageStatus> {
        let path = output_dir.join(self.config.output_file_name(&target.code));

        if target.matches_code(&self.config.document.source_language) {
            debug!("{} is the source language, copying", target);
            fs::write(&path, document).await?;
            return Ok(LanguageStatus::Copied { path });
        }

        let translated = self.translate_document(document, target).await?;
        fs::write(&path, translated).await?;
        info!("Wrote {}", path.display());

        Ok(LanguageStatus::Translated { path })
    }

    /// Run the backend pipeline for one language and return the final text
    pub async fn translate_document(&self, document: &str, target: &LanguageTarget) -> Result<String> {
        info!("Translating to {}", target);

        if !self.post_processes() {
            return self.translator.translate(document, target).await;
        }

        let masked = self.terms.mask(document);
        let translated = self.translator.translate(&masked, target).await?;
        let unmasked = self.terms.unmask(&translated);
        Ok(strip_preamble(&unmasked))
    }

    /// The document as the API backend would receive it
    pub fn mask_document(&self, document: &str) -> String {
        self.terms.mask(document)
    }
}

fn language_spinner(target: &LanguageTarget) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Translating to {}...", target.name));
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
