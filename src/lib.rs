//! readme-translate - README Translation Workflow
//!
//! Reads a README document and writes one translated copy per target language,
//! using either a machine translation service or a chat-completion LLM API with
//! protection of project and brand names.

pub mod cli;
pub mod config;
pub mod error;
pub mod language;
pub mod sanitize;
pub mod terms;
pub mod translate;
pub mod workflow;
