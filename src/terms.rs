//! Protection of literal terms (project, brand and tool names) across translation.
//!
//! Before the document goes to a generative backend every standalone occurrence
//! of a protected term is wrapped in a marker, e.g. `Sunshine` becomes
//! `@@@Sunshine@@@`. After translation the markers are turned back into the
//! bare term. Occurrences that are part of a larger word (`API` in `RAPID`) or
//! that touch a backtick (inline code) are left alone.

use regex::Regex;
use tracing::debug;

use crate::error::{ReadmeError, Result};

/// Delimiter placed on both sides of a masked term
pub const MARKER_DELIMITER: &str = "@@@";

/// Marker form of a term as it appears in masked text
pub fn marker(term: &str) -> String {
    format!("{}{}{}", MARKER_DELIMITER, term, MARKER_DELIMITER)
}

/// Ordered set of terms that must survive translation unchanged
#[derive(Debug, Clone)]
pub struct ProtectedTerms {
    terms: Vec<(String, Regex)>,
}

impl ProtectedTerms {
    /// Build the set, dropping blanks and repeated terms (first occurrence wins)
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled: Vec<(String, Regex)> = Vec::new();

        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() || compiled.iter().any(|(t, _)| t == term) {
                continue;
            }
            let pattern = Regex::new(&regex::escape(term)).map_err(|e| {
                ReadmeError::Config(format!("Invalid protected term '{}': {}", term, e))
            })?;
            compiled.push((term.to_string(), pattern));
        }

        Ok(Self { terms: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Terms in the order they were configured
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(t, _)| t.as_str())
    }

    /// Wrap every standalone occurrence of each term in its marker
    pub fn mask(&self, text: &str) -> String {
        let mut masked = text.to_string();

        for (term, pattern) in &self.terms {
            let mut out = String::with_capacity(masked.len());
            let mut last = 0;
            let mut count = 0;
            let mut pos = 0;

            // A rejected match may overlap a standalone one, so rescan from its next char
            while let Some(m) = pattern.find_at(&masked, pos) {
                let before = masked[..m.start()].chars().next_back();
                let after = masked[m.end()..].chars().next();
                if !is_boundary(before) || !is_boundary(after) {
                    pos = m.start() + masked[m.start()..].chars().next().map_or(1, char::len_utf8);
                    continue;
                }
                out.push_str(&masked[last..m.start()]);
                out.push_str(&marker(term));
                last = m.end();
                pos = m.end();
                count += 1;
            }

            if count > 0 {
                out.push_str(&masked[last..]);
                debug!("Masked {} occurrence(s) of '{}'", count, term);
                masked = out;
            }
        }

        masked
    }

    /// Turn every marker back into its bare term
    pub fn unmask(&self, text: &str) -> String {
        let mut unmasked = text.to_string();
        for (term, _) in &self.terms {
            unmasked = unmasked.replace(&marker(term), term);
        }
        unmasked
    }
}

/// A neighbouring character that does not glue the match into a larger token
fn is_boundary(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => !(c.is_alphanumeric() || c == '_' || c == '`'),
    }
}
