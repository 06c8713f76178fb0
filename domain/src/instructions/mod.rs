//! Instruction corpus entries and retrieval configuration.
//!
//! The corpus is a single free-text document written as a numbered list.
//! [`split_corpus`] breaks it into entries on the numbered-list delimiter
//! (newline, digits, period, space) and assigns 1-based sequential ids.
//! Entries are immutable after load.

use serde::{Deserialize, Serialize};

/// One guidance snippet from the instruction corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// 1-based position in the split sequence.
    pub id: usize,
    pub text: String,
}

/// Split a corpus document into entries.
///
/// An entry starts wherever a line begins with `<digits>. ` (including the
/// very first line); the marker itself is not part of the entry text.
/// Blank-only fragments are dropped, surviving text is trimmed.
///
/// Un-numbered preamble text before the first marker becomes its own
/// leading entry, so it takes id 1 and shifts the numbered entries by one.
/// Ids are positions in the split sequence, not the list markers.
pub fn split_corpus(text: &str) -> Vec<CorpusEntry> {
    let mut sections: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if let Some(body) = numbered_body(line) {
            if !current.trim().is_empty() {
                sections.push(current.trim().to_string());
            }
            current = body.to_string();
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.trim().is_empty() {
        sections.push(current.trim().to_string());
    }

    sections
        .into_iter()
        .enumerate()
        .map(|(i, text)| CorpusEntry { id: i + 1, text })
        .collect()
}

/// If `line` starts with a `<digits>. ` marker, return the rest of the line.
fn numbered_body(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

/// Tuning knobs for the adaptive threshold retrieval in the instruction
/// store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Floor for relevance, in `[0, 1]`; entries scoring below it are never
    /// returned.
    pub min_similarity_score: f32,
    /// Ceiling on how many candidates the search may examine.
    pub max_k: usize,
    /// How much the candidate count widens per iteration.
    pub k_increment: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            min_similarity_score: 0.5,
            max_k: 4,
            k_increment: 2,
        }
    }
}

impl RetrievalConfig {
    /// Check the documented constraints: score in `[0,1]`, `k_increment >= 1`,
    /// `max_k >= k_increment`.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_similarity_score) {
            return Err(format!(
                "min_similarity_score must be in [0, 1], got {}",
                self.min_similarity_score
            ));
        }
        if self.k_increment == 0 {
            return Err("k_increment must be at least 1".to_string());
        }
        if self.max_k < self.k_increment {
            return Err(format!(
                "max_k ({}) must be at least k_increment ({})",
                self.max_k, self.k_increment
            ));
        }
        Ok(())
    }
}
