//! Mnemonic patterns with unknown positions

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wordlist::Wordlist;

/// Placeholder token used when none is given
pub const DEFAULT_MARKER: &str = "_";

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Pattern is empty")]
    EmptyPattern,
    #[error("Placeholder marker must be a single non-empty token")]
    InvalidMarker,
    #[error("Missing index {index} is out of range for a {len}-word pattern")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Missing index {0} listed more than once")]
    DuplicateIndex(usize),
    #[error("Missing indices {indices:?} do not match placeholder positions {placeholders:?}")]
    InconsistentPlaceholders {
        indices: Vec<usize>,
        placeholders: Vec<usize>,
    },
    #[error("Word '{0}' is not in the wordlist")]
    UnknownWord(String),
    #[error("Wordlist is empty")]
    EmptyWordlist,
    #[error("Word '{0}' appears more than once in the wordlist")]
    DuplicateWord(String),
    #[error("Failed to read wordlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One position of a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// Known word
    Word(String),
    /// Unknown word to brute-force
    Placeholder,
}

/// A mnemonic with some unknown words.
///
/// Invariant: `missing_indices` holds exactly the positions of
/// [`Token::Placeholder`], each once. Its order is the search order: the
/// first index varies slowest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPattern {
    tokens: Vec<Token>,
    missing_indices: Vec<usize>,
    marker: String,
}

impl WordPattern {
    /// Whitespace-separated words; tokens equal to `marker` are placeholders
    pub fn parse(text: &str, marker: &str) -> Result<Self, PatternError> {
        if marker.is_empty() || marker.contains(char::is_whitespace) {
            return Err(PatternError::InvalidMarker);
        }

        let tokens: Vec<Token> = text
            .split_whitespace()
            .map(|w| {
                if w == marker {
                    Token::Placeholder
                } else {
                    Token::Word(w.to_string())
                }
            })
            .collect();

        if tokens.is_empty() {
            return Err(PatternError::EmptyPattern);
        }

        let missing_indices = placeholder_positions(&tokens);
        Ok(Self {
            tokens,
            missing_indices,
            marker: marker.to_string(),
        })
    }

    /// Tokens plus an explicit search order over the placeholders
    pub fn with_missing_indices(tokens: Vec<Token>, missing_indices: Vec<usize>) -> Result<Self, PatternError> {
        if tokens.is_empty() {
            return Err(PatternError::EmptyPattern);
        }

        let mut seen = HashSet::with_capacity(missing_indices.len());
        for &index in &missing_indices {
            if index >= tokens.len() {
                return Err(PatternError::IndexOutOfRange { index, len: tokens.len() });
            }
            if !seen.insert(index) {
                return Err(PatternError::DuplicateIndex(index));
            }
        }

        let placeholders = placeholder_positions(&tokens);
        if seen.len() != placeholders.len() || !placeholders.iter().all(|p| seen.contains(p)) {
            return Err(PatternError::InconsistentPlaceholders {
                indices: missing_indices,
                placeholders,
            });
        }

        Ok(Self {
            tokens,
            missing_indices,
            marker: DEFAULT_MARKER.to_string(),
        })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn missing_indices(&self) -> &[usize] {
        &self.missing_indices
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Number of words in the mnemonic
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of unknown words (k in |wordlist|^k)
    pub fn placeholder_count(&self) -> usize {
        self.missing_indices.len()
    }

    /// Working buffer for the search: known words, placeholders as the marker
    pub fn slots(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .map(|t| match t {
                Token::Word(w) => w.as_str(),
                Token::Placeholder => self.marker.as_str(),
            })
            .collect()
    }

    /// Every known word must be in `wordlist`
    pub fn check_words(&self, wordlist: &Wordlist) -> Result<(), PatternError> {
        for token in &self.tokens {
            if let Token::Word(w) = token {
                if wordlist.index_of(w).is_none() {
                    return Err(PatternError::UnknownWord(w.clone()));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for WordPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slots().join(" "))
    }
}

fn placeholder_positions(tokens: &[Token]) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| **t == Token::Placeholder)
        .map(|(i, _)| i)
        .collect()
}
