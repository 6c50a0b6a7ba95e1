//! Candidate wordlists

use std::collections::HashMap;
use std::path::Path;

use bip39::Language;

use crate::pattern::PatternError;

/// Size of the standard BIP39 wordlists
pub const BIP39_WORDLIST_LEN: usize = 2048;

/// Ordered, distinct, non-empty list of candidate words.
///
/// Order only decides enumeration order.
#[derive(Debug, Clone)]
pub struct Wordlist {
    words: Vec<String>,
    index: HashMap<String, usize>,
}

impl Wordlist {
    pub fn new(words: Vec<String>) -> Result<Self, PatternError> {
        if words.is_empty() {
            return Err(PatternError::EmptyWordlist);
        }

        let mut index = HashMap::with_capacity(words.len());
        for (i, w) in words.iter().enumerate() {
            if index.insert(w.clone(), i).is_some() {
                return Err(PatternError::DuplicateWord(w.clone()));
            }
        }

        Ok(Self { words, index })
    }

    /// The standard English BIP39 list, in index order
    pub fn english() -> Self {
        let words: Vec<String> = Language::English.word_list().iter().map(|w| w.to_string()).collect();
        let index = words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();
        Self { words, index }
    }

    /// One word per line; surrounding whitespace and blank lines are ignored
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(words)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PatternError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.words.get(i).map(String::as_str)
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Positions are BIP39 word indices only for a full 2048-word list
    pub fn is_bip39_sized(&self) -> bool {
        self.words.len() == BIP39_WORDLIST_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let wordlist = Wordlist::parse("abandon\r\n ability \n\nable\n").unwrap();
        assert_eq!(wordlist.len(), 3);
        assert_eq!(wordlist.get(1), Some("ability"));
        assert_eq!(wordlist.index_of("able"), Some(2));
        assert_eq!(wordlist.index_of("zoo"), None);
        assert_eq!(wordlist.iter().collect::<Vec<_>>(), vec!["abandon", "ability", "able"]);
        assert!(!wordlist.is_bip39_sized());
    }

    #[test]
    fn test_english() {
        let wordlist = Wordlist::english();
        assert!(wordlist.is_bip39_sized());
        assert_eq!(wordlist.get(0), Some("abandon"));
        assert_eq!(wordlist.index_of("about"), Some(3));
        assert_eq!(wordlist.index_of("art"), Some(102));
        assert_eq!(wordlist.get(2047), Some("zoo"));

        let reparsed = Wordlist::new(wordlist.words().to_vec()).unwrap();
        assert_eq!(reparsed.len(), BIP39_WORDLIST_LEN);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(Wordlist::parse("\n \n"), Err(PatternError::EmptyWordlist)));
        assert!(matches!(Wordlist::new(vec![]), Err(PatternError::EmptyWordlist)));
    }

    #[test]
    fn test_duplicate_rejected() {
        assert!(matches!(
            Wordlist::parse("zoo\nabandon\nzoo"),
            Err(PatternError::DuplicateWord(w)) if w == "zoo"
        ));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("seedsleuth-wordlist-{}.txt", std::process::id()));
        std::fs::write(&path, "abandon\nability\n").unwrap();
        let wordlist = Wordlist::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(wordlist.words(), &["abandon".to_string(), "ability".to_string()]);

        assert!(matches!(
            Wordlist::from_file(&path),
            Err(PatternError::Io { .. })
        ));
    }
}
