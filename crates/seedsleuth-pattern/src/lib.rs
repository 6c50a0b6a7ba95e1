//! SeedSleuth Pattern Handling
//!
//! Word patterns with placeholders, wordlists, BIP39 checksum checks and
//! search-space sizing.

pub mod checksum;
mod pattern;
mod space;
mod wordlist;

pub use pattern::{PatternError, Token, WordPattern, DEFAULT_MARKER};
pub use space::{estimate_seconds, format_duration, format_space, search_space};
pub use wordlist::Wordlist;
