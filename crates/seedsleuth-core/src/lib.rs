//! SeedSleuth Core Engine
//!
//! Brute-force recovery of mnemonics with unknown words, sequential or
//! sharded over a multi-threaded CPU pool.

mod engine;
mod search;
mod stats;
mod wallet;

pub use engine::{brute_find_wallet, brute_force_seed_phrase, EngineContext};
pub use search::{RecoverySearch, SearchConfig, SearchError, SearchResult};
pub use stats::SearchStats;
pub use wallet::{SearchCounter, Wallet};

// Re-exports for convenience
pub use seedsleuth_address::{
    all_networks, get_network, AddressPipeline, AddressScheme, Bip32Deriver, DerivationPath, KeyDeriver,
    Network, PublicKeyFormat,
};
pub use seedsleuth_pattern::{format_duration, format_space, search_space, Token, WordPattern, Wordlist};
