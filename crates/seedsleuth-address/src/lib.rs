//! SeedSleuth Address Pipeline
//!
//! Seed -> public key -> hash chain -> encoded address, with the
//! key-derivation step behind the [`KeyDeriver`] trait.

pub mod deriver;
pub mod networks;
pub mod pipeline;
pub mod scheme;
pub mod traits;

// Re-exports
pub use deriver::Bip32Deriver;
pub use networks::{all_networks, get_network, Network, ATOM, BTC, BTC_SEGWIT, DOGE, ETH, LTC};
pub use pipeline::AddressPipeline;
pub use scheme::{AddressError, AddressScheme};
pub use traits::{KeyDeriver, PublicKeyFormat};

pub use bitcoin::bip32::DerivationPath;
pub use seedsleuth_crypto::Seed;
