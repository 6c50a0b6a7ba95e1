//! SeedSleuth Crypto Primitives
//!
//! Hashes, bit regrouping, Base58 / Bech32 encoders and BIP39 seed
//! stretching used by the address pipeline.

pub mod bech32;
pub mod bits;
pub mod encoding;
pub mod hash;
pub mod seed;

pub use self::encoding::EncodingError;
pub use self::seed::{mnemonic_to_seed, Seed};

// Re-export dependencies for use by other crates
pub use hex;
