//! Key-derivation seam between the seed and the address hash chain

use serde::{Deserialize, Serialize};
use std::fmt;

use seedsleuth_crypto::Seed;

/// SEC1 serialization a scheme hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicKeyFormat {
    /// 33 bytes: 0x02/0x03 || x
    Compressed,
    /// 65 bytes: 0x04 || x || y
    Uncompressed,
}

impl fmt::Display for PublicKeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicKeyFormat::Compressed => write!(f, "compressed"),
            PublicKeyFormat::Uncompressed => write!(f, "uncompressed"),
        }
    }
}

/// Maps a 64-byte seed to the public key an address is built from.
///
/// Returns `None` when the seed yields no valid key at the configured path.
/// The pipeline treats that as a non-match.
pub trait KeyDeriver: Send + Sync {
    fn derive_public_key(&self, seed: &Seed, format: PublicKeyFormat) -> Option<Vec<u8>>;

    /// Short human-readable description (e.g. the derivation path)
    fn describe(&self) -> String {
        "custom".to_string()
    }
}

impl<F> KeyDeriver for F
where
    F: Fn(&Seed, PublicKeyFormat) -> Option<Vec<u8>> + Send + Sync,
{
    fn derive_public_key(&self, seed: &Seed, format: PublicKeyFormat) -> Option<Vec<u8>> {
        self(seed, format)
    }
}
