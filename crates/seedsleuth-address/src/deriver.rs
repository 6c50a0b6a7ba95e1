//! BIP32/BIP44 secp256k1 key derivation

use std::fmt;

use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::secp256k1::{All, PublicKey, Secp256k1};
use bitcoin::NetworkKind;

use seedsleuth_crypto::Seed;

use crate::traits::{KeyDeriver, PublicKeyFormat};

/// Derives the public key at a fixed BIP32 path from the seed
#[derive(Clone)]
pub struct Bip32Deriver {
    path: DerivationPath,
    secp: Secp256k1<All>,
}

impl fmt::Debug for Bip32Deriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bip32Deriver").field("path", &self.path).finish()
    }
}

impl Bip32Deriver {
    pub fn new(path: DerivationPath) -> Self {
        Self { path, secp: Secp256k1::new() }
    }

    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// Extended private key at the configured path
    pub fn derive_xpriv(&self, seed: &[u8]) -> Option<Xpriv> {
        // The network only affects xprv serialization, never the key itself
        let master = Xpriv::new_master(NetworkKind::Main, seed).ok()?;
        master.derive_priv(&self.secp, &self.path).ok()
    }
}

impl KeyDeriver for Bip32Deriver {
    fn derive_public_key(&self, seed: &Seed, format: PublicKeyFormat) -> Option<Vec<u8>> {
        let node = self.derive_xpriv(seed)?;
        let public_key = PublicKey::from_secret_key(&self.secp, &node.private_key);
        Some(match format {
            PublicKeyFormat::Compressed => public_key.serialize().to_vec(),
            PublicKeyFormat::Uncompressed => public_key.serialize_uncompressed().to_vec(),
        })
    }

    fn describe(&self) -> String {
        format!("BIP32 {}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedsleuth_crypto::hex;

    // BIP32 test vector 1 uses a 16-byte seed, not a 64-byte BIP39 one
    const VECTOR1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    fn vector1_key(path: &str) -> String {
        let seed = hex::decode(VECTOR1_SEED).unwrap();
        let node = Bip32Deriver::new(path.parse().unwrap()).derive_xpriv(&seed).unwrap();
        hex::encode(node.private_key.secret_bytes())
    }

    #[test]
    fn test_vector1_private_keys() {
        assert_eq!(
            vector1_key("m"),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            vector1_key("m/0'"),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );
        assert_eq!(
            vector1_key("m/0'/1"),
            "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368"
        );
    }

    #[test]
    fn test_vector1_master_public_key() {
        let seed = hex::decode(VECTOR1_SEED).unwrap();
        let deriver = Bip32Deriver::new("m".parse().unwrap());
        let node = deriver.derive_xpriv(&seed).unwrap();
        let public_key = PublicKey::from_secret_key(&deriver.secp, &node.private_key);
        assert_eq!(
            hex::encode(public_key.serialize()),
            "0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2"
        );
    }

    #[test]
    fn test_formats_share_x_coordinate() {
        let deriver = Bip32Deriver::new("m/44'/0'/0'/0/0".parse().unwrap());
        let seed = [7u8; 64];
        let compressed = deriver.derive_public_key(&seed, PublicKeyFormat::Compressed).unwrap();
        let uncompressed = deriver.derive_public_key(&seed, PublicKeyFormat::Uncompressed).unwrap();

        assert_eq!(compressed.len(), 33);
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(compressed[1..], uncompressed[1..33]);
    }

    #[test]
    fn test_path_markers() {
        let apostrophe: DerivationPath = "m/84'/0'/0'/0/0".parse().unwrap();
        let h: DerivationPath = "m/84h/0h/0h/0/0".parse().unwrap();
        assert_eq!(apostrophe, h);

        assert!("m/44'/x".parse::<DerivationPath>().is_err());
        assert!("m/2147483648".parse::<DerivationPath>().is_err());
    }

    #[test]
    fn test_describe() {
        let deriver = Bip32Deriver::new("m/84h/0h/0h/0/0".parse().unwrap());
        let described = deriver.describe();
        assert!(described.starts_with("BIP32 "));
        assert!(described.ends_with("84'/0'/0'/0/0"));
    }
}
