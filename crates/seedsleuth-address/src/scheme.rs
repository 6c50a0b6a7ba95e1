//! Address schemes: the hash chain + encoding applied to a derived public key

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use seedsleuth_crypto::{
    bech32::{bech32_encode, decode_groups, segwit_encode, validate_hrp},
    encoding::{base58check_decode, base58check_encode, eip55_checksum, EncodingError},
    hash::{hash160, keccak256},
    hex,
};

use crate::traits::PublicKeyFormat;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid scheme: {0}")]
    InvalidScheme(#[from] EncodingError),
    #[error("Target address {address:?} can never match {scheme}: {reason}")]
    InvalidTarget {
        address: String,
        scheme: String,
        reason: String,
    },
    #[error("Unknown address scheme: {0}")]
    UnknownScheme(String),
    #[error("{scheme} takes no {option} override")]
    UnsupportedOverride { scheme: String, option: &'static str },
    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),
}

/// Closed set of supported address formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressScheme {
    /// Base58Check(version || HASH160(compressed pubkey))
    P2pkh { version: u8 },
    /// SegWit v0: bech32(hrp, [0] || HASH160(compressed pubkey))
    P2wpkh { hrp: Cow<'static, str> },
    /// Cosmos style: bech32(hrp, HASH160(compressed pubkey)), no witness version
    Bech32 { hrp: Cow<'static, str> },
    /// "0x" + hex(last 20 bytes of Keccak-256(uncompressed pubkey without 0x04))
    Evm,
}

impl fmt::Display for AddressScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressScheme::P2pkh { version } => write!(f, "P2PKH (Base58Check, version 0x{:02x})", version),
            AddressScheme::P2wpkh { hrp } => write!(f, "P2WPKH (SegWit, hrp {})", hrp),
            AddressScheme::Bech32 { hrp } => write!(f, "Bech32 (hrp {})", hrp),
            AddressScheme::Evm => write!(f, "EVM"),
        }
    }
}

impl AddressScheme {
    pub const fn p2pkh(version: u8) -> Self {
        AddressScheme::P2pkh { version }
    }

    pub const fn p2wpkh(hrp: &'static str) -> Self {
        AddressScheme::P2wpkh { hrp: Cow::Borrowed(hrp) }
    }

    pub const fn bech32(hrp: &'static str) -> Self {
        AddressScheme::Bech32 { hrp: Cow::Borrowed(hrp) }
    }

    /// Build a scheme from CLI-style names
    pub fn from_name(name: &str, hrp: Option<&str>, version: Option<u8>) -> Result<Self, AddressError> {
        let scheme = match name.to_lowercase().as_str() {
            "p2pkh" | "legacy" | "base58" => AddressScheme::p2pkh(0x00),
            "p2wpkh" | "segwit" => AddressScheme::p2wpkh("bc"),
            "bech32" | "cosmos" => AddressScheme::bech32("cosmos"),
            "evm" | "eth" => AddressScheme::Evm,
            _ => return Err(AddressError::UnknownScheme(name.to_string())),
        };
        scheme.with_overrides(hrp, version)
    }

    /// Replace the HRP or version byte; an override the scheme has no slot for is an error
    pub fn with_overrides(self, hrp: Option<&str>, version: Option<u8>) -> Result<Self, AddressError> {
        let unsupported = |scheme: &AddressScheme, option: &'static str| AddressError::UnsupportedOverride {
            scheme: scheme.to_string(),
            option,
        };

        let scheme = match (self, hrp, version) {
            (scheme, _, Some(_)) if !matches!(scheme, AddressScheme::P2pkh { .. }) => {
                return Err(unsupported(&scheme, "version"))
            }
            (scheme @ (AddressScheme::P2pkh { .. } | AddressScheme::Evm), Some(_), _) => {
                return Err(unsupported(&scheme, "hrp"))
            }
            (AddressScheme::P2pkh { .. }, None, Some(version)) => AddressScheme::P2pkh { version },
            (AddressScheme::P2wpkh { .. }, Some(hrp), None) => AddressScheme::P2wpkh { hrp: Cow::Owned(hrp.to_string()) },
            (AddressScheme::Bech32 { .. }, Some(hrp), None) => AddressScheme::Bech32 { hrp: Cow::Owned(hrp.to_string()) },
            (scheme, _, _) => scheme,
        };
        scheme.validate()?;
        Ok(scheme)
    }

    /// Reject malformed parameters (bad HRP)
    pub fn validate(&self) -> Result<(), AddressError> {
        match self {
            AddressScheme::P2wpkh { hrp } | AddressScheme::Bech32 { hrp } => {
                validate_hrp(hrp)?;
                if hrp.bytes().any(|b| b.is_ascii_uppercase()) {
                    return Err(EncodingError::InvalidHrp(hrp.to_string()).into());
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Public key serialization the hash chain expects
    pub fn key_format(&self) -> PublicKeyFormat {
        match self {
            AddressScheme::Evm => PublicKeyFormat::Uncompressed,
            _ => PublicKeyFormat::Compressed,
        }
    }

    /// Run the hash chain and encoding over a public key.
    ///
    /// EVM accepts either the 65-byte SEC1 form or the bare 64-byte x || y.
    pub fn encode(&self, pubkey: &[u8]) -> String {
        match self {
            AddressScheme::P2pkh { version } => base58check_encode(*version, &hash160(pubkey)),
            AddressScheme::P2wpkh { hrp } => segwit_encode(hrp, 0, &hash160(pubkey)),
            AddressScheme::Bech32 { hrp } => bech32_encode(hrp, &hash160(pubkey)),
            AddressScheme::Evm => {
                let xy = if pubkey.len() == 65 { &pubkey[1..] } else { pubkey };
                let hash = keccak256(xy);
                let mut out = String::with_capacity(42);
                out.push_str("0x");
                out.push_str(&hex::encode(&hash[12..]));
                out
            }
        }
    }

    /// Canonical form of a target for exact comparison against `encode` output.
    ///
    /// Bech32 and hex are case-insensitive formats and get lowercased; Base58 is
    /// case-sensitive and only trimmed.
    pub fn normalize_target(&self, target: &str) -> String {
        let target = target.trim();
        match self {
            AddressScheme::P2pkh { .. } => target.to_string(),
            AddressScheme::P2wpkh { .. } | AddressScheme::Bech32 { .. } => target.to_ascii_lowercase(),
            AddressScheme::Evm => {
                let body = strip_hex_prefix(target);
                format!("0x{}", body.to_ascii_lowercase())
            }
        }
    }

    /// Form shown to the user (EIP-55 for EVM)
    pub fn display_address(&self, address: &str) -> String {
        match self {
            AddressScheme::Evm => {
                let mut bytes = [0u8; 20];
                match hex::decode_to_slice(strip_hex_prefix(address), &mut bytes) {
                    Ok(()) => eip55_checksum(&bytes),
                    Err(_) => address.to_string(),
                }
            }
            _ => address.to_string(),
        }
    }

    /// Reject targets this scheme can never produce
    pub fn validate_target(&self, target: &str) -> Result<(), AddressError> {
        let target = target.trim();
        let fail = |reason: &str| AddressError::InvalidTarget {
            address: target.to_string(),
            scheme: self.to_string(),
            reason: reason.to_string(),
        };

        match self {
            AddressScheme::P2pkh { version } => {
                let (found, payload) = base58check_decode(target).map_err(|e| fail(&e.to_string()))?;
                if found != *version {
                    return Err(fail(&format!("version byte 0x{:02x}", found)));
                }
                if payload.len() != 20 {
                    return Err(fail("payload is not a 20-byte hash"));
                }
            }
            AddressScheme::P2wpkh { hrp } | AddressScheme::Bech32 { hrp } => {
                let (found_hrp, groups) = decode_groups(target).map_err(|e| fail(&e.to_string()))?;
                if found_hrp != *hrp {
                    return Err(fail(&format!("human-readable part {:?}", found_hrp)));
                }
                // 20-byte hash = 32 groups, plus 6 checksum groups
                let expected = match self {
                    AddressScheme::P2wpkh { .. } => 1 + 32 + 6,
                    _ => 32 + 6,
                };
                if groups.len() != expected {
                    return Err(fail("data part has the wrong length"));
                }
                if matches!(self, AddressScheme::P2wpkh { .. }) && groups[0] != 0 {
                    return Err(fail("witness version is not 0"));
                }
            }
            AddressScheme::Evm => {
                let body = strip_hex_prefix(target);
                let mut bytes = [0u8; 20];
                hex::decode_to_slice(body, &mut bytes).map_err(|_| fail("not 20 hex-encoded bytes"))?;

                let mixed_case = body.bytes().any(|b| b.is_ascii_uppercase())
                    && body.bytes().any(|b| b.is_ascii_lowercase());
                if mixed_case && eip55_checksum(&bytes)[2..] != *body {
                    return Err(fail("EIP-55 checksum mismatch"));
                }
            }
        }
        Ok(())
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compressed / uncompressed public key of private key 1
    const G_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                                  483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_p2pkh_known_vector() {
        let pubkey = hex::decode(G_COMPRESSED).unwrap();
        assert_eq!(
            AddressScheme::p2pkh(0x00).encode(&pubkey),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
    }

    #[test]
    fn test_p2wpkh_known_vector() {
        let pubkey = hex::decode(G_COMPRESSED).unwrap();
        assert_eq!(
            AddressScheme::p2wpkh("bc").encode(&pubkey),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
    }

    #[test]
    fn test_evm_known_vector() {
        let pubkey = hex::decode(G_UNCOMPRESSED).unwrap();
        assert_eq!(
            AddressScheme::Evm.encode(&pubkey),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        // Bare x || y hashes the same
        assert_eq!(
            AddressScheme::Evm.encode(&pubkey[1..]),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_bech32_cosmos_prefix() {
        let pubkey = hex::decode(G_COMPRESSED).unwrap();
        let address = AddressScheme::bech32("cosmos").encode(&pubkey);
        assert!(address.starts_with("cosmos1"));
        assert!(AddressScheme::bech32("cosmos").validate_target(&address).is_ok());
    }

    #[test]
    fn test_key_format() {
        assert_eq!(AddressScheme::Evm.key_format(), PublicKeyFormat::Uncompressed);
        assert_eq!(AddressScheme::p2pkh(0).key_format(), PublicKeyFormat::Compressed);
    }

    #[test]
    fn test_normalize_target() {
        assert_eq!(
            AddressScheme::Evm.normalize_target("0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        assert_eq!(
            AddressScheme::Evm.normalize_target("7e5f4552091a69125d5dfcb7b8c2659029395bdf"),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        assert_eq!(
            AddressScheme::p2wpkh("bc").normalize_target(" BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4 "),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
        // Base58 is case-sensitive
        assert_eq!(
            AddressScheme::p2pkh(0).normalize_target("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
    }

    #[test]
    fn test_display_address_eip55() {
        assert_eq!(
            AddressScheme::Evm.display_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
        assert_eq!(AddressScheme::p2pkh(0).display_address("1abc"), "1abc");
    }

    #[test]
    fn test_validate_target() {
        let p2pkh = AddressScheme::p2pkh(0x00);
        assert!(p2pkh.validate_target("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH").is_ok());
        // Litecoin version on a Bitcoin address
        assert!(AddressScheme::p2pkh(0x30).validate_target("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH").is_err());
        assert!(p2pkh.validate_target("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ").is_err());

        let segwit = AddressScheme::p2wpkh("bc");
        assert!(segwit.validate_target("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4").is_ok());
        assert!(AddressScheme::p2wpkh("tb").validate_target("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4").is_err());

        let evm = AddressScheme::Evm;
        assert!(evm.validate_target("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").is_ok());
        assert!(evm.validate_target("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_ok());
        assert!(evm.validate_target("0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").is_err());
        assert!(evm.validate_target("0x1234").is_err());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(AddressScheme::from_name("segwit", None, None).unwrap(), AddressScheme::p2wpkh("bc"));
        assert_eq!(
            AddressScheme::from_name("p2pkh", None, Some(0x1e)).unwrap(),
            AddressScheme::p2pkh(0x1e)
        );
        assert_eq!(
            AddressScheme::from_name("bech32", Some("osmo"), None).unwrap(),
            AddressScheme::Bech32 { hrp: Cow::Owned("osmo".to_string()) }
        );
        assert!(matches!(
            AddressScheme::from_name("bech32", Some("Osmo"), None),
            Err(AddressError::InvalidScheme(_))
        ));
        assert!(matches!(
            AddressScheme::from_name("taproot", None, None),
            Err(AddressError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_overrides_must_fit_the_scheme() {
        assert_eq!(
            AddressScheme::p2pkh(0x00).with_overrides(None, Some(0x30)).unwrap(),
            AddressScheme::p2pkh(0x30)
        );
        assert_eq!(
            AddressScheme::p2wpkh("bc").with_overrides(Some("ltc"), None).unwrap(),
            AddressScheme::P2wpkh { hrp: Cow::Owned("ltc".to_string()) }
        );
        assert_eq!(AddressScheme::Evm.with_overrides(None, None).unwrap(), AddressScheme::Evm);

        assert!(matches!(
            AddressScheme::p2pkh(0x00).with_overrides(Some("bc"), None),
            Err(AddressError::UnsupportedOverride { option: "hrp", .. })
        ));
        assert!(matches!(
            AddressScheme::bech32("cosmos").with_overrides(None, Some(0x1e)),
            Err(AddressError::UnsupportedOverride { option: "version", .. })
        ));
        assert!(matches!(
            AddressScheme::Evm.with_overrides(Some("eth"), None),
            Err(AddressError::UnsupportedOverride { option: "hrp", .. })
        ));
        assert!(matches!(
            AddressScheme::from_name("segwit", None, Some(5)),
            Err(AddressError::UnsupportedOverride { .. })
        ));
    }
}
