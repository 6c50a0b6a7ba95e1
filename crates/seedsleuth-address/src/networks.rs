//! Network presets: address scheme + default derivation path

use bitcoin::bip32::{self, DerivationPath};

use crate::deriver::Bip32Deriver;
use crate::pipeline::AddressPipeline;
use crate::scheme::{AddressError, AddressScheme};

/// A named network with its usual address scheme and BIP44-style path
#[derive(Debug, Clone)]
pub struct Network {
    ticker: &'static str,
    name: &'static str,
    scheme: AddressScheme,
    default_path: &'static str,
}

impl Network {
    pub const fn new(
        ticker: &'static str,
        name: &'static str,
        scheme: AddressScheme,
        default_path: &'static str,
    ) -> Self {
        Self { ticker, name, scheme, default_path }
    }

    pub fn ticker(&self) -> &'static str {
        self.ticker
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn scheme(&self) -> &AddressScheme {
        &self.scheme
    }

    pub fn default_path(&self) -> &'static str {
        self.default_path
    }

    /// BIP32 pipeline at `path` (or the default path)
    pub fn pipeline(&self, path: Option<&str>, passphrase: &str) -> Result<AddressPipeline, AddressError> {
        let path: DerivationPath = path
            .unwrap_or(self.default_path)
            .parse()
            .map_err(|e: bip32::Error| AddressError::InvalidPath(e.to_string()))?;
        Ok(AddressPipeline::new(self.scheme.clone(), Bip32Deriver::new(path), passphrase))
    }
}

// UTXO chains
pub const BTC: Network = Network::new("BTC", "Bitcoin", AddressScheme::p2pkh(0x00), "m/44'/0'/0'/0/0");
pub const BTC_SEGWIT: Network = Network::new("BTC-SEGWIT", "Bitcoin SegWit", AddressScheme::p2wpkh("bc"), "m/84'/0'/0'/0/0");
pub const LTC: Network = Network::new("LTC", "Litecoin", AddressScheme::p2pkh(0x30), "m/44'/2'/0'/0/0");
pub const DOGE: Network = Network::new("DOGE", "Dogecoin", AddressScheme::p2pkh(0x1e), "m/44'/3'/0'/0/0");

// EVM
pub const ETH: Network = Network::new("ETH", "Ethereum", AddressScheme::Evm, "m/44'/60'/0'/0/0");

// Cosmos
pub const ATOM: Network = Network::new("ATOM", "Cosmos Hub", AddressScheme::bech32("cosmos"), "m/44'/118'/0'/0/0");

/// Get all presets
pub fn all_networks() -> Vec<Network> {
    vec![BTC, BTC_SEGWIT, LTC, DOGE, ETH, ATOM]
}

/// Get a preset by ticker
pub fn get_network(ticker: &str) -> Option<Network> {
    match ticker.to_uppercase().as_str() {
        "BTC" => Some(BTC),
        "BTC-SEGWIT" | "BTC-BECH32" => Some(BTC_SEGWIT),
        "LTC" => Some(LTC),
        "DOGE" => Some(DOGE),
        "ETH" => Some(ETH),
        "ATOM" => Some(ATOM),
        _ => None,
    }
}
