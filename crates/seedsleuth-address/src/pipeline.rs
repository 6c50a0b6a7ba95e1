//! mnemonic -> seed -> public key -> address

use seedsleuth_crypto::{mnemonic_to_seed, Seed};

use crate::scheme::AddressScheme;
use crate::traits::KeyDeriver;

/// One configured derivation pipeline, shared read-only by every search worker
pub struct AddressPipeline {
    scheme: AddressScheme,
    deriver: Box<dyn KeyDeriver>,
    passphrase: String,
}

impl AddressPipeline {
    pub fn new(scheme: AddressScheme, deriver: impl KeyDeriver + 'static, passphrase: impl Into<String>) -> Self {
        Self {
            scheme,
            deriver: Box::new(deriver),
            passphrase: passphrase.into(),
        }
    }

    pub fn scheme(&self) -> &AddressScheme {
        &self.scheme
    }

    pub fn deriver(&self) -> &dyn KeyDeriver {
        self.deriver.as_ref()
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// BIP39 seed with this pipeline's passphrase
    pub fn seed(&self, mnemonic: &str) -> Seed {
        mnemonic_to_seed(mnemonic, &self.passphrase)
    }

    /// Key derivation + hash chain; `None` if the seed yields no valid key
    pub fn address_from_seed(&self, seed: &Seed) -> Option<String> {
        let pubkey = self.deriver.derive_public_key(seed, self.scheme.key_format())?;
        Some(self.scheme.encode(&pubkey))
    }

    /// Full pipeline for one mnemonic
    pub fn derive_address(&self, mnemonic: &str) -> Option<String> {
        self.address_from_seed(&self.seed(mnemonic))
    }

    /// The derived address when it equals `normalized_target` exactly.
    ///
    /// `normalized_target` must come from [`AddressScheme::normalize_target`].
    pub fn matches(&self, mnemonic: &str, normalized_target: &str) -> Option<String> {
        self.derive_address(mnemonic)
            .filter(|address| address == normalized_target)
    }
}
