//! BIP39 mnemonic -> seed

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

/// PBKDF2 iteration count for BIP39 seed derivation
pub const BIP39_PBKDF2_ROUNDS: u32 = 2048;

/// BIP39 salt prefix
pub const BIP39_SALT_PREFIX: &str = "mnemonic";

/// 64-byte BIP39 seed
pub type Seed = [u8; 64];

/// PBKDF2-HMAC-SHA512 over the mnemonic with salt `"mnemonic" + passphrase`.
///
/// The mnemonic is not checked against any wordlist or checksum.
pub fn mnemonic_to_seed(mnemonic: &str, passphrase: &str) -> Seed {
    let mut salt = String::with_capacity(BIP39_SALT_PREFIX.len() + passphrase.len());
    salt.push_str(BIP39_SALT_PREFIX);
    salt.push_str(passphrase);

    let mut seed = [0u8; 64];
    pbkdf2_hmac::<Sha512>(mnemonic.as_bytes(), salt.as_bytes(), BIP39_PBKDF2_ROUNDS, &mut seed);
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";

    #[test]
    fn test_bip39_vector_no_passphrase() {
        assert_eq!(
            hex::encode(mnemonic_to_seed(ABANDON_ABOUT, "")),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_bip39_vector_trezor_passphrase() {
        assert_eq!(
            hex::encode(mnemonic_to_seed(ABANDON_ABOUT, "TREZOR")),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
             1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_invalid_mnemonic_still_derives() {
        // Not a checksum-valid mnemonic; derivation is total anyway
        let a = mnemonic_to_seed("not a real mnemonic", "");
        let b = mnemonic_to_seed("", "");
        assert_ne!(a, b);
        assert_eq!(a, mnemonic_to_seed("not a real mnemonic", ""));
    }
}
