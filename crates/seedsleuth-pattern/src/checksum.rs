//! BIP39 checksum over 11-bit word indices

use seedsleuth_crypto::hash::sha256;

use crate::wordlist::{Wordlist, BIP39_WORDLIST_LEN};

/// Word counts BIP39 defines (128..=256 bits of entropy)
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// True when the indices form a checksum-valid BIP39 mnemonic.
///
/// The last `len / 3` bits of the concatenated indices must equal the top
/// bits of SHA-256 over the entropy bits before them.
pub fn is_valid_mnemonic_indices(indices: &[u16]) -> bool {
    let len = indices.len();
    if !VALID_WORD_COUNTS.contains(&len) {
        return false;
    }
    if indices.iter().any(|&i| usize::from(i) >= BIP39_WORDLIST_LEN) {
        return false;
    }

    let checksum_bits = len / 3;
    let entropy_bytes = (len * 11 - checksum_bits) / 8;

    let mut entropy = [0u8; 32];
    for (word, &index) in indices.iter().enumerate() {
        for bit in 0..11 {
            let pos = word * 11 + bit;
            if pos >= entropy_bytes * 8 {
                break;
            }
            if (index >> (10 - bit)) & 1 == 1 {
                entropy[pos / 8] |= 0x80 >> (pos % 8);
            }
        }
    }

    let hash = sha256(&entropy[..entropy_bytes]);
    let expected = u16::from(hash[0] >> (8 - checksum_bits));
    let mask = (1u16 << checksum_bits) - 1;

    indices[len - 1] & mask == expected
}

/// Checksum check on words; words missing from `wordlist` make it invalid.
///
/// Only meaningful when `wordlist` is a full 2048-word BIP39 list.
pub fn is_valid_mnemonic(words: &[&str], wordlist: &Wordlist) -> bool {
    let mut indices = [0u16; 24];
    if words.len() > indices.len() {
        return false;
    }
    for (slot, word) in indices.iter_mut().zip(words) {
        match wordlist.index_of(word) {
            Some(i) => *slot = i as u16,
            None => return false,
        }
    }
    is_valid_mnemonic_indices(&indices[..words.len()])
}
