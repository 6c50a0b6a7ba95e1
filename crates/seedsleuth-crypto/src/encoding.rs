//! Address encoding utilities: Base58, Base58Check, EIP-55

use thiserror::Error;

use crate::hash::{double_sha256, keccak256};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid checksum")]
    InvalidChecksum,
    #[error("Invalid character in input")]
    InvalidCharacter,
    #[error("Invalid length")]
    InvalidLength,
    #[error("Invalid human-readable part: {0}")]
    InvalidHrp(String),
}

/// Bitcoin Base58 alphabet
pub const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Base58 encode (no checksum).
///
/// Treats `input` as a big-endian integer and divides by 58 repeatedly. Each
/// leading zero byte becomes one leading `'1'`, so `[0x00, 0x01]` encodes to
/// `"12"`. Empty input encodes to an empty string.
pub fn base58_encode(input: &[u8]) -> String {
    if input.is_empty() {
        return String::new();
    }

    let zeros = input.iter().take_while(|&&b| b == 0).count();

    // log(256) / log(58) ~= 1.366 digits per byte
    let mut digits = vec![0u8; input.len() * 138 / 100 + 1];
    let mut digit_len = 0usize;

    for &byte in &input[zeros..] {
        let mut carry = u32::from(byte);
        for digit in digits[..digit_len].iter_mut() {
            carry += u32::from(*digit) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits[digit_len] = (carry % 58) as u8;
            digit_len += 1;
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digit_len);
    out.extend(std::iter::repeat(BASE58_ALPHABET[0] as char).take(zeros));
    out.extend(
        digits[..digit_len]
            .iter()
            .rev()
            .map(|&d| BASE58_ALPHABET[d as usize] as char),
    );
    out
}

/// Base58 decode
pub fn base58_decode(input: &str) -> Result<Vec<u8>, EncodingError> {
    bs58::decode(input)
        .into_vec()
        .map_err(|_| EncodingError::InvalidCharacter)
}

/// Base58Check encode (Bitcoin-style with 4-byte checksum)
pub fn base58check_encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + 4);
    data.push(version);
    data.extend_from_slice(payload);

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..4]);

    base58_encode(&data)
}

/// Base58Check decode, returns (version, payload)
pub fn base58check_decode(input: &str) -> Result<(u8, Vec<u8>), EncodingError> {
    let data = base58_decode(input)?;

    if data.len() < 5 {
        return Err(EncodingError::InvalidLength);
    }

    let (payload_with_version, checksum) = data.split_at(data.len() - 4);
    if checksum != &double_sha256(payload_with_version)[..4] {
        return Err(EncodingError::InvalidChecksum);
    }

    Ok((payload_with_version[0], payload_with_version[1..].to_vec()))
}

/// EIP-55 mixed-case checksum encoding for EVM addresses
pub fn eip55_checksum(address: &[u8; 20]) -> String {
    let hex_addr = hex::encode(address);
    let hash = keccak256(hex_addr.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (i, c) in hex_addr.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };

        if nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}
