//! Bech32 (BIP-173) checksum and encoding
//!
//! Hand-rolled so the hot path works on borrowed slices and never fails:
//! every value fed to the alphabet lookup is masked to 5 bits.

use crate::bits::convert_bits;
use crate::encoding::EncodingError;

/// Bech32 data alphabet
pub const BECH32_ALPHABET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Checksum constant XORed into the polymod (original Bech32, not Bech32m)
const BECH32_CONST: u32 = 1;

const GENERATORS: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

const CHECKSUM_LEN: usize = 6;

const MAX_HRP_LEN: usize = 83;

/// BCH polynomial modulus over 5-bit values
pub fn polymod(values: &[u8]) -> u32 {
    let mut chk = 1u32;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ff_ffff) << 5) ^ u32::from(v);
        for (i, g) in GENERATORS.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }
    chk
}

/// High 3 bits of every HRP char, a zero separator, then the low 5 bits
pub fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() * 2 + 1);
    out.extend(bytes.iter().map(|b| (b >> 5) & 0x07));
    out.push(0);
    out.extend(bytes.iter().map(|b| b & 0x1f));
    out
}

/// Six 5-bit checksum groups for `data` under `hrp`
pub fn create_checksum(hrp: &str, data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut values = hrp_expand(hrp);
    values.reserve(data.len() + CHECKSUM_LEN);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; CHECKSUM_LEN]);

    let modulus = polymod(&values) ^ BECH32_CONST;

    let mut out = [0u8; CHECKSUM_LEN];
    for (i, group) in out.iter_mut().enumerate() {
        *group = ((modulus >> (5 * (5 - i))) & 0x1f) as u8;
    }
    out
}

/// True when `data` (payload groups followed by the checksum) is valid for `hrp`
pub fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values) == BECH32_CONST
}

/// Encode already-grouped 5-bit values: `hrp + "1" + data + checksum`
pub fn encode_groups(hrp: &str, groups: &[u8]) -> String {
    let checksum = create_checksum(hrp, groups);

    let mut out = String::with_capacity(hrp.len() + 1 + groups.len() + CHECKSUM_LEN);
    out.push_str(hrp);
    out.push('1');
    out.extend(
        groups
            .iter()
            .chain(checksum.iter())
            .map(|&g| BECH32_ALPHABET[(g & 0x1f) as usize] as char),
    );
    out
}

/// Bech32 encode raw bytes (8 -> 5 bit regrouping with padding, no witness version)
pub fn bech32_encode(hrp: &str, payload: &[u8]) -> String {
    encode_groups(hrp, &convert_bits(payload, 8, 5, true))
}

/// SegWit address: witness version as its own 5-bit group, then the program
pub fn segwit_encode(hrp: &str, witness_version: u8, program: &[u8]) -> String {
    let mut groups = Vec::with_capacity(1 + (program.len() * 8).div_ceil(5));
    groups.push(witness_version & 0x1f);
    groups.extend(convert_bits(program, 8, 5, true));
    encode_groups(hrp, &groups)
}

/// Decode the data part of a Bech32 string back to 5-bit groups, checksum included
pub fn decode_groups(address: &str) -> Result<(String, Vec<u8>), EncodingError> {
    let lower = address.to_ascii_lowercase();
    if lower != address && address.to_ascii_uppercase() != address {
        return Err(EncodingError::InvalidCharacter);
    }

    let sep = lower.rfind('1').ok_or(EncodingError::InvalidCharacter)?;
    let (hrp, data) = (&lower[..sep], &lower[sep + 1..]);
    validate_hrp(hrp)?;
    if data.len() < CHECKSUM_LEN {
        return Err(EncodingError::InvalidLength);
    }

    let groups = data
        .bytes()
        .map(|c| {
            BECH32_ALPHABET
                .iter()
                .position(|&a| a == c)
                .map(|p| p as u8)
                .ok_or(EncodingError::InvalidCharacter)
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if !verify_checksum(hrp, &groups) {
        return Err(EncodingError::InvalidChecksum);
    }

    Ok((hrp.to_string(), groups))
}

/// 1..=83 printable US-ASCII chars, not mixed case
pub fn validate_hrp(hrp: &str) -> Result<(), EncodingError> {
    if hrp.is_empty() || hrp.len() > MAX_HRP_LEN {
        return Err(EncodingError::InvalidHrp(hrp.to_string()));
    }
    if !hrp.bytes().all(|b| (33..=126).contains(&b)) {
        return Err(EncodingError::InvalidHrp(hrp.to_string()));
    }
    let has_lower = hrp.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hrp.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(EncodingError::InvalidHrp(hrp.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash160;

    fn data_part(encoded: &str, hrp: &str) -> Vec<u8> {
        encoded[hrp.len() + 1..]
            .bytes()
            .map(|c| BECH32_ALPHABET.iter().position(|&a| a == c).unwrap() as u8)
            .collect()
    }

    #[test]
    fn test_hrp_expand() {
        // 'b' = 0x62 = 011 00010, 'c' = 0x63 = 011 00011
        assert_eq!(hrp_expand("bc"), vec![3, 3, 0, 2, 3]);
    }

    #[test]
    fn test_checksum_verifies() {
        let encoded = bech32_encode("bc", &[0u8; 20]);
        assert!(encoded.starts_with("bc1"));
        assert!(verify_checksum("bc", &data_part(&encoded, "bc")));
        assert!(!verify_checksum("tb", &data_part(&encoded, "bc")));
    }

    #[test]
    fn test_raw_encode_matches_bech32_crate() {
        let hrp = ::bech32::Hrp::parse("bc").unwrap();
        let expected = ::bech32::encode::<::bech32::Bech32>(hrp, &[0u8; 20]).unwrap();
        assert_eq!(bech32_encode("bc", &[0u8; 20]), expected);

        let hrp = ::bech32::Hrp::parse("cosmos").unwrap();
        let payload = hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        let expected = ::bech32::encode::<::bech32::Bech32>(hrp, &payload).unwrap();
        assert_eq!(bech32_encode("cosmos", &payload), expected);
    }

    #[test]
    fn test_segwit_v0_vector() {
        let pubkey = hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798").unwrap();
        assert_eq!(
            segwit_encode("bc", 0, &hash160(&pubkey)),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
    }

    #[test]
    fn test_segwit_matches_bech32_crate() {
        let program = [0x42u8; 20];
        let expected = ::bech32::segwit::encode_v0(::bech32::hrp::BC, &program).unwrap();
        assert_eq!(segwit_encode("bc", 0, &program), expected);
    }

    #[test]
    fn test_decode_groups() {
        let (hrp, groups) = decode_groups("BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4").unwrap();
        assert_eq!(hrp, "bc");
        assert_eq!(groups[0], 0);
        assert_eq!(groups.len(), 1 + 32 + 6);

        assert_eq!(
            decode_groups("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5"),
            Err(EncodingError::InvalidChecksum)
        );
        assert_eq!(
            decode_groups("bc1qW508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"),
            Err(EncodingError::InvalidCharacter)
        );
    }

    #[test]
    fn test_validate_hrp() {
        assert!(validate_hrp("bc").is_ok());
        assert!(validate_hrp("cosmos").is_ok());
        assert!(validate_hrp("").is_err());
        assert!(validate_hrp("Bc").is_err());
        assert!(validate_hrp("b c").is_err());
        assert!(validate_hrp("bé").is_err());
    }

    #[test]
    fn test_non_ascii_hrp_does_not_panic() {
        let encoded = bech32_encode("héllo", &[1, 2, 3]);
        assert!(encoded.starts_with("héllo1"));
    }
}
