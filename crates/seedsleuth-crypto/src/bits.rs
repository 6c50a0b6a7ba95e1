//! Regrouping of bit strings between group widths (8-bit bytes <-> 5-bit groups)

/// Reinterpret `input`, a sequence of `from_bits`-wide groups, as a sequence of
/// `to_bits`-wide groups, most significant bit first.
///
/// With `pad`, leftover bits are shifted left into one final short group.
/// Without it, fewer than `to_bits` leftover bits are dropped. Input values
/// wider than `from_bits` are masked. Widths outside `1..=8` give an empty
/// result.
pub fn convert_bits(input: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> Vec<u8> {
    if !(1..=8).contains(&from_bits) || !(1..=8).contains(&to_bits) {
        return Vec::new();
    }

    let in_mask = (1u32 << from_bits) - 1;
    let out_mask = (1u32 << to_bits) - 1;
    // Never holds more than from_bits + to_bits - 1 live bits
    let acc_mask = (1u32 << (from_bits + to_bits - 1)) - 1;

    let mut out = Vec::with_capacity((input.len() * from_bits as usize).div_ceil(to_bits as usize));
    let mut acc = 0u32;
    let mut bits = 0u32;

    for &value in input {
        acc = ((acc << from_bits) | (u32::from(value) & in_mask)) & acc_mask;
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            out.push(((acc >> bits) & out_mask) as u8);
        }
    }

    if pad && bits > 0 {
        out.push(((acc << (to_bits - bits)) & out_mask) as u8);
    }

    out
}
