//! Utility functions for core primitive types.

/// Reverse a fixed-size byte array (little-endian <-> big-endian).
#[allow(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "Loop is bounded by N, indexing is always in bounds"
)]
pub(crate) const fn reverse_bytes<const N: usize>(input: &[u8; N]) -> [u8; N] {
    let mut output = [0_u8; N];
    let mut i = 0;
    while i < N {
        output[i] = input[N - 1 - i];
        i += 1;
    }
    output
}

/// Expand bytes into bits, least significant bit of each byte first.
///
/// Byte order is preserved, so a little-endian integer encoding yields its bits in
/// increasing significance.
pub fn bytes_to_bits_le(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .flat_map(|byte| (0..8_u8).map(move |bit| ((byte >> bit) & 1) == 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_bytes() {
        assert_eq!(
            reverse_bytes(&[1_u8, 2_u8, 3_u8, 4_u8, 5_u8]),
            [5_u8, 4_u8, 3_u8, 2_u8, 1_u8]
        );
        assert_eq!(reverse_bytes::<0>(&[]), [0_u8; 0]);
    }

    #[test]
    fn bits_are_little_endian_within_each_byte() {
        let bits: Vec<bool> = bytes_to_bits_le(&[0b0000_0101, 0b1000_0000]).collect();

        assert_eq!(bits.len(), 16);
        assert_eq!(
            bits,
            [
                true, false, true, false, false, false, false, false, false, false, false, false,
                false, false, false, true
            ]
        );
    }
}
