//! Field elements of the proving system.
//!
//! Every tree value, hash input and hash output is a [`FieldElement`]. The textual form
//! is `0x`-prefixed lowercase big-endian hex, left-padded to a fixed minimum width.

use std::fmt;
use std::str::FromStr;

use ff::{Field as _, PrimeField as _};
use pasta_curves::pallas;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::utils::reverse_bytes;

/// Size of the canonical byte encoding of a field element.
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// Default minimum byte width used when rendering field elements as hex.
pub const DEFAULT_HEX_WIDTH: usize = 32;

/// Maximum number of significant hex digits a field element can have.
const MAX_HEX_DIGITS: usize = FIELD_ELEMENT_SIZE * 2;

/// Errors produced when decoding field elements from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldElementError {
    /// The hex form is malformed.
    #[error("Invalid hex field element {input:?}: {reason}")]
    InvalidHex {
        /// The offending input.
        input: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// The input is neither `0x`-prefixed hex nor a decimal integer.
    #[error("Invalid decimal field element {0:?}")]
    InvalidDecimal(String),
    /// The hex value is not below the field modulus.
    #[error("Value {0:?} is not a canonical field element")]
    NonCanonical(String),
    /// The value does not fit in the required number of bytes.
    #[error("Value {value} does not fit in {width} bytes")]
    OutOfRange {
        /// The offending value.
        value: FieldElement,
        /// The maximum width in bytes.
        width: usize,
    },
}

/// An element of the Pallas base field.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FieldElement(pallas::Base);

impl FieldElement {
    /// The zero element.
    pub const ZERO: Self = Self(pallas::Base::ZERO);

    /// The one element.
    pub const ONE: Self = Self(pallas::Base::ONE);

    /// Wrap a Pallas base field element.
    #[must_use]
    pub const fn from_base(base: pallas::Base) -> Self {
        Self(base)
    }

    /// The underlying Pallas base field element.
    #[must_use]
    pub const fn to_base(self) -> pallas::Base {
        self.0
    }

    /// Canonical little-endian encoding.
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; FIELD_ELEMENT_SIZE] {
        self.0.to_repr()
    }

    /// Canonical big-endian encoding.
    #[must_use]
    pub fn to_be_bytes(self) -> [u8; FIELD_ELEMENT_SIZE] {
        reverse_bytes(&self.to_le_bytes())
    }

    /// Decode a little-endian encoding, returning `None` if it is not canonical.
    #[must_use]
    pub fn from_le_bytes(bytes: [u8; FIELD_ELEMENT_SIZE]) -> Option<Self> {
        Option::<pallas::Base>::from(pallas::Base::from_repr(bytes)).map(Self)
    }

    /// Decode a big-endian encoding, returning `None` if it is not canonical.
    #[must_use]
    pub fn from_be_bytes(bytes: [u8; FIELD_ELEMENT_SIZE]) -> Option<Self> {
        Self::from_le_bytes(reverse_bytes(&bytes))
    }

    /// Render as `0x`-prefixed lowercase hex, zero-padded to at least `width` bytes.
    ///
    /// Values wider than `width` are never truncated.
    #[must_use]
    pub fn to_padded_hex(self, width: usize) -> String {
        let digits = hex::encode(self.to_be_bytes());
        let significant = match digits.trim_start_matches('0') {
            "" => "0",
            rest => rest,
        };
        format!("0x{significant:0>pad$}", pad = width.saturating_mul(2))
    }

    fn parse_hex(input: &str, digits: &str) -> Result<Self, FieldElementError> {
        if digits.is_empty() {
            return Err(FieldElementError::InvalidHex {
                input: input.to_owned(),
                reason: "no digits after 0x prefix",
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FieldElementError::InvalidHex {
                input: input.to_owned(),
                reason: "contains a non-hex character",
            });
        }
        let significant = digits.trim_start_matches('0');
        if significant.len() > MAX_HEX_DIGITS {
            return Err(FieldElementError::NonCanonical(input.to_owned()));
        }

        let padded = format!("{significant:0>width$}", width = MAX_HEX_DIGITS);
        let mut be_bytes = [0_u8; FIELD_ELEMENT_SIZE];
        hex::decode_to_slice(padded, &mut be_bytes).map_err(|_| {
            FieldElementError::InvalidHex {
                input: input.to_owned(),
                reason: "undecodable hex",
            }
        })?;
        Self::from_be_bytes(be_bytes)
            .ok_or_else(|| FieldElementError::NonCanonical(input.to_owned()))
    }

    /// Decimal values are reduced modulo the field characteristic.
    ///
    /// Leading zeros are rejected, except for `"0"` itself.
    fn parse_decimal(input: &str) -> Result<Self, FieldElementError> {
        let invalid = || FieldElementError::InvalidDecimal(input.to_owned());
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if input == "0" {
            return Ok(Self::ZERO);
        }
        if input.starts_with('0') {
            return Err(invalid());
        }
        pallas::Base::from_str_vartime(input)
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(pallas::Base::from(value))
    }
}

impl From<pallas::Base> for FieldElement {
    fn from(base: pallas::Base) -> Self {
        Self(base)
    }
}

impl From<FieldElement> for pallas::Base {
    fn from(element: FieldElement) -> Self {
        element.0
    }
}

impl FromStr for FieldElement {
    type Err = FieldElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(digits) => Self::parse_hex(trimmed, digits),
            None => Self::parse_decimal(trimmed),
        }
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_padded_hex(DEFAULT_HEX_WIDTH))
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self})")
    }
}

impl Serialize for FieldElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing, reason = "Tests")]

    use super::*;

    #[test]
    fn hex_is_padded_to_32_bytes() {
        let ten = FieldElement::from(10);
        assert_eq!(ten.to_string(), format!("0x{}a", "0".repeat(63)));
        assert_eq!(FieldElement::ZERO.to_string(), format!("0x{}", "0".repeat(64)));
    }

    #[test]
    fn custom_width_pads_without_truncating() {
        let value = FieldElement::from(0x1234);
        assert_eq!(value.to_padded_hex(4), "0x00001234");
        assert_eq!(value.to_padded_hex(1), "0x1234");
        assert_eq!(FieldElement::ZERO.to_padded_hex(0), "0x0");
    }

    #[test]
    fn parses_hex_and_decimal() {
        let expected = FieldElement::from(255);
        assert_eq!("0xff".parse::<FieldElement>(), Ok(expected));
        assert_eq!("0XFF".parse::<FieldElement>(), Ok(expected));
        assert_eq!("0x00000000ff".parse::<FieldElement>(), Ok(expected));
        assert_eq!("255".parse::<FieldElement>(), Ok(expected));
        assert_eq!("  255\r".parse::<FieldElement>(), Ok(expected));
        assert_eq!("0".parse::<FieldElement>(), Ok(FieldElement::ZERO));
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let value = FieldElement::from(u64::MAX);
        let text = value.to_string();
        assert_eq!(text.parse::<FieldElement>(), Ok(value));
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(matches!(
            "0x".parse::<FieldElement>(),
            Err(FieldElementError::InvalidHex { .. })
        ));
        assert!(matches!(
            "0xzz".parse::<FieldElement>(),
            Err(FieldElementError::InvalidHex { .. })
        ));
        assert!(matches!(
            "12a".parse::<FieldElement>(),
            Err(FieldElementError::InvalidDecimal(_))
        ));
        assert!(matches!(
            "".parse::<FieldElement>(),
            Err(FieldElementError::InvalidDecimal(_))
        ));
        assert!(matches!(
            "-1".parse::<FieldElement>(),
            Err(FieldElementError::InvalidDecimal(_))
        ));
        for padded in ["0255", "00", "007"] {
            assert_eq!(
                padded.parse::<FieldElement>(),
                Err(FieldElementError::InvalidDecimal(padded.to_owned()))
            );
        }
    }

    #[test]
    fn rejects_values_above_the_modulus() {
        let all_ones = format!("0x{}", "f".repeat(64));
        assert!(matches!(
            all_ones.parse::<FieldElement>(),
            Err(FieldElementError::NonCanonical(_))
        ));

        let too_wide = format!("0x1{}", "0".repeat(64));
        assert!(matches!(
            too_wide.parse::<FieldElement>(),
            Err(FieldElementError::NonCanonical(_))
        ));
    }

    #[test]
    fn byte_encodings_are_mirrored() {
        let value = FieldElement::from(0x0102);
        let le = value.to_le_bytes();
        let be = value.to_be_bytes();

        assert_eq!(le[0], 0x02);
        assert_eq!(le[1], 0x01);
        assert_eq!(be[31], 0x02);
        assert_eq!(be[30], 0x01);
        assert_eq!(FieldElement::from_be_bytes(be), Some(value));
        assert_eq!(FieldElement::from_le_bytes(le), Some(value));
    }

    #[test]
    fn serde_uses_padded_hex() {
        let value = FieldElement::from(1);
        let json = serde_json::to_string(&value).expect("serialize field element");
        assert_eq!(json, format!("\"0x{}1\"", "0".repeat(63)));

        let decoded: FieldElement = serde_json::from_str("\"42\"").expect("decimal string");
        assert_eq!(decoded, FieldElement::from(42));
    }
}
