//! Fixed-width secret values (note nullifiers and secrets).

use std::fmt;
use std::str::FromStr;

use pasta_curves::pallas;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::field::{FieldElement, FieldElementError};

/// Width in bytes of the little-endian encoding fed to the commitment hash.
pub const SECRET_VALUE_SIZE: usize = 31;

/// A secret note component, stored as a 31-byte little-endian unsigned integer.
///
/// Every such value is below `2^248` and therefore a canonical field element.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretValue([u8; SECRET_VALUE_SIZE]);

impl SecretValue {
    /// Create a secret value from its little-endian bytes.
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; SECRET_VALUE_SIZE]) -> Self {
        Self(bytes)
    }

    /// The little-endian bytes of this value.
    #[must_use]
    pub const fn as_le_bytes(&self) -> &[u8; SECRET_VALUE_SIZE] {
        &self.0
    }

    /// Draw a uniformly random secret value.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0_u8; SECRET_VALUE_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// The field element with the same integer value.
    #[must_use]
    pub fn to_field(&self) -> FieldElement {
        let mut padded = [0_u8; 32];
        for (dst, src) in padded.iter_mut().zip(self.0.iter()) {
            *dst = *src;
        }

        let mut limbs = [0_u64; 4];
        for (limb, chunk) in limbs.iter_mut().zip(padded.chunks_exact(8)) {
            let mut word = [0_u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(word);
        }
        padded.zeroize();

        FieldElement::from_base(pallas::Base::from_raw(limbs))
    }
}

impl TryFrom<FieldElement> for SecretValue {
    type Error = FieldElementError;

    fn try_from(value: FieldElement) -> Result<Self, Self::Error> {
        let out_of_range = || FieldElementError::OutOfRange {
            value,
            width: SECRET_VALUE_SIZE,
        };

        let le = value.to_le_bytes();
        let (&top, rest) = le.split_last().ok_or_else(out_of_range)?;
        if top != 0 {
            return Err(out_of_range());
        }
        let bytes: [u8; SECRET_VALUE_SIZE] = rest.try_into().map_err(|_| out_of_range())?;
        Ok(Self(bytes))
    }
}

impl FromStr for SecretValue {
    type Err = FieldElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<FieldElement>()?.try_into()
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(<redacted>)")
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_field().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let field = FieldElement::deserialize(deserializer)?;
        Self::try_from(field).map_err(serde::de::Error::custom)
    }
}
