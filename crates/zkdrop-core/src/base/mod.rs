//! Foundational primitive types and byte/text helpers.

mod field;
mod secret;
mod utils;

pub use field::{DEFAULT_HEX_WIDTH, FIELD_ELEMENT_SIZE, FieldElement, FieldElementError};
pub use secret::{SECRET_VALUE_SIZE, SecretValue};
pub use utils::bytes_to_bits_le;
