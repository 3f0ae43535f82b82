//! 16-byte account addresses.

use starcoin_bcs::{BcsDeserialize, BcsError, BcsReader, BcsSerialize, BcsWriter};
use starcoin_crypto::Ed25519PublicKey;

use crate::TypesError;

/// Length of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 16;

/// A Starcoin account address.
///
/// Encoded on the wire as exactly 16 raw bytes with no length prefix.
/// The textual form is `0x` followed by 32 lowercase hex digits; parsing
/// also accepts unprefixed and short forms such as `0x1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    /// The all-zero address.
    pub const ZERO: Self = AccountAddress([0u8; ADDRESS_LENGTH]);

    /// `0x1`, the address the standard library is published under.
    pub const ONE: Self = {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = 1;
        AccountAddress(bytes)
    };

    /// Wrap raw address bytes.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        AccountAddress(bytes)
    }

    /// Create an address from a byte slice that must be exactly 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        let arr: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|_| {
            TypesError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(AccountAddress(arr))
    }

    /// Parse a hex address, with or without `0x`, left-padding short forms.
    ///
    /// # Returns
    /// An error for empty input, non-hex characters, or more than 32 digits.
    pub fn from_hex_literal(literal: &str) -> Result<Self, TypesError> {
        let digits = literal.strip_prefix("0x").unwrap_or(literal);
        if digits.is_empty() {
            return Err(TypesError::InvalidAddress(format!(
                "empty address {:?}",
                literal
            )));
        }
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(TypesError::InvalidAddress(format!(
                "{:?} has more than {} hex digits",
                literal,
                ADDRESS_LENGTH * 2
            )));
        }
        let padded = format!("{:0>width$}", digits, width = ADDRESS_LENGTH * 2);
        let bytes = hex::decode(&padded)
            .map_err(|e| TypesError::InvalidAddress(format!("{:?}: {}", literal, e)))?;
        Self::from_bytes(&bytes)
    }

    /// Derive the address owned by an Ed25519 public key: the last 16 bytes
    /// of its authentication key.
    pub fn from_public_key(public_key: &Ed25519PublicKey) -> Self {
        let auth_key = public_key.authentication_key();
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&auth_key[auth_key.len() - ADDRESS_LENGTH..]);
        AccountAddress(bytes)
    }

    /// Return the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Return the address as 32 lowercase hex digits with no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Return the shortest `0x` form, e.g. `0x1`.
    pub fn short_str(&self) -> String {
        let full = self.to_hex();
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::str::FromStr for AccountAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_literal(s)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for AccountAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        AccountAddress(bytes)
    }
}

impl BcsSerialize for AccountAddress {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_fixed_bytes(&self.0);
        Ok(())
    }
}

impl BcsDeserialize for AccountAddress {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        reader.read_array().map(AccountAddress)
    }
}
