//! SHA3-256 hashing and the salted hashing scheme for on-chain values.
//!
//! A value's hash is `sha3_256(salt || bcs_bytes)` where the salt is
//! `sha3_256("STARCOIN::" || type_name)`, so values of different types never
//! share a hash even if their encodings coincide.

use sha3::{Digest, Sha3_256};

use crate::CryptoError;

/// Length of a hash value in bytes.
pub const HASH_LENGTH: usize = 32;

/// Prefix mixed into every type salt.
pub const HASH_PREFIX: &[u8] = b"STARCOIN::";

/// Compute SHA3-256 of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; HASH_LENGTH] {
    Sha3_256::digest(data).into()
}

/// A 32-byte hash, displayed as `0x`-prefixed lowercase hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashValue([u8; HASH_LENGTH]);

impl HashValue {
    /// Wrap raw hash bytes.
    pub fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        HashValue(bytes)
    }

    /// Hash `bytes` under the salt for `type_name`.
    pub fn salted(type_name: &str, bytes: &[u8]) -> Self {
        let mut salt_input = Vec::with_capacity(HASH_PREFIX.len() + type_name.len());
        salt_input.extend_from_slice(HASH_PREFIX);
        salt_input.extend_from_slice(type_name.as_bytes());
        let salt = sha3_256(&salt_input);

        let mut hasher = Sha3_256::new();
        hasher.update(salt);
        hasher.update(bytes);
        HashValue(hasher.finalize().into())
    }

    /// Parse from hex, with or without a `0x` prefix.
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(stripped)?;
        let arr: [u8; HASH_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
            CryptoError::InvalidHex(format!("expected {} bytes, got {}", HASH_LENGTH, b.len()))
        })?;
        Ok(HashValue(arr))
    }

    /// Return the raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Return unprefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::str::FromStr for HashValue {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
