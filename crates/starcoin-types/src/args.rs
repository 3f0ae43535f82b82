//! Encoders for script-function arguments.
//!
//! Each argument is passed to the chain as its own BCS byte string, so these
//! helpers encode one Move value at a time. Callers collect the results into
//! `ScriptFunction::args` in parameter order.

use starcoin_bcs::{BcsError, BcsSerialize};

use crate::AccountAddress;

pub fn u8(value: u8) -> Result<Vec<u8>, BcsError> {
    value.to_bcs_bytes()
}

pub fn u64(value: u64) -> Result<Vec<u8>, BcsError> {
    value.to_bcs_bytes()
}

pub fn u128(value: u128) -> Result<Vec<u8>, BcsError> {
    value.to_bcs_bytes()
}

/// Encode a decimal string as a `u128` argument.
///
/// # Returns
/// `BcsError::EncodingRange` if the text is not a decimal number that fits in
/// 128 bits.
pub fn u128_from_decimal(text: &str) -> Result<Vec<u8>, BcsError> {
    let value: u128 = text
        .trim()
        .parse()
        .map_err(|e| BcsError::EncodingRange(format!("{:?} is not a u128: {}", text, e)))?;
    u128(value)
}

pub fn bool(value: bool) -> Result<Vec<u8>, BcsError> {
    value.to_bcs_bytes()
}

pub fn address(value: AccountAddress) -> Result<Vec<u8>, BcsError> {
    value.to_bcs_bytes()
}

/// Encode raw bytes as `vector<u8>`.
pub fn bytes(value: &[u8]) -> Result<Vec<u8>, BcsError> {
    value.to_bcs_bytes()
}

/// Encode text as its UTF-8 bytes in a `vector<u8>`.
pub fn string(value: &str) -> Result<Vec<u8>, BcsError> {
    value.to_bcs_bytes()
}

/// Encode a list of strings as `vector<vector<u8>>`.
pub fn string_list<S: AsRef<str>>(values: &[S]) -> Result<Vec<u8>, BcsError> {
    let items: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
    items.to_bcs_bytes()
}
