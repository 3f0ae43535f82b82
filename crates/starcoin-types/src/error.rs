use starcoin_bcs::BcsError;
use starcoin_crypto::CryptoError;

/// Error types for on-chain type construction, parsing and signing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// An encoding or decoding error (forwarded from `starcoin-bcs`).
    #[error("bcs error: {0}")]
    Bcs(#[from] BcsError),
    /// A key or signature error (forwarded from `starcoin-crypto`).
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
    /// An address string or byte buffer was malformed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// A string is not a valid Move identifier.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    /// A type tag, struct tag or function id string failed to parse.
    #[error("parse error: {0}")]
    Parse(String),
    /// A package was built with no modules.
    #[error("package must contain at least one module")]
    EmptyPackage,
}
