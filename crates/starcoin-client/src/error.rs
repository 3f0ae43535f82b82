//! Error types for node access and transaction submission.

use starcoin_bcs::BcsError;
use starcoin_crypto::CryptoError;
use starcoin_types::{AccountAddress, TypesError};

/// Errors that can occur while assembling, signing or submitting a
/// transaction, or while querying a node.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with something other than a JSON-RPC envelope.
    #[error("transport error: {0}")]
    Transport(String),

    /// Failed to serialize or deserialize JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The node returned a JSON-RPC error object.
    #[error("rpc error ({code}): {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message from the node.
        message: String,
    },

    /// No account resource exists at the address.
    #[error("account not found: {0}")]
    AccountNotFound(AccountAddress),

    /// A JSON-RPC result did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Encoding or decoding canonical bytes failed.
    #[error("encoding error: {0}")]
    Encoding(#[from] BcsError),

    /// A domain value could not be constructed.
    #[error("types error: {0}")]
    Types(TypesError),

    /// The signer failed to produce a signature.
    #[error("signing error: {0}")]
    Signing(#[from] CryptoError),

    /// Reading module bytecode from disk failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The system clock reads earlier than the Unix epoch.
    #[error("system clock error: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

impl ClientError {
    /// Whether retrying the same request later may succeed.
    ///
    /// Transport failures and missing accounts (which may not be funded
    /// yet) are retryable; encoding, signing and RPC rejections are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect(),
            ClientError::Transport(_) | ClientError::AccountNotFound(_) => true,
            _ => false,
        }
    }
}

impl From<TypesError> for ClientError {
    fn from(e: TypesError) -> Self {
        match e {
            TypesError::Bcs(e) => ClientError::Encoding(e),
            TypesError::Crypto(e) => ClientError::Signing(e),
            other => ClientError::Types(other),
        }
    }
}
