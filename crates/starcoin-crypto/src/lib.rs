/// Starcoin SDK - Ed25519 signing and hashing.
///
/// Provides:
/// - Ed25519 private keys, public keys and signatures with BCS encodings
/// - The `MessageSigner` capability consumed by transaction assembly
/// - SHA3-256 and the salted hashing scheme used for transaction hashes
/// - Authentication keys derived from public keys

pub mod ed25519;
pub mod hash;
pub mod signer;

mod error;
pub use ed25519::{Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature};
pub use error::CryptoError;
pub use hash::{sha3_256, HashValue};
pub use signer::MessageSigner;
