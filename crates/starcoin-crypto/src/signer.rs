//! The signing capability consumed by transaction assembly.

use crate::{CryptoError, Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature};

/// Something that can sign canonical transaction bytes.
///
/// Implementors sign `message` exactly as given and return the signature
/// together with the public key that verifies it. Hardware wallets or
/// remote signers can implement this in place of a local key.
pub trait MessageSigner {
    /// Sign `message`.
    fn sign_message(
        &self,
        message: &[u8],
    ) -> Result<(Ed25519Signature, Ed25519PublicKey), CryptoError>;
}

impl MessageSigner for Ed25519PrivateKey {
    fn sign_message(
        &self,
        message: &[u8],
    ) -> Result<(Ed25519Signature, Ed25519PublicKey), CryptoError> {
        Ok((self.sign(message)?, self.public_key()))
    }
}

impl<T: MessageSigner + ?Sized> MessageSigner for &T {
    fn sign_message(
        &self,
        message: &[u8],
    ) -> Result<(Ed25519Signature, Ed25519PublicKey), CryptoError> {
        (**self).sign_message(message)
    }
}
