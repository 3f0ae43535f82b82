//! Ed25519 keys and signatures.
//!
//! Wraps `ed25519-dalek` and adds hex parsing, BCS encodings (public keys and
//! signatures are length-prefixed byte buffers on the wire) and
//! authentication-key derivation.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use starcoin_bcs::{BcsDeserialize, BcsError, BcsReader, BcsSerialize, BcsWriter};

use crate::hash::sha3_256;
use crate::CryptoError;

/// Length of a serialized private key in bytes.
pub const ED25519_PRIVATE_KEY_LENGTH: usize = 32;

/// Length of a serialized public key in bytes.
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;

/// Length of a serialized signature in bytes.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// Scheme byte appended to a public key before hashing it into an
/// authentication key.
const ED25519_SCHEME: u8 = 0;

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

// ---------------------------------------------------------------------------
// Private key
// ---------------------------------------------------------------------------

/// An Ed25519 private key.
#[derive(Clone)]
pub struct Ed25519PrivateKey {
    inner: SigningKey,
}

impl Ed25519PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn generate() -> Self {
        Ed25519PrivateKey {
            inner: SigningKey::generate(&mut OsRng),
        }
    }

    /// Create a private key from its 32-byte seed.
    ///
    /// # Returns
    /// An error if `bytes` is not exactly 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let seed: [u8; ED25519_PRIVATE_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                ED25519_PRIVATE_KEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Ed25519PrivateKey {
            inner: SigningKey::from_bytes(&seed),
        })
    }

    /// Create a private key from hex, with or without a `0x` prefix.
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let stripped = strip_hex_prefix(hex_str);
        if stripped.is_empty() {
            return Err(CryptoError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        Self::from_bytes(&hex::decode(stripped)?)
    }

    /// Return the 32-byte seed.
    pub fn to_bytes(&self) -> [u8; ED25519_PRIVATE_KEY_LENGTH] {
        self.inner.to_bytes()
    }

    /// Return the seed as unprefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// Sign `message` as-is, with no hashing or framing.
    pub fn sign(&self, message: &[u8]) -> Result<Ed25519Signature, CryptoError> {
        let signature = self
            .inner
            .try_sign(message)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        Ok(Ed25519Signature { inner: signature })
    }
}

impl std::fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519PrivateKey")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Public key
// ---------------------------------------------------------------------------

/// An Ed25519 public key.
#[derive(Clone, Copy)]
pub struct Ed25519PublicKey {
    inner: VerifyingKey,
}

impl Ed25519PublicKey {
    /// Parse a 32-byte compressed public key.
    ///
    /// # Returns
    /// An error if the length is wrong or the bytes are not a curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; ED25519_PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                ED25519_PUBLIC_KEY_LENGTH,
                bytes.len()
            ))
        })?;
        let inner = VerifyingKey::from_bytes(&arr)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Ok(Ed25519PublicKey { inner })
    }

    /// Parse from hex, with or without a `0x` prefix.
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(&hex::decode(strip_hex_prefix(hex_str))?)
    }

    /// Return the compressed 32-byte encoding.
    pub fn to_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_LENGTH] {
        self.inner.to_bytes()
    }

    /// Return unprefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Verify `signature` over `message`.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), CryptoError> {
        self.inner
            .verify_strict(message, &signature.inner)
            .map_err(|_| CryptoError::VerificationFailed)
    }

    /// Compute the authentication key: `sha3_256(public_key || scheme)`.
    ///
    /// An account address is the last 16 bytes of this value.
    pub fn authentication_key(&self) -> [u8; 32] {
        let mut preimage = Vec::with_capacity(ED25519_PUBLIC_KEY_LENGTH + 1);
        preimage.extend_from_slice(self.inner.as_bytes());
        preimage.push(ED25519_SCHEME);
        sha3_256(&preimage)
    }
}

impl PartialEq for Ed25519PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_bytes() == other.inner.as_bytes()
    }
}

impl Eq for Ed25519PublicKey {}

impl std::hash::Hash for Ed25519PublicKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.as_bytes().hash(state);
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey(0x{})", self.to_hex())
    }
}

impl std::fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl BcsSerialize for Ed25519PublicKey {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_bytes(self.inner.as_bytes())
    }
}

impl BcsDeserialize for Ed25519PublicKey {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        let bytes = reader.read_bytes()?;
        Self::from_bytes(&bytes).map_err(|e| BcsError::InvalidValue(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature {
    inner: ed25519_dalek::Signature,
}

impl Ed25519Signature {
    /// Parse a 64-byte signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let inner = ed25519_dalek::Signature::from_slice(bytes)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        Ok(Ed25519Signature { inner })
    }

    /// Parse from hex, with or without a `0x` prefix.
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(&hex::decode(strip_hex_prefix(hex_str))?)
    }

    /// Return the 64-byte encoding.
    pub fn to_bytes(&self) -> [u8; ED25519_SIGNATURE_LENGTH] {
        self.inner.to_bytes()
    }

    /// Return unprefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature(0x{})", self.to_hex())
    }
}

impl BcsSerialize for Ed25519Signature {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_bytes(&self.to_bytes())
    }
}

impl BcsDeserialize for Ed25519Signature {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        let bytes = reader.read_bytes()?;
        Self::from_bytes(&bytes).map_err(|e| BcsError::InvalidValue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 8032 test vector 1.
    const SEED_HEX: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const PUBLIC_HEX: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
    const SIGNATURE_HEX: &str = "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b";

    #[test]
    fn test_rfc8032_vector() {
        let key = Ed25519PrivateKey::from_hex(SEED_HEX).unwrap();
        assert_eq!(key.public_key().to_hex(), PUBLIC_HEX);
        let sig = key.sign(b"").unwrap();
        assert_eq!(sig.to_hex(), SIGNATURE_HEX);
        assert!(key.public_key().verify(b"", &sig).is_ok());
    }

    #[test]
    fn test_prefixed_hex_accepted() {
        let a = Ed25519PrivateKey::from_hex(SEED_HEX).unwrap();
        let b = Ed25519PrivateKey::from_hex(&format!("0x{}", SEED_HEX)).unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn test_invalid_private_key_length() {
        assert!(matches!(
            Ed25519PrivateKey::from_bytes(&[1u8; 31]),
            Err(CryptoError::InvalidPrivateKey(_))
        ));
        assert!(Ed25519PrivateKey::from_hex("").is_err());
        assert!(Ed25519PrivateKey::from_hex("zz").is_err());
    }

    #[test]
    fn test_verify_rejects_tampered_message() {
        let key = Ed25519PrivateKey::from_hex(SEED_HEX).unwrap();
        let sig = key.sign(b"hello").unwrap();
        assert_eq!(
            key.public_key().verify(b"hellp", &sig),
            Err(CryptoError::VerificationFailed)
        );
    }

    #[test]
    fn test_public_key_bcs_is_length_prefixed() {
        let pk = Ed25519PublicKey::from_hex(PUBLIC_HEX).unwrap();
        let bytes = pk.to_bcs_bytes().unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[0], 32);
        assert_eq!(Ed25519PublicKey::from_bcs_bytes(&bytes).unwrap(), pk);
    }

    #[test]
    fn test_signature_bcs_is_length_prefixed() {
        let sig = Ed25519Signature::from_hex(SIGNATURE_HEX).unwrap();
        let bytes = sig.to_bcs_bytes().unwrap();
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], 64);
        assert_eq!(Ed25519Signature::from_bcs_bytes(&bytes).unwrap(), sig);
    }

    #[test]
    fn test_bcs_rejects_wrong_key_length() {
        let mut w = BcsWriter::new();
        w.write_bytes(&[0u8; 31]).unwrap();
        assert!(matches!(
            Ed25519PublicKey::from_bcs_bytes(w.as_bytes()),
            Err(BcsError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_authentication_key_is_deterministic() {
        let pk = Ed25519PublicKey::from_hex(PUBLIC_HEX).unwrap();
        let mut preimage = pk.to_bytes().to_vec();
        preimage.push(0);
        assert_eq!(pk.authentication_key(), sha3_256(&preimage));
    }

    #[test]
    fn test_debug_does_not_leak_seed() {
        let key = Ed25519PrivateKey::from_hex(SEED_HEX).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains(SEED_HEX));
        assert!(debug.contains(PUBLIC_HEX));
    }
}
