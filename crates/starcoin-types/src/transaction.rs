//! Raw and signed user transactions.
//!
//! A `RawUserTransaction` is built once per submission attempt from a
//! freshly fetched sequence number and consumed by signing. The signature
//! covers exactly the raw transaction's BCS bytes, with no extra framing.
//!
//! # Wire format (RawUserTransaction)
//!
//! | Field                     | Encoding                  |
//! |---------------------------|---------------------------|
//! | sender                    | 16 raw bytes              |
//! | sequence_number           | u64 (LE)                  |
//! | payload                   | variant index + body      |
//! | max_gas_amount            | u64 (LE)                  |
//! | gas_unit_price            | u64 (LE)                  |
//! | gas_token_code            | length-prefixed string    |
//! | expiration_timestamp_secs | u64 (LE)                  |
//! | chain_id                  | u8                        |

use starcoin_bcs::{BcsDeserialize, BcsError, BcsReader, BcsSerialize, BcsWriter};
use starcoin_crypto::{Ed25519PublicKey, Ed25519Signature, HashValue, MessageSigner};

use crate::{AccountAddress, TransactionPayload, TypesError};

// ---------------------------------------------------------------------------
// ChainId
// ---------------------------------------------------------------------------

/// Identifies the network a transaction is valid on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(u8);

impl ChainId {
    pub const MAIN: ChainId = ChainId(1);
    pub const BARNARD: ChainId = ChainId(251);
    pub const PROXIMA: ChainId = ChainId(252);
    pub const HALLEY: ChainId = ChainId(253);
    pub const DEV: ChainId = ChainId(254);
    pub const TEST: ChainId = ChainId(255);

    pub const fn new(id: u8) -> Self {
        ChainId(id)
    }

    pub const fn id(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for ChainId {
    fn from(id: u8) -> Self {
        ChainId(id)
    }
}

impl BcsSerialize for ChainId {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_u8(self.0);
        Ok(())
    }
}

impl BcsDeserialize for ChainId {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        reader.read_u8().map(ChainId)
    }
}

// ---------------------------------------------------------------------------
// RawUserTransaction
// ---------------------------------------------------------------------------

/// An unsigned user transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawUserTransaction {
    sender: AccountAddress,
    sequence_number: u64,
    payload: TransactionPayload,
    max_gas_amount: u64,
    gas_unit_price: u64,
    gas_token_code: String,
    expiration_timestamp_secs: u64,
    chain_id: ChainId,
}

impl RawUserTransaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sender: AccountAddress,
        sequence_number: u64,
        payload: TransactionPayload,
        max_gas_amount: u64,
        gas_unit_price: u64,
        gas_token_code: String,
        expiration_timestamp_secs: u64,
        chain_id: ChainId,
    ) -> Self {
        RawUserTransaction {
            sender,
            sequence_number,
            payload,
            max_gas_amount,
            gas_unit_price,
            gas_token_code,
            expiration_timestamp_secs,
            chain_id,
        }
    }

    pub fn sender(&self) -> AccountAddress {
        self.sender
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &TransactionPayload {
        &self.payload
    }

    pub fn max_gas_amount(&self) -> u64 {
        self.max_gas_amount
    }

    pub fn gas_unit_price(&self) -> u64 {
        self.gas_unit_price
    }

    pub fn gas_token_code(&self) -> &str {
        &self.gas_token_code
    }

    pub fn expiration_timestamp_secs(&self) -> u64 {
        self.expiration_timestamp_secs
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Return the canonical bytes a signer signs.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, BcsError> {
        self.to_bcs_bytes()
    }

    /// Return the canonical bytes as unprefixed lowercase hex.
    pub fn to_hex(&self) -> Result<String, BcsError> {
        Ok(hex::encode(self.to_bcs_bytes()?))
    }

    /// Sign the transaction, consuming it.
    ///
    /// # Returns
    /// The signed transaction, or the first encoding or signing error. On
    /// error nothing is produced.
    pub fn sign<S: MessageSigner + ?Sized>(
        self,
        signer: &S,
    ) -> Result<SignedUserTransaction, TypesError> {
        let message = self.signing_bytes()?;
        let (signature, public_key) = signer.sign_message(&message)?;
        Ok(SignedUserTransaction::ed25519(self, public_key, signature))
    }
}

impl BcsSerialize for RawUserTransaction {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        self.sender.bcs_serialize(writer)?;
        writer.write_u64(self.sequence_number);
        self.payload.bcs_serialize(writer)?;
        writer.write_u64(self.max_gas_amount);
        writer.write_u64(self.gas_unit_price);
        writer.write_str(&self.gas_token_code)?;
        writer.write_u64(self.expiration_timestamp_secs);
        self.chain_id.bcs_serialize(writer)
    }
}

impl BcsDeserialize for RawUserTransaction {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        Ok(RawUserTransaction {
            sender: AccountAddress::bcs_deserialize(reader)?,
            sequence_number: reader.read_u64()?,
            payload: TransactionPayload::bcs_deserialize(reader)?,
            max_gas_amount: reader.read_u64()?,
            gas_unit_price: reader.read_u64()?,
            gas_token_code: reader.read_string()?,
            expiration_timestamp_secs: reader.read_u64()?,
            chain_id: ChainId::bcs_deserialize(reader)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Authenticator
// ---------------------------------------------------------------------------

/// Proof that the sender authorised a transaction.
///
/// Only single-key Ed25519 (variant 0) is supported; any other variant
/// index is rejected on decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionAuthenticator {
    Ed25519 {
        public_key: Ed25519PublicKey,
        signature: Ed25519Signature,
    },
}

impl TransactionAuthenticator {
    const VARIANT_COUNT: u32 = 1;

    pub fn public_key(&self) -> &Ed25519PublicKey {
        match self {
            TransactionAuthenticator::Ed25519 { public_key, .. } => public_key,
        }
    }

    pub fn signature(&self) -> &Ed25519Signature {
        match self {
            TransactionAuthenticator::Ed25519 { signature, .. } => signature,
        }
    }
}

impl BcsSerialize for TransactionAuthenticator {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        match self {
            TransactionAuthenticator::Ed25519 {
                public_key,
                signature,
            } => writer.write_variant(0, |w| {
                public_key.bcs_serialize(w)?;
                signature.bcs_serialize(w)
            }),
        }
    }
}

impl BcsDeserialize for TransactionAuthenticator {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        match reader.read_variant_index("TransactionAuthenticator", Self::VARIANT_COUNT)? {
            0 => Ok(TransactionAuthenticator::Ed25519 {
                public_key: Ed25519PublicKey::bcs_deserialize(reader)?,
                signature: Ed25519Signature::bcs_deserialize(reader)?,
            }),
            index => Err(BcsError::UnknownVariant {
                type_name: "TransactionAuthenticator",
                index,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// SignedUserTransaction
// ---------------------------------------------------------------------------

/// A raw transaction together with its authenticator, ready to submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedUserTransaction {
    raw_txn: RawUserTransaction,
    authenticator: TransactionAuthenticator,
}

impl SignedUserTransaction {
    /// Pair a raw transaction with an Ed25519 signature over its bytes.
    pub fn ed25519(
        raw_txn: RawUserTransaction,
        public_key: Ed25519PublicKey,
        signature: Ed25519Signature,
    ) -> Self {
        SignedUserTransaction {
            raw_txn,
            authenticator: TransactionAuthenticator::Ed25519 {
                public_key,
                signature,
            },
        }
    }

    pub fn raw_txn(&self) -> &RawUserTransaction {
        &self.raw_txn
    }

    pub fn authenticator(&self) -> &TransactionAuthenticator {
        &self.authenticator
    }

    /// Check the signature against the re-encoded raw transaction.
    pub fn verify_signature(&self) -> Result<(), TypesError> {
        let message = self.raw_txn.signing_bytes()?;
        self.authenticator
            .public_key()
            .verify(&message, self.authenticator.signature())?;
        Ok(())
    }

    /// Return the canonical bytes of the signed transaction.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BcsError> {
        self.to_bcs_bytes()
    }

    /// Return the canonical bytes as lowercase hex with no `0x` prefix,
    /// the form `txpool.submit_hex_transaction` expects.
    pub fn to_hex(&self) -> Result<String, BcsError> {
        Ok(hex::encode(self.to_bcs_bytes()?))
    }

    /// Parse a signed transaction from hex, with or without `0x`.
    pub fn from_hex(hex_str: &str) -> Result<Self, TypesError> {
        let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(stripped)
            .map_err(|e| TypesError::Bcs(BcsError::InvalidValue(format!("invalid hex: {}", e))))?;
        Ok(Self::from_bcs_bytes(&bytes)?)
    }

    /// Compute the transaction hash the node indexes this transaction by.
    pub fn id(&self) -> Result<HashValue, BcsError> {
        Ok(HashValue::salted("SignedUserTransaction", &self.to_bcs_bytes()?))
    }
}

impl BcsSerialize for SignedUserTransaction {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        self.raw_txn.bcs_serialize(writer)?;
        self.authenticator.bcs_serialize(writer)
    }
}

impl BcsDeserialize for SignedUserTransaction {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        Ok(SignedUserTransaction {
            raw_txn: RawUserTransaction::bcs_deserialize(reader)?,
            authenticator: TransactionAuthenticator::bcs_deserialize(reader)?,
        })
    }
}
