#![deny(missing_docs)]

//! # starcoin-client
//!
//! JSON-RPC client and transaction submission pipeline for Starcoin nodes.
//!
//! The pipeline is built from two collaborators, an
//! [`AccountStateProvider`] that supplies fresh sequence numbers and a
//! [`TransactionSubmitter`] that accepts signed bytes. [`StarcoinClient`]
//! implements both over HTTP, but either can be swapped for another source.
//!
//! # Example
//!
//! ```no_run
//! use starcoin_client::{ClientConfig, StarcoinClient};
//! use starcoin_crypto::Ed25519PrivateKey;
//! use starcoin_types::{stdlib, AccountAddress};
//!
//! # async fn run() -> Result<(), starcoin_client::ClientError> {
//! let client = StarcoinClient::new(ClientConfig::default())?;
//! let key = Ed25519PrivateKey::generate();
//! let sender = AccountAddress::from_public_key(&key.public_key());
//! let payee = AccountAddress::from_hex_literal("0x2").unwrap();
//! let hash = client
//!     .transfer(sender, &key, payee, stdlib::stc_token_type(), 1_000)
//!     .await?;
//! println!("submitted {hash}");
//! # Ok(())
//! # }
//! ```

pub mod account_state;
pub mod assembler;
pub mod client;
pub mod error;
pub mod pipeline;
pub mod submitter;
pub mod types;

#[cfg(test)]
mod tests;

pub use account_state::AccountStateProvider;
pub use assembler::TransactionAssembler;
pub use client::StarcoinClient;
pub use error::ClientError;
pub use pipeline::SubmissionPipeline;
pub use submitter::TransactionSubmitter;
pub use types::{ClientConfig, TransactionOptions};
