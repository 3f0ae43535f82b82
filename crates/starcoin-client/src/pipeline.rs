//! The submission pipeline.
//!
//! Linear and single-shot: gather the sequence number, compose, encode,
//! sign, frame as hex, submit. Any failing step aborts the whole run and
//! nothing reaches the submitter. Retries belong to the caller.
//!
//! Two submissions for the same sender must not overlap, or both may read
//! the same sequence number; serialising them is the caller's job.

use starcoin_crypto::MessageSigner;
use starcoin_types::{AccountAddress, SignedUserTransaction, TransactionPayload};
use tracing::debug;

use crate::account_state::AccountStateProvider;
use crate::assembler::TransactionAssembler;
use crate::error::ClientError;
use crate::submitter::TransactionSubmitter;

/// Assembles, signs and submits transactions through two collaborators.
#[derive(Debug, Clone)]
pub struct SubmissionPipeline<A, S> {
    assembler: TransactionAssembler<A>,
    submitter: S,
}

impl<A: AccountStateProvider, S: TransactionSubmitter> SubmissionPipeline<A, S> {
    /// Create a pipeline from an assembler and a submitter.
    pub fn new(assembler: TransactionAssembler<A>, submitter: S) -> Self {
        Self {
            assembler,
            submitter,
        }
    }

    /// Return the assembler used for each submission.
    pub fn assembler(&self) -> &TransactionAssembler<A> {
        &self.assembler
    }

    /// Run the full pipeline for `payload` sent by `sender`.
    ///
    /// # Returns
    /// The transaction hash reported by the submitter.
    pub async fn submit<K: MessageSigner + ?Sized>(
        &self,
        sender: AccountAddress,
        payload: TransactionPayload,
        signer: &K,
    ) -> Result<String, ClientError> {
        let raw = self.assembler.assemble(sender, payload).await?;
        let signed = raw.sign(signer)?;
        self.submit_signed(&signed).await
    }

    /// Frame and submit an already signed transaction.
    pub async fn submit_signed(
        &self,
        signed: &SignedUserTransaction,
    ) -> Result<String, ClientError> {
        let hex = signed.to_hex()?;
        let txn_id = signed.id()?;
        debug!(
            sender = %signed.raw_txn().sender(),
            sequence_number = signed.raw_txn().sequence_number(),
            %txn_id,
            "submitting signed transaction"
        );
        let hash = self.submitter.submit(&hex).await?;
        debug!(%hash, "transaction accepted");
        Ok(hash)
    }
}
