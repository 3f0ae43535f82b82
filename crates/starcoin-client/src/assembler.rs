//! Transaction assembly: gather the sequence number, then compose.

use std::time::{SystemTime, UNIX_EPOCH};

use starcoin_bcs::BcsError;
use starcoin_crypto::MessageSigner;
use starcoin_types::{
    AccountAddress, ChainId, RawUserTransaction, SignedUserTransaction, TransactionPayload,
};
use tracing::debug;

use crate::account_state::AccountStateProvider;
use crate::error::ClientError;
use crate::types::TransactionOptions;

/// Builds raw transactions for one network from fresh account state.
#[derive(Debug, Clone)]
pub struct TransactionAssembler<A> {
    account_state: A,
    chain_id: ChainId,
    options: TransactionOptions,
}

impl<A: AccountStateProvider> TransactionAssembler<A> {
    /// Create an assembler that stamps `chain_id` and `options` into every
    /// transaction it builds.
    pub fn new(account_state: A, chain_id: ChainId, options: TransactionOptions) -> Self {
        Self {
            account_state,
            chain_id,
            options,
        }
    }

    /// Return the network this assembler targets.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Return the gas and expiration options.
    pub fn options(&self) -> &TransactionOptions {
        &self.options
    }

    /// Assemble a raw transaction expiring one horizon from the system clock.
    pub async fn assemble(
        &self,
        sender: AccountAddress,
        payload: TransactionPayload,
    ) -> Result<RawUserTransaction, ClientError> {
        self.assemble_at(sender, payload, unix_now()?).await
    }

    /// Assemble a raw transaction as of `now_secs`.
    ///
    /// The sequence number is fetched from the account-state provider on
    /// every call. If the lookup fails, nothing is built.
    pub async fn assemble_at(
        &self,
        sender: AccountAddress,
        payload: TransactionPayload,
        now_secs: u64,
    ) -> Result<RawUserTransaction, ClientError> {
        let sequence_number = self.account_state.sequence_number(sender).await?;
        debug!(%sender, sequence_number, "fetched sequence number");
        self.compose(sender, sequence_number, payload, now_secs)
    }

    /// Compose a raw transaction from an already known sequence number.
    ///
    /// # Returns
    /// `BcsError::EncodingRange` (as `ClientError::Encoding`) if the
    /// expiration time overflows `u64`.
    pub fn compose(
        &self,
        sender: AccountAddress,
        sequence_number: u64,
        payload: TransactionPayload,
        now_secs: u64,
    ) -> Result<RawUserTransaction, ClientError> {
        let expiration = now_secs
            .checked_add(self.options.expiration_horizon_secs)
            .ok_or_else(|| {
                BcsError::EncodingRange(format!(
                    "expiration {} + {} overflows u64",
                    now_secs, self.options.expiration_horizon_secs
                ))
            })?;
        Ok(RawUserTransaction::new(
            sender,
            sequence_number,
            payload,
            self.options.max_gas_amount,
            self.options.gas_unit_price,
            self.options.gas_token_code.clone(),
            expiration,
            self.chain_id,
        ))
    }

    /// Assemble and sign in one step.
    pub async fn assemble_signed<S: MessageSigner + ?Sized>(
        &self,
        sender: AccountAddress,
        payload: TransactionPayload,
        signer: &S,
    ) -> Result<SignedUserTransaction, ClientError> {
        let raw = self.assemble(sender, payload).await?;
        Ok(raw.sign(signer)?)
    }
}

fn unix_now() -> Result<u64, ClientError> {
    secs_since_epoch(SystemTime::now())
}

/// Whole seconds from the Unix epoch to `now`; `ClientError::Clock` if
/// `now` is earlier.
pub(crate) fn secs_since_epoch(now: SystemTime) -> Result<u64, ClientError> {
    Ok(now.duration_since(UNIX_EPOCH)?.as_secs())
}
