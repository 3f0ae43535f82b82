//! The account-state collaborator consulted before every assembly.

use std::future::Future;

use starcoin_types::AccountAddress;

use crate::error::ClientError;

/// Source of on-chain account state.
///
/// The sequence number must be fetched fresh for every transaction; it is
/// never cached between submissions.
pub trait AccountStateProvider {
    /// Return the next sequence number for `address`.
    ///
    /// # Returns
    /// `ClientError::AccountNotFound` if the account does not exist, or a
    /// transport error if the node could not be reached.
    fn sequence_number(
        &self,
        address: AccountAddress,
    ) -> impl Future<Output = Result<u64, ClientError>> + Send;
}

impl<T: AccountStateProvider + ?Sized> AccountStateProvider for &T {
    fn sequence_number(
        &self,
        address: AccountAddress,
    ) -> impl Future<Output = Result<u64, ClientError>> + Send {
        (**self).sequence_number(address)
    }
}
