//! The submission collaborator that hands signed bytes to a node.

use std::future::Future;

use crate::error::ClientError;

/// Accepts hex-encoded signed transactions.
pub trait TransactionSubmitter {
    /// Submit a signed transaction given as lowercase hex without `0x`.
    ///
    /// # Returns
    /// The transaction hash the node reports.
    fn submit(
        &self,
        signed_txn_hex: &str,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;
}

impl<T: TransactionSubmitter + ?Sized> TransactionSubmitter for &T {
    fn submit(
        &self,
        signed_txn_hex: &str,
    ) -> impl Future<Output = Result<String, ClientError>> + Send {
        (**self).submit(signed_txn_hex)
    }
}
