//! JSON-RPC HTTP client for Starcoin nodes.

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use starcoin_bcs::BcsDeserialize;
use starcoin_crypto::{Ed25519PublicKey, MessageSigner};
use starcoin_types::stdlib::peer_to_peer_v2;
use starcoin_types::{
    AccountAddress, AccountResource, Module, Package, RawUserTransaction, ScriptFunction,
    StructTag, TransactionPayload, TypeTag,
};
use tracing::{debug, warn};

use crate::account_state::AccountStateProvider;
use crate::assembler::TransactionAssembler;
use crate::error::ClientError;
use crate::pipeline::SubmissionPipeline;
use crate::submitter::TransactionSubmitter;
use crate::types::{ClientConfig, RpcRequest, RpcResponse, TransactionOptions};

/// HTTP client for a node's JSON-RPC endpoint.
///
/// Implements both [`AccountStateProvider`] and [`TransactionSubmitter`], so
/// one client can drive a [`SubmissionPipeline`] on its own.
#[derive(Debug, Clone)]
pub struct StarcoinClient {
    /// Client configuration.
    config: ClientConfig,
    /// Options applied to transactions assembled by the helpers.
    options: TransactionOptions,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl StarcoinClient {
    /// Create a client with default transaction options.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            options: TransactionOptions::default(),
            client,
        })
    }

    /// Replace the transaction options used by the high-level helpers.
    pub fn with_options(mut self, options: TransactionOptions) -> Self {
        self.options = options;
        self
    }

    /// Return the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Return the options applied by the high-level helpers.
    pub fn options(&self) -> &TransactionOptions {
        &self.options
    }

    // -----------------------------------------------------------------
    // Raw RPC
    // -----------------------------------------------------------------

    /// Send a JSON-RPC 2.0 call and return its `result`.
    ///
    /// A missing or `null` result is returned as `Value::Null`.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let request = RpcRequest::new(method, params);
        debug!(method, id = %request.id, "json-rpc call");

        let resp = self
            .client
            .post(&self.config.base_url)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Transport(format!(
                "{} returned HTTP {}",
                method, status
            )));
        }

        let body = resp.text().await?;
        let response: RpcResponse = serde_json::from_str(&body)?;

        if let Some(err) = response.error {
            warn!(method, code = err.code, message = %err.message, "json-rpc error");
            return Err(ClientError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        Ok(response.result.unwrap_or(Value::Null))
    }

    async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ClientError> {
        let result = self.call(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| ClientError::InvalidResponse(format!("{}: {}", method, e)))
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Fetch and decode the `0x1::Account::Account` resource of `address`.
    pub async fn get_account_resource(
        &self,
        address: AccountAddress,
    ) -> Result<AccountResource, ClientError> {
        let path = AccountResource::access_path(address).to_string();
        let bytes: Option<Vec<u8>> = self.call_as("state.get", json!([path])).await?;
        let bytes = bytes.ok_or(ClientError::AccountNotFound(address))?;
        Ok(AccountResource::from_bcs_bytes(&bytes)?)
    }

    /// Look up a transaction by hash; `None` if the node does not know it.
    pub async fn get_transaction_info(&self, txn_hash: &str) -> Result<Option<Value>, ClientError> {
        self.call_as("chain.get_transaction_info", json!([txn_hash]))
            .await
    }

    /// Read a decoded resource through the contract API; `None` if absent.
    pub async fn get_resource(
        &self,
        address: AccountAddress,
        tag: &StructTag,
    ) -> Result<Option<Value>, ClientError> {
        self.call_as(
            "contract.get_resource",
            json!([address.to_string(), tag.to_string()]),
        )
        .await
    }

    // -----------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------

    /// Submit a hex-encoded signed transaction and return its hash.
    pub async fn submit_hex(&self, signed_txn_hex: &str) -> Result<String, ClientError> {
        self.call_as("txpool.submit_hex_transaction", json!([signed_txn_hex]))
            .await
    }

    /// Execute a raw transaction without committing it.
    pub async fn dry_run_raw(
        &self,
        raw_txn: &RawUserTransaction,
        public_key: &Ed25519PublicKey,
    ) -> Result<Value, ClientError> {
        self.call(
            "contract.dry_run_raw",
            json!([raw_txn.to_hex()?, public_key.to_hex()]),
        )
        .await
    }

    /// Assemble `payload` for `sender` and dry-run it.
    pub async fn dry_run(
        &self,
        sender: AccountAddress,
        public_key: &Ed25519PublicKey,
        payload: TransactionPayload,
    ) -> Result<Value, ClientError> {
        let raw = self.assembler().assemble(sender, payload).await?;
        self.dry_run_raw(&raw, public_key).await
    }

    /// Assemble, sign and submit `payload` from `sender`.
    pub async fn submit_transaction<K: MessageSigner + ?Sized>(
        &self,
        sender: AccountAddress,
        signer: &K,
        payload: TransactionPayload,
    ) -> Result<String, ClientError> {
        SubmissionPipeline::new(self.assembler(), self)
            .submit(sender, payload, signer)
            .await
    }

    /// Call a published script function.
    pub async fn call_script_function<K: MessageSigner + ?Sized>(
        &self,
        sender: AccountAddress,
        signer: &K,
        function: ScriptFunction,
    ) -> Result<String, ClientError> {
        self.submit_transaction(sender, signer, function.into())
            .await
    }

    /// Transfer `amount` of `token` to `payee`, creating the payee account
    /// if needed.
    pub async fn transfer<K: MessageSigner + ?Sized>(
        &self,
        sender: AccountAddress,
        signer: &K,
        payee: AccountAddress,
        token: TypeTag,
        amount: u128,
    ) -> Result<String, ClientError> {
        let function = peer_to_peer_v2(token, payee, amount)?;
        self.call_script_function(sender, signer, function).await
    }

    /// Publish the module at `module_path` under `sender`, optionally
    /// running `init_script` afterwards.
    pub async fn deploy_package<K: MessageSigner + ?Sized>(
        &self,
        sender: AccountAddress,
        signer: &K,
        module_path: impl AsRef<Path>,
        init_script: Option<ScriptFunction>,
    ) -> Result<String, ClientError> {
        let code = tokio::fs::read(module_path.as_ref()).await?;
        debug!(path = %module_path.as_ref().display(), len = code.len(), "read module");
        let package = Package::new(sender, vec![Module::new(code)], init_script)?;
        self.submit_transaction(sender, signer, package.into()).await
    }

    fn assembler(&self) -> TransactionAssembler<&Self> {
        TransactionAssembler::new(self, self.config.chain_id(), self.options.clone())
    }
}

impl AccountStateProvider for StarcoinClient {
    async fn sequence_number(&self, address: AccountAddress) -> Result<u64, ClientError> {
        Ok(self.get_account_resource(address).await?.sequence_number())
    }
}

impl TransactionSubmitter for StarcoinClient {
    async fn submit(&self, signed_txn_hex: &str) -> Result<String, ClientError> {
        self.submit_hex(signed_txn_hex).await
    }
}
