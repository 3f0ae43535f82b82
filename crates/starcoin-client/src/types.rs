//! Client configuration and JSON-RPC wire structures.

use serde::{Deserialize, Serialize};
use starcoin_types::stdlib::STC_TOKEN_CODE;
use starcoin_types::ChainId;

/// Configuration for a [`StarcoinClient`](crate::StarcoinClient).
///
/// Every field has a default, so a partial config file deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the node.
    pub base_url: String,
    /// Network id stamped into every transaction.
    pub chain_id: u8,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Return the configured network as a [`ChainId`].
    pub fn chain_id(&self) -> ChainId {
        ChainId::new(self.chain_id)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9850".to_string(),
            chain_id: ChainId::DEV.id(),
            timeout_secs: 30,
        }
    }
}

/// Gas and expiration parameters applied to every assembled transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionOptions {
    /// Maximum gas units the transaction may consume.
    pub max_gas_amount: u64,
    /// Price per gas unit, in the gas token.
    pub gas_unit_price: u64,
    /// Token the gas is paid in.
    pub gas_token_code: String,
    /// Seconds from assembly until the transaction expires.
    pub expiration_horizon_secs: u64,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            max_gas_amount: 10_000_000,
            gas_unit_price: 1,
            gas_token_code: STC_TOKEN_CODE.to_string(),
            expiration_horizon_secs: 3600,
        }
    }
}

/// A JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    /// Protocol version, always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Request id echoed back by the node.
    pub id: String,
    /// Method name, e.g. `state.get`.
    pub method: &'a str,
    /// Positional parameters.
    pub params: serde_json::Value,
}

impl<'a> RpcRequest<'a> {
    /// Build a request with a fresh random id.
    pub fn new(method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: uuid::Uuid::new_v4().to_string(),
            method,
            params,
        }
    }
}

/// A JSON-RPC 2.0 response envelope.
///
/// A `null` result and a missing result both deserialize to `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    /// Id of the request this answers.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    /// Result on success.
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Error on failure.
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// The `error` member of a failed JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    /// JSON-RPC error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Optional extra detail from the node.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
