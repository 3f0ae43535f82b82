//! Tests for the client, the assembler and the submission pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, UNIX_EPOCH};

use serde_json::{json, Value};
use starcoin_bcs::{BcsDeserialize, BcsError, BcsSerialize};
use starcoin_crypto::{
    CryptoError, Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature, MessageSigner,
};
use starcoin_types::account::EventHandle;
use starcoin_types::{
    stdlib, AccountAddress, AccountResource, ChainId, RawUserTransaction, ScriptFunction,
    SignedUserTransaction, TransactionPayload,
};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::assembler::secs_since_epoch;
use crate::{
    AccountStateProvider, ClientConfig, ClientError, StarcoinClient, SubmissionPipeline,
    TransactionAssembler, TransactionOptions, TransactionSubmitter,
};

const TXN_HASH: &str = "0x4f2a6cd0c9f0e5d4c1b9a7e3f2d1c0b9a8e7f6d5c4b3a2918070605040302010";

fn test_key() -> Ed25519PrivateKey {
    Ed25519PrivateKey::from_bytes(&[11u8; 32]).unwrap()
}

fn sender_of(key: &Ed25519PrivateKey) -> AccountAddress {
    AccountAddress::from_public_key(&key.public_key())
}

fn test_call() -> ScriptFunction {
    stdlib::peer_to_peer_v2(stdlib::stc_token_type(), AccountAddress::ONE, 5).unwrap()
}

fn account_bytes(sequence_number: u64) -> Vec<u8> {
    let handle = EventHandle {
        counter: 0,
        guid: vec![0u8; 24],
    };
    AccountResource {
        authentication_key: vec![1u8; 32],
        withdrawal_capability: None,
        key_rotation_capability: None,
        withdraw_events: handle.clone(),
        deposit_events: handle.clone(),
        accept_token_events: handle,
        sequence_number,
    }
    .to_bcs_bytes()
    .unwrap()
}

fn rpc_ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": "1",
        "result": result
    }))
}

fn test_client(server: &MockServer) -> StarcoinClient {
    StarcoinClient::new(ClientConfig {
        base_url: server.uri(),
        chain_id: ChainId::DEV.id(),
        timeout_secs: 5,
    })
    .unwrap()
}

async fn mount_account(server: &MockServer, sequence_number: u64) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "state.get"})))
        .respond_with(rpc_ok(json!(account_bytes(sequence_number))))
        .mount(server)
        .await;
}

async fn mount_submit(server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "txpool.submit_hex_transaction"})))
        .respond_with(rpc_ok(json!(TXN_HASH)))
        .expect(1)
        .mount(server)
        .await;
}

/// Decode the signed transaction carried by the submit request.
async fn submitted_txn(server: &MockServer) -> SignedUserTransaction {
    let requests = server.received_requests().await.unwrap();
    let body: Value = requests
        .iter()
        .map(|r| r.body_json::<Value>().unwrap())
        .find(|b| b["method"] == "txpool.submit_hex_transaction")
        .unwrap();
    SignedUserTransaction::from_hex(body["params"][0].as_str().unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

struct FixedAccount(u64);

impl AccountStateProvider for FixedAccount {
    async fn sequence_number(&self, _address: AccountAddress) -> Result<u64, ClientError> {
        Ok(self.0)
    }
}

struct MissingAccount;

impl AccountStateProvider for MissingAccount {
    async fn sequence_number(&self, address: AccountAddress) -> Result<u64, ClientError> {
        Err(ClientError::AccountNotFound(address))
    }
}

/// Hands out increasing sequence numbers, counting lookups.
#[derive(Default)]
struct CountingAccount(AtomicU64);

impl AccountStateProvider for CountingAccount {
    async fn sequence_number(&self, _address: AccountAddress) -> Result<u64, ClientError> {
        Ok(self.0.fetch_add(1, Ordering::SeqCst))
    }
}

#[derive(Default)]
struct RecordingSubmitter {
    submitted: Mutex<Vec<String>>,
}

impl TransactionSubmitter for RecordingSubmitter {
    async fn submit(&self, signed_txn_hex: &str) -> Result<String, ClientError> {
        self.submitted
            .lock()
            .unwrap()
            .push(signed_txn_hex.to_string());
        Ok(TXN_HASH.to_string())
    }
}

struct OfflineSigner;

impl MessageSigner for OfflineSigner {
    fn sign_message(
        &self,
        _message: &[u8],
    ) -> Result<(Ed25519Signature, Ed25519PublicKey), CryptoError> {
        Err(CryptoError::SigningFailed("device offline".to_string()))
    }
}

fn pipeline<A: AccountStateProvider>(
    account_state: A,
    submitter: &RecordingSubmitter,
) -> SubmissionPipeline<A, &RecordingSubmitter> {
    let assembler =
        TransactionAssembler::new(account_state, ChainId::DEV, TransactionOptions::default());
    SubmissionPipeline::new(assembler, submitter)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_pipeline_aborts_when_account_lookup_fails() {
    let submitter = RecordingSubmitter::default();
    let key = test_key();
    let result = pipeline(MissingAccount, &submitter)
        .submit(sender_of(&key), test_call().into(), &key)
        .await;

    assert!(matches!(result, Err(ClientError::AccountNotFound(_))));
    assert!(submitter.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_pipeline_aborts_when_signing_fails() {
    let submitter = RecordingSubmitter::default();
    let result = pipeline(FixedAccount(3), &submitter)
        .submit(AccountAddress::ONE, test_call().into(), &OfflineSigner)
        .await;

    assert!(matches!(
        result,
        Err(ClientError::Signing(CryptoError::SigningFailed(_)))
    ));
    assert!(submitter.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_pipeline_submits_signed_hex() {
    let submitter = RecordingSubmitter::default();
    let key = test_key();
    let sender = sender_of(&key);
    let hash = pipeline(FixedAccount(5), &submitter)
        .submit(sender, test_call().into(), &key)
        .await
        .unwrap();
    assert_eq!(hash, TXN_HASH);

    let submitted = submitter.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert!(!submitted[0].starts_with("0x"));

    let signed = SignedUserTransaction::from_hex(&submitted[0]).unwrap();
    signed.verify_signature().unwrap();
    let raw = signed.raw_txn();
    assert_eq!(raw.sender(), sender);
    assert_eq!(raw.sequence_number(), 5);
    assert_eq!(raw.max_gas_amount(), 10_000_000);
    assert_eq!(raw.gas_unit_price(), 1);
    assert_eq!(raw.gas_token_code(), "0x1::STC::STC");
    assert_eq!(raw.chain_id(), ChainId::DEV);
    assert_eq!(raw.payload(), &TransactionPayload::from(test_call()));
}

#[tokio::test]
async fn test_assembler_fetches_sequence_every_time() {
    let assembler = TransactionAssembler::new(
        CountingAccount::default(),
        ChainId::DEV,
        TransactionOptions::default(),
    );
    let first = assembler
        .assemble_at(AccountAddress::ONE, test_call().into(), 100)
        .await
        .unwrap();
    let second = assembler
        .assemble_at(AccountAddress::ONE, test_call().into(), 100)
        .await
        .unwrap();
    assert_eq!(first.sequence_number(), 0);
    assert_eq!(second.sequence_number(), 1);
}

#[tokio::test]
async fn test_assembler_expiration() {
    let options = TransactionOptions {
        expiration_horizon_secs: 60,
        ..Default::default()
    };
    let assembler = TransactionAssembler::new(FixedAccount(0), ChainId::TEST, options);
    let raw = assembler
        .assemble_at(AccountAddress::ONE, test_call().into(), 1_700_000_000)
        .await
        .unwrap();
    assert_eq!(raw.expiration_timestamp_secs(), 1_700_000_060);
    assert_eq!(raw.chain_id(), ChainId::TEST);

    let overflow = assembler
        .assemble_at(AccountAddress::ONE, test_call().into(), u64::MAX)
        .await;
    assert!(matches!(
        overflow,
        Err(ClientError::Encoding(BcsError::EncodingRange(_)))
    ));
}

// ---------------------------------------------------------------------------
// JSON-RPC transport
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_call_sends_jsonrpc_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "chain.id",
            "params": []
        })))
        .respond_with(rpc_ok(json!({"name": "dev", "id": 254})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.call("chain.id", json!([])).await.unwrap();
    assert_eq!(result["id"], 254);

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_rpc_error_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": "1",
            "error": {"code": -32601, "message": "Method not found"}
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .call("no.such_method", json!([]))
        .await
        .unwrap_err();
    match err {
        ClientError::Rpc { code, message } => {
            assert_eq!(code, -32601);
            assert_eq!(message, "Method not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_http_failure_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .call("chain.id", json!([]))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .call("chain.id", json!([]))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Serialization(_)));
    assert!(!err.is_retryable());
}

// ---------------------------------------------------------------------------
// Account state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sequence_number_from_state_get() {
    let server = MockServer::start().await;
    let address = AccountAddress::from_hex_literal("0x2").unwrap();
    let path = AccountResource::access_path(address).to_string();
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "state.get", "params": [path]})))
        .respond_with(rpc_ok(json!(account_bytes(42))))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert_eq!(client.sequence_number(address).await.unwrap(), 42);
}

#[tokio::test]
async fn test_missing_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "state.get"})))
        .respond_with(rpc_ok(Value::Null))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .sequence_number(AccountAddress::ONE)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::AccountNotFound(a) if a == AccountAddress::ONE));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_corrupt_account_resource() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "state.get"})))
        .respond_with(rpc_ok(json!([32, 1, 2])))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .get_account_resource(AccountAddress::ONE)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Encoding(BcsError::UnexpectedEof { .. })
    ));
}

#[tokio::test]
async fn test_non_byte_state_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(rpc_ok(json!({"raw": "0x00"})))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .get_account_resource(AccountAddress::ONE)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

// ---------------------------------------------------------------------------
// High-level helpers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_transfer_end_to_end() {
    let server = MockServer::start().await;
    mount_account(&server, 9).await;
    mount_submit(&server).await;

    let key = test_key();
    let sender = sender_of(&key);
    let payee = AccountAddress::from_hex_literal("0xbeef").unwrap();
    let hash = test_client(&server)
        .transfer(sender, &key, payee, stdlib::stc_token_type(), 1_000_000)
        .await
        .unwrap();
    assert_eq!(hash, TXN_HASH);

    let signed = submitted_txn(&server).await;
    signed.verify_signature().unwrap();
    assert_eq!(signed.raw_txn().sequence_number(), 9);
    let expected = stdlib::peer_to_peer_v2(stdlib::stc_token_type(), payee, 1_000_000).unwrap();
    assert_eq!(
        signed.raw_txn().payload(),
        &TransactionPayload::ScriptFunction(expected)
    );
}

#[tokio::test]
async fn test_deploy_package_reads_module_file() {
    let server = MockServer::start().await;
    mount_account(&server, 0).await;
    mount_submit(&server).await;

    let module_path = std::env::temp_dir().join(format!("{}.mv", uuid::Uuid::new_v4()));
    std::fs::write(&module_path, [0xa1, 0x1c, 0xeb, 0x0b, 0x02]).unwrap();

    let key = test_key();
    let sender = sender_of(&key);
    let result = test_client(&server)
        .deploy_package(sender, &key, &module_path, Some(test_call()))
        .await;
    std::fs::remove_file(&module_path).unwrap();
    result.unwrap();

    let signed = submitted_txn(&server).await;
    match signed.raw_txn().payload() {
        TransactionPayload::Package(package) => {
            assert_eq!(package.package_address(), sender);
            assert_eq!(package.modules().len(), 1);
            assert_eq!(package.modules()[0].code(), &[0xa1, 0x1c, 0xeb, 0x0b, 0x02]);
            assert_eq!(package.init_script(), Some(&test_call()));
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[tokio::test]
async fn test_deploy_package_missing_file_submits_nothing() {
    let server = MockServer::start().await;
    mount_account(&server, 0).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "txpool.submit_hex_transaction"})))
        .respond_with(rpc_ok(json!(TXN_HASH)))
        .expect(0)
        .mount(&server)
        .await;

    let key = test_key();
    let missing = std::env::temp_dir().join(format!("{}-missing.mv", uuid::Uuid::new_v4()));
    let err = test_client(&server)
        .deploy_package(sender_of(&key), &key, &missing, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Io(_)));
}

#[tokio::test]
async fn test_dry_run_sends_raw_txn_and_public_key() {
    let server = MockServer::start().await;
    mount_account(&server, 1).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "contract.dry_run_raw"})))
        .respond_with(rpc_ok(json!({"status": "Executed", "gas_used": "120"})))
        .expect(1)
        .mount(&server)
        .await;

    let key = test_key();
    let output = test_client(&server)
        .dry_run(sender_of(&key), &key.public_key(), test_call().into())
        .await
        .unwrap();
    assert_eq!(output["status"], "Executed");

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests
        .iter()
        .map(|r| r.body_json::<Value>().unwrap())
        .find(|b| b["method"] == "contract.dry_run_raw")
        .unwrap();
    assert_eq!(body["params"][1], key.public_key().to_hex());
    let raw_bytes = hex::decode(body["params"][0].as_str().unwrap()).unwrap();
    let raw = RawUserTransaction::from_bcs_bytes(&raw_bytes).unwrap();
    assert_eq!(raw.sequence_number(), 1);
    assert_eq!(raw.sender(), sender_of(&key));
}

#[tokio::test]
async fn test_get_transaction_info() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "chain.get_transaction_info",
            "params": [TXN_HASH]
        })))
        .respond_with(rpc_ok(json!({"transaction_hash": TXN_HASH, "status": "Executed"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "chain.get_transaction_info"})))
        .respond_with(rpc_ok(Value::Null))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let info = client.get_transaction_info(TXN_HASH).await.unwrap().unwrap();
    assert_eq!(info["status"], "Executed");
    assert!(client.get_transaction_info("0x00").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_resource_params() {
    let server = MockServer::start().await;
    let address = AccountAddress::from_hex_literal("0x3").unwrap();
    let tag = AccountResource::struct_tag();
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "contract.get_resource",
            "params": [address.to_string(), tag.to_string()]
        })))
        .respond_with(rpc_ok(json!({"raw": "0x00"})))
        .expect(1)
        .mount(&server)
        .await;

    let resource = test_client(&server)
        .get_resource(address, &tag)
        .await
        .unwrap();
    assert!(resource.is_some());
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_config_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, "http://127.0.0.1:9850");
    assert_eq!(config.chain_id(), ChainId::DEV);

    let options = TransactionOptions::default();
    assert_eq!(options.max_gas_amount, 10_000_000);
    assert_eq!(options.gas_unit_price, 1);
    assert_eq!(options.gas_token_code, "0x1::STC::STC");
    assert_eq!(options.expiration_horizon_secs, 3600);
}

#[test]
fn test_partial_config_file() {
    let config: ClientConfig =
        serde_json::from_str(r#"{"base_url": "http://barnard.example:9850", "chain_id": 251}"#)
            .unwrap();
    assert_eq!(config.chain_id(), ChainId::BARNARD);
    assert_eq!(config.timeout_secs, 30);

    let options: TransactionOptions =
        serde_json::from_str(r#"{"gas_unit_price": 2}"#).unwrap();
    assert_eq!(options.gas_unit_price, 2);
    assert_eq!(options.max_gas_amount, 10_000_000);
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

#[test]
fn test_secs_since_epoch() {
    let now = UNIX_EPOCH + Duration::from_millis(42_900);
    assert_eq!(secs_since_epoch(now).unwrap(), 42);
}

#[test]
fn test_clock_before_epoch_is_clock_error() {
    let err = secs_since_epoch(UNIX_EPOCH - Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, ClientError::Clock(_)), "got {err:?}");
    assert!(!err.is_retryable());
}
