//! Soroban RPC reader for the read-only tip queries.
//!
//! Reads are answered by `simulateTransaction`: the contract call is wrapped
//! in an unsigned transaction, the node simulates it and returns the
//! function's `ScVal` result. Nothing is signed or submitted.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use soroban_sdk::xdr::{
    HostFunction, InvokeContractArgs, InvokeHostFunctionOp, Limits, Memo, MuxedAccount, Operation,
    OperationBody, Preconditions, ReadXdr, ScAddress, ScSymbol, ScVal, SequenceNumber,
    Transaction, TransactionEnvelope, TransactionExt, TransactionV1Envelope, UInt128Parts, VecM,
    WriteXdr,
};
use tracing::debug;

use crate::address::AccountId;
use crate::config::ClientConfig;
use crate::contract::{ContractFunction, TipView};
use crate::error::QueryError;
use crate::reader::TipReader;

/// Source account used when the queried sender is a contract.
pub const SIMULATION_SOURCE: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

const BASE_FEE: u32 = 100;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ── RpcTipReader ───────────────────────────────────────────────────────

/// [`TipReader`] talking JSON-RPC to a Soroban RPC node.
#[derive(Clone)]
pub struct RpcTipReader {
    http: reqwest::Client,
    rpc_url: String,
    /// Passphrase the node must report, when known.
    passphrase: Option<String>,
}

impl RpcTipReader {
    /// Create a reader targeting `rpc_url` (e.g. `http://localhost:8000/soroban/rpc`).
    pub fn new(rpc_url: impl Into<String>, timeout: Duration) -> Result<Self, QueryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(|e| QueryError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            passphrase: None,
        })
    }

    /// Reader for the selected network of `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, QueryError> {
        let endpoint = config.endpoint();
        let mut reader = Self::new(endpoint.rpc_url.clone(), config.request_timeout())?;
        reader.passphrase = Some(endpoint.passphrase.clone());
        Ok(reader)
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Confirms the node serves the configured network.
    ///
    /// A reader built with [`RpcTipReader::new`] has no expectation and
    /// always passes.
    pub async fn check_network(&self) -> Result<(), QueryError> {
        let Some(expected) = &self.passphrase else {
            return Ok(());
        };
        let result = self.rpc_call("getNetwork", Value::Null).await?;
        let network: GetNetworkResult = serde_json::from_value(result)
            .map_err(|e| QueryError::Decode(format!("invalid getNetwork response: {e}")))?;
        if &network.passphrase != expected {
            return Err(QueryError::Transport(format!(
                "node is on network {:?}, expected {expected:?}",
                network.passphrase
            )));
        }
        Ok(())
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, QueryError> {
        let mut body = json!({ "jsonrpc": "2.0", "id": 1, "method": method });
        if !params.is_null() {
            body["params"] = params;
        }

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| QueryError::Transport(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(QueryError::Transport(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }

        let mut json: Value = response
            .json()
            .await
            .map_err(|e| QueryError::Decode(format!("invalid JSON response: {e}")))?;

        if let Some(err) = json.get("error") {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| err.to_string(), str::to_string);
            return Err(QueryError::Transport(format!("rpc error: {message}")));
        }

        json.get_mut("result")
            .map(Value::take)
            .ok_or_else(|| QueryError::Decode("response has no result".into()))
    }

    async fn simulate(
        &self,
        contract_id: &str,
        function: ContractFunction,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<ScVal, QueryError> {
        let transaction = build_read_transaction(contract_id, function, sender, recipient)?;
        debug!(rpc = %self.rpc_url, function = %function, "simulating read-only call");

        let result = self
            .rpc_call(
                "simulateTransaction",
                json!({ "transaction": transaction }),
            )
            .await?;
        let simulation: SimulateTransactionResult = serde_json::from_value(result)
            .map_err(|e| QueryError::Decode(format!("invalid simulation response: {e}")))?;
        simulation.return_value()
    }
}

impl TipReader for RpcTipReader {
    async fn get_tip(
        &self,
        contract_id: &str,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<Option<u128>, QueryError> {
        let value = self
            .simulate(contract_id, ContractFunction::GetTip, sender, recipient)
            .await?;
        decode_amount(&value)
    }

    async fn get_tip_with_message(
        &self,
        contract_id: &str,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<Option<TipView>, QueryError> {
        let value = self
            .simulate(
                contract_id,
                ContractFunction::GetTipWithMessage,
                sender,
                recipient,
            )
            .await?;
        decode_tip(&value)
    }
}

// ── Response types ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GetNetworkResult {
    passphrase: String,
}

/// Result of `simulateTransaction`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTransactionResult {
    /// Set when the host function failed, e.g. a contract error.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub results: Vec<SimulateHostFunctionResult>,
    #[serde(default)]
    pub latest_ledger: u32,
}

#[derive(Debug, Deserialize)]
pub struct SimulateHostFunctionResult {
    /// Base64 XDR of the returned `ScVal`.
    pub xdr: String,
}

impl SimulateTransactionResult {
    /// The decoded return value of the simulated call.
    pub fn return_value(&self) -> Result<ScVal, QueryError> {
        if let Some(error) = &self.error {
            return Err(QueryError::Transport(format!("simulation failed: {error}")));
        }
        let result = self
            .results
            .first()
            .ok_or_else(|| QueryError::Decode("simulation returned no result".into()))?;
        ScVal::from_xdr_base64(&result.xdr, Limits::none())
            .map_err(|e| QueryError::Decode(format!("invalid result XDR: {e}")))
    }
}

// ── Encoding ───────────────────────────────────────────────────────────

/// Base64 XDR envelope for a read-only `function(sender, recipient)` call.
///
/// The sender is the transaction source unless it is a contract, in which
/// case [`SIMULATION_SOURCE`] is used.
pub fn build_read_transaction(
    contract_id: &str,
    function: ContractFunction,
    sender: &AccountId,
    recipient: &AccountId,
) -> Result<String, QueryError> {
    let source = if sender.is_contract() {
        SIMULATION_SOURCE
    } else {
        sender.as_str()
    };
    let source = MuxedAccount::from_str(source).map_err(|e| invalid_address(source, e))?;

    let invoke = InvokeContractArgs {
        contract_address: sc_address(contract_id)?,
        function_name: ScSymbol(function.name().try_into().map_err(encode_error)?),
        args: vec![
            ScVal::Address(sc_address(sender.as_str())?),
            ScVal::Address(sc_address(recipient.as_str())?),
        ]
        .try_into()
        .map_err(encode_error)?,
    };
    let operation = Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(invoke),
            auth: VecM::default(),
        }),
    };
    let tx = Transaction {
        source_account: source,
        fee: BASE_FEE,
        seq_num: SequenceNumber(0),
        cond: Preconditions::None,
        memo: Memo::None,
        operations: vec![operation].try_into().map_err(encode_error)?,
        ext: TransactionExt::V0,
    };

    TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: VecM::default(),
    })
    .to_xdr_base64(Limits::none())
    .map_err(encode_error)
}

fn sc_address(strkey: &str) -> Result<ScAddress, QueryError> {
    ScAddress::from_str(strkey).map_err(|e| invalid_address(strkey, e))
}

fn invalid_address(strkey: &str, e: impl fmt::Display) -> QueryError {
    QueryError::Encode(format!("invalid address {strkey}: {e}"))
}

fn encode_error(e: impl fmt::Display) -> QueryError {
    QueryError::Encode(e.to_string())
}

// ── Decoding ───────────────────────────────────────────────────────────

/// Decodes the `Option<u128>` returned by `get_tip`.
pub fn decode_amount(value: &ScVal) -> Result<Option<u128>, QueryError> {
    match value {
        ScVal::Void => Ok(None),
        ScVal::U128(parts) => Ok(Some(u128_from_parts(parts))),
        other => Err(unexpected("u128", other)),
    }
}

/// Decodes the `Option<TipRecord>` returned by `get_tip_with_message`.
pub fn decode_tip(value: &ScVal) -> Result<Option<TipView>, QueryError> {
    let entries = match value {
        ScVal::Void => return Ok(None),
        ScVal::Map(Some(map)) => map,
        other => return Err(unexpected("tip record", other)),
    };

    let mut amount = None;
    let mut message = None;
    for entry in entries.iter() {
        let ScVal::Symbol(key) = &entry.key else {
            return Err(unexpected("symbol key", &entry.key));
        };
        let key: &[u8] = &key.0;
        match (key, &entry.val) {
            (b"amount", ScVal::U128(parts)) => amount = Some(u128_from_parts(parts)),
            (b"message", ScVal::String(text)) => {
                let text = text
                    .0
                    .to_utf8_string()
                    .map_err(|e| QueryError::Decode(format!("message is not UTF-8: {e}")))?;
                message = Some(text);
            }
            (b"amount" | b"message", other) => return Err(unexpected("tip field", other)),
            _ => {}
        }
    }

    match (amount, message) {
        (Some(amount), Some(message)) => Ok(Some(TipView { amount, message })),
        _ => Err(QueryError::Decode("tip record is missing fields".into())),
    }
}

fn u128_from_parts(parts: &UInt128Parts) -> u128 {
    (u128::from(parts.hi) << 64) | u128::from(parts.lo)
}

fn unexpected(expected: &str, value: &ScVal) -> QueryError {
    QueryError::Decode(format!("expected {expected}, got {}", value.name()))
}
