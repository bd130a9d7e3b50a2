//! Minimal Ethereum JSON-RPC client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Address, Bytes, TxHash, U256, U64};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::WalletError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters for `eth_call`, `eth_estimateGas` and `eth_sendTransaction`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}

impl TransactionRequest {
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to: Some(to),
            data: Some(data.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` when reverted.
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub contract_address: Option<Address>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |s| s == U64::from(1))
    }
}

pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_request_id: AtomicU64,
}

impl RpcClient {
    pub fn new(rpc_url: &str) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url: rpc_url.to_string(),
            next_request_id: AtomicU64::new(1),
        })
    }

    pub async fn request<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<R, WalletError> {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(method, id, "rpc request");

        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let response = self.http.post(&self.url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(WalletError::Transport(format!(
                "{method}: HTTP {}",
                response.status()
            )));
        }
        let envelope: Value = response.json().await?;
        parse_response(envelope)
    }

    pub async fn chain_id(&self) -> Result<u64, WalletError> {
        let id: U64 = self.request("eth_chainId", json!([])).await?;
        Ok(id.to::<u64>())
    }

    pub async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.request("eth_requestAccounts", json!([])).await
    }

    pub async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.request("eth_accounts", json!([])).await
    }

    pub async fn call(&self, request: &TransactionRequest) -> Result<Bytes, WalletError> {
        self.request("eth_call", json!([request, "latest"])).await
    }

    pub async fn estimate_gas(&self, request: &TransactionRequest) -> Result<u64, WalletError> {
        let gas: U64 = self.request("eth_estimateGas", json!([request])).await?;
        Ok(gas.to::<u64>())
    }

    pub async fn gas_price(&self) -> Result<U256, WalletError> {
        self.request("eth_gasPrice", json!([])).await
    }

    pub async fn transaction_count(&self, address: Address) -> Result<u64, WalletError> {
        let nonce: U64 = self
            .request("eth_getTransactionCount", json!([address, "pending"]))
            .await?;
        Ok(nonce.to::<u64>())
    }

    pub async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError> {
        self.request("eth_sendTransaction", json!([request])).await
    }

    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, WalletError> {
        let raw = Bytes::copy_from_slice(raw);
        self.request("eth_sendRawTransaction", json!([raw])).await
    }

    pub async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError> {
        self.request("eth_getTransactionReceipt", json!([hash])).await
    }
}

/// Unwrap a JSON-RPC 2.0 response envelope.
fn parse_response<R: DeserializeOwned>(envelope: Value) -> Result<R, WalletError> {
    if let Some(err) = envelope.get("error").filter(|e| !e.is_null()) {
        let code = err["code"].as_i64().unwrap_or_default();
        let message = err["message"]
            .as_str()
            .unwrap_or("unknown RPC error")
            .to_string();
        return Err(WalletError::from_rpc(code, message));
    }
    let Some(result) = envelope.get("result") else {
        return Err(WalletError::JsonParse("missing result".into()));
    };
    Ok(serde_json::from_value(result.clone())?)
}
