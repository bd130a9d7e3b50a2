//! Wallet providers: the EIP-1193 request surface the session talks to.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, TxHash};
use secp256k1::SecretKey;

use crate::error::WalletError;
use crate::rpc::{RpcClient, TransactionReceipt, TransactionRequest};
use crate::transaction::{self, LegacyTransaction};

#[allow(async_fn_in_trait)]
pub trait Provider {
    /// Ask the wallet to expose its accounts, prompting the user if needed.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Accounts already exposed, without prompting.
    async fn accounts(&self) -> Result<Vec<Address>, WalletError>;

    async fn chain_id(&self) -> Result<u64, WalletError>;

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, WalletError>;

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError>;

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError>;
}

impl<P: Provider> Provider for Arc<P> {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        (**self).request_accounts().await
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        (**self).accounts().await
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        (**self).chain_id().await
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, WalletError> {
        (**self).call(request).await
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError> {
        (**self).send_transaction(request).await
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError> {
        (**self).transaction_receipt(hash).await
    }
}

// ---------------------------------------------------------------------------
// InjectedWallet
// ---------------------------------------------------------------------------

/// A wallet reachable over JSON-RPC that holds the keys and signs for us.
pub struct InjectedWallet {
    rpc: RpcClient,
}

impl InjectedWallet {
    pub fn new(rpc_url: &str) -> Result<Self, WalletError> {
        Ok(Self {
            rpc: RpcClient::new(rpc_url)?,
        })
    }
}

impl Provider for InjectedWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.rpc.request_accounts().await
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.rpc.accounts().await
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        self.rpc.chain_id().await
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, WalletError> {
        self.rpc.call(request).await
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError> {
        self.rpc.send_transaction(request).await
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError> {
        self.rpc.transaction_receipt(hash).await
    }
}

// ---------------------------------------------------------------------------
// LocalKeyWallet
// ---------------------------------------------------------------------------

/// A plain node endpoint plus a private key; transactions are signed here.
pub struct LocalKeyWallet {
    rpc: RpcClient,
    secret: SecretKey,
    address: Address,
}

impl LocalKeyWallet {
    pub fn new(rpc_url: &str, private_key_hex: &str) -> Result<Self, WalletError> {
        let secret = transaction::parse_secret_key(private_key_hex)?;
        Ok(Self {
            rpc: RpcClient::new(rpc_url)?,
            address: transaction::address_of(&secret),
            secret,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Fill nonce, gas and chain id from the node.
    pub async fn prepare(&self, request: &TransactionRequest) -> Result<LegacyTransaction, WalletError> {
        let request = TransactionRequest {
            from: Some(self.address),
            ..request.clone()
        };
        let nonce = self.rpc.transaction_count(self.address).await?;
        let gas_price = self.rpc.gas_price().await?;
        let gas_limit = self.rpc.estimate_gas(&request).await?;
        let chain_id = self.rpc.chain_id().await?;

        Ok(LegacyTransaction {
            nonce,
            gas_price,
            gas_limit,
            to: request.to,
            value: request.value.unwrap_or_default(),
            data: request.data.unwrap_or_default(),
            chain_id,
        })
    }

    /// Sign `tx` with the wallet key and broadcast it.
    pub async fn send_prepared(&self, tx: &LegacyTransaction) -> Result<TxHash, WalletError> {
        tracing::debug!(nonce = tx.nonce, gas = tx.gas_limit, "signing transaction");
        let signed = tx.sign(&self.secret);
        let hash = self.rpc.send_raw_transaction(&signed.raw).await?;
        if hash != signed.hash {
            tracing::warn!(%hash, expected = %signed.hash, "node returned an unexpected hash");
        }
        Ok(hash)
    }
}

impl Provider for LocalKeyWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(vec![self.address])
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(vec![self.address])
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        self.rpc.chain_id().await
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, WalletError> {
        self.rpc.call(request).await
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError> {
        let tx = self.prepare(request).await?;
        self.send_prepared(&tx).await
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError> {
        self.rpc.transaction_receipt(hash).await
    }
}
