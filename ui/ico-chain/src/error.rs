use alloy_primitives::TxHash;

/// EIP-1193 "user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("Change the network to {network} (expected chain {expected}, wallet is on {actual})")]
    WrongNetwork {
        network: String,
        expected: u64,
        actual: u64,
    },
    #[error("Request rejected in the wallet")]
    UserRejected,
    #[error("Wallet has no connected accounts")]
    NoAccounts,
    #[error("Handle cannot sign transactions")]
    NotSigner,
    #[error("Network error: {0}")]
    Transport(String),
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("ABI decode error: {0}")]
    Abi(String),
    #[error("Transaction {0} reverted")]
    TransactionReverted(TxHash),
    #[error("Transaction {0} was not confirmed in time")]
    ConfirmationTimeout(TxHash),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid private key")]
    InvalidKey,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WalletError {
    pub fn is_wrong_network(&self) -> bool {
        matches!(self, Self::WrongNetwork { .. })
    }

    pub(crate) fn from_rpc(code: i64, message: String) -> Self {
        if code == USER_REJECTED_CODE {
            Self::UserRejected
        } else {
            Self::Rpc { code, message }
        }
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        Self::JsonParse(e.to_string())
    }
}

impl From<alloy_sol_types::Error> for WalletError {
    fn from(e: alloy_sol_types::Error) -> Self {
        Self::Abi(e.to_string())
    }
}
