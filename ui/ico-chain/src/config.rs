//! Runtime configuration, read from the process environment (and `.env`).

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;

use crate::error::WalletError;

pub const NETWORK_NAME_VAR: &str = "ICO_NETWORK_NAME";
pub const CHAIN_ID_VAR: &str = "ICO_CHAIN_ID";
pub const WALLET_RPC_URL_VAR: &str = "ICO_WALLET_RPC_URL";
pub const TOKEN_CONTRACT_VAR: &str = "ICO_TOKEN_CONTRACT_ADDRESS";
pub const NFT_CONTRACT_VAR: &str = "ICO_NFT_CONTRACT_ADDRESS";
pub const CONFIRMATION_POLL_MS_VAR: &str = "ICO_CONFIRMATION_POLL_MS";
pub const CONFIRMATION_ATTEMPTS_VAR: &str = "ICO_CONFIRMATION_ATTEMPTS";

/// Goerli, the network the contracts live on.
pub const DEFAULT_NETWORK_NAME: &str = "goerli";
pub const DEFAULT_CHAIN_ID: u64 = 5;
/// Local EIP-1193 endpoint exposed by desktop wallets such as Frame.
pub const DEFAULT_WALLET_RPC_URL: &str = "http://127.0.0.1:1248";

/// The single chain every handle must be on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NETWORK_NAME.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
        }
    }
}

/// How long to wait for a submitted transaction to land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_attempts: 120,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IcoConfig {
    pub network: NetworkConfig,
    pub wallet_rpc_url: String,
    pub token_contract: Address,
    pub nft_contract: Address,
    pub confirmation: ConfirmationPolicy,
}

impl IcoConfig {
    /// Load `.env` if present, then read the `ICO_*` variables.
    pub fn from_env() -> Result<Self, WalletError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WalletError> {
        let defaults = ConfirmationPolicy::default();
        let poll_ms = parse_or(
            &lookup,
            CONFIRMATION_POLL_MS_VAR,
            defaults.poll_interval.as_millis() as u64,
        )?;

        Ok(Self {
            network: NetworkConfig {
                name: lookup(NETWORK_NAME_VAR).unwrap_or_else(|| DEFAULT_NETWORK_NAME.to_string()),
                chain_id: parse_or(&lookup, CHAIN_ID_VAR, DEFAULT_CHAIN_ID)?,
            },
            wallet_rpc_url: lookup(WALLET_RPC_URL_VAR)
                .unwrap_or_else(|| DEFAULT_WALLET_RPC_URL.to_string()),
            token_contract: required_address(&lookup, TOKEN_CONTRACT_VAR)?,
            nft_contract: required_address(&lookup, NFT_CONTRACT_VAR)?,
            confirmation: ConfirmationPolicy {
                poll_interval: Duration::from_millis(poll_ms),
                max_attempts: parse_or(&lookup, CONFIRMATION_ATTEMPTS_VAR, defaults.max_attempts)?,
            },
        })
    }
}

/// The NFT collection address the token contract is deployed against.
pub fn nft_contract_from_env() -> Result<Address, WalletError> {
    dotenv::dotenv().ok();
    required_address(&|key: &str| std::env::var(key).ok(), NFT_CONTRACT_VAR)
}

fn required_address(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Address, WalletError> {
    let raw = lookup(key).ok_or_else(|| WalletError::Config(format!("{key} is not set")))?;
    Address::from_str(raw.trim())
        .map_err(|e| WalletError::Config(format!("{key}: invalid address {raw:?}: {e}")))
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, WalletError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| WalletError::Config(format!("{key}: {e}"))),
        None => Ok(default),
    }
}
