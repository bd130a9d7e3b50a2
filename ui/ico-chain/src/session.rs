//! Wallet session: connection and network-checked handles.

use alloy_primitives::Address;

use crate::config::NetworkConfig;
use crate::error::WalletError;
use crate::provider::Provider;

/// What a handle must be able to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Read,
    Sign,
}

/// A provider already checked to be on the target network. Signing handles
/// also carry the active account.
pub struct Handle<'a, P> {
    provider: &'a P,
    signer: Option<Address>,
}

impl<P> Clone for Handle<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Handle<'_, P> {}

impl<'a, P> Handle<'a, P> {
    pub fn provider(&self) -> &'a P {
        self.provider
    }

    pub fn signer(&self) -> Result<Address, WalletError> {
        self.signer.ok_or(WalletError::NotSigner)
    }
}

pub struct WalletSession<P> {
    provider: P,
    network: NetworkConfig,
}

impl<P: Provider> WalletSession<P> {
    pub fn new(provider: P, network: NetworkConfig) -> Self {
        Self { provider, network }
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Ask the wallet for access and return the active account.
    pub async fn connect(&self) -> Result<Address, WalletError> {
        let accounts = self.provider.request_accounts().await?;
        if accounts.is_empty() {
            return Err(WalletError::NoAccounts);
        }
        let handle = self.handle(Capability::Sign).await?;
        let account = handle.signer()?;
        tracing::info!(%account, network = %self.network.name, "wallet connected");
        Ok(account)
    }

    /// Check the wallet's chain, then hand out a handle. Runs the check on
    /// every call since the user can switch networks at any time.
    pub async fn handle(&self, capability: Capability) -> Result<Handle<'_, P>, WalletError> {
        let actual = self.provider.chain_id().await?;
        if actual != self.network.chain_id {
            tracing::warn!(expected = self.network.chain_id, actual, "wrong network");
            return Err(WalletError::WrongNetwork {
                network: self.network.name.clone(),
                expected: self.network.chain_id,
                actual,
            });
        }

        let signer = match capability {
            Capability::Read => None,
            Capability::Sign => {
                let accounts = self.provider.accounts().await?;
                Some(*accounts.first().ok_or(WalletError::NoAccounts)?)
            }
        };

        Ok(Handle {
            provider: &self.provider,
            signer,
        })
    }
}
