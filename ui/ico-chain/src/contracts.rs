//! Typed bindings for the two external contracts.

use alloy_primitives::{Address, TxHash, U256};
use alloy_sol_types::{sol, SolCall};

use crate::config::ConfirmationPolicy;
use crate::error::WalletError;
use crate::provider::Provider;
use crate::rpc::{TransactionReceipt, TransactionRequest};
use crate::session::Handle;
use crate::units;

sol! {
    /// The ERC20 sold and claimed on the page.
    interface ICryptoDevToken {
        function balanceOf(address account) external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function mint(uint256 amount) external payable;
        function claim() external;
        function owner() external view returns (address);
        function withdraw() external;
        function tokenIdsClaimed(uint256 tokenId) external view returns (bool);
    }

    /// The existing NFT collection whose holders may claim.
    interface ICryptoDevs {
        function balanceOf(address owner) external view returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
    }
}

async fn read<P: Provider, C: SolCall>(
    handle: Handle<'_, P>,
    to: Address,
    call: C,
) -> Result<C::Return, WalletError> {
    let output = handle
        .provider()
        .call(&TransactionRequest::call(to, call.abi_encode()))
        .await?;
    Ok(C::abi_decode_returns(&output)?)
}

async fn write<'a, P: Provider, C: SolCall>(
    handle: Handle<'a, P>,
    to: Address,
    call: C,
    value: U256,
) -> Result<PendingTransaction<'a, P>, WalletError> {
    let from = handle.signer()?;
    let request = TransactionRequest {
        from: Some(from),
        to: Some(to),
        value: (!value.is_zero()).then_some(value),
        data: Some(call.abi_encode().into()),
    };
    let hash = handle.provider().send_transaction(&request).await?;
    tracing::info!(%hash, %to, "transaction submitted");
    Ok(PendingTransaction {
        provider: handle.provider(),
        hash,
    })
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

pub struct TokenContract<'a, P> {
    handle: Handle<'a, P>,
    address: Address,
}

impl<'a, P: Provider> TokenContract<'a, P> {
    pub fn new(address: Address, handle: Handle<'a, P>) -> Self {
        Self { handle, address }
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256, WalletError> {
        read(self.handle, self.address, ICryptoDevToken::balanceOfCall { account }).await
    }

    pub async fn total_supply(&self) -> Result<U256, WalletError> {
        read(self.handle, self.address, ICryptoDevToken::totalSupplyCall {}).await
    }

    pub async fn owner(&self) -> Result<Address, WalletError> {
        read(self.handle, self.address, ICryptoDevToken::ownerCall {}).await
    }

    pub async fn token_ids_claimed(&self, token_id: U256) -> Result<bool, WalletError> {
        read(
            self.handle,
            self.address,
            ICryptoDevToken::tokenIdsClaimedCall { tokenId: token_id },
        )
        .await
    }

    /// `mint(amount)` paying 0.001 ether per token.
    pub async fn mint(&self, amount: U256) -> Result<PendingTransaction<'a, P>, WalletError> {
        let value = units::mint_value(amount)?;
        write(self.handle, self.address, ICryptoDevToken::mintCall { amount }, value).await
    }

    pub async fn claim(&self) -> Result<PendingTransaction<'a, P>, WalletError> {
        write(self.handle, self.address, ICryptoDevToken::claimCall {}, U256::ZERO).await
    }

    pub async fn withdraw(&self) -> Result<PendingTransaction<'a, P>, WalletError> {
        write(self.handle, self.address, ICryptoDevToken::withdrawCall {}, U256::ZERO).await
    }
}

// ---------------------------------------------------------------------------
// NFT collection
// ---------------------------------------------------------------------------

pub struct NftContract<'a, P> {
    handle: Handle<'a, P>,
    address: Address,
}

impl<'a, P: Provider> NftContract<'a, P> {
    pub fn new(address: Address, handle: Handle<'a, P>) -> Self {
        Self { handle, address }
    }

    pub async fn balance_of(&self, owner: Address) -> Result<U256, WalletError> {
        read(self.handle, self.address, ICryptoDevs::balanceOfCall { owner }).await
    }

    pub async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, WalletError> {
        read(
            self.handle,
            self.address,
            ICryptoDevs::tokenOfOwnerByIndexCall { owner, index },
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Pending transactions
// ---------------------------------------------------------------------------

/// A submitted transaction whose receipt has not been seen yet.
pub struct PendingTransaction<'a, P> {
    provider: &'a P,
    hash: TxHash,
}

impl<'a, P: Provider> PendingTransaction<'a, P> {
    pub fn new(provider: &'a P, hash: TxHash) -> Self {
        Self { provider, hash }
    }

    /// Poll for the receipt until it lands or the policy runs out.
    pub async fn wait(self, policy: &ConfirmationPolicy) -> Result<TransactionReceipt, WalletError> {
        for _ in 0..policy.max_attempts {
            if let Some(receipt) = self.provider.transaction_receipt(self.hash).await? {
                if !receipt.succeeded() {
                    return Err(WalletError::TransactionReverted(self.hash));
                }
                tracing::info!(hash = %self.hash, block = ?receipt.block_number, "transaction confirmed");
                return Ok(receipt);
            }
            tokio::time::sleep(policy.poll_interval).await;
        }
        Err(WalletError::ConfirmationTimeout(self.hash))
    }
}
