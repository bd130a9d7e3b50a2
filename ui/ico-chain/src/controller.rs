//! Drives the ICO page: connect, refresh the read state, run transactions.

use alloy_primitives::{Address, U256};

use crate::claimable;
use crate::config::{ConfirmationPolicy, IcoConfig};
use crate::contracts::{NftContract, TokenContract};
use crate::error::WalletError;
use crate::provider::Provider;
use crate::rpc::TransactionReceipt;
use crate::session::{Capability, WalletSession};
use crate::state::{Alert, ConnectionStatus, ErrorOrigin, IcoState, ReadState};

/// Somewhere the page state lives. The desktop app backs this with a signal.
pub trait StateStore {
    fn update<R>(&mut self, f: impl FnOnce(&mut IcoState) -> R) -> R;
}

impl StateStore for IcoState {
    fn update<R>(&mut self, f: impl FnOnce(&mut IcoState) -> R) -> R {
        f(self)
    }
}

/// A state-changing call on the token contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Buy this many whole tokens at 0.001 ether each.
    Mint(U256),
    Claim,
    Withdraw,
}

impl Action {
    fn confirmation(&self) -> &'static str {
        match self {
            Self::Mint(_) => "You have successfully minted Crypto Dev Tokens",
            Self::Claim => "You have successfully claimed Crypto Dev Tokens",
            Self::Withdraw => "You have successfully withdrawn the contract balance",
        }
    }
}

pub struct IcoController<P> {
    session: WalletSession<P>,
    token: Address,
    nft: Address,
    confirmation: ConfirmationPolicy,
}

impl<P: Provider> IcoController<P> {
    pub fn new(provider: P, config: &IcoConfig) -> Self {
        Self {
            session: WalletSession::new(provider, config.network.clone()),
            token: config.token_contract,
            nft: config.nft_contract,
            confirmation: config.confirmation,
        }
    }

    pub fn session(&self) -> &WalletSession<P> {
        &self.session
    }

    /// Connect the wallet and load the page.
    pub async fn connect<S: StateStore>(&self, store: &mut S) {
        store.update(|s| s.connection = ConnectionStatus::Connecting);

        match self.session.connect().await {
            Ok(account) => {
                store.update(|s| {
                    s.connection = ConnectionStatus::Connected(account);
                    s.clear_all_errors();
                });
                self.refresh(store).await;
            }
            Err(e) => {
                tracing::warn!("wallet connection failed: {e}");
                store.update(|s| {
                    if e.is_wrong_network() {
                        s.alert = Some(Alert::WrongNetwork(e.to_string()));
                    }
                    s.connection = ConnectionStatus::Error(e.to_string());
                });
            }
        }
    }

    /// Re-read balance, supply, claimable count and ownership.
    pub async fn refresh<S: StateStore>(&self, store: &mut S) {
        let (ticket, account) = store.update(|s| (s.begin_refresh(), s.account()));
        let Some(account) = account else {
            tracing::debug!("skipping refresh, no wallet connected");
            return;
        };

        let read = self.read_state(account).await;
        store.update(|s| s.apply_refresh(ticket, read));
    }

    /// Run the independent read queries concurrently.
    pub async fn read_state(&self, account: Address) -> ReadState {
        let (balance, total_supply, tokens_to_be_claimed, is_owner) = futures::join!(
            self.balance_of(account),
            self.total_supply(),
            self.tokens_to_be_claimed(account),
            self.is_owner(account),
        );
        ReadState {
            balance,
            total_supply,
            tokens_to_be_claimed,
            is_owner,
        }
    }

    /// Submit `action`, wait for it, then refresh. Failures end up in
    /// `last_error`; nothing is retried.
    pub async fn execute<S: StateStore>(&self, action: Action, store: &mut S) {
        match self.transact(action, store).await {
            Ok(receipt) => {
                tracing::info!(?action, hash = %receipt.transaction_hash, "action confirmed");
                store.update(|s| {
                    s.alert = Some(Alert::Confirmed(action.confirmation().to_string()));
                    s.clear_error(ErrorOrigin::Action);
                });
                self.refresh(store).await;
            }
            Err(e) => {
                tracing::error!(?action, "action failed: {e}");
                store.update(|s| {
                    if e.is_wrong_network() {
                        s.alert = Some(Alert::WrongNetwork(e.to_string()));
                    }
                    s.set_error(ErrorOrigin::Action, e.to_string());
                });
            }
        }
    }

    pub fn disconnect<S: StateStore>(&self, store: &mut S) {
        store.update(IcoState::reset);
    }

    async fn transact<S: StateStore>(
        &self,
        action: Action,
        store: &mut S,
    ) -> Result<TransactionReceipt, WalletError> {
        if action == Action::Mint(U256::ZERO) {
            return Err(WalletError::InvalidAmount(
                "enter a number of tokens greater than zero".into(),
            ));
        }

        let handle = self.session.handle(Capability::Sign).await?;
        let token = TokenContract::new(self.token, handle);
        let pending = match action {
            Action::Mint(amount) => token.mint(amount).await?,
            Action::Claim => token.claim().await?,
            Action::Withdraw => token.withdraw().await?,
        };

        store.update(|s| s.loading = true);
        let receipt = pending.wait(&self.confirmation).await;
        store.update(|s| s.loading = false);
        receipt
    }

    // -----------------------------------------------------------------------
    // Reads, each behind its own network check
    // -----------------------------------------------------------------------

    async fn balance_of(&self, account: Address) -> Result<U256, WalletError> {
        let handle = self.session.handle(Capability::Read).await?;
        TokenContract::new(self.token, handle).balance_of(account).await
    }

    async fn total_supply(&self) -> Result<U256, WalletError> {
        let handle = self.session.handle(Capability::Read).await?;
        TokenContract::new(self.token, handle).total_supply().await
    }

    async fn tokens_to_be_claimed(&self, account: Address) -> Result<u64, WalletError> {
        let handle = self.session.handle(Capability::Read).await?;
        let nft = NftContract::new(self.nft, handle);
        let token = TokenContract::new(self.token, handle);
        claimable::tokens_to_be_claimed(&nft, &token, account).await
    }

    async fn is_owner(&self, account: Address) -> Result<bool, WalletError> {
        let handle = self.session.handle(Capability::Read).await?;
        let owner = TokenContract::new(self.token, handle).owner().await?;
        Ok(owner == account)
    }
}
