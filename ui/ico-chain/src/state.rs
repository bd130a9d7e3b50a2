//! View state for the ICO page and the panel it renders.

use alloy_primitives::{Address, U256};

use crate::error::WalletError;
use crate::units::{self, TOKENS_PER_NFT};

/// Current wallet connection state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected(Address),
    Error(String),
}

/// Modal message the user has to dismiss.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Alert {
    WrongNetwork(String),
    Confirmed(String),
}

impl Alert {
    pub fn message(&self) -> &str {
        match self {
            Self::WrongNetwork(msg) | Self::Confirmed(msg) => msg,
        }
    }
}

/// What produced `last_error`. Each source only clears its own message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorOrigin {
    Input,
    Refresh,
    Action,
}

/// The one action panel shown under the stats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Panel {
    Loading,
    Withdraw,
    /// `claimable_tokens` is in whole tokens (ten per NFT).
    Claim { claimable_tokens: u64 },
    Mint { can_submit: bool },
}

pub fn select_panel(
    loading: bool,
    connected: bool,
    is_owner: bool,
    tokens_to_be_claimed: u64,
    token_amount: U256,
) -> Panel {
    if loading {
        Panel::Loading
    } else if connected && is_owner {
        Panel::Withdraw
    } else if tokens_to_be_claimed > 0 {
        Panel::Claim {
            claimable_tokens: tokens_to_be_claimed.saturating_mul(TOKENS_PER_NFT),
        }
    } else {
        Panel::Mint {
            can_submit: !token_amount.is_zero(),
        }
    }
}

/// Identifies one refresh; only the latest issued ticket may write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshTicket(u64);

/// Results of the independent read queries of one refresh.
#[derive(Debug)]
pub struct ReadState {
    pub balance: Result<U256, WalletError>,
    pub total_supply: Result<U256, WalletError>,
    pub tokens_to_be_claimed: Result<u64, WalletError>,
    pub is_owner: Result<bool, WalletError>,
}

/// Top-level page state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IcoState {
    pub connection: ConnectionStatus,
    pub balance: U256,
    pub tokens_minted: U256,
    pub token_amount: U256,
    pub tokens_to_be_claimed: u64,
    pub is_owner: bool,
    pub loading: bool,
    pub alert: Option<Alert>,
    pub last_error: Option<String>,
    error_origin: Option<ErrorOrigin>,
    refresh_generation: u64,
}

impl IcoState {
    pub fn is_connected(&self) -> bool {
        matches!(self.connection, ConnectionStatus::Connected(_))
    }

    pub fn account(&self) -> Option<Address> {
        match self.connection {
            ConnectionStatus::Connected(account) => Some(account),
            _ => None,
        }
    }

    pub fn panel(&self) -> Panel {
        select_panel(
            self.loading,
            self.is_connected(),
            self.is_owner,
            self.tokens_to_be_claimed,
            self.token_amount,
        )
    }

    pub fn set_error(&mut self, origin: ErrorOrigin, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.error_origin = Some(origin);
    }

    /// Drop `last_error` if `origin` put it there.
    pub fn clear_error(&mut self, origin: ErrorOrigin) {
        if self.error_origin == Some(origin) {
            self.last_error = None;
            self.error_origin = None;
        }
    }

    pub fn clear_all_errors(&mut self) {
        self.last_error = None;
        self.error_origin = None;
    }

    /// Update the mint amount from the text input. Bad input leaves the
    /// amount at zero and reports why.
    pub fn set_token_amount_input(&mut self, input: &str) {
        match units::parse_token_amount(input) {
            Ok(amount) => {
                self.token_amount = amount;
                self.clear_error(ErrorOrigin::Input);
            }
            Err(e) => {
                self.token_amount = U256::ZERO;
                self.set_error(ErrorOrigin::Input, e.to_string());
            }
        }
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.refresh_generation += 1;
        RefreshTicket(self.refresh_generation)
    }

    /// Apply a refresh if it is still the latest one. Failed reads keep the
    /// previous value, except the claimable count which drops to zero.
    pub fn apply_refresh(&mut self, ticket: RefreshTicket, read: ReadState) -> bool {
        if ticket.0 != self.refresh_generation {
            tracing::debug!(
                stale = ticket.0,
                latest = self.refresh_generation,
                "discarding stale refresh"
            );
            return false;
        }

        let mut errors = Vec::new();
        match read.balance {
            Ok(balance) => self.balance = balance,
            Err(e) => errors.push(e),
        }
        match read.total_supply {
            Ok(supply) => self.tokens_minted = supply,
            Err(e) => errors.push(e),
        }
        match read.tokens_to_be_claimed {
            Ok(count) => self.tokens_to_be_claimed = count,
            Err(e) => {
                self.tokens_to_be_claimed = 0;
                errors.push(e);
            }
        }
        match read.is_owner {
            Ok(is_owner) => self.is_owner = is_owner,
            Err(e) => errors.push(e),
        }

        if let Some(network) = errors.iter().find(|e| e.is_wrong_network()) {
            self.alert = Some(Alert::WrongNetwork(network.to_string()));
        }
        match errors.first() {
            Some(e) => self.set_error(ErrorOrigin::Refresh, e.to_string()),
            None => self.clear_error(ErrorOrigin::Refresh),
        }
        true
    }

    /// Back to a fresh, disconnected page.
    pub fn reset(&mut self) {
        let generation = self.refresh_generation;
        *self = Self {
            refresh_generation: generation + 1,
            ..Self::default()
        };
    }
}
