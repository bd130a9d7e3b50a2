//! Chain side of the Crypto Devs ICO: wallet providers, the network-checked
//! session, contract bindings, and the page state the desktop app renders.

pub mod claimable;
pub mod config;
pub mod contracts;
pub mod controller;
pub mod error;
pub mod provider;
pub mod rpc;
pub mod session;
pub mod state;
pub mod transaction;
pub mod units;

#[cfg(test)]
mod testing;

pub use config::IcoConfig;
pub use controller::{Action, IcoController, StateStore};
pub use error::WalletError;
pub use provider::{InjectedWallet, LocalKeyWallet, Provider};
pub use state::{Alert, ConnectionStatus, IcoState, Panel};
