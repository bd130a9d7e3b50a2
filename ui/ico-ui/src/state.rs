//! Glue between the reactive page state and the chain controller.

use std::sync::Arc;

use dioxus::prelude::*;
use ico_chain::{IcoController, IcoState, InjectedWallet, StateStore};

/// The one controller for the app, handed out as context.
pub type SharedController = Arc<IcoController<InjectedWallet>>;

/// Lets the controller write into the page's `Signal`.
#[derive(Clone, Copy)]
pub struct SignalStore(pub Signal<IcoState>);

impl StateStore for SignalStore {
    fn update<R>(&mut self, f: impl FnOnce(&mut IcoState) -> R) -> R {
        let mut state = self.0.write();
        f(&mut *state)
    }
}
