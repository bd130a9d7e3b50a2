#![allow(non_snake_case)]

mod components;
mod state;

use std::process::ExitCode;
use std::sync::Arc;

use dioxus::prelude::*;
use ico_chain::{IcoConfig, IcoController, IcoState, InjectedWallet};

use state::{SharedController, SignalStore};

const STYLE: &str = include_str!("../assets/style.css");

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[layout(Layout)]
    #[route("/")]
    Home {},
}

fn main() -> ExitCode {
    dioxus::logger::initialize_default();

    let config = match IcoConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let wallet = match InjectedWallet::new(&config.wallet_rpc_url) {
        Ok(wallet) => wallet,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        wallet = %config.wallet_rpc_url,
        network = %config.network.name,
        token = %config.token_contract,
        "starting"
    );

    let controller: SharedController = Arc::new(IcoController::new(wallet, &config));
    dioxus::LaunchBuilder::desktop().with_context(controller).launch(App);
    ExitCode::SUCCESS
}

#[component]
fn App() -> Element {
    let controller = use_context::<SharedController>();
    let mut state = use_context_provider(|| Signal::new(IcoState::default()));

    // Connect once on first render; the refresh follows from the connection.
    {
        let controller = controller.clone();
        use_hook(move || {
            spawn(async move {
                controller.connect(&mut SignalStore(state)).await;
            });
        });
    }

    use_drop(move || {
        tracing::debug!("tearing down wallet session");
        if let Ok(mut state) = state.try_write() {
            controller.disconnect(&mut *state);
        }
    });

    rsx! {
        document::Style { {STYLE} }
        Router::<Route> {}
    }
}

// ---------------------------------------------------------------------------
// Layout: title, page body, footer
// ---------------------------------------------------------------------------

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app-container",
            components::layout::TopBar {}
            div { class: "main-content",
                Outlet::<Route> {}
            }
            components::layout::Footer {}
            components::alert::AlertModal {}
        }
    }
}

#[component]
fn Home() -> Element {
    let state = use_context::<Signal<IcoState>>();
    let connected = state.read().is_connected();
    let last_error = state.read().last_error.clone();

    rsx! {
        div { class: "page",
            h1 { class: "title", "Welcome to Crypto Devs ICO!" }
            p { class: "description", "You can claim or mint Crypto Dev tokens here" }

            if connected {
                components::stats::Stats {}
                components::action_panel::ActionPanel {}
            } else {
                components::connection_status::ConnectWallet {}
            }

            if let Some(msg) = last_error {
                p { class: "error-text", "{msg}" }
            }
        }
    }
}
