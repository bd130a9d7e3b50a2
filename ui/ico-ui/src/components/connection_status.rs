use dioxus::prelude::*;
use ico_chain::{ConnectionStatus, IcoState};

use crate::state::{SharedController, SignalStore};

fn connect(controller: SharedController, state: Signal<IcoState>) {
    spawn(async move {
        controller.connect(&mut SignalStore(state)).await;
    });
}

#[component]
pub fn ConnectionStatusIndicator() -> Element {
    let controller = use_context::<SharedController>();
    let state = use_context::<Signal<IcoState>>();

    let status = state.read().connection.clone();
    let (dot_class, label) = match &status {
        ConnectionStatus::Disconnected => ("dot disconnected", "Disconnected"),
        ConnectionStatus::Connecting => ("dot connecting", "Connecting"),
        ConnectionStatus::Connected(_) => ("dot connected", "Connected"),
        ConnectionStatus::Error(_) => ("dot error", "Error"),
    };
    let is_connected = matches!(status, ConnectionStatus::Connected(_));

    let on_connect = {
        let controller = controller.clone();
        move |_| connect(controller.clone(), state)
    };
    let on_disconnect = move |_| controller.disconnect(&mut SignalStore(state));

    rsx! {
        div { class: "conn-indicator",
            span { class: dot_class }
            span { class: "conn-label", "{label}" }
            if is_connected {
                button { class: "conn-btn conn-btn-disconnect", onclick: on_disconnect, "Disconnect" }
            } else {
                button {
                    class: "conn-btn conn-btn-connect",
                    disabled: matches!(status, ConnectionStatus::Connecting),
                    onclick: on_connect,
                    "Connect"
                }
            }
        }
    }
}

/// Shown in place of the stats until a wallet is connected.
#[component]
pub fn ConnectWallet() -> Element {
    let controller = use_context::<SharedController>();
    let state = use_context::<Signal<IcoState>>();
    let status = state.read().connection.clone();

    rsx! {
        button {
            class: "btn btn-primary",
            disabled: matches!(status, ConnectionStatus::Connecting),
            onclick: move |_| connect(controller.clone(), state),
            "Connect your wallet"
        }
        if let ConnectionStatus::Error(msg) = status {
            p { class: "error-text", "{msg}" }
        }
    }
}
