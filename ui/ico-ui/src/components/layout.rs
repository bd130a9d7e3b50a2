use dioxus::prelude::*;
use ico_chain::IcoState;

use super::connection_status::ConnectionStatusIndicator;

#[component]
pub fn TopBar() -> Element {
    let controller = use_context::<crate::state::SharedController>();
    let network = controller.session().network().name.clone();
    let state = use_context::<Signal<IcoState>>();
    let account = state.read().account();

    rsx! {
        header { class: "topbar",
            div { class: "topbar-left",
                span { class: "brand-icon", "◈" }
                span { class: "brand-text", "Crypto Devs" }
                if let Some(account) = account {
                    div { class: "topbar-divider" }
                    span { class: "mono", "{truncate_address(&account.to_string())}" }
                }
            }
            div { class: "topbar-right",
                span { class: "network-badge", "{network}" }
                ConnectionStatusIndicator {}
            }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer { class: "footer", "Made with ❤ by Crypto Devs" }
    }
}

fn truncate_address(address: &str) -> String {
    if address.len() > 12 {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}
