use dioxus::prelude::*;
use ico_chain::units::{format_tokens, MAX_TOTAL_SUPPLY};
use ico_chain::IcoState;

#[component]
pub fn Stats() -> Element {
    let state = use_context::<Signal<IcoState>>();
    let balance = format_tokens(state.read().balance);
    let minted = format_tokens(state.read().tokens_minted);

    rsx! {
        div { class: "result-card",
            p { class: "description", "You have minted {balance} Crypto Dev Tokens" }
            p { class: "description", "Overall {minted}/{MAX_TOTAL_SUPPLY} have been minted" }
        }
    }
}
