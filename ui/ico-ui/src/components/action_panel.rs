use dioxus::prelude::*;
use ico_chain::{Action, IcoState, Panel};

use crate::state::{SharedController, SignalStore};

/// Loading, withdraw, claim or mint, whichever applies right now.
#[component]
pub fn ActionPanel() -> Element {
    let controller = use_context::<SharedController>();
    let mut state = use_context::<Signal<IcoState>>();
    let panel = state.read().panel();

    let run = move |action: Action| {
        let controller = controller.clone();
        spawn(async move {
            controller.execute(action, &mut SignalStore(state)).await;
        });
    };

    rsx! {
        div { class: "action-panel",
            match panel {
                Panel::Loading => rsx! {
                    button { class: "btn", disabled: true, "Loading..." }
                },
                Panel::Withdraw => rsx! {
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| run(Action::Withdraw),
                        "Withdraw Coins"
                    }
                },
                Panel::Claim { claimable_tokens } => rsx! {
                    p { class: "description", "{claimable_tokens} Tokens can be claimed!" }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| run(Action::Claim),
                        "Claim Tokens"
                    }
                },
                Panel::Mint { can_submit } => rsx! {
                    div { class: "form-group",
                        input {
                            class: "input",
                            r#type: "number",
                            min: "0",
                            placeholder: "Amount of Tokens",
                            oninput: move |e| state.write().set_token_amount_input(&e.value()),
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: !can_submit,
                        onclick: move |_| {
                            let amount = state.read().token_amount;
                            run(Action::Mint(amount));
                        },
                        "Mint Tokens"
                    }
                },
            }
        }
    }
}
