use dioxus::prelude::*;
use ico_chain::{Alert, IcoState};

/// Blocking message: wrong network or a confirmed transaction.
#[component]
pub fn AlertModal() -> Element {
    let mut state = use_context::<Signal<IcoState>>();
    let alert = state.read().alert.clone();

    rsx! {
        if let Some(alert) = alert {
            div { class: "modal-backdrop",
                div { class: if matches!(alert, Alert::WrongNetwork(_)) { "modal modal-warning" } else { "modal" },
                    p { "{alert.message()}" }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| state.write().alert = None,
                        "OK"
                    }
                }
            }
        }
    }
}
