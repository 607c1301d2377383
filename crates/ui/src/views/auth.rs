use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::ActiveOverlay;

#[component]
pub fn LoginOverlay() -> Element {
    let ctx = use_context::<AppContext>();
    let mut overlay = use_context::<Signal<ActiveOverlay>>();
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let auth = ctx.auth();
    let submit = use_callback(move |()| {
        let mut busy = busy;
        let mut error = error;
        let mut overlay = overlay;

        if busy() {
            return;
        }
        let auth = auth.clone();
        spawn(async move {
            busy.set(true);
            match auth.sign_in(&email(), &password()).await {
                Ok(_) => {
                    error.set(None);
                    overlay.set(ActiveOverlay::None);
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    });

    rsx! {
        div { class: "overlay",
            div { class: "modal auth-modal", role: "dialog", aria_modal: "true",
                header { class: "modal__header",
                    h2 { class: "modal__title", "Sign in" }
                    button {
                        class: "modal__close",
                        r#type: "button",
                        onclick: move |_| overlay.set(ActiveOverlay::None),
                        "Close"
                    }
                }
                div { class: "modal__body",
                    AuthField { label: "Email", kind: "email", value: email }
                    AuthField { label: "Password", kind: "password", value: password }
                    if let Some(error) = error() {
                        p { class: "auth-error", "{error}" }
                    }
                    footer { class: "modal__footer",
                        button {
                            class: "btn",
                            r#type: "button",
                            disabled: busy(),
                            onclick: move |_| submit.call(()),
                            "Sign in"
                        }
                        button {
                            class: "btn-link",
                            r#type: "button",
                            onclick: move |_| overlay.set(ActiveOverlay::Register),
                            "No account yet? Register"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn RegisterOverlay() -> Element {
    let ctx = use_context::<AppContext>();
    let mut overlay = use_context::<Signal<ActiveOverlay>>();
    let name = use_signal(String::new);
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let auth = ctx.auth();
    let submit = use_callback(move |()| {
        let mut busy = busy;
        let mut error = error;
        let mut overlay = overlay;

        if busy() {
            return;
        }
        let auth = auth.clone();
        spawn(async move {
            busy.set(true);
            match auth.sign_up(&email(), &password(), &name()).await {
                Ok(_) => {
                    error.set(None);
                    overlay.set(ActiveOverlay::None);
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    });

    rsx! {
        div { class: "overlay",
            div { class: "modal auth-modal", role: "dialog", aria_modal: "true",
                header { class: "modal__header",
                    h2 { class: "modal__title", "Create an account" }
                    button {
                        class: "modal__close",
                        r#type: "button",
                        onclick: move |_| overlay.set(ActiveOverlay::None),
                        "Close"
                    }
                }
                div { class: "modal__body",
                    AuthField { label: "Your name", kind: "text", value: name }
                    AuthField { label: "Email", kind: "email", value: email }
                    AuthField { label: "Password", kind: "password", value: password }
                    if let Some(error) = error() {
                        p { class: "auth-error", "{error}" }
                    }
                    footer { class: "modal__footer",
                        button {
                            class: "btn",
                            r#type: "button",
                            disabled: busy(),
                            onclick: move |_| submit.call(()),
                            "Register"
                        }
                        button {
                            class: "btn-link",
                            r#type: "button",
                            onclick: move |_| overlay.set(ActiveOverlay::Login),
                            "Already registered? Sign in"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AuthField(label: &'static str, kind: &'static str, value: Signal<String>) -> Element {
    let mut value = value;

    rsx! {
        label { class: "auth-field",
            span { class: "auth-field__label", "{label}" }
            input {
                class: "auth-field__input",
                r#type: "{kind}",
                value: "{value}",
                oninput: move |evt| value.set(evt.value()),
            }
        }
    }
}
