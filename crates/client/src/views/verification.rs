//! Email verification landing page and the "resend" form.

use dioxus::prelude::*;
use eventnow_core::FormOptions;
use eventnow_shared::forms::{validate_email_form, EmailForm};
use eventnow_shared::MessageResponse;

use crate::auth_session::use_auth;
use crate::components::ui::{
    Button, Card, CardBody, CardHeader, ErrorBox, InputType, PageSpinner, TextInput,
};
use crate::hooks::{use_api, use_form};
use crate::notifications::use_notifications;
use crate::Route;

#[component]
pub fn VerifyEmail(token: String) -> Element {
    let auth = use_auth();
    let verification = use_api::<MessageResponse>();

    let runner = verification.clone();
    use_future(move || {
        let runner = runner.clone();
        let token = token.clone();
        let auth = auth.clone();
        async move {
            let outcome = runner
                .call(|api| async move { api.verify_email(&token).await })
                .await;
            // A signed-in user should see the verified badge straight away.
            if outcome.is_success() && auth.is_authenticated() {
                if let Err(e) = auth.refresh_user().await {
                    eventnow_core::log_warn!("Could not refresh user after verification: {}", e);
                }
            }
        }
    });

    let state = verification.state().read_cloned();

    let body = if state.is_pending() {
        rsx! { PageSpinner {} }
    } else if let Some(response) = state.data {
        rsx! {
            div { class: "space-y-4 text-center",
                p { class: "text-green-700 font-medium", "{response.message}" }
                Link { to: Route::Login {}, class: "text-sm font-medium text-indigo-600 hover:underline", "Continue to log in" }
            }
        }
    } else {
        rsx! {
            div { class: "space-y-4",
                ErrorBox {
                    message: state
                        .error
                        .unwrap_or_else(|| "This verification link is invalid or has expired.".to_string()),
                }
                Link { to: Route::ResendVerification {}, class: "text-sm font-medium text-indigo-600 hover:underline",
                    "Send a new verification email"
                }
            }
        }
    };

    rsx! {
        div { class: "flex justify-center py-8",
            div { class: "w-full max-w-md",
                Card {
                    CardHeader { title: "Email verification".to_string() }
                    CardBody { {body} }
                }
            }
        }
    }
}

#[component]
pub fn ResendVerification() -> Element {
    let auth = use_auth();
    let notify = use_notifications();
    let mut error = use_signal(|| None::<String>);

    let initial = EmailForm {
        email: auth.user().map(|u| u.email).unwrap_or_default(),
    };
    let form = use_form(initial, FormOptions::default(), Some(validate_email_form));

    let on_submit = form.on_submit(move |values: EmailForm| {
        let api = auth.api();
        let notify = notify.clone();
        async move {
            error.set(None);
            match api.send_verification_email(&values.email).await {
                Ok(response) => notify.success(response.message),
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    });

    rsx! {
        div { class: "flex justify-center py-8",
            div { class: "w-full max-w-md",
                Card {
                    CardHeader {
                        title: "Resend verification email".to_string(),
                        subtitle: Some("We'll send a fresh link to your inbox".to_string()),
                    }
                    CardBody {
                        if let Some(e) = error.cloned() {
                            div { class: "mb-4", ErrorBox { message: e } }
                        }
                        form { class: "space-y-5", novalidate: true, onsubmit: on_submit,
                            TextInput {
                                name: "email",
                                label: "Email",
                                input_type: InputType::Email,
                                value: form.text("email"),
                                error: form.error("email"),
                                oninput: form.on_input("email"),
                                onblur: form.on_blur("email"),
                            }
                            Button { r#type: "submit", class: "w-full py-2.5", loading: form.is_submitting(),
                                "Send email"
                            }
                        }
                    }
                }
            }
        }
    }
}
