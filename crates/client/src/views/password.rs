//! Password recovery: request a reset link, then set a new password.

use dioxus::prelude::*;
use eventnow_core::FormOptions;
use eventnow_shared::forms::{
    validate_email_form, validate_reset_password, EmailForm, ResetPasswordForm,
};

use crate::auth_session::use_auth;
use crate::components::ui::{
    Button, Card, CardBody, CardHeader, ErrorBox, InputType, PageSpinner, TextInput,
};
use crate::hooks::{use_api, use_form};
use crate::notifications::use_notifications;
use crate::Route;

#[component]
pub fn ForgotPassword() -> Element {
    let auth = use_auth();
    let mut error = use_signal(|| None::<String>);
    let mut sent_to = use_signal(|| None::<String>);

    let form = use_form(EmailForm::default(), FormOptions::default(), Some(validate_email_form));

    let on_submit = form.on_submit(move |values: EmailForm| {
        let api = auth.api();
        async move {
            error.set(None);
            match api.forgot_password(&values.email).await {
                Ok(()) => sent_to.set(Some(values.email.trim().to_string())),
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    });

    rsx! {
        div { class: "flex justify-center py-8",
            div { class: "w-full max-w-md",
                Card {
                    CardHeader {
                        title: "Forgot your password?".to_string(),
                        subtitle: Some("We'll email you a link to reset it".to_string()),
                    }
                    CardBody {
                        if let Some(email) = sent_to.cloned() {
                            div { class: "space-y-4",
                                p { class: "text-sm text-gray-700",
                                    "If an account exists for {email}, a reset link is on its way."
                                }
                                Link { to: Route::Login {}, class: "text-sm font-medium text-indigo-600 hover:underline", "Back to log in" }
                            }
                        } else {
                            if let Some(e) = error.cloned() {
                                div { class: "mb-4", ErrorBox { message: e } }
                            }
                            form { class: "space-y-5", novalidate: true, onsubmit: on_submit,
                                TextInput {
                                    name: "email",
                                    label: "Email",
                                    input_type: InputType::Email,
                                    value: form.text("email"),
                                    placeholder: "you@example.com",
                                    error: form.error("email"),
                                    oninput: form.on_input("email"),
                                    onblur: form.on_blur("email"),
                                }
                                Button { r#type: "submit", class: "w-full py-2.5", loading: form.is_submitting(),
                                    "Send reset link"
                                }
                            }
                            p { class: "mt-6 text-center text-sm text-gray-500",
                                "Remembered it? "
                                Link { to: Route::Login {}, class: "font-medium text-indigo-600 hover:underline", "Log in" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ResetPassword(token: String) -> Element {
    let auth = use_auth();
    let notify = use_notifications();
    let nav = use_navigator();
    let mut error = use_signal(|| None::<String>);

    let validity = use_api::<bool>();
    let checker = validity.clone();
    let check_token = token.clone();
    use_future(move || {
        let checker = checker.clone();
        let token = check_token.clone();
        async move {
            checker
                .call(|api| async move { api.validate_reset_token(&token).await })
                .await;
        }
    });

    let form = use_form(
        ResetPasswordForm::default(),
        FormOptions::default(),
        Some(validate_reset_password),
    );

    let on_submit = {
        let token = token.clone();
        form.on_submit(move |values: ResetPasswordForm| {
            let api = auth.api();
            let notify = notify.clone();
            let token = token.clone();
            async move {
                error.set(None);
                match api.reset_password(&token, &values.password).await {
                    Ok(response) => {
                        notify.success(response.message);
                        nav.push(Route::Login {});
                    }
                    Err(e) => error.set(Some(e.user_message())),
                }
            }
        })
    };

    let check = validity.state().read_cloned();

    let body = match check.data {
        _ if check.is_pending() => rsx! { PageSpinner {} },
        Some(true) => rsx! {
            if let Some(e) = error.cloned() {
                div { class: "mb-4", ErrorBox { message: e } }
            }
            form { class: "space-y-5", novalidate: true, onsubmit: on_submit,
                TextInput {
                    name: "password",
                    label: "New password",
                    input_type: InputType::Password,
                    value: form.text("password"),
                    error: form.error("password"),
                    oninput: form.on_input("password"),
                    onblur: form.on_blur("password"),
                }
                TextInput {
                    name: "confirm_password",
                    label: "Confirm new password",
                    input_type: InputType::Password,
                    value: form.text("confirm_password"),
                    error: form.error("confirm_password"),
                    oninput: form.on_input("confirm_password"),
                    onblur: form.on_blur("confirm_password"),
                }
                Button { r#type: "submit", class: "w-full py-2.5", loading: form.is_submitting(),
                    "Reset password"
                }
            }
        },
        _ => rsx! {
            div { class: "space-y-4",
                ErrorBox {
                    message: check
                        .error
                        .unwrap_or_else(|| "This reset link is invalid or has expired.".to_string()),
                }
                Link { to: Route::ForgotPassword {}, class: "text-sm font-medium text-indigo-600 hover:underline",
                    "Request a new link"
                }
            }
        },
    };

    rsx! {
        div { class: "flex justify-center py-8",
            div { class: "w-full max-w-md",
                Card {
                    CardHeader { title: "Choose a new password".to_string() }
                    CardBody { {body} }
                }
            }
        }
    }
}
