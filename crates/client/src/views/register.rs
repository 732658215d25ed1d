use dioxus::prelude::*;
use eventnow_core::FormOptions;
use eventnow_shared::forms::{validate_register, RegisterForm};

use crate::auth_session::use_auth;
use crate::components::ui::{
    Button, ButtonVariant, Card, CardBody, CardHeader, ErrorBox, InputType, TextInput,
};
use crate::hooks::use_form;
use crate::notifications::use_notifications;
use crate::Route;

/// Sign-up page. Registering does not sign the user in; they land on the
/// login page and are asked to verify their email first.
#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let notify = use_notifications();
    let nav = use_navigator();
    let mut error = use_signal(|| None::<String>);

    let form = use_form(
        RegisterForm::default(),
        FormOptions::default(),
        Some(validate_register),
    );

    let on_submit = form.on_submit(move |values: RegisterForm| {
        let auth = auth.clone();
        let notify = notify.clone();
        async move {
            error.set(None);
            match auth.register(&values.to_request()).await {
                Ok(()) => {
                    notify.success("Account created. Check your inbox to verify your email, then log in.");
                    nav.push(Route::Login {});
                }
                Err(failure) => error.set(Some(failure.message)),
            }
        }
    });

    rsx! {
        div { class: "flex justify-center py-8",
            div { class: "w-full max-w-md",
                Card {
                    CardHeader {
                        title: "Create an account".to_string(),
                        subtitle: Some("Join to register for events and leave comments".to_string()),
                    }
                    CardBody {
                        if let Some(e) = error.cloned() {
                            div { class: "mb-4", ErrorBox { message: e } }
                        }

                        form { class: "space-y-5", novalidate: true, onsubmit: on_submit,
                            TextInput {
                                name: "full_name",
                                label: "Full name",
                                value: form.text("full_name"),
                                placeholder: "Ada Lovelace",
                                error: form.error("full_name"),
                                oninput: form.on_input("full_name"),
                                onblur: form.on_blur("full_name"),
                            }
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
                            TextInput {
                                name: "password",
                                label: "Password",
                                input_type: InputType::Password,
                                value: form.text("password"),
                                error: form.error("password"),
                                oninput: form.on_input("password"),
                                onblur: form.on_blur("password"),
                            }
                            TextInput {
                                name: "confirm_password",
                                label: "Confirm password",
                                input_type: InputType::Password,
                                value: form.text("confirm_password"),
                                error: form.error("confirm_password"),
                                oninput: form.on_input("confirm_password"),
                                onblur: form.on_blur("confirm_password"),
                            }
                            Button {
                                r#type: "submit",
                                variant: ButtonVariant::Primary,
                                class: "w-full py-2.5",
                                loading: form.is_submitting(),
                                if form.is_submitting() {
                                    "Creating…"
                                } else {
                                    "Create account"
                                }
                            }
                        }

                        div { class: "mt-6 text-center",
                            p { class: "text-sm text-gray-500",
                                "Already have an account? "
                                Link {
                                    class: "text-indigo-600 hover:text-indigo-500 font-medium",
                                    to: Route::Login {},
                                    "Sign in"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
