use dioxus::prelude::*;
use eventnow_core::FormOptions;
use eventnow_shared::forms::{validate_login, LoginForm};

use crate::auth_session::use_auth;
use crate::components::ui::{
    Button, ButtonVariant, Card, CardBody, CardHeader, Checkbox, ErrorBox, InputType, TextInput,
};
use crate::hooks::use_form;
use crate::notifications::use_notifications;
use crate::Route;

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let notify = use_notifications();
    let nav = use_navigator();
    let mut error = use_signal(|| None::<String>);

    // Already signed in: nothing to do here.
    let state = auth.state;
    use_effect(move || {
        let session = state.read();
        if !session.loading && session.is_authenticated() {
            nav.replace(Route::Home {});
        }
    });

    let form = use_form(LoginForm::default(), FormOptions::default(), Some(validate_login));

    let on_submit = {
        let auth = auth.clone();
        form.on_submit(move |values: LoginForm| {
            let auth = auth.clone();
            let notify = notify.clone();
            async move {
                error.set(None);
                match auth
                    .login(&values.email, &values.password, values.remember_me)
                    .await
                {
                    Ok(user) => {
                        notify.success(format!("Welcome back, {}!", user.display_name()));
                        nav.push(Route::Home {});
                    }
                    Err(failure) => error.set(Some(failure.message)),
                }
            }
        })
    };

    rsx! {
        div { class: "flex justify-center py-8",
            div { class: "w-full max-w-md",
                Card {
                    CardHeader {
                        title: "Welcome back".to_string(),
                        subtitle: Some("Log in to register for events".to_string()),
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
                                placeholder: "••••••••",
                                error: form.error("password"),
                                oninput: form.on_input("password"),
                                onblur: form.on_blur("password"),
                            }
                            div { class: "flex items-center justify-between",
                                Checkbox {
                                    name: "remember_me",
                                    label: "Remember me",
                                    checked: form.checked("remember_me"),
                                    onchange: form.on_check("remember_me"),
                                }
                                Link {
                                    to: Route::ForgotPassword {},
                                    class: "text-sm text-indigo-600 hover:text-indigo-500",
                                    "Forgot password?"
                                }
                            }
                            Button {
                                r#type: "submit",
                                variant: ButtonVariant::Primary,
                                class: "w-full py-2.5",
                                loading: form.is_submitting(),
                                if form.is_submitting() {
                                    "Logging in…"
                                } else {
                                    "Log in"
                                }
                            }
                        }

                        div { class: "mt-6 text-center",
                            p { class: "text-sm text-gray-500",
                                "Don't have an account? "
                                Link {
                                    class: "text-indigo-600 hover:text-indigo-500 font-medium",
                                    to: Route::Register {},
                                    "Sign up"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
