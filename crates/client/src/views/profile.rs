//! Signed-in user's page: profile details, password, registrations.

use dioxus::prelude::*;
use eventnow_core::{FormOptions, StateCell};
use eventnow_shared::formatting::{format_date, format_range, initials};
use eventnow_shared::forms::{
    validate_change_password, validate_profile, ChangePasswordForm, ProfileForm,
};
use eventnow_shared::{Registration, RegistrationStatus, UserProfile};

use crate::auth_session::use_auth;
use crate::components::ui::{
    Badge, BadgeTone, Button, ButtonVariant, Card, CardBody, CardHeader, ErrorBox, InputType,
    PageSpinner, TextArea, TextInput,
};
use crate::hooks::{use_api, use_form};
use crate::notifications::use_notifications;
use crate::Route;

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    // RequireAuth only renders this page with a user present.
    let Some(user) = auth.user() else {
        return rsx! { PageSpinner {} };
    };

    rsx! {
        div { class: "grid gap-8 lg:grid-cols-3",
            div { class: "space-y-6",
                ProfileSummary { user: user.clone() }
                ChangePassword {}
            }
            div { class: "lg:col-span-2 space-y-6",
                EditProfile { user }
                MyRegistrations {}
            }
        }
    }
}

#[component]
fn ProfileSummary(user: UserProfile) -> Element {
    let badge = initials(user.display_name(), 2);
    rsx! {
        Card { class: "p-6 text-center space-y-3",
            div { class: "mx-auto h-20 w-20 rounded-full bg-indigo-100 text-indigo-700 text-2xl font-bold flex items-center justify-center",
                "{badge}"
            }
            h2 { class: "text-xl font-semibold", "{user.display_name()}" }
            p { class: "text-sm text-gray-500", "{user.email}" }
            div { class: "flex justify-center gap-2",
                Badge { tone: BadgeTone::Info, "{user.role.label()}" }
                if user.email_verified {
                    Badge { tone: BadgeTone::Success, "Verified" }
                } else {
                    Badge { tone: BadgeTone::Warning, "Unverified" }
                }
            }
            if !user.email_verified {
                Link { to: Route::ResendVerification {}, class: "block text-sm text-indigo-600 hover:underline",
                    "Resend verification email"
                }
            }
            if let Some(joined) = user.created_at {
                p { class: "text-xs text-gray-400", "Member since {format_date(&joined)}" }
            }
        }
    }
}

#[component]
fn EditProfile(user: UserProfile) -> Element {
    let auth = use_auth();
    let notify = use_notifications();
    let mut error = use_signal(|| None::<String>);

    let form = use_form(
        ProfileForm::from_user(&user),
        FormOptions::default(),
        Some(validate_profile),
    );

    let on_submit = form.on_submit(move |values: ProfileForm| {
        let auth = auth.clone();
        let notify = notify.clone();
        async move {
            error.set(None);
            match auth.update_profile(&values.to_request()).await {
                Ok(_) => notify.success("Profile updated."),
                Err(failure) => error.set(Some(failure.message)),
            }
        }
    });

    let reset = form.clone();

    rsx! {
        Card {
            CardHeader { title: "Profile".to_string() }
            CardBody {
                if let Some(e) = error.cloned() {
                    div { class: "mb-4", ErrorBox { message: e } }
                }
                form { class: "space-y-5", novalidate: true, onsubmit: on_submit,
                    TextInput {
                        name: "full_name",
                        label: "Full name",
                        value: form.text("full_name"),
                        error: form.error("full_name"),
                        oninput: form.on_input("full_name"),
                        onblur: form.on_blur("full_name"),
                    }
                    TextInput {
                        name: "email",
                        label: "Email",
                        input_type: InputType::Email,
                        value: form.text("email"),
                        error: form.error("email"),
                        oninput: form.on_input("email"),
                        onblur: form.on_blur("email"),
                    }
                    TextArea {
                        name: "bio",
                        label: "Bio",
                        value: form.text("bio"),
                        placeholder: "Tell others a little about yourself",
                        error: form.error("bio"),
                        oninput: form.on_input("bio"),
                        onblur: form.on_blur("bio"),
                    }
                    div { class: "flex justify-end gap-3",
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_: MouseEvent| reset.reset(),
                            "Discard changes"
                        }
                        Button { r#type: "submit", loading: form.is_submitting(), "Save profile" }
                    }
                }
            }
        }
    }
}

#[component]
fn ChangePassword() -> Element {
    let auth = use_auth();
    let notify = use_notifications();
    let mut error = use_signal(|| None::<String>);

    let form = use_form(
        ChangePasswordForm::default(),
        FormOptions::default(),
        Some(validate_change_password),
    );

    let on_submit = {
        let handle = form.clone();
        form.on_submit(move |values: ChangePasswordForm| {
            let auth = auth.clone();
            let notify = notify.clone();
            let form = handle.clone();
            async move {
                error.set(None);
                match auth.change_password(&values.to_request()).await {
                    Ok(()) => {
                        form.reset();
                        notify.success("Password changed.");
                    }
                    Err(failure) => error.set(Some(failure.message)),
                }
            }
        })
    };

    rsx! {
        Card {
            CardHeader { title: "Change password".to_string() }
            CardBody {
                if let Some(e) = error.cloned() {
                    div { class: "mb-4", ErrorBox { message: e } }
                }
                form { class: "space-y-4", novalidate: true, onsubmit: on_submit,
                    TextInput {
                        name: "current_password",
                        label: "Current password",
                        input_type: InputType::Password,
                        value: form.text("current_password"),
                        error: form.error("current_password"),
                        oninput: form.on_input("current_password"),
                        onblur: form.on_blur("current_password"),
                    }
                    TextInput {
                        name: "new_password",
                        label: "New password",
                        input_type: InputType::Password,
                        value: form.text("new_password"),
                        error: form.error("new_password"),
                        oninput: form.on_input("new_password"),
                        onblur: form.on_blur("new_password"),
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
                    Button { r#type: "submit", class: "w-full", loading: form.is_submitting(), "Update password" }
                }
            }
        }
    }
}

#[component]
fn MyRegistrations() -> Element {
    let registrations = use_api::<Vec<Registration>>();
    let loader = registrations.clone();
    use_future(move || {
        let loader = loader.clone();
        async move {
            loader.call(|api| async move { api.my_registrations().await }).await;
        }
    });

    let state = registrations.state().read_cloned();

    rsx! {
        Card {
            CardHeader { title: "My registrations".to_string() }
            CardBody {
                if let Some(e) = state.error.clone() {
                    div { class: "mb-4", ErrorBox { message: e } }
                }
                match state.data {
                    None => rsx! { PageSpinner {} },
                    Some(list) if list.is_empty() => rsx! {
                        p { class: "text-sm text-gray-500",
                            "You haven't registered for any events yet. "
                            Link { to: Route::Events {}, class: "text-indigo-600 hover:underline", "Browse events" }
                        }
                    },
                    Some(list) => rsx! {
                        ul { class: "divide-y divide-gray-100",
                            for registration in list {
                                RegistrationRow {
                                    key: "{registration.id}",
                                    registration,
                                    on_cancelled: {
                                        let registrations = registrations.clone();
                                        move |id: i64| {
                                            registrations.state().with_mut(|s| {
                                                if let Some(rows) = s.data.as_mut() {
                                                    for row in rows.iter_mut().filter(|r| r.id == id) {
                                                        row.status = RegistrationStatus::Cancelled;
                                                    }
                                                }
                                            });
                                        }
                                    },
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

fn status_tone(status: RegistrationStatus) -> BadgeTone {
    match status {
        RegistrationStatus::Pending => BadgeTone::Warning,
        RegistrationStatus::Confirmed => BadgeTone::Success,
        RegistrationStatus::Cancelled => BadgeTone::Danger,
        RegistrationStatus::Attended => BadgeTone::Info,
    }
}

#[component]
fn RegistrationRow(registration: Registration, on_cancelled: EventHandler<i64>) -> Element {
    let auth = use_auth();
    let notify = use_notifications();
    let mut busy = use_signal(|| false);
    let id = registration.id;
    let cancellable = matches!(
        registration.status,
        RegistrationStatus::Pending | RegistrationStatus::Confirmed
    );

    rsx! {
        li { class: "py-3 flex items-center justify-between gap-4",
            div { class: "min-w-0",
                match &registration.event {
                    Some(event) => rsx! {
                        Link {
                            to: Route::EventDetail { id: event.id },
                            class: "font-medium text-gray-900 hover:text-indigo-600 truncate block",
                            "{event.title}"
                        }
                        p { class: "text-xs text-gray-500", "{format_range(&event.start_datetime, &event.end_datetime)}" }
                    },
                    None => rsx! {
                        Link {
                            to: Route::EventDetail { id: registration.event_id },
                            class: "font-medium text-gray-900 hover:text-indigo-600",
                            "Event #{registration.event_id}"
                        }
                    },
                }
            }
            div { class: "flex items-center gap-3 shrink-0",
                Badge { tone: status_tone(registration.status), "{registration.status.label()}" }
                if cancellable {
                    Button {
                        variant: ButtonVariant::Ghost,
                        loading: busy(),
                        onclick: move |_: MouseEvent| {
                            let api = auth.api();
                            let notify = notify.clone();
                            busy.set(true);
                            spawn(async move {
                                match api.cancel_registration(id).await {
                                    Ok(()) => {
                                        notify.info("Registration cancelled.");
                                        on_cancelled.call(id);
                                    }
                                    Err(e) => notify.error(e.user_message()),
                                }
                                busy.set(false);
                            });
                        },
                        "Cancel"
                    }
                }
            }
        }
    }
}
