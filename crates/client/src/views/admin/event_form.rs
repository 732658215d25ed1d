use chrono::Local;
use dioxus::prelude::*;
use eventnow_core::FormOptions;
use eventnow_shared::forms::{validate_event_form, EventForm};
use eventnow_shared::{EventCategory, EventDetail, FieldErrors};

use crate::components::ui::{
    Button, ButtonVariant, Card, CardBody, CardHeader, ErrorBox, InputType, PageSpinner, Select,
    TextArea, TextInput,
};
use crate::hooks::{use_api, use_form};
use crate::notifications::use_notifications;
use crate::Route;

fn validate_new_event(values: &EventForm) -> FieldErrors {
    validate_event_form(values, Some(Local::now().naive_local()))
}

fn validate_existing_event(values: &EventForm) -> FieldErrors {
    validate_event_form(values, None)
}

#[component]
pub fn AdminEventCreate() -> Element {
    rsx! {
        EventEditor { initial: EventForm::default(), event_id: None }
    }
}

#[component]
pub fn AdminEventEdit(id: i64) -> Element {
    let detail = use_api::<EventDetail>();
    let loader = detail.clone();
    use_future(move || {
        let loader = loader.clone();
        async move {
            loader.call(|api| async move { api.get_event(id).await }).await;
        }
    });

    let state = detail.state().read_cloned();
    match state.data {
        Some(detail) => rsx! {
            EventEditor {
                key: "{id}",
                initial: EventForm::from_event(&detail.event),
                event_id: Some(id),
            }
        },
        None => match state.error {
            Some(error) => rsx! { ErrorBox { message: error } },
            None => rsx! { PageSpinner {} },
        },
    }
}

/// Create/edit form. `event_id` is `None` when creating.
#[component]
fn EventEditor(initial: EventForm, event_id: Option<i64>) -> Element {
    let notify = use_notifications();
    let nav = use_navigator();
    let api = use_context::<eventnow_core::ApiClient>();
    let mut error = use_signal(|| None::<String>);

    let validate: fn(&EventForm) -> FieldErrors = match event_id {
        Some(_) => validate_existing_event,
        None => validate_new_event,
    };
    let form = use_form(initial, FormOptions::default(), Some(validate));

    let on_submit = {
        let handle = form.clone();
        form.on_submit(move |values: EventForm| {
            let form = handle.clone();
            let api = api.clone();
            let notify = notify.clone();
            async move {
                error.set(None);
                let payload = match values.to_payload() {
                    Ok(payload) => payload,
                    Err(errors) => {
                        for (field, message) in errors.iter() {
                            form.set_error(field, Some(message.to_string()));
                        }
                        return;
                    }
                };
                let saved = match event_id {
                    Some(id) => api.update_event(id, &payload).await,
                    None => api.create_event(&payload).await,
                };
                match saved {
                    Ok(event) => {
                        notify.success(format!("Saved \"{}\".", event.title));
                        nav.push(Route::AdminEvents {});
                    }
                    Err(e) => error.set(Some(e.user_message())),
                }
            }
        })
    };

    let categories: Vec<(String, String)> = EventCategory::ALL
        .iter()
        .map(|c| (c.as_str().to_string(), c.label().to_string()))
        .collect();
    let title = if event_id.is_some() { "Edit event" } else { "New event" };

    rsx! {
        Card {
            CardHeader { title: title.to_string() }
            CardBody {
                if let Some(e) = error.cloned() {
                    div { class: "mb-4", ErrorBox { message: e } }
                }
                form { class: "space-y-5", novalidate: true, onsubmit: on_submit,
                    TextInput {
                        name: "title",
                        label: "Title",
                        value: form.text("title"),
                        error: form.error("title"),
                        oninput: form.on_input("title"),
                        onblur: form.on_blur("title"),
                    }
                    TextArea {
                        name: "description",
                        label: "Description",
                        rows: 6,
                        value: form.text("description"),
                        error: form.error("description"),
                        oninput: form.on_input("description"),
                        onblur: form.on_blur("description"),
                    }
                    div { class: "grid gap-5 sm:grid-cols-2",
                        Select {
                            name: "category",
                            label: "Category",
                            value: form.text("category"),
                            options: categories,
                            placeholder: "Choose a category",
                            error: form.error("category"),
                            onchange: form.on_input("category"),
                            onblur: form.on_blur("category"),
                        }
                        TextInput {
                            name: "location",
                            label: "Location",
                            value: form.text("location"),
                            error: form.error("location"),
                            oninput: form.on_input("location"),
                            onblur: form.on_blur("location"),
                        }
                        TextInput {
                            name: "start_datetime",
                            label: "Starts",
                            input_type: InputType::DateTime,
                            value: form.text("start_datetime"),
                            error: form.error("start_datetime"),
                            oninput: form.on_input("start_datetime"),
                            onblur: form.on_blur("start_datetime"),
                        }
                        TextInput {
                            name: "end_datetime",
                            label: "Ends",
                            input_type: InputType::DateTime,
                            value: form.text("end_datetime"),
                            error: form.error("end_datetime"),
                            oninput: form.on_input("end_datetime"),
                            onblur: form.on_blur("end_datetime"),
                        }
                        TextInput {
                            name: "registration_deadline",
                            label: "Registration deadline (optional)",
                            input_type: InputType::DateTime,
                            value: form.text("registration_deadline"),
                            error: form.error("registration_deadline"),
                            oninput: form.on_input("registration_deadline"),
                            onblur: form.on_blur("registration_deadline"),
                        }
                        TextInput {
                            name: "capacity",
                            label: "Capacity (optional)",
                            input_type: InputType::Number,
                            value: form.text("capacity"),
                            error: form.error("capacity"),
                            oninput: form.on_input("capacity"),
                            onblur: form.on_blur("capacity"),
                        }
                    }
                    TextInput {
                        name: "registration_link",
                        label: "External registration link (optional)",
                        input_type: InputType::Url,
                        value: form.text("registration_link"),
                        placeholder: "https://",
                        error: form.error("registration_link"),
                        oninput: form.on_input("registration_link"),
                        onblur: form.on_blur("registration_link"),
                    }
                    TextInput {
                        name: "image_url",
                        label: "Image URL (optional)",
                        input_type: InputType::Url,
                        value: form.text("image_url"),
                        error: form.error("image_url"),
                        oninput: form.on_input("image_url"),
                        onblur: form.on_blur("image_url"),
                    }
                    div { class: "flex justify-end gap-3",
                        Link {
                            to: Route::AdminEvents {},
                            class: "px-4 py-2 rounded-lg text-sm font-semibold text-gray-600 hover:bg-gray-100",
                            "Cancel"
                        }
                        Button {
                            r#type: "submit",
                            variant: ButtonVariant::Primary,
                            loading: form.is_submitting(),
                            if event_id.is_some() {
                                "Save changes"
                            } else {
                                "Create event"
                            }
                        }
                    }
                }
            }
        }
    }
}
