use chrono::Local;
use dioxus::prelude::*;
use eventnow_core::services::EventQuery;
use eventnow_shared::formatting::format_datetime;
use eventnow_shared::Event;

use crate::components::ui::{Badge, Button, ButtonVariant, ErrorBox, Modal, PageSpinner, Pagination};
use crate::components::status_tone;
use crate::hooks::use_api;
use crate::notifications::use_notifications;
use crate::Route;

/// Every event, past ones included, with edit and delete actions.
#[component]
pub fn AdminEvents() -> Element {
    let notify = use_notifications();
    let mut page = use_signal(|| 1u32);
    let mut pending_delete = use_signal(|| None::<Event>);
    let mut deleting = use_signal(|| false);

    let events = use_api::<Vec<Event>>();
    let loader = events.clone();
    use_effect(move || {
        let query = EventQuery::default().including_past().with_page(page());
        let loader = loader.clone();
        spawn(async move {
            loader
                .call(|api| async move { api.list_events(&query).await })
                .await;
        });
    });

    let confirm_delete = {
        let events = events.clone();
        move |_: MouseEvent| {
            let Some(event) = pending_delete() else {
                return;
            };
            let events = events.clone();
            let notify = notify.clone();
            deleting.set(true);
            spawn(async move {
                let id = event.id;
                let query = EventQuery::default().including_past().with_page(*page.peek());
                // Delete and reload through the list request so the table refreshes in one step.
                let outcome = events
                    .call(|api| async move {
                        api.delete_event(id).await?;
                        api.list_events(&query).await
                    })
                    .await;
                if outcome.is_success() {
                    notify.success(format!("Deleted \"{}\".", event.title));
                } else {
                    notify.error("Could not delete the event.");
                }
                deleting.set(false);
                pending_delete.set(None);
            });
        }
    };

    let state = events.state().read_cloned();
    let limit = EventQuery::default().limit as usize;
    let has_next = state.data.as_ref().is_some_and(|rows| rows.len() >= limit);
    let now = Local::now().naive_local();

    rsx! {
        div { class: "flex items-center justify-between mb-6",
            h1 { class: "text-3xl font-bold", "Manage events" }
            Link {
                to: Route::AdminEventCreate {},
                class: "px-4 py-2 rounded-lg bg-indigo-600 text-white text-sm font-semibold hover:bg-indigo-500",
                "New event"
            }
        }

        if let Some(error) = state.error.clone() {
            div { class: "mb-4", ErrorBox { message: error } }
        }

        match state.data {
            None => rsx! { PageSpinner {} },
            Some(rows) if rows.is_empty() => rsx! {
                p { class: "text-gray-500 text-center py-12", "No events yet." }
            },
            Some(rows) => rsx! {
                div { class: "overflow-x-auto rounded-xl border border-gray-200 bg-white",
                    table { class: "min-w-full divide-y divide-gray-200 text-sm",
                        thead { class: "bg-gray-50 text-left text-gray-500",
                            tr {
                                th { class: "px-4 py-3 font-medium", "Title" }
                                th { class: "px-4 py-3 font-medium", "Starts" }
                                th { class: "px-4 py-3 font-medium", "Status" }
                                th { class: "px-4 py-3" }
                            }
                        }
                        tbody { class: "divide-y divide-gray-100",
                            for event in rows {
                                tr { key: "{event.id}",
                                    td { class: "px-4 py-3 font-medium text-gray-900",
                                        Link { to: Route::EventDetail { id: event.id }, class: "hover:text-indigo-600", "{event.title}" }
                                    }
                                    td { class: "px-4 py-3 text-gray-600", "{format_datetime(&event.start_datetime)}" }
                                    td { class: "px-4 py-3",
                                        Badge { tone: status_tone(event.status(now)), "{event.status(now).label()}" }
                                    }
                                    td { class: "px-4 py-3 text-right space-x-3 whitespace-nowrap",
                                        Link {
                                            to: Route::AdminEventEdit { id: event.id },
                                            class: "text-indigo-600 hover:underline",
                                            "Edit"
                                        }
                                        button {
                                            class: "text-red-600 hover:underline",
                                            r#type: "button",
                                            onclick: {
                                                let event = event.clone();
                                                move |_| pending_delete.set(Some(event.clone()))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                Pagination {
                    page: page(),
                    has_next,
                    on_change: move |next: u32| page.set(next),
                }
            },
        }

        if let Some(event) = pending_delete() {
            Modal {
                title: "Delete event?".to_string(),
                subtitle: Some("This cannot be undone.".to_string()),
                on_close: move |_| {
                    if !deleting() {
                        pending_delete.set(None);
                    }
                },
                footer: rsx! {
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: deleting(),
                        onclick: move |_: MouseEvent| pending_delete.set(None),
                        "Keep it"
                    }
                    Button {
                        variant: ButtonVariant::Danger,
                        loading: deleting(),
                        onclick: confirm_delete,
                        "Delete"
                    }
                },
                p { class: "text-sm text-gray-700",
                    "\"{event.title}\" and all of its registrations and comments will be removed."
                }
            }
        }
    }
}
