//! Public event listing with category filter and pagination.

use dioxus::prelude::*;
use eventnow_core::services::EventQuery;
use eventnow_shared::{Event, EventCategory};

use super::home::EventGrid;
use crate::components::ui::Pagination;
use crate::hooks::use_api;

#[component]
pub fn Events() -> Element {
    let mut category = use_signal(|| None::<EventCategory>);
    let mut page = use_signal(|| 1u32);
    let mut include_past = use_signal(|| false);

    let events = use_api::<Vec<Event>>();

    // Re-runs whenever a filter changes; superseded loads are dropped.
    let loader = events.clone();
    use_effect(move || {
        let mut query = EventQuery::default()
            .with_category(category())
            .with_page(page());
        if include_past() {
            query = query.including_past();
        }
        let loader = loader.clone();
        spawn(async move {
            loader
                .call(|api| async move { api.list_events(&query).await })
                .await;
        });
    });

    let state = events.state().read_cloned();
    let limit = EventQuery::default().limit as usize;
    let has_next = state.data.as_ref().is_some_and(|rows| rows.len() >= limit);

    let chip = |active: bool| {
        if active {
            "px-3 py-1.5 rounded-full text-sm font-medium bg-indigo-600 text-white"
        } else {
            "px-3 py-1.5 rounded-full text-sm font-medium bg-white border border-gray-300 text-gray-700 hover:bg-gray-100"
        }
    };

    rsx! {
        div { class: "flex flex-col gap-4 mb-8",
            h1 { class: "text-3xl font-bold", "Events" }
            div { class: "flex flex-wrap items-center gap-2",
                button {
                    class: chip(category().is_none()),
                    r#type: "button",
                    onclick: move |_| {
                        category.set(None);
                        page.set(1);
                    },
                    "All"
                }
                for option in EventCategory::ALL {
                    button {
                        key: "{option.as_str()}",
                        class: chip(category() == Some(option)),
                        r#type: "button",
                        onclick: move |_| {
                            category.set(Some(option));
                            page.set(1);
                        },
                        "{option.label()}"
                    }
                }
                label { class: "ml-auto inline-flex items-center gap-2 text-sm text-gray-600",
                    input {
                        r#type: "checkbox",
                        checked: include_past(),
                        onchange: move |evt: FormEvent| {
                            include_past.set(evt.checked());
                            page.set(1);
                        },
                    }
                    "Include past events"
                }
            }
        }

        EventGrid { state: state.clone(), empty: "No events match these filters." }

        if state.data.is_some() {
            Pagination {
                page: page(),
                has_next,
                on_change: move |next: u32| page.set(next),
            }
        }
    }
}
