//! Landing page and the catch-all route.

use dioxus::prelude::*;
use eventnow_core::config::APP_NAME;
use eventnow_core::services::{EventQuery, DEFAULT_RECOMMENDATION_LIMIT};
use eventnow_core::RequestState;
use eventnow_shared::Event;

use crate::auth_session::use_auth;
use crate::components::ui::{ErrorBox, PageSpinner};
use crate::components::EventCard;
use crate::hooks::use_api;
use crate::Route;

const FEATURED_COUNT: u32 = 6;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let signed_in = auth.is_authenticated();

    let upcoming = use_api::<Vec<Event>>();
    let loader = upcoming.clone();
    use_future(move || {
        let loader = loader.clone();
        async move {
            let query = EventQuery::default().with_limit(FEATURED_COUNT);
            loader
                .call(|api| async move { api.list_events(&query).await })
                .await;
        }
    });

    rsx! {
        section { class: "text-center py-12",
            h1 { class: "text-4xl font-extrabold tracking-tight text-gray-900", "Welcome to {APP_NAME}" }
            p { class: "mt-4 text-lg text-gray-600 max-w-2xl mx-auto",
                "Discover workshops, seminars, competitions and more. Register in a click and never miss what is happening on campus."
            }
            div { class: "mt-8 flex justify-center gap-3",
                Link {
                    to: Route::Events {},
                    class: "px-5 py-2.5 rounded-lg bg-indigo-600 text-white font-semibold hover:bg-indigo-500",
                    "Browse events"
                }
                if !signed_in {
                    Link {
                        to: Route::Register {},
                        class: "px-5 py-2.5 rounded-lg border border-gray-300 font-semibold text-gray-700 hover:bg-gray-100",
                        "Create an account"
                    }
                }
            }
        }

        if signed_in {
            Recommended {}
        }

        section { class: "mt-8",
            div { class: "flex items-center justify-between mb-4",
                h2 { class: "text-2xl font-bold", "Upcoming events" }
                Link { to: Route::Events {}, class: "text-sm font-medium text-indigo-600 hover:underline", "See all" }
            }
            EventGrid { state: upcoming.state().read_cloned(), empty: "No upcoming events yet." }
        }
    }
}

#[component]
fn Recommended() -> Element {
    let recommended = use_api::<Vec<Event>>();
    let loader = recommended.clone();
    use_future(move || {
        let loader = loader.clone();
        async move {
            loader
                .call(|api| async move { api.recommended_events(DEFAULT_RECOMMENDATION_LIMIT).await })
                .await;
        }
    });

    let state = recommended.state().read_cloned();
    // Recommendations are a bonus; hide the section rather than show an error.
    match state.data {
        Some(events) if !events.is_empty() => rsx! {
            section { class: "mt-8",
                h2 { class: "text-2xl font-bold mb-4", "Recommended for you" }
                div { class: "grid gap-6 sm:grid-cols-2 lg:grid-cols-3",
                    for event in events {
                        EventCard { key: "{event.id}", event }
                    }
                }
            }
        },
        _ => rsx! {},
    }
}

/// Renders a list request: spinner, error, empty message or cards.
#[component]
pub fn EventGrid(state: RequestState<Vec<Event>>, empty: String) -> Element {
    if state.is_pending() && state.data.is_none() {
        return rsx! { PageSpinner {} };
    }

    rsx! {
        if let Some(error) = state.error {
            ErrorBox { message: error }
        }
        match state.data {
            Some(events) if events.is_empty() => rsx! {
                p { class: "text-gray-500 text-center py-12", "{empty}" }
            },
            Some(events) => rsx! {
                div { class: "grid gap-6 sm:grid-cols-2 lg:grid-cols-3",
                    for event in events {
                        EventCard { key: "{event.id}", event }
                    }
                }
            },
            None => rsx! {},
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "text-center py-24",
            h1 { class: "text-6xl font-extrabold text-indigo-600", "404" }
            p { class: "mt-4 text-lg text-gray-600", "Nothing lives at /{path}." }
            Link {
                to: Route::Home {},
                class: "mt-8 inline-block px-5 py-2.5 rounded-lg bg-indigo-600 text-white font-semibold hover:bg-indigo-500",
                "Back home"
            }
        }
    }
}
