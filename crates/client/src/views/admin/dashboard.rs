use dioxus::prelude::*;
use eventnow_shared::formatting::title_case;
use eventnow_shared::AdminStats;

use crate::components::ui::{Card, ErrorBox, PageSpinner};
use crate::hooks::use_api;
use crate::Route;

#[component]
pub fn AdminDashboard() -> Element {
    let stats = use_api::<AdminStats>();
    let loader = stats.clone();
    use_future(move || {
        let loader = loader.clone();
        async move {
            loader.call(|api| async move { api.admin_stats().await }).await;
        }
    });

    let state = stats.state().read_cloned();
    let Some(stats) = state.data else {
        return match state.error {
            Some(error) => rsx! { ErrorBox { message: error } },
            None => rsx! { PageSpinner {} },
        };
    };

    let tiles = [
        ("Total events", stats.total_events),
        ("Upcoming events", stats.upcoming_events),
        ("Users", stats.total_users),
        ("Registrations", stats.total_registrations),
    ];
    let busiest = stats
        .events_by_category
        .iter()
        .map(|c| c.count)
        .max()
        .unwrap_or(0)
        .max(1);

    rsx! {
        div { class: "flex items-center justify-between",
            h1 { class: "text-3xl font-bold", "Dashboard" }
            Link {
                to: Route::AdminEventCreate {},
                class: "px-4 py-2 rounded-lg bg-indigo-600 text-white text-sm font-semibold hover:bg-indigo-500",
                "New event"
            }
        }

        div { class: "mt-6 grid gap-4 sm:grid-cols-2 lg:grid-cols-4",
            for (label, value) in tiles {
                Card { key: "{label}", class: "p-5",
                    p { class: "text-sm text-gray-500", "{label}" }
                    p { class: "mt-1 text-3xl font-bold text-gray-900", "{value}" }
                }
            }
        }

        div { class: "mt-8 grid gap-6 lg:grid-cols-2",
            Card { class: "p-5",
                h2 { class: "text-lg font-semibold mb-4", "Events by category" }
                if stats.events_by_category.is_empty() {
                    p { class: "text-sm text-gray-500", "No events yet." }
                }
                ul { class: "space-y-3",
                    for row in stats.events_by_category.iter() {
                        li { key: "{row.name}",
                            div { class: "flex justify-between text-sm",
                                span { "{title_case(&row.name)}" }
                                span { class: "text-gray-500", "{row.count}" }
                            }
                            div { class: "mt-1 h-2 rounded bg-gray-100",
                                div {
                                    class: "h-2 rounded bg-indigo-500",
                                    style: "width: {row.count * 100 / busiest}%",
                                }
                            }
                        }
                    }
                }
            }
            Card { class: "p-5",
                h2 { class: "text-lg font-semibold mb-4", "Registrations by status" }
                if stats.registrations_by_status.is_empty() {
                    p { class: "text-sm text-gray-500", "No registrations yet." }
                }
                ul { class: "divide-y divide-gray-100",
                    for row in stats.registrations_by_status.iter() {
                        li { key: "{row.status}", class: "py-2 flex justify-between text-sm",
                            span { "{title_case(&row.status)}" }
                            span { class: "font-medium", "{row.count}" }
                        }
                    }
                }
            }
        }
    }
}
