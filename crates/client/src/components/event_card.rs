use chrono::Local;
use dioxus::prelude::*;
use eventnow_shared::formatting::{format_range, truncate_text};
use eventnow_shared::{Event, EventCategory, EventStatus};

use super::ui::{Badge, BadgeTone, Card};
use crate::Route;

pub fn category_tone(category: Option<EventCategory>) -> BadgeTone {
    match category {
        Some(EventCategory::Academic | EventCategory::Seminar) => BadgeTone::Info,
        Some(EventCategory::Workshop | EventCategory::Competition) => BadgeTone::Warning,
        Some(EventCategory::Culture | EventCategory::Sports) => BadgeTone::Success,
        Some(EventCategory::Other) | None => BadgeTone::Neutral,
    }
}

pub fn status_tone(status: EventStatus) -> BadgeTone {
    match status {
        EventStatus::Upcoming => BadgeTone::Info,
        EventStatus::Ongoing => BadgeTone::Success,
        EventStatus::Completed => BadgeTone::Neutral,
        EventStatus::Cancelled => BadgeTone::Danger,
    }
}

/// Summary card for event listings, linking to the detail page.
#[component]
pub fn EventCard(event: Event) -> Element {
    let category = event.category();
    let category_label = category
        .map(|c| c.label().to_string())
        .unwrap_or_else(|| event.category.clone());
    let status = event.status(Local::now().naive_local());
    let when = format_range(&event.start_datetime, &event.end_datetime);
    let summary = truncate_text(&event.description, 140);

    rsx! {
        Link { to: Route::EventDetail { id: event.id }, class: "block group",
            Card { class: "h-full overflow-hidden transition-shadow group-hover:shadow-md",
                if let Some(image) = &event.image_url {
                    img { class: "h-40 w-full object-cover", src: "{image}", alt: "{event.title}" }
                }
                div { class: "p-5 space-y-3",
                    div { class: "flex flex-wrap gap-2",
                        if !category_label.is_empty() {
                            Badge { tone: category_tone(category), "{category_label}" }
                        }
                        Badge { tone: status_tone(status), "{status.label()}" }
                    }
                    h3 { class: "text-lg font-semibold text-gray-900 group-hover:text-indigo-600", "{event.title}" }
                    p { class: "text-sm text-gray-500", "{when}" }
                    if !event.location.is_empty() {
                        p { class: "text-sm text-gray-500", "📍 {event.location}" }
                    }
                    p { class: "text-sm text-gray-600", "{summary}" }
                }
            }
        }
    }
}
