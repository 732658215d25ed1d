use chrono::NaiveDateTime;
use dioxus::prelude::*;

use crate::hooks::use_countdown;

/// "Starts in" timer for an event. Shows `ended` once the start has passed.
#[component]
pub fn Countdown(target: NaiveDateTime, ended: String) -> Element {
    let left = use_countdown(target);

    let Some(left) = left() else {
        return rsx! {
            p { class: "text-sm text-gray-500", "{ended}" }
        };
    };

    let units = [
        (left.days, "Days"),
        (left.hours, "Hours"),
        (left.minutes, "Minutes"),
        (left.seconds, "Seconds"),
    ];

    rsx! {
        div { class: "grid grid-cols-4 gap-2 text-center", aria_live: "polite",
            for (value, label) in units {
                div { key: "{label}", class: "rounded-lg bg-indigo-50 py-2",
                    div { class: "text-2xl font-bold text-indigo-700", "{value:02}" }
                    div { class: "text-xs uppercase tracking-wide text-indigo-500", "{label}" }
                }
            }
        }
    }
}
