//! Small status widgets: badges, spinners, error text.

use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeTone {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl BadgeTone {
    fn class(self) -> &'static str {
        match self {
            Self::Neutral => "bg-gray-100 text-gray-700",
            Self::Info => "bg-indigo-100 text-indigo-700",
            Self::Success => "bg-green-100 text-green-700",
            Self::Warning => "bg-yellow-100 text-yellow-800",
            Self::Danger => "bg-red-100 text-red-700",
        }
    }
}

#[component]
pub fn Badge(tone: Option<BadgeTone>, children: Element) -> Element {
    let tone = tone.unwrap_or_default().class();
    rsx! {
        span { class: "inline-flex items-center rounded-full px-2.5 py-0.5 text-xs font-medium {tone}",
            {children}
        }
    }
}

#[component]
pub fn Spinner(small: Option<bool>) -> Element {
    let size = if small.unwrap_or(false) { "h-4 w-4" } else { "h-8 w-8" };
    rsx! {
        span {
            class: "inline-block {size} animate-spin rounded-full border-2 border-current border-t-transparent",
            role: "status",
            aria_label: "Loading",
        }
    }
}

/// Full-width loading placeholder for pages waiting on a request.
#[component]
pub fn PageSpinner() -> Element {
    rsx! {
        div { class: "flex justify-center py-16 text-indigo-600", Spinner {} }
    }
}

/// Inline validation message under a field. Renders nothing without a message.
#[component]
pub fn FieldError(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "text-xs text-red-600", role: "alert", "{message}" }
        }
    }
}

/// Boxed error for request or submit failures.
#[component]
pub fn ErrorBox(message: String) -> Element {
    rsx! {
        div { class: "p-3 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm", role: "alert",
            "{message}"
        }
    }
}
