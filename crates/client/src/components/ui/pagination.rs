use dioxus::prelude::*;

/// Previous/next pager. The backend does not report a total, so `has_next`
/// is decided by the caller (a full page means there may be more).
#[component]
pub fn Pagination(page: u32, has_next: bool, on_change: EventHandler<u32>) -> Element {
    let has_prev = page > 1;
    let link = "px-3 py-1.5 rounded-md text-sm font-medium border border-gray-300 disabled:opacity-40 disabled:cursor-not-allowed hover:bg-gray-50";

    rsx! {
        nav { class: "flex items-center justify-center gap-3 mt-8", aria_label: "Pagination",
            button {
                class: link,
                r#type: "button",
                disabled: !has_prev,
                onclick: move |_| {
                    if has_prev {
                        on_change.call(page - 1);
                    }
                },
                "Previous"
            }
            span { class: "text-sm text-gray-600", "Page {page}" }
            button {
                class: link,
                r#type: "button",
                disabled: !has_next,
                onclick: move |_| {
                    if has_next {
                        on_change.call(page + 1);
                    }
                },
                "Next"
            }
        }
    }
}
