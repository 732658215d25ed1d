//! Single event page: details, countdown, registration, comments.

use chrono::Local;
use dioxus::prelude::*;
use eventnow_core::services::DEFAULT_RECOMMENDATION_LIMIT;
use eventnow_core::{FormOptions, StateCell};
use eventnow_shared::formatting::{format_datetime, format_range, format_relative, pluralize};
use eventnow_shared::forms::{validate_comment, CommentForm};
use eventnow_shared::{Comment, Event, EventDetail as Detail, EventStatus};

use crate::auth_session::use_auth;
use crate::components::ui::{
    Badge, BadgeTone, Button, ButtonVariant, Card, ErrorBox, PageSpinner, Select, TextArea,
};
use crate::components::{category_tone, status_tone, Countdown, EventCard};
use crate::hooks::{use_api, use_form};
use crate::notifications::use_notifications;
use crate::Route;

#[component]
pub fn EventDetail(id: i64) -> Element {
    // Track the route param so navigating between events reloads.
    let mut current_id = use_signal(|| id);
    if *current_id.peek() != id {
        current_id.set(id);
    }

    let detail = use_api::<Detail>();
    let loader = detail.clone();
    use_effect(move || {
        let id = current_id();
        let loader = loader.clone();
        spawn(async move {
            loader.call(|api| async move { api.get_event(id).await }).await;
        });
    });

    let reload = {
        let loader = detail.clone();
        move |_: ()| {
            let loader = loader.clone();
            let id = *current_id.peek();
            spawn(async move {
                loader.call(|api| async move { api.get_event(id).await }).await;
            });
        }
    };

    let state = detail.state().read_cloned();
    let Some(detail) = state.data else {
        return match state.error {
            Some(error) => rsx! {
                ErrorBox { message: error }
                Link { to: Route::Events {}, class: "mt-4 inline-block text-indigo-600 hover:underline", "← Back to events" }
            },
            None => rsx! { PageSpinner {} },
        };
    };

    let event = detail.event.clone();
    let now = Local::now().naive_local();
    let status = event.status(now);
    let category = event.category();
    let category_label = category
        .map(|c| c.label().to_string())
        .unwrap_or_else(|| event.category.clone());

    rsx! {
        Link { to: Route::Events {}, class: "text-sm text-indigo-600 hover:underline", "← Back to events" }

        if let Some(error) = state.error {
            div { class: "mt-4", ErrorBox { message: error } }
        }

        div { class: "mt-4 grid gap-8 lg:grid-cols-3",
            article { class: "lg:col-span-2 space-y-6",
                if let Some(image) = &event.image_url {
                    img { class: "w-full max-h-96 object-cover rounded-xl", src: "{image}", alt: "{event.title}" }
                }
                div { class: "flex flex-wrap gap-2",
                    if !category_label.is_empty() {
                        Badge { tone: category_tone(category), "{category_label}" }
                    }
                    Badge { tone: status_tone(status), "{status.label()}" }
                }
                h1 { class: "text-3xl font-bold text-gray-900", "{event.title}" }
                div { class: "space-y-1 text-gray-600",
                    p { "🗓 {format_range(&event.start_datetime, &event.end_datetime)}" }
                    if !event.location.is_empty() {
                        p { "📍 {event.location}" }
                    }
                    if let Some(deadline) = event.registration_deadline {
                        p { "Registration closes {format_datetime(&deadline)}" }
                    }
                }
                div { class: "prose max-w-none whitespace-pre-line text-gray-800", "{event.description}" }

                CommentSection { event_id: event.id }
            }

            aside { class: "space-y-6",
                if status == EventStatus::Upcoming {
                    Card { class: "p-5 space-y-3",
                        h2 { class: "text-sm font-semibold uppercase tracking-wide text-gray-500", "Starts in" }
                        Countdown { key: "{event.id}", target: event.start_datetime, ended: "Starting now" }
                    }
                }
                RegistrationPanel { detail: detail.clone(), on_changed: reload }
                SimilarEvents { key: "{event.id}", event_id: event.id }
            }
        }
    }
}

#[component]
fn RegistrationPanel(detail: Detail, on_changed: EventHandler<()>) -> Element {
    let auth = use_auth();
    let notify = use_notifications();
    let mut busy = use_signal(|| false);

    let now = Local::now().naive_local();
    let event = &detail.event;
    let open = event.registration_open(now);
    let full = detail.seats_left() == Some(0);
    let event_id = event.id;

    let seats = match (event.max_participants, detail.seats_left()) {
        (Some(cap), Some(left)) => format!("{left} of {cap} seats left"),
        _ => pluralize(u64::from(detail.registrations_count), "attendee", None),
    };

    let register = {
        let auth = auth.clone();
        let notify = notify.clone();
        move |_: MouseEvent| {
            let api = auth.api();
            let notify = notify.clone();
            busy.set(true);
            spawn(async move {
                match api.register_for_event(event_id).await {
                    Ok(_) => {
                        notify.success("You're registered. See you there!");
                        on_changed.call(());
                    }
                    Err(e) => notify.error(e.user_message()),
                }
                busy.set(false);
            });
        }
    };

    let cancel = {
        let auth = auth.clone();
        let notify = notify.clone();
        move |_: MouseEvent| {
            let api = auth.api();
            let notify = notify.clone();
            busy.set(true);
            spawn(async move {
                match api.cancel_registration_for_event(event_id).await {
                    Ok(true) => {
                        notify.info("Your registration was cancelled.");
                        on_changed.call(());
                    }
                    Ok(false) => notify.warning("No active registration was found for this event."),
                    Err(e) => notify.error(e.user_message()),
                }
                busy.set(false);
            });
        }
    };

    rsx! {
        Card { class: "p-5 space-y-4",
            p { class: "text-sm text-gray-600", "{seats}" }
            if !auth.is_authenticated() {
                p { class: "text-sm text-gray-600",
                    Link { to: Route::Login {}, class: "text-indigo-600 font-medium hover:underline", "Log in" }
                    " to register for this event."
                }
            } else if detail.is_registered {
                Badge { tone: BadgeTone::Success, "You're registered" }
                Button {
                    variant: ButtonVariant::Secondary,
                    class: "w-full",
                    loading: busy(),
                    onclick: cancel,
                    "Cancel registration"
                }
            } else if !open {
                p { class: "text-sm text-gray-500", "Registration is closed." }
            } else if full {
                p { class: "text-sm text-gray-500", "This event is full." }
            } else {
                Button { class: "w-full", loading: busy(), onclick: register, "Register" }
            }
            if let Some(link) = &event.registration_link {
                a {
                    class: "block text-center text-sm text-indigo-600 hover:underline",
                    href: "{link}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "External registration page"
                }
            }
        }
    }
}

#[component]
fn CommentSection(event_id: i64) -> Element {
    let auth = use_auth();
    let notify = use_notifications();
    let comments = use_api::<Vec<Comment>>();

    let loader = comments.clone();
    use_future(move || {
        let loader = loader.clone();
        async move {
            loader
                .call(|api| async move { api.event_comments(event_id).await })
                .await;
        }
    });

    let form = use_form(CommentForm::default(), FormOptions::default(), Some(validate_comment));

    let on_submit = {
        let handle = form.clone();
        let api = auth.api();
        let comments = comments.clone();
        let notify = notify.clone();
        form.on_submit(move |values: CommentForm| {
            let form = handle.clone();
            let api = api.clone();
            let comments = comments.clone();
            let notify = notify.clone();
            async move {
                match api.add_comment(&values.to_request(event_id)).await {
                    Ok(_) => {
                        form.reset();
                        notify.success("Comment posted.");
                        comments
                            .call(|api| async move { api.event_comments(event_id).await })
                            .await;
                    }
                    Err(e) => form.set_error("content", Some(e.user_message())),
                }
            }
        })
    };

    let user = auth.user();
    let state = comments.state().read_cloned();
    let now = Local::now().naive_local();
    let ratings: Vec<(String, String)> = (1..=5)
        .rev()
        .map(|n| (n.to_string(), "★".repeat(n)))
        .collect();

    rsx! {
        section { class: "space-y-4",
            h2 { class: "text-xl font-bold", "Comments" }

            if user.is_some() {
                form { class: "space-y-3", onsubmit: on_submit,
                    TextArea {
                        name: "content",
                        value: form.text("content"),
                        placeholder: "Share your thoughts about this event",
                        rows: 3,
                        error: form.error("content"),
                        oninput: form.on_input("content"),
                        onblur: form.on_blur("content"),
                    }
                    div { class: "flex items-end gap-3",
                        div { class: "w-40",
                            Select {
                                name: "rating",
                                value: form.text("rating"),
                                options: ratings,
                                placeholder: "No rating",
                                error: form.error("rating"),
                                onchange: form.on_input("rating"),
                                onblur: form.on_blur("rating"),
                            }
                        }
                        Button { r#type: "submit", loading: form.is_submitting(), "Post comment" }
                    }
                }
            }

            if let Some(error) = state.error.clone() {
                ErrorBox { message: error }
            }
            match state.data {
                None => rsx! { PageSpinner {} },
                Some(list) if list.is_empty() => rsx! {
                    p { class: "text-sm text-gray-500", "No comments yet." }
                },
                Some(list) => rsx! {
                    ul { class: "space-y-3",
                        for comment in list {
                            CommentItem {
                                key: "{comment.id}",
                                can_delete: user.as_ref().is_some_and(|u| u.is_admin() || comment.author_id == Some(u.id)),
                                posted: comment.created_at.map(|at| format_relative(&at, &now)),
                                comment,
                                on_deleted: {
                                    let comments = comments.clone();
                                    move |id: i64| {
                                        comments.state().with_mut(|s| {
                                            if let Some(list) = s.data.as_mut() {
                                                list.retain(|c| c.id != id);
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

#[component]
fn CommentItem(
    comment: Comment,
    posted: Option<String>,
    can_delete: bool,
    on_deleted: EventHandler<i64>,
) -> Element {
    let auth = use_auth();
    let notify = use_notifications();
    let author = comment
        .author
        .as_ref()
        .and_then(|a| a.full_name.clone().or_else(|| a.email.clone()))
        .unwrap_or_else(|| "Anonymous".to_string());
    let id = comment.id;

    rsx! {
        li { class: "rounded-lg border border-gray-200 bg-white p-4",
            div { class: "flex items-center justify-between text-sm",
                span { class: "font-medium text-gray-900", "{author}" }
                div { class: "flex items-center gap-3 text-gray-500",
                    if let Some(rating) = comment.rating {
                        span { class: "text-yellow-500", aria_label: "{rating} out of 5", {"★".repeat(usize::from(rating))} }
                    }
                    if let Some(posted) = posted {
                        span { "{posted}" }
                    }
                    if can_delete {
                        button {
                            class: "text-red-500 hover:text-red-700",
                            r#type: "button",
                            onclick: move |_| {
                                let api = auth.api();
                                let notify = notify.clone();
                                spawn(async move {
                                    match api.delete_comment(id).await {
                                        Ok(()) => on_deleted.call(id),
                                        Err(e) => notify.error(e.user_message()),
                                    }
                                });
                            },
                            "Delete"
                        }
                    }
                }
            }
            p { class: "mt-2 text-gray-700 whitespace-pre-line", "{comment.content}" }
        }
    }
}

#[component]
fn SimilarEvents(event_id: i64) -> Element {
    let similar = use_api::<Vec<Event>>();
    let loader = similar.clone();
    use_future(move || {
        let loader = loader.clone();
        async move {
            loader
                .call(|api| async move {
                    api.similar_events(event_id, DEFAULT_RECOMMENDATION_LIMIT).await
                })
                .await;
        }
    });

    let state = similar.state().read_cloned();
    match state.data {
        Some(events) if !events.is_empty() => rsx! {
            div { class: "space-y-3",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-gray-500", "Similar events" }
                for event in events {
                    EventCard { key: "{event.id}", event }
                }
            }
        },
        _ => rsx! {},
    }
}
