//! Toast notifications shared by every page.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use dioxus::prelude::*;
use eventnow_core::notifications::{Notification, NotificationKind, Notifications};
use futures_util::StreamExt;

use crate::hooks::SignalCell;

#[derive(Clone)]
pub struct NotificationContext {
    queue: Notifications<SignalCell<Vec<Notification>>>,
    timers: Coroutine<Notification>,
    tasks: Rc<RefCell<HashMap<u64, Task>>>,
}

impl NotificationContext {
    fn show(&self, notification: Notification) {
        if notification.duration_ms > 0 {
            self.timers.send(notification);
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(self.queue.success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(self.queue.error(message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(self.queue.info(message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(self.queue.warning(message));
    }

    /// Remove a toast now and stop its timer.
    pub fn dismiss(&self, id: u64) {
        if let Some(task) = self.tasks.borrow_mut().remove(&id) {
            task.cancel();
        }
        self.queue.dismiss(id);
    }
}

pub fn use_notifications() -> NotificationContext {
    use_context::<NotificationContext>()
}

/// Provides [`NotificationContext`] and renders the toast stack. Timers run
/// in this component's scope, so they outlive the page that raised them and
/// stop when the provider unmounts.
#[component]
pub fn NotificationProvider(children: Element) -> Element {
    let list = use_signal(Vec::<Notification>::new);
    let queue = use_hook(|| Notifications::new(SignalCell(list)));
    let tasks = use_hook(|| Rc::new(RefCell::new(HashMap::<u64, Task>::new())));

    let timers = {
        let queue = queue.clone();
        let tasks = tasks.clone();
        use_coroutine(move |mut rx: UnboundedReceiver<Notification>| {
            let queue = queue.clone();
            let tasks = tasks.clone();
            async move {
                while let Some(notification) = rx.next().await {
                    let id = notification.id;
                    let timer_queue = queue.clone();
                    let timer_tasks = tasks.clone();
                    let task = spawn(async move {
                        timer_queue.auto_dismiss(&notification).await;
                        timer_tasks.borrow_mut().remove(&notification.id);
                    });
                    tasks.borrow_mut().insert(id, task);
                }
            }
        })
    };

    let on_drop = tasks.clone();
    use_drop(move || {
        for (_, task) in on_drop.borrow_mut().drain() {
            task.cancel();
        }
    });

    let context = use_context_provider(|| NotificationContext {
        queue,
        timers,
        tasks,
    });

    rsx! {
        {children}
        div { class: "fixed top-4 right-4 z-50 flex flex-col gap-2 w-80",
            for notification in list.read().iter().cloned() {
                Toast {
                    key: "{notification.id}",
                    notification,
                    on_dismiss: {
                        let context = context.clone();
                        move |id: u64| context.dismiss(id)
                    },
                }
            }
        }
    }
}

#[component]
fn Toast(notification: Notification, on_dismiss: EventHandler<u64>) -> Element {
    let tone = match notification.kind {
        NotificationKind::Success => "bg-green-50 border-green-400 text-green-800",
        NotificationKind::Error => "bg-red-50 border-red-400 text-red-800",
        NotificationKind::Info => "bg-blue-50 border-blue-400 text-blue-800",
        NotificationKind::Warning => "bg-yellow-50 border-yellow-400 text-yellow-800",
    };
    let id = notification.id;

    rsx! {
        div {
            class: "flex items-start justify-between rounded-lg border-l-4 p-4 shadow-md {tone}",
            role: "alert",
            "data-kind": notification.kind.as_str(),
            p { class: "text-sm", "{notification.message}" }
            button {
                class: "ml-4 text-sm opacity-60 hover:opacity-100",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| on_dismiss.call(id),
                "×"
            }
        }
    }
}
