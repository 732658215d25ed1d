//! Toast notification queue.

use std::cell::Cell;
use std::rc::Rc;

use crate::cell::StateCell;
use crate::config::NOTIFICATION_DURATION_MS;
use crate::timer::sleep_ms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// 0 keeps the toast until dismissed.
    pub duration_ms: u32,
}

pub struct Notifications<C> {
    state: C,
    next_id: Rc<Cell<u64>>,
    default_ms: u32,
}

impl<C: Clone> Clone for Notifications<C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            next_id: self.next_id.clone(),
            default_ms: self.default_ms,
        }
    }
}

impl<C: StateCell<Vec<Notification>>> Notifications<C> {
    pub fn new(state: C) -> Self {
        Self::with_duration(state, NOTIFICATION_DURATION_MS)
    }

    pub fn with_duration(state: C, default_ms: u32) -> Self {
        Self {
            state,
            next_id: Rc::new(Cell::new(0)),
            default_ms,
        }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    pub fn push(&self, kind: NotificationKind, message: impl Into<String>, duration_ms: u32) -> Notification {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let notification = Notification {
            id,
            kind,
            message: message.into(),
            duration_ms,
        };
        self.state.with_mut(|list| list.push(notification.clone()));
        notification
    }

    pub fn success(&self, message: impl Into<String>) -> Notification {
        self.push(NotificationKind::Success, message, self.default_ms)
    }

    pub fn error(&self, message: impl Into<String>) -> Notification {
        self.push(NotificationKind::Error, message, self.default_ms)
    }

    pub fn info(&self, message: impl Into<String>) -> Notification {
        self.push(NotificationKind::Info, message, self.default_ms)
    }

    pub fn warning(&self, message: impl Into<String>) -> Notification {
        self.push(NotificationKind::Warning, message, self.default_ms)
    }

    /// Returns `false` when the notification was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        self.state.with_mut(|list| {
            let before = list.len();
            list.retain(|n| n.id != id);
            list.len() != before
        })
    }

    pub fn clear(&self) {
        self.state.with_mut(Vec::clear);
    }

    /// Wait out the notification's duration, then dismiss it. Callers run this
    /// as a task and cancel it when the toast goes away first.
    pub async fn auto_dismiss(&self, notification: &Notification) {
        if notification.duration_ms == 0 {
            return;
        }
        sleep_ms(notification.duration_ms).await;
        self.dismiss(notification.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::local;

    #[test]
    fn ids_are_unique_and_dismiss_removes_one() {
        let queue = Notifications::new(local(Vec::new()));
        let first = queue.success("Saved");
        let second = queue.error("Failed");
        assert_ne!(first.id, second.id);
        assert_eq!(first.duration_ms, NOTIFICATION_DURATION_MS);

        assert!(queue.dismiss(first.id));
        assert!(!queue.dismiss(first.id));
        let remaining = queue.state().get();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn auto_dismiss_after_duration() {
        let queue = Notifications::with_duration(local(Vec::new()), 5);
        let toast = queue.info("Heads up");
        let sticky = queue.push(NotificationKind::Warning, "Stays", 0);

        queue.auto_dismiss(&toast).await;
        queue.auto_dismiss(&sticky).await;

        let remaining = queue.state().get();
        assert_eq!(remaining, vec![sticky]);
    }
}
