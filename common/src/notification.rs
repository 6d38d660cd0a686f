//! Notification center owned by the application shell.
//!
//! At most one notification is active. A success notification counts down
//! [`SUCCESS_TICKS`] ticks of [`TICK_MS`] for the progress bar, and is also
//! cleared by a single [`SUCCESS_TTL_MS`] expiry. Timer callbacks carry the
//! [`NotificationId`] they were started for; once the notification is
//! replaced or dismissed, callbacks for the old id do nothing.

use crate::model::notification::Notification;

pub const TICK_MS: u32 = 100;
pub const SUCCESS_TICKS: u32 = 30;
pub const SUCCESS_TTL_MS: u32 = TICK_MS * SUCCESS_TICKS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Active {
    id: NotificationId,
    notification: Notification,
    remaining_ticks: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationCenter {
    active: Option<Active>,
    next_id: u64,
}

impl NotificationCenter {
    /// Shows `notification`, superseding the current one.
    pub fn enqueue(&mut self, notification: Notification) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        let remaining_ticks = if notification.is_success() {
            SUCCESS_TICKS
        } else {
            0
        };
        self.active = Some(Active {
            id,
            notification,
            remaining_ticks,
        });
        id
    }

    pub fn dismiss(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.active.as_ref().map(|a| &a.notification)
    }

    pub fn current_id(&self) -> Option<NotificationId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// True while a success notification is counting down.
    pub fn is_counting_down(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.notification.is_success())
    }

    /// Fraction of the countdown left, for the progress bar. `None` for
    /// errors and when nothing is shown.
    pub fn progress(&self) -> Option<f32> {
        let active = self.active.as_ref()?;
        active
            .notification
            .is_success()
            .then(|| active.remaining_ticks as f32 / SUCCESS_TICKS as f32)
    }

    /// Advances the countdown of notification `id`. Returns true when state
    /// changed. The notification is cleared when the countdown reaches zero.
    pub fn tick(&mut self, id: NotificationId) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.id != id || !active.notification.is_success() {
            return false;
        }
        active.remaining_ticks = active.remaining_ticks.saturating_sub(1);
        if active.remaining_ticks == 0 {
            self.active = None;
        }
        true
    }

    /// Fixed-window expiry for notification `id`. Errors are never expired.
    pub fn expire(&mut self, id: NotificationId) -> bool {
        match &self.active {
            Some(active) if active.id == id && active.notification.is_success() => {
                self.active = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_clears_after_thirty_ticks() {
        let mut center = NotificationCenter::default();
        let id = center.enqueue(Notification::success("Saved"));
        for _ in 0..SUCCESS_TICKS - 1 {
            center.tick(id);
        }
        assert!(center.current().is_some());
        assert!(center.progress().unwrap() > 0.0);
        center.tick(id);
        assert!(center.current().is_none());
        assert_eq!(SUCCESS_TTL_MS, 3000);
    }

    #[test]
    fn expiry_clears_success_immediately() {
        let mut center = NotificationCenter::default();
        let id = center.enqueue(Notification::success("Saved"));
        assert!(center.expire(id));
        assert!(center.current().is_none());
    }

    #[test]
    fn errors_never_auto_clear() {
        let mut center = NotificationCenter::default();
        let id = center.enqueue(Notification::error("Failed"));
        for _ in 0..100 {
            center.tick(id);
        }
        assert!(!center.expire(id));
        assert_eq!(center.current(), Some(&Notification::error("Failed")));
        assert_eq!(center.progress(), None);
        assert!(center.dismiss());
        assert!(center.current().is_none());
    }

    #[test]
    fn timers_of_a_replaced_notification_are_ignored() {
        let mut center = NotificationCenter::default();
        let old = center.enqueue(Notification::success("Created"));
        let new = center.enqueue(Notification::success("Deleted"));
        assert!(!center.expire(old));
        assert!(!center.tick(old));
        assert_eq!(center.progress(), Some(1.0));
        assert_eq!(center.current_id(), Some(new));
    }
}
