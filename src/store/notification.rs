// 通知操作，列表按时间从新到旧排列

use chrono::Utc;

use super::DomainStore;
use crate::event_bus::AppEvent;
use crate::models::{NewNotification, Notification};

impl DomainStore {
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// 分配ID和当前时间，插入到列表最前面
    pub fn add_notification(&mut self, new: NewNotification) -> Notification {
        let notification = Notification {
            id: self.allocate_id(),
            title: new.title,
            message: new.message,
            kind: new.kind,
            read: new.read,
            timestamp: Utc::now(),
        };
        self.notifications.insert(0, notification.clone());
        self.record(AppEvent::NotificationAdded {
            notification: notification.clone(),
        });
        notification
    }

    /// 标记为已读，返回通知是否存在
    pub fn mark_notification_as_read(&mut self, id: i64) -> bool {
        let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        if !notification.read {
            notification.read = true;
            self.record_notifications_changed();
        }
        true
    }

    /// 全部标记为已读，返回本次标记的数量
    pub fn mark_all_notifications_as_read(&mut self) -> usize {
        let mut marked = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            marked += 1;
        }
        if marked > 0 {
            self.record_notifications_changed();
        }
        marked
    }

    pub fn clear_notifications(&mut self) {
        if !self.notifications.is_empty() {
            self.notifications.clear();
            self.record_notifications_changed();
        }
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    fn record_notifications_changed(&mut self) {
        let unread = self.unread_notification_count();
        let total = self.notifications.len();
        self.record(AppEvent::NotificationsChanged { unread, total });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;

    #[test]
    fn test_new_notification_is_first() {
        let mut store = DomainStore::default();
        let added = store.add_notification(NewNotification::new(
            NotificationKind::Error,
            "Payment Failed",
            "Please try again.",
        ));

        assert_eq!(store.notifications()[0], added);
        assert!(!added.read);
        assert_eq!(store.notifications().len(), 4);
    }

    #[test]
    fn test_mark_as_read() {
        let mut store = DomainStore::default();
        let id = store.notifications()[1].id;
        assert_eq!(store.unread_notification_count(), 3);

        assert!(store.mark_notification_as_read(id));
        assert!(store.notifications()[1].read);
        assert_eq!(store.unread_notification_count(), 2);
        assert!(!store.mark_notification_as_read(-1));
    }

    #[test]
    fn test_mark_all_then_clear() {
        let mut store = DomainStore::default();
        assert_eq!(store.mark_all_notifications_as_read(), 3);
        assert_eq!(store.mark_all_notifications_as_read(), 0);
        assert_eq!(store.unread_notification_count(), 0);

        store.clear_notifications();
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_clear_records_change_event() {
        let mut store = DomainStore::default();
        store.drain_events();
        store.clear_notifications();
        assert_eq!(
            store.drain_events(),
            vec![AppEvent::NotificationsChanged { unread: 0, total: 0 }]
        );
    }
}
