use super::ReadStateTransaction;
use crate::repository::Notification;
use bson::oid::ObjectId;

///
/// Bounded, newest-first list of the viewer's notifications.
///
/// `unread_count` always equals the number of held notifications with `read = false`.
/// The list is a prefix of the viewer's history; older notifications
/// are evicted when capacity is exceeded.
///
pub struct NotificationStore {
    capacity: usize,
    notifications: Vec<Notification>,
    unread_count: usize,
    loading: bool,
    /// Incremented when read state transaction begins or mark all commits
    revision: u64,
    /// Revision of the last committed mark all, 0 if none
    all_read_committed_at: u64,
}

impl NotificationStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            notifications: Vec::with_capacity(capacity),
            unread_count: 0,
            loading: true,
            revision: 0,
            all_read_committed_at: 0,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.unread_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn get(&self, id: ObjectId) -> Option<&Notification> {
        self.notifications
            .iter()
            .find(|notification| notification.id == id)
    }

    ///
    /// Merges freshly fetched page into held notifications.
    ///
    /// Page is expected to be sorted newest-first. Page entries win over held ones
    /// with the same id, except for the read flag which never goes back to false
    /// (page may be fetched before pending read state update reached the database).
    /// Held entries missing from the page (ingested while the page was fetched)
    /// are kept as long as they fit.
    ///
    pub fn load_page(&mut self, page: Vec<Notification>) {
        let mut notifications = page;
        for held in std::mem::take(&mut self.notifications) {
            match notifications
                .iter_mut()
                .find(|notification| notification.id == held.id)
            {
                Some(fetched) => fetched.read |= held.read,
                None => notifications.push(held),
            }
        }
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications.truncate(self.capacity);

        self.notifications = notifications;
        self.unread_count = self
            .notifications
            .iter()
            .filter(|notification| !notification.read)
            .count();
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    ///
    /// Prepends notification delivered by the change feed.
    ///
    /// ### Returns
    /// false when notification with the same id is already held
    ///
    pub fn ingest(&mut self, notification: Notification) -> bool {
        if self.get(notification.id).is_some() {
            return false;
        }

        if !notification.read {
            self.unread_count += 1;
        }
        self.notifications.insert(0, notification);

        while self.notifications.len() > self.capacity {
            if let Some(evicted) = self.notifications.pop() {
                if !evicted.read {
                    self.unread_count -= 1;
                }
            }
        }

        true
    }

    ///
    /// Optimistically marks one notification as read.
    ///
    /// Transaction is empty when notification is not held or already read.
    ///
    pub fn begin_mark_read(&mut self, id: ObjectId) -> ReadStateTransaction {
        let mut ids = Vec::new();
        if self.set_read(id, true) {
            ids.push(id);
        }
        self.revision += 1;

        ReadStateTransaction::new(ids, self.revision, false)
    }

    ///
    /// Optimistically marks all held notifications as read.
    ///
    pub fn begin_mark_all_read(&mut self) -> ReadStateTransaction {
        let ids = self
            .notifications
            .iter_mut()
            .filter(|notification| !notification.read)
            .map(|notification| {
                notification.read = true;
                notification.id
            })
            .collect::<Vec<_>>();
        self.unread_count = 0;
        self.revision += 1;

        ReadStateTransaction::new(ids, self.revision, true)
    }

    pub(super) fn commit_all_read(&mut self) {
        self.revision += 1;
        self.all_read_committed_at = self.revision;
    }

    ///
    /// Whether database marked every notification as read after `revision`
    ///
    pub(super) fn all_read_committed_since(&self, revision: u64) -> bool {
        self.all_read_committed_at > revision
    }

    ///
    /// Sets read flag and keeps unread count in sync.
    ///
    /// ### Returns
    /// true when flag changed
    ///
    pub(super) fn set_read(&mut self, id: ObjectId, read: bool) -> bool {
        let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id)
        else {
            return false;
        };

        if notification.read == read {
            return false;
        }

        notification.read = read;
        match read {
            true => self.unread_count = self.unread_count.saturating_sub(1),
            false => self.unread_count += 1,
        }

        true
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::repository::NotificationKind;
    use std::time::Duration;
    use time::{macros::datetime, OffsetDateTime};
    use uuid::Uuid;

    pub fn notification(read: bool, created_at: OffsetDateTime) -> Notification {
        Notification {
            id: ObjectId::new(),
            user_id: Uuid::from_u128(1),
            title: "New episode".to_string(),
            message: "Episode is out".to_string(),
            kind: NotificationKind::NewEpisode,
            read,
            created_at,
            data: None,
        }
    }

    fn assert_unread_count_consistent(store: &NotificationStore) {
        let unread = store
            .notifications()
            .iter()
            .filter(|notification| !notification.read)
            .count();
        assert_eq!(store.unread_count(), unread);
    }

    #[test]
    fn new_store_is_loading() {
        let mut store = NotificationStore::new(20);
        assert!(store.is_loading());
        assert!(store.notifications().is_empty());
        assert_eq!(store.unread_count(), 0);

        store.finish_loading();
        assert!(!store.is_loading());
    }

    #[test]
    fn load_page_truncates_to_capacity() {
        let start = datetime!(2024-03-01 12:00:00 UTC);
        let page = (0..25)
            .rev()
            .map(|i| notification(i % 2 == 0, start + Duration::from_secs(60 * i)))
            .collect::<Vec<_>>();
        let newest = page[0].id;

        let mut store = NotificationStore::new(20);
        store.load_page(page);

        assert_eq!(store.notifications().len(), 20);
        assert_eq!(store.notifications()[0].id, newest);
        assert!(store
            .notifications()
            .windows(2)
            .all(|pair| pair[0].created_at > pair[1].created_at));
        assert_unread_count_consistent(&store);
    }

    #[test]
    fn load_page_keeps_ingested() {
        let start = datetime!(2024-03-01 12:00:00 UTC);
        let older = notification(true, start);
        let mut fetched = notification(false, start + Duration::from_secs(60));
        let newest = notification(false, start + Duration::from_secs(120));
        let (older_id, fetched_id, newest_id) = (older.id, fetched.id, newest.id);

        let mut store = NotificationStore::new(20);
        store.ingest(newest);
        store.ingest(fetched.clone());
        fetched.read = true;
        store.load_page(vec![fetched, older]);

        let ids = store
            .notifications()
            .iter()
            .map(|notification| notification.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![newest_id, fetched_id, older_id]);
        assert!(store.get(fetched_id).unwrap().read);
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn ingest_keeps_unread_count_consistent() {
        let mut store = NotificationStore::new(5);
        let now = OffsetDateTime::now_utc();

        for i in 0..12 {
            let inserted = store.ingest(notification(i % 3 == 0, now));
            assert!(inserted);
            assert_unread_count_consistent(&store);
        }

        assert_eq!(store.notifications().len(), 5);
    }

    #[test]
    fn ingest_prepends() {
        let mut store = NotificationStore::new(20);
        let now = OffsetDateTime::now_utc();
        let first = notification(false, now);
        let second = notification(false, now);
        let second_id = second.id;

        store.ingest(first);
        store.ingest(second);

        assert_eq!(store.notifications()[0].id, second_id);
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn ingest_evicts_oldest_unread() {
        let mut store = NotificationStore::new(2);
        let now = OffsetDateTime::now_utc();
        let oldest = notification(false, now);
        let oldest_id = oldest.id;

        store.ingest(oldest);
        store.ingest(notification(true, now));
        store.ingest(notification(true, now));

        assert!(store.get(oldest_id).is_none());
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn ingest_duplicate_ignored() {
        let mut store = NotificationStore::new(20);
        let notification = notification(false, OffsetDateTime::now_utc());

        assert!(store.ingest(notification.clone()));
        assert!(!store.ingest(notification));

        assert_eq!(store.notifications().len(), 1);
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn mark_read_once() {
        let mut store = NotificationStore::new(20);
        let notification = notification(false, OffsetDateTime::now_utc());
        let id = notification.id;
        store.ingest(notification);

        let transaction = store.begin_mark_read(id);
        assert_eq!(transaction.ids(), &[id]);
        assert_eq!(store.unread_count(), 0);
        assert!(store.get(id).unwrap().read);

        let transaction = store.begin_mark_read(id);
        assert!(transaction.is_empty());
        assert_eq!(store.unread_count(), 0);
        assert!(store.get(id).unwrap().read);
    }

    #[test]
    fn mark_read_not_held() {
        let mut store = NotificationStore::new(20);
        store.ingest(notification(false, OffsetDateTime::now_utc()));

        let transaction = store.begin_mark_read(ObjectId::new());

        assert!(transaction.is_empty());
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn mark_all_read() {
        let mut store = NotificationStore::new(20);
        let now = OffsetDateTime::now_utc();
        store.ingest(notification(false, now));
        store.ingest(notification(true, now));
        store.ingest(notification(false, now));

        let transaction = store.begin_mark_all_read();

        assert_eq!(transaction.ids().len(), 2);
        assert_eq!(store.unread_count(), 0);
        assert!(store.notifications().iter().all(|n| n.read));
    }

    #[test]
    fn mark_one_then_all() {
        let now = OffsetDateTime::now_utc();
        let first = notification(false, now);
        let second = notification(false, now);
        let (first_id, second_id) = (first.id, second.id);

        let mut store = NotificationStore::new(20);
        store.load_page(vec![first, second]);
        assert_eq!(store.unread_count(), 2);

        store.begin_mark_read(first_id).commit(&mut store);
        assert!(store.get(first_id).unwrap().read);
        assert!(!store.get(second_id).unwrap().read);
        assert_eq!(store.unread_count(), 1);

        store.begin_mark_all_read().commit(&mut store);
        assert!(store.get(first_id).unwrap().read);
        assert!(store.get(second_id).unwrap().read);
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn load_page_keeps_pending_read() {
        let now = OffsetDateTime::now_utc();
        let unread = notification(false, now);
        let id = unread.id;

        let mut store = NotificationStore::new(20);
        store.ingest(unread.clone());

        let transaction = store.begin_mark_read(id);
        // page fetched before the update reached the database
        store.load_page(vec![unread]);
        transaction.commit(&mut store);

        assert!(store.get(id).unwrap().read);
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn load_page_keeps_pending_mark_all_read() {
        let now = OffsetDateTime::now_utc();
        let first = notification(false, now);
        let second = notification(false, now);

        let mut store = NotificationStore::new(20);
        store.load_page(vec![first.clone(), second.clone()]);

        let transaction = store.begin_mark_all_read();
        store.load_page(vec![first, second]);
        transaction.commit(&mut store);

        assert!(store.notifications().iter().all(|n| n.read));
        assert_eq!(store.unread_count(), 0);
    }
}
