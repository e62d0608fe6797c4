use super::NotificationStore;
use bson::oid::ObjectId;

///
/// Read flags changed locally that are not yet confirmed by the database.
///
/// Must be resolved with [ReadStateTransaction::commit] when the update succeeded
/// or [ReadStateTransaction::rollback] when it failed.
///
#[must_use]
#[derive(Debug)]
pub struct ReadStateTransaction {
    ids: Vec<ObjectId>,
    revision: u64,
    all: bool,
}

impl ReadStateTransaction {
    pub(super) fn new(ids: Vec<ObjectId>, revision: u64, all: bool) -> Self {
        Self { ids, revision, all }
    }

    #[cfg(test)]
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn commit(self, store: &mut NotificationStore) {
        if self.all {
            store.commit_all_read();
        }

        tracing::trace!(count = self.ids.len(), "read state committed");
    }

    ///
    /// Restores read = false for every notification changed by this transaction
    /// that is still held by the store.
    ///
    /// Nothing is restored when mark all committed after this transaction began,
    /// the database already holds those notifications as read.
    ///
    pub fn rollback(self, store: &mut NotificationStore) {
        if store.all_read_committed_since(self.revision) {
            tracing::debug!(
                count = self.ids.len(),
                "read state rollback skipped, all marked read meanwhile"
            );
            return;
        }

        let restored = self
            .ids
            .into_iter()
            .filter(|id| store.set_read(*id, false))
            .count();

        tracing::debug!(restored, "read state rolled back");
    }
}
