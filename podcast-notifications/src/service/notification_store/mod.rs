mod notification_store;
mod read_state_transaction;

pub use notification_store::*;
pub use read_state_transaction::*;

#[cfg(test)]
pub(crate) use notification_store::test::notification as test_notification;
