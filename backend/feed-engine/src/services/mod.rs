pub mod notifications;
pub mod post_locks;

pub use notifications::{Notification, NotificationLevel, Notifier};
pub use post_locks::{PostGuard, PostLocks};
