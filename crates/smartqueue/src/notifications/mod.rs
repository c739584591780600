//! Notification panel feed.
//!
//! Listing and read-state tracking only; nothing here sends messages.

pub mod feed;
pub mod router;


pub use feed::{
    seed_notifications, Notification, NotificationError, NotificationId, NotificationKind,
    NotificationStore,
};
pub use router::notification_router;
