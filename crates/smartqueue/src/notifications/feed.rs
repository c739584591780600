use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reminder,
    Success,
    Info,
    Warning,
}

/// Citizen-facing message shown in the notification panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Relative age as displayed, e.g. `30 mins ago`.
    pub time: String,
    pub read: bool,
}

/// Storage boundary for the feed; implementations must be shareable across handlers.
pub trait NotificationStore: Send + Sync {
    fn list(&self) -> Result<Vec<Notification>, NotificationError>;
    fn mark_read(&self, id: &NotificationId) -> Result<Notification, NotificationError>;
    /// Returns how many notifications changed state.
    fn mark_all_read(&self) -> Result<usize, NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Notification not found")]
    NotFound,
    #[error("notification store unavailable: {0}")]
    Unavailable(String),
}

/// Messages the demo feed starts with.
pub fn seed_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: NotificationId("1".to_string()),
            kind: NotificationKind::Reminder,
            title: "Appointment Reminder".to_string(),
            message: "Your appointment is in 30 minutes".to_string(),
            time: "30 mins ago".to_string(),
            read: false,
        },
        Notification {
            id: NotificationId("2".to_string()),
            kind: NotificationKind::Success,
            title: "Booking Confirmed".to_string(),
            message: "Appointment booked successfully".to_string(),
            time: "2 hours ago".to_string(),
            read: true,
        },
    ]
}
