use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use smartqueue::error::AppError;
use smartqueue::notifications::{
    seed_notifications, Notification, NotificationError, NotificationId, NotificationStore,
};
use smartqueue::scheduling::{
    seed_appointments, Appointment, AppointmentImporter, EngineConfig, HistoricalPatterns,
    SlotEngine,
};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationStore {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotificationStore {
    pub(crate) fn seeded() -> Self {
        Self {
            notifications: Arc::new(Mutex::new(seed_notifications())),
        }
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, Vec<Notification>>, NotificationError> {
        self.notifications
            .lock()
            .map_err(|_| NotificationError::Unavailable("notification mutex poisoned".to_string()))
    }
}

impl NotificationStore for InMemoryNotificationStore {
    fn list(&self) -> Result<Vec<Notification>, NotificationError> {
        Ok(self.guard()?.clone())
    }

    fn mark_read(&self, id: &NotificationId) -> Result<Notification, NotificationError> {
        let mut guard = self.guard()?;
        let notification = guard
            .iter_mut()
            .find(|notification| &notification.id == id)
            .ok_or(NotificationError::NotFound)?;
        notification.read = true;
        Ok(notification.clone())
    }

    fn mark_all_read(&self) -> Result<usize, NotificationError> {
        let mut guard = self.guard()?;
        let mut changed = 0;
        for notification in guard.iter_mut().filter(|notification| !notification.read) {
            notification.read = true;
            changed += 1;
        }
        Ok(changed)
    }
}

pub(crate) fn build_engine(config: EngineConfig) -> Result<SlotEngine, AppError> {
    Ok(SlotEngine::new(config, HistoricalPatterns::standard())?)
}

/// Appointments from `path`, or the demo seed bookings when no file is given.
pub(crate) fn load_appointments(path: Option<&Path>) -> Result<Vec<Appointment>, AppError> {
    match path {
        Some(path) => Ok(AppointmentImporter::from_path(path)?),
        None => Ok(seed_appointments()?),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
