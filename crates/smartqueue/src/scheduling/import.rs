use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::domain::{validate_records, Appointment, AppointmentError, AppointmentRecord};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read appointments: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid appointment CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid appointment JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Appointment(#[from] AppointmentError),
}

/// Loads appointment exports, rejecting the whole file on the first bad record.
pub struct AppointmentImporter;

impl AppointmentImporter {
    /// Reads `.csv` files as CSV and anything else as a JSON array.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Appointment>, ImportError> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| extension.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let file = File::open(path)?;
        let appointments = if is_csv {
            Self::from_csv_reader(file)?
        } else {
            Self::from_json_reader(file)?
        };

        debug!(
            path = %path.display(),
            count = appointments.len(),
            "imported appointments"
        );
        Ok(appointments)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Appointment>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut appointments = Vec::new();

        for (index, row) in csv_reader.deserialize::<AppointmentRecord>().enumerate() {
            let record = row?;
            appointments.push(record.validate(index)?);
        }

        Ok(appointments)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Appointment>, ImportError> {
        let records: Vec<AppointmentRecord> = serde_json::from_reader(reader)?;
        Ok(validate_records(records)?)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Vec<Appointment>, ImportError> {
        let records: Vec<AppointmentRecord> = serde_json::from_slice(bytes)?;
        Ok(validate_records(records)?)
    }
}

/// Raw records of the demo's initial bookings.
pub fn seed_records() -> Vec<AppointmentRecord> {
    [
        ("apt-001", "hosp-opd", "2026-01-17", "09:00"),
        ("apt-002", "rto-license", "2026-01-17", "10:00"),
    ]
    .into_iter()
    .map(|(id, service_id, date, time_slot)| AppointmentRecord {
        id: Some(id.to_string()),
        service_id: Some(service_id.to_string()),
        date: Some(date.to_string()),
        time_slot: Some(time_slot.to_string()),
        status: Some("scheduled".to_string()),
    })
    .collect()
}

pub fn seed_appointments() -> Result<Vec<Appointment>, AppointmentError> {
    validate_records(seed_records())
}
