use serde::{Deserialize, Serialize};

use super::domain::ServiceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Hospital,
    Rto,
    Passport,
    Bank,
    Government,
}

/// Public-facing counter service that accepts appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub name_hindi: String,
    pub category: ServiceCategory,
    /// Typical minutes spent serving one citizen.
    pub average_minutes: u32,
    /// Appointments accepted per slot.
    pub capacity: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    pub fn standard() -> Self {
        use ServiceCategory::*;

        let entries = [
            ("hosp-opd", "OPD Consultation", "ओपीडी परामर्श", Hospital, 15, 6),
            ("hosp-lab", "Laboratory Tests", "प्रयोगशाला परीक्षण", Hospital, 10, 8),
            ("rto-license", "Driving License", "ड्राइविंग लाइसेंस", Rto, 20, 5),
            ("rto-rc", "RC Transfer", "आरसी स्थानांतरण", Rto, 25, 4),
            ("passport-new", "New Passport", "नया पासपोर्ट", Passport, 30, 6),
            ("passport-renew", "Passport Renewal", "पासपोर्ट नवीनीकरण", Passport, 20, 6),
            ("bank-account", "Account Opening", "खाता खोलना", Bank, 15, 5),
            ("bank-loan", "Loan Application", "ऋण आवेदन", Bank, 30, 4),
        ];

        Self::new(
            entries
                .into_iter()
                .map(
                    |(id, name, name_hindi, category, average_minutes, capacity)| Service {
                        id: ServiceId::from(id),
                        name: name.to_string(),
                        name_hindi: name_hindi.to_string(),
                        category,
                        average_minutes,
                        capacity,
                        enabled: true,
                    },
                )
                .collect(),
        )
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn find(&self, id: &ServiceId) -> Option<&Service> {
        self.services.iter().find(|service| &service.id == id)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Service> {
        self.services.iter().filter(|service| service.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_lists_demo_services() {
        let catalog = ServiceCatalog::standard();
        assert_eq!(catalog.services().len(), 8);
        assert_eq!(catalog.enabled().count(), 8);

        let lab = catalog
            .find(&ServiceId::from("hosp-lab"))
            .expect("lab service present");
        assert_eq!(lab.capacity, 8);
        assert_eq!(lab.average_minutes, 10);
        assert_eq!(lab.category, ServiceCategory::Hospital);
    }

    #[test]
    fn unknown_service_is_absent() {
        let catalog = ServiceCatalog::standard();
        assert!(catalog.find(&ServiceId::from("post-office")).is_none());
    }
}
