use rust_decimal::Decimal;
use serde::Serialize;
use shared_types::{AttorneyId, AttorneyRecord, NewAttorney};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attorney {
    id: AttorneyId,
    attorney_number: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub hourly_rate: Decimal,
    pub email: Option<String>,
}

impl Attorney {
    pub(crate) fn from_new(id: AttorneyId, new: NewAttorney) -> Self {
        Self {
            id,
            attorney_number: new.attorney_number.trim().to_string(),
            first_name: new.first_name,
            last_name: new.last_name,
            specialization: new.specialization,
            hourly_rate: new.hourly_rate,
            email: new.email,
        }
    }

    pub(crate) fn from_record(record: &AttorneyRecord) -> Self {
        Self {
            id: record.id,
            attorney_number: record.attorney_number.trim().to_string(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            specialization: record.specialization.clone(),
            hourly_rate: record.hourly_rate,
            email: record.email.clone(),
        }
    }

    pub(crate) fn to_record(&self) -> AttorneyRecord {
        AttorneyRecord {
            id: self.id,
            attorney_number: self.attorney_number.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            specialization: self.specialization.clone(),
            hourly_rate: self.hourly_rate,
            email: self.email.clone(),
        }
    }

    pub fn id(&self) -> AttorneyId {
        self.id
    }

    pub fn attorney_number(&self) -> &str {
        &self.attorney_number
    }

    pub(crate) fn set_attorney_number(&mut self, number: &str) {
        self.attorney_number = number.trim().to_string();
    }

    /// "First Last", as shown in listings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}
