use serde::Serialize;
use shared_types::{ClientId, ClientRecord, ClientType, NewClient};

/// A person or organization the firm represents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    id: ClientId,
    client_number: String,
    pub name: String,
    pub client_type: ClientType,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Client {
    pub(crate) fn from_new(id: ClientId, new: NewClient) -> Self {
        Self {
            id,
            client_number: new.client_number.trim().to_string(),
            name: new.name,
            client_type: new.client_type,
            email: new.email,
            phone: new.phone,
        }
    }

    pub(crate) fn from_record(record: &ClientRecord) -> Self {
        Self {
            id: record.id,
            client_number: record.client_number.trim().to_string(),
            name: record.name.clone(),
            client_type: record.client_type,
            email: record.email.clone(),
            phone: record.phone.clone(),
        }
    }

    pub(crate) fn to_record(&self) -> ClientRecord {
        ClientRecord {
            id: self.id,
            client_number: self.client_number.clone(),
            name: self.name.clone(),
            client_type: self.client_type,
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn client_number(&self) -> &str {
        &self.client_number
    }

    pub(crate) fn set_client_number(&mut self, number: &str) {
        self.client_number = number.trim().to_string();
    }
}
