//! Flat, foreign-key shaped records exchanged with the data-access layer.
//!
//! A `GraphRecords` set is what a store hands over when loading a graph and
//! what it receives back when saving one. Associations are expressed as ids
//! on the owning side only; the graph rebuilds both directions on import.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{CaseStatus, ClientType, PaymentMethod};
use crate::ids::{
    AttorneyId, CaseId, ClientId, DocumentId, EventId, InvoiceId, PaymentId, TimeEntryId,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub client_number: String,
    pub name: String,
    pub client_type: ClientType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttorneyRecord {
    pub id: AttorneyId,
    pub attorney_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub specialization: String,
    pub hourly_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: CaseId,
    pub case_number: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: CaseStatus,
    pub opened_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_on: Option<NaiveDate>,
    /// Owning client. Required on import.
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub attorney_ids: Vec<AttorneyId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntryRecord {
    pub id: TimeEntryId,
    pub hours: Decimal,
    #[serde(default)]
    pub description: String,
    pub worked_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    pub case_id: Option<CaseId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub title: String,
    #[serde(default)]
    pub file_name: String,
    pub filed_on: NaiveDate,
    pub case_id: Option<CaseId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub event_type: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub case_id: Option<CaseId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub issued_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,
    pub total_amount: Decimal,
    /// Stored aggregate. Ignored on import and recomputed from payments.
    #[serde(default)]
    pub amount_paid: Decimal,
    pub client_id: Option<ClientId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub amount: Decimal,
    pub paid_on: NaiveDate,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub invoice_id: Option<InvoiceId>,
}

/// A complete graph in record form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphRecords {
    pub clients: Vec<ClientRecord>,
    pub attorneys: Vec<AttorneyRecord>,
    pub cases: Vec<CaseRecord>,
    pub time_entries: Vec<TimeEntryRecord>,
    pub documents: Vec<DocumentRecord>,
    pub events: Vec<EventRecord>,
    pub invoices: Vec<InvoiceRecord>,
    pub payments: Vec<PaymentRecord>,
}

impl GraphRecords {
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
            && self.attorneys.is_empty()
            && self.cases.is_empty()
            && self.time_entries.is_empty()
            && self.documents.is_empty()
            && self.events.is_empty()
            && self.invoices.is_empty()
            && self.payments.is_empty()
    }
}
