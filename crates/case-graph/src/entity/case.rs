use chrono::NaiveDate;
use serde::Serialize;
use shared_types::{AttorneyId, CaseId, CaseRecord, CaseStatus, ClientId, NewCase};

/// A legal matter. Its client, attorneys and children are tracked by the
/// graph, not by the case itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    id: CaseId,
    case_number: String,
    pub title: String,
    pub description: String,
    pub status: CaseStatus,
    pub opened_on: NaiveDate,
    pub closed_on: Option<NaiveDate>,
}

impl Case {
    pub(crate) fn from_new(id: CaseId, new: NewCase) -> Self {
        Self {
            id,
            case_number: new.case_number.trim().to_string(),
            title: new.title,
            description: new.description,
            status: new.status,
            opened_on: new.opened_on,
            closed_on: None,
        }
    }

    pub(crate) fn from_record(record: &CaseRecord) -> Self {
        Self {
            id: record.id,
            case_number: record.case_number.trim().to_string(),
            title: record.title.clone(),
            description: record.description.clone(),
            status: record.status.clone(),
            opened_on: record.opened_on,
            closed_on: record.closed_on,
        }
    }

    pub(crate) fn to_record(
        &self,
        client_id: Option<ClientId>,
        attorney_ids: Vec<AttorneyId>,
    ) -> CaseRecord {
        CaseRecord {
            id: self.id,
            case_number: self.case_number.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            opened_on: self.opened_on,
            closed_on: self.closed_on,
            client_id,
            attorney_ids,
        }
    }

    pub fn id(&self) -> CaseId {
        self.id
    }

    pub fn case_number(&self) -> &str {
        &self.case_number
    }

    pub(crate) fn set_case_number(&mut self, number: &str) {
        self.case_number = number.trim().to_string();
    }

    /// Close the case on `date`.
    pub fn close(&mut self, date: NaiveDate) {
        self.status = CaseStatus::Closed;
        self.closed_on = Some(date);
    }

    /// Reopen a closed case.
    pub fn reopen(&mut self) {
        self.status = CaseStatus::Open;
        self.closed_on = None;
    }
}
