use chrono::NaiveDate;
use serde::Serialize;
use shared_types::{CaseId, DocumentId, DocumentRecord, NewDocument};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    id: DocumentId,
    pub title: String,
    pub file_name: String,
    pub filed_on: NaiveDate,
}

impl Document {
    pub(crate) fn from_new(id: DocumentId, new: NewDocument) -> Self {
        Self {
            id,
            title: new.title,
            file_name: new.file_name,
            filed_on: new.filed_on,
        }
    }

    pub(crate) fn from_record(record: &DocumentRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            file_name: record.file_name.clone(),
            filed_on: record.filed_on,
        }
    }

    pub(crate) fn to_record(&self, case_id: Option<CaseId>) -> DocumentRecord {
        DocumentRecord {
            id: self.id,
            title: self.title.clone(),
            file_name: self.file_name.clone(),
            filed_on: self.filed_on,
            case_id,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }
}
