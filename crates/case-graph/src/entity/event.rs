use chrono::{DateTime, Utc};
use serde::Serialize;
use shared_types::{CaseId, EventId, EventRecord, NewEvent};

/// A hearing, deadline or meeting on a case calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    id: EventId,
    pub title: String,
    pub event_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub location: Option<String>,
}

impl Event {
    pub(crate) fn from_new(id: EventId, new: NewEvent) -> Self {
        Self {
            id,
            title: new.title,
            event_type: new.event_type,
            scheduled_at: new.scheduled_at,
            location: new.location,
        }
    }

    pub(crate) fn from_record(record: &EventRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            event_type: record.event_type.clone(),
            scheduled_at: record.scheduled_at,
            location: record.location.clone(),
        }
    }

    pub(crate) fn to_record(&self, case_id: Option<CaseId>) -> EventRecord {
        EventRecord {
            id: self.id,
            title: self.title.clone(),
            event_type: self.event_type.clone(),
            scheduled_at: self.scheduled_at,
            location: self.location.clone(),
            case_id,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }
}
