use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared_types::{CaseId, NewTimeEntry, TimeEntryId, TimeEntryRecord};

/// Hours logged against a case. `hours` and `rate` feed case aggregates and
/// are only writable through the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntry {
    id: TimeEntryId,
    hours: Decimal,
    rate: Option<Decimal>,
    pub description: String,
    pub worked_on: NaiveDate,
}

impl TimeEntry {
    pub(crate) fn from_new(id: TimeEntryId, new: NewTimeEntry) -> Self {
        Self {
            id,
            hours: new.hours,
            rate: new.rate,
            description: new.description,
            worked_on: new.worked_on,
        }
    }

    pub(crate) fn from_record(record: &TimeEntryRecord) -> Self {
        Self {
            id: record.id,
            hours: record.hours,
            rate: record.rate,
            description: record.description.clone(),
            worked_on: record.worked_on,
        }
    }

    pub(crate) fn to_record(&self, case_id: Option<CaseId>) -> TimeEntryRecord {
        TimeEntryRecord {
            id: self.id,
            hours: self.hours,
            description: self.description.clone(),
            worked_on: self.worked_on,
            rate: self.rate,
            case_id,
        }
    }

    pub fn id(&self) -> TimeEntryId {
        self.id
    }

    pub fn hours(&self) -> Decimal {
        self.hours
    }

    pub fn rate(&self) -> Option<Decimal> {
        self.rate
    }

    /// `hours × rate`, or `None` when no rate was captured or the product
    /// does not fit in a `Decimal`.
    pub fn billable_amount(&self) -> Option<Decimal> {
        self.rate.and_then(|rate| self.hours.checked_mul(rate))
    }

    pub(crate) fn set_hours(&mut self, hours: Decimal) {
        self.hours = hours;
    }

    pub(crate) fn set_rate(&mut self, rate: Option<Decimal>) {
        self.rate = rate;
    }
}
