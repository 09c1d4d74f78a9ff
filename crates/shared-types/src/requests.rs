use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{CaseStatus, ClientType, PaymentMethod};
use crate::ids::{ClientId, InvoiceId};

#[cfg(feature = "validation")]
use std::borrow::Cow;
#[cfg(feature = "validation")]
use validator::{Validate, ValidationError};

#[cfg(feature = "validation")]
fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some(Cow::from("Value must not be negative"));
        return Err(err);
    }
    Ok(())
}

/// Data for a new client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewClient {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Client number is required"))
    )]
    pub client_number: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Name is required"))
    )]
    pub name: String,
    #[serde(default)]
    pub client_type: ClientType,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Data for a new attorney.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewAttorney {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Attorney number is required"))
    )]
    pub attorney_number: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "First name is required"))
    )]
    pub first_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Last name is required"))
    )]
    pub last_name: String,
    #[serde(default)]
    pub specialization: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_non_negative")))]
    pub hourly_rate: Decimal,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: Option<String>,
}

/// Data for a new case. A case is always opened for exactly one client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewCase {
    pub client_id: ClientId,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Case number is required"))
    )]
    pub case_number: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: CaseStatus,
    pub opened_on: NaiveDate,
}

/// Data for a new time entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewTimeEntry {
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_non_negative")))]
    pub hours: Decimal,
    #[serde(default)]
    pub description: String,
    pub worked_on: NaiveDate,
    /// Hourly rate captured when the work was logged.
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_non_negative")))]
    pub rate: Option<Decimal>,
}

/// Data for a new case document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewDocument {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub file_name: String,
    pub filed_on: NaiveDate,
}

/// Data for a new calendar event on a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewEvent {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub event_type: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Data for a new invoice billed to one client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewInvoice {
    pub client_id: ClientId,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Invoice number is required"))
    )]
    pub invoice_number: String,
    pub issued_on: NaiveDate,
    #[serde(default)]
    pub due_on: Option<NaiveDate>,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_non_negative")))]
    pub total_amount: Decimal,
}

/// Data for a new payment against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewPayment {
    pub invoice_id: InvoiceId,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_non_negative")))]
    pub amount: Decimal,
    pub paid_on: NaiveDate,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub reference: Option<String>,
}
