use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared_types::{
    ClientId, InvoiceId, InvoiceRecord, NewInvoice, NewPayment, PaymentId, PaymentMethod,
    PaymentRecord, PaymentStatus,
};

/// A bill issued to one client. `amount_paid` is derived from the invoice's
/// payments and is only ever written by the graph's recalculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    id: InvoiceId,
    invoice_number: String,
    total_amount: Decimal,
    amount_paid: Decimal,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
}

impl Invoice {
    pub(crate) fn from_new(id: InvoiceId, new: NewInvoice) -> Self {
        Self {
            id,
            invoice_number: new.invoice_number.trim().to_string(),
            total_amount: new.total_amount,
            amount_paid: Decimal::ZERO,
            issued_on: new.issued_on,
            due_on: new.due_on,
        }
    }

    /// The stored `amount_paid` is discarded; the graph recomputes it.
    pub(crate) fn from_record(record: &InvoiceRecord) -> Self {
        Self {
            id: record.id,
            invoice_number: record.invoice_number.trim().to_string(),
            total_amount: record.total_amount,
            amount_paid: Decimal::ZERO,
            issued_on: record.issued_on,
            due_on: record.due_on,
        }
    }

    pub(crate) fn to_record(&self, client_id: Option<ClientId>) -> InvoiceRecord {
        InvoiceRecord {
            id: self.id,
            invoice_number: self.invoice_number.clone(),
            issued_on: self.issued_on,
            due_on: self.due_on,
            total_amount: self.total_amount,
            amount_paid: self.amount_paid,
            client_id,
        }
    }

    pub fn id(&self) -> InvoiceId {
        self.id
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn amount_paid(&self) -> Decimal {
        self.amount_paid
    }

    pub fn balance_due(&self) -> Decimal {
        self.total_amount - self.amount_paid
    }

    pub fn payment_status(&self) -> PaymentStatus {
        if self.amount_paid.is_zero() {
            PaymentStatus::Unpaid
        } else if self.amount_paid < self.total_amount {
            PaymentStatus::PartiallyPaid
        } else if self.amount_paid == self.total_amount {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Overpaid
        }
    }

    /// Past due on `today` with an outstanding balance.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_on.is_some_and(|due| due < today) && self.balance_due() > Decimal::ZERO
    }

    pub(crate) fn set_invoice_number(&mut self, number: &str) {
        self.invoice_number = number.trim().to_string();
    }

    pub(crate) fn set_total_amount(&mut self, total: Decimal) {
        self.total_amount = total;
    }

    pub(crate) fn set_amount_paid(&mut self, paid: Decimal) {
        self.amount_paid = paid;
    }
}

/// Money received against an invoice. The paying client is not stored; it
/// is always the current invoice's client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    id: PaymentId,
    amount: Decimal,
    pub paid_on: NaiveDate,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

impl Payment {
    pub(crate) fn from_new(id: PaymentId, new: NewPayment) -> Self {
        Self {
            id,
            amount: new.amount,
            paid_on: new.paid_on,
            method: new.method,
            reference: new.reference,
        }
    }

    pub(crate) fn from_record(record: &PaymentRecord) -> Self {
        Self {
            id: record.id,
            amount: record.amount,
            paid_on: record.paid_on,
            method: record.method,
            reference: record.reference.clone(),
        }
    }

    pub(crate) fn to_record(&self, invoice_id: Option<InvoiceId>) -> PaymentRecord {
        PaymentRecord {
            id: self.id,
            amount: self.amount,
            paid_on: self.paid_on,
            method: self.method,
            reference: self.reference.clone(),
            invoice_id,
        }
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub(crate) fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount;
    }
}
