//! List-screen projections of the graph.
//!
//! Each builder returns a [`Listing`] whose first column is the entity's
//! business key (or its date for entities without one), with associations
//! and aggregates already resolved to display values.

use shared_types::{row, CaseId, CellValue, Listing};

use crate::graph::CaseGraph;

pub const CLIENT_COLUMNS: &[&str] = &[
    "Client No.",
    "Name",
    "Type",
    "Email",
    "Phone",
    "Cases",
    "Outstanding",
];

pub const ATTORNEY_COLUMNS: &[&str] = &[
    "Attorney No.",
    "Name",
    "Specialization",
    "Hourly Rate",
    "Cases",
];

pub const CASE_COLUMNS: &[&str] = &[
    "Case No.",
    "Title",
    "Client",
    "Status",
    "Opened",
    "Attorneys",
    "Total Hours",
];

pub const INVOICE_COLUMNS: &[&str] = &[
    "Invoice No.",
    "Client",
    "Issued",
    "Due",
    "Total",
    "Paid",
    "Balance",
    "Status",
];

pub const PAYMENT_COLUMNS: &[&str] = &["Paid On", "Invoice No.", "Client", "Amount", "Method", "Reference"];

pub const TIME_ENTRY_COLUMNS: &[&str] = &["Date", "Description", "Hours", "Rate", "Amount"];

fn count(n: usize) -> CellValue {
    CellValue::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}

impl CaseGraph {
    pub fn client_rows(&self) -> Listing {
        let mut listing = Listing::new(CLIENT_COLUMNS);
        for client in self.clients() {
            listing.push(row![
                client.client_number(),
                client.name.as_str(),
                client.client_type.as_str(),
                client.email.clone(),
                client.phone.clone(),
                count(self.client_cases(client.id()).len()),
                self.compute_client_outstanding_balance(client.id()),
            ]);
        }
        listing
    }

    pub fn attorney_rows(&self) -> Listing {
        let mut listing = Listing::new(ATTORNEY_COLUMNS);
        for attorney in self.attorneys() {
            listing.push(row![
                attorney.attorney_number(),
                attorney.full_name(),
                attorney.specialization.as_str(),
                attorney.hourly_rate,
                count(self.attorney_cases(attorney.id()).len()),
            ]);
        }
        listing
    }

    /// Cases with their client's name and the names of assigned attorneys.
    pub fn case_rows(&self) -> Listing {
        let mut listing = Listing::new(CASE_COLUMNS);
        for case in self.cases() {
            let client = self
                .case_client(case.id())
                .and_then(|id| self.client(id))
                .map(|c| c.name.clone());
            let attorneys = self
                .case_attorneys(case.id())
                .iter()
                .filter_map(|id| self.attorney(*id))
                .map(|a| a.full_name())
                .collect::<Vec<_>>()
                .join(", ");
            listing.push(row![
                case.case_number(),
                case.title.as_str(),
                client,
                case.status.as_str(),
                case.opened_on,
                attorneys,
                self.compute_case_total_hours(case.id()),
            ]);
        }
        listing
    }

    pub fn invoice_rows(&self) -> Listing {
        let mut listing = Listing::new(INVOICE_COLUMNS);
        for invoice in self.invoices() {
            let client = self
                .invoice_client(invoice.id())
                .and_then(|id| self.client(id))
                .map(|c| c.name.clone());
            listing.push(row![
                invoice.invoice_number(),
                client,
                invoice.issued_on,
                invoice.due_on,
                invoice.total_amount(),
                invoice.amount_paid(),
                invoice.balance_due(),
                invoice.payment_status().as_str(),
            ]);
        }
        listing
    }

    /// Payments with the invoice number and the client derived from it.
    pub fn payment_rows(&self) -> Listing {
        let mut listing = Listing::new(PAYMENT_COLUMNS);
        for payment in self.payments() {
            let invoice = self
                .payment_invoice(payment.id())
                .and_then(|id| self.invoice(id))
                .map(|i| i.invoice_number().to_string());
            let client = self
                .payment_client(payment.id())
                .and_then(|id| self.client(id))
                .map(|c| c.name.clone());
            listing.push(row![
                payment.paid_on,
                invoice,
                client,
                payment.amount(),
                payment.method.as_str(),
                payment.reference.clone(),
            ]);
        }
        listing
    }

    /// Time entries of one case; an unknown case yields an empty listing.
    pub fn time_entry_rows(&self, case: CaseId) -> Listing {
        let mut listing = Listing::new(TIME_ENTRY_COLUMNS);
        for entry in self
            .case_time_entries(case)
            .iter()
            .filter_map(|id| self.time_entry(*id))
        {
            listing.push(row![
                entry.worked_on,
                entry.description.as_str(),
                entry.hours(),
                entry.rate(),
                entry.billable_amount(),
            ]);
        }
        listing
    }
}
