//! Aggregate recalculation.
//!
//! All arithmetic is exact `Decimal`; nothing here can fail.

use rust_decimal::Decimal;
use shared_types::{CaseId, ClientId, EntityRef, InvoiceId};

use crate::graph::CaseGraph;

impl CaseGraph {
    /// Recompute `amount_paid` for `invoice` from its current payments.
    /// Returns `false` if the invoice does not exist.
    pub fn recalculate_invoice_amount_paid(&mut self, invoice: InvoiceId) -> bool {
        let total = self
            .rel
            .invoice_payments
            .children(&invoice)
            .iter()
            .filter_map(|id| self.payments.get(id))
            .fold(Decimal::ZERO, |acc, payment| acc.saturating_add(payment.amount()));
        match self.invoices.get_mut(&invoice) {
            Some(entry) => {
                entry.set_amount_paid(total);
                tracing::debug!(%invoice, amount_paid = %total, "invoice recalculated");
                true
            }
            None => false,
        }
    }

    /// Sum of hours over the case's current time entries. Zero for a case
    /// with no entries or an unknown case.
    pub fn compute_case_total_hours(&self, case: CaseId) -> Decimal {
        self.case_time_entries(case)
            .iter()
            .filter_map(|id| self.time_entries.get(id))
            .fold(Decimal::ZERO, |acc, entry| acc.saturating_add(entry.hours()))
    }

    /// Sum of `hours × rate` over the case's time entries that carry a rate.
    pub fn compute_case_billable_amount(&self, case: CaseId) -> Decimal {
        self.case_time_entries(case)
            .iter()
            .filter_map(|id| self.time_entries.get(id))
            .filter_map(|entry| entry.billable_amount())
            .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
    }

    /// Outstanding balance across all of a client's invoices.
    pub fn compute_client_outstanding_balance(&self, client: ClientId) -> Decimal {
        self.client_invoices(client)
            .iter()
            .filter_map(|id| self.invoices.get(id))
            .fold(Decimal::ZERO, |acc, invoice| acc.saturating_add(invoice.balance_due()))
    }

    /// Explicit recalculation for bulk-load scenarios.
    ///
    /// Invoices are recomputed from their payments; a client recomputes all
    /// of its invoices; a payment recomputes its invoice. Other entities
    /// have no stored aggregates, and the call returns `false`.
    pub fn recalculate(&mut self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Invoice(id) => self.recalculate_invoice_amount_paid(id),
            EntityRef::Client(id) => {
                if !self.clients.contains(&id) {
                    return false;
                }
                for invoice in self.client_invoices(id).to_vec() {
                    self.recalculate_invoice_amount_paid(invoice);
                }
                true
            }
            EntityRef::Payment(id) => match self.payment_invoice(id) {
                Some(invoice) => self.recalculate_invoice_amount_paid(invoice),
                None => false,
            },
            _ => false,
        }
    }

    /// Recompute every invoice in the graph.
    pub fn recalculate_all(&mut self) {
        for invoice in self.invoices.ids().to_vec() {
            self.recalculate_invoice_amount_paid(invoice);
        }
    }
}
