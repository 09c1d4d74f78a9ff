//! Relationship manager: the only code that writes association indices.
//!
//! Every operation touches both sides of an association in one call and
//! triggers whatever recalculation the change requires. Stale or foreign
//! ids make an operation a no-op that returns `false` (or `None`).

use shared_types::{
    AttorneyId, CaseId, ClientId, DocumentId, EntityRef, EventId, InvoiceId, PaymentId,
    TimeEntryId,
};

use crate::graph::CaseGraph;

impl CaseGraph {
    // ── Case ↔ Client ───────────────────────────────────────────────

    /// Make `client` the owner of `case`, moving the case off any previous
    /// client. Linking an already-linked pair changes nothing.
    #[tracing::instrument(skip(self))]
    pub fn link_case_to_client(&mut self, case: CaseId, client: ClientId) -> bool {
        if !self.cases.contains(&case) || !self.clients.contains(&client) {
            tracing::debug!("stale case or client reference; ignoring link");
            return false;
        }
        self.rel.client_cases.link(client, case);
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn unlink_case_from_client(&mut self, case: CaseId, client: ClientId) -> bool {
        let changed = self.rel.client_cases.unlink(&client, &case);
        if !changed {
            tracing::debug!("case not linked; nothing to unlink");
        }
        changed
    }

    // ── Case ↔ Attorney ─────────────────────────────────────────────

    /// Assign `attorney` to `case`. Set semantics on both sides.
    #[tracing::instrument(skip(self))]
    pub fn link_attorney_to_case(&mut self, attorney: AttorneyId, case: CaseId) -> bool {
        if !self.cases.contains(&case) || !self.attorneys.contains(&attorney) {
            tracing::debug!("stale case or attorney reference; ignoring link");
            return false;
        }
        self.rel.case_attorneys.link(case, attorney);
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn unlink_attorney_from_case(&mut self, attorney: AttorneyId, case: CaseId) -> bool {
        let changed = self.rel.case_attorneys.unlink(&case, &attorney);
        if !changed {
            tracing::debug!("attorney not linked; nothing to unlink");
        }
        changed
    }

    // ── Case ↔ children ─────────────────────────────────────────────

    /// Attach a time entry to `case`, moving it off any other case.
    #[tracing::instrument(skip(self))]
    pub fn attach_time_entry(&mut self, case: CaseId, entry: TimeEntryId) -> bool {
        if !self.cases.contains(&case) || !self.time_entries.contains(&entry) {
            tracing::debug!("stale case or child reference; ignoring attach");
            return false;
        }
        self.rel.case_time_entries.link(case, entry);
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn attach_document(&mut self, case: CaseId, document: DocumentId) -> bool {
        if !self.cases.contains(&case) || !self.documents.contains(&document) {
            tracing::debug!("stale case or child reference; ignoring attach");
            return false;
        }
        self.rel.case_documents.link(case, document);
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn attach_event(&mut self, case: CaseId, event: EventId) -> bool {
        if !self.cases.contains(&case) || !self.events.contains(&event) {
            tracing::debug!("stale case or child reference; ignoring attach");
            return false;
        }
        self.rel.case_events.link(case, event);
        true
    }

    /// Attach any case-owned child by reference. Non-child kinds are
    /// rejected with `false`.
    pub fn attach_child(&mut self, case: CaseId, child: EntityRef) -> bool {
        match child {
            EntityRef::TimeEntry(id) => self.attach_time_entry(case, id),
            EntityRef::Document(id) => self.attach_document(case, id),
            EntityRef::Event(id) => self.attach_event(case, id),
            _ => false,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn detach_time_entry(&mut self, case: CaseId, entry: TimeEntryId) -> bool {
        let changed = self.rel.case_time_entries.unlink(&case, &entry);
        if !changed {
            tracing::debug!("child not linked; nothing to detach");
        }
        changed
    }

    #[tracing::instrument(skip(self))]
    pub fn detach_document(&mut self, case: CaseId, document: DocumentId) -> bool {
        let changed = self.rel.case_documents.unlink(&case, &document);
        if !changed {
            tracing::debug!("child not linked; nothing to detach");
        }
        changed
    }

    #[tracing::instrument(skip(self))]
    pub fn detach_event(&mut self, case: CaseId, event: EventId) -> bool {
        let changed = self.rel.case_events.unlink(&case, &event);
        if !changed {
            tracing::debug!("child not linked; nothing to detach");
        }
        changed
    }

    /// Detach a child from `case`. Returns `false` if the child is not
    /// currently owned by that case.
    pub fn detach_child(&mut self, case: CaseId, child: EntityRef) -> bool {
        match child {
            EntityRef::TimeEntry(id) => self.detach_time_entry(case, id),
            EntityRef::Document(id) => self.detach_document(case, id),
            EntityRef::Event(id) => self.detach_event(case, id),
            _ => false,
        }
    }

    // ── Invoice ↔ Client, Payment ↔ Invoice ─────────────────────────

    /// Bill `invoice` to `client`. Its payments follow, since a payment's
    /// client is always read through its invoice.
    #[tracing::instrument(skip(self))]
    pub fn link_invoice_to_client(&mut self, invoice: InvoiceId, client: ClientId) -> bool {
        if !self.invoices.contains(&invoice) || !self.clients.contains(&client) {
            return false;
        }
        self.rel.client_invoices.link(client, invoice);
        true
    }

    /// Move `payment` onto `invoice`: the old invoice is recalculated
    /// without it, the payment's client becomes the new invoice's client,
    /// and the new invoice is recalculated with it.
    #[tracing::instrument(skip(self))]
    pub fn link_payment_to_invoice(&mut self, payment: PaymentId, invoice: InvoiceId) -> bool {
        if !self.payments.contains(&payment) || !self.invoices.contains(&invoice) {
            tracing::debug!("stale payment or invoice reference; ignoring link");
            return false;
        }
        let previous = self.rel.invoice_payments.link(invoice, payment);
        if let Some(old) = previous {
            self.recalculate_invoice_amount_paid(old);
        }
        self.recalculate_invoice_amount_paid(invoice);
        true
    }

    // ── Removal ─────────────────────────────────────────────────────

    /// Delete a case. Unlinks it from its client and every attorney and
    /// orphans its documents, events and time entries (they stay in the
    /// graph with no owning case). Returns the counterparts touched.
    #[tracing::instrument(skip(self))]
    pub fn delete_case(&mut self, case: CaseId) -> Option<Vec<EntityRef>> {
        let removed = self.cases.remove(&case)?;
        self.case_numbers.release(removed.case_number());

        let mut affected = Vec::new();
        if let Some(client) = self.rel.client_cases.release_child(&case) {
            affected.push(EntityRef::Client(client));
        }
        affected.extend(
            self.rel
                .case_attorneys
                .release_left(&case)
                .into_iter()
                .map(EntityRef::Attorney),
        );
        affected.extend(
            self.rel
                .case_documents
                .release_parent(&case)
                .into_iter()
                .map(EntityRef::Document),
        );
        affected.extend(
            self.rel
                .case_events
                .release_parent(&case)
                .into_iter()
                .map(EntityRef::Event),
        );
        affected.extend(
            self.rel
                .case_time_entries
                .release_parent(&case)
                .into_iter()
                .map(EntityRef::TimeEntry),
        );
        tracing::info!(affected = affected.len(), "case deleted");
        Some(affected)
    }

    /// Delete an invoice, orphaning its payments and unlinking it from its
    /// client.
    #[tracing::instrument(skip(self))]
    pub fn delete_invoice(&mut self, invoice: InvoiceId) -> Option<Vec<EntityRef>> {
        let removed = self.invoices.remove(&invoice)?;
        self.invoice_numbers.release(removed.invoice_number());

        let mut affected = Vec::new();
        if let Some(client) = self.rel.client_invoices.release_child(&invoice) {
            affected.push(EntityRef::Client(client));
        }
        affected.extend(
            self.rel
                .invoice_payments
                .release_parent(&invoice)
                .into_iter()
                .map(EntityRef::Payment),
        );
        tracing::info!(affected = affected.len(), "invoice deleted");
        Some(affected)
    }

    /// Delete a client together with its cases and invoices.
    #[tracing::instrument(skip(self))]
    pub fn delete_client(&mut self, client: ClientId) -> Option<Vec<EntityRef>> {
        if !self.clients.contains(&client) {
            return None;
        }
        let mut affected = Vec::new();
        for case in self.client_cases(client).to_vec() {
            if let Some(touched) = self.delete_case(case) {
                affected.push(EntityRef::Case(case));
                affected.extend(touched.into_iter().filter(|r| *r != EntityRef::Client(client)));
            }
        }
        for invoice in self.client_invoices(client).to_vec() {
            if let Some(touched) = self.delete_invoice(invoice) {
                affected.push(EntityRef::Invoice(invoice));
                affected.extend(touched.into_iter().filter(|r| *r != EntityRef::Client(client)));
            }
        }
        if let Some(removed) = self.clients.remove(&client) {
            self.client_numbers.release(removed.client_number());
        }
        dedup_in_order(&mut affected);
        Some(affected)
    }

    /// Delete an attorney, unlinking them from every case.
    #[tracing::instrument(skip(self))]
    pub fn delete_attorney(&mut self, attorney: AttorneyId) -> Option<Vec<EntityRef>> {
        let removed = self.attorneys.remove(&attorney)?;
        self.attorney_numbers.release(removed.attorney_number());
        let cases = self.rel.case_attorneys.release_right(&attorney);
        Some(cases.into_iter().map(EntityRef::Case).collect())
    }

    /// Erase a payment and refresh its invoice's `amount_paid`.
    #[tracing::instrument(skip(self))]
    pub fn remove_payment(&mut self, payment: PaymentId) -> bool {
        if self.payments.remove(&payment).is_none() {
            return false;
        }
        if let Some(invoice) = self.rel.invoice_payments.release_child(&payment) {
            self.recalculate_invoice_amount_paid(invoice);
        }
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn remove_time_entry(&mut self, entry: TimeEntryId) -> bool {
        if self.time_entries.remove(&entry).is_none() {
            return false;
        }
        self.rel.case_time_entries.release_child(&entry);
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn remove_document(&mut self, document: DocumentId) -> bool {
        if self.documents.remove(&document).is_none() {
            return false;
        }
        self.rel.case_documents.release_child(&document);
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn remove_event(&mut self, event: EventId) -> bool {
        if self.events.remove(&event).is_none() {
            return false;
        }
        self.rel.case_events.release_child(&event);
        true
    }
}

fn dedup_in_order(refs: &mut Vec<EntityRef>) {
    let mut seen = std::collections::HashSet::new();
    refs.retain(|r| seen.insert(*r));
}
