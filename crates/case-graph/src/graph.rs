use rust_decimal::Decimal;
use shared_types::{
    AppError, AttorneyId, CaseId, ClientId, DocumentId, EventId, GraphSettings, InvoiceId,
    NewAttorney, NewCase, NewClient, NewDocument, NewEvent, NewInvoice, NewPayment,
    NewTimeEntry, PaymentId, TimeEntryId,
};
use validator::Validate;

use crate::entity::{Attorney, Case, Client, Document, Event, Invoice, Payment, TimeEntry};
use crate::relations::Relations;
use crate::store::{Arena, UniqueIndex};

/// The in-memory entity graph of one firm.
///
/// Entities live in per-type arenas keyed by id; every association lives in
/// [`Relations`]. All writes go through `&mut self` methods, so each
/// relationship change and its recalculation complete before any reader
/// can observe the graph again.
#[derive(Debug, Clone)]
pub struct CaseGraph {
    pub(crate) settings: GraphSettings,
    pub(crate) clients: Arena<ClientId, Client>,
    pub(crate) attorneys: Arena<AttorneyId, Attorney>,
    pub(crate) cases: Arena<CaseId, Case>,
    pub(crate) time_entries: Arena<TimeEntryId, TimeEntry>,
    pub(crate) documents: Arena<DocumentId, Document>,
    pub(crate) events: Arena<EventId, Event>,
    pub(crate) invoices: Arena<InvoiceId, Invoice>,
    pub(crate) payments: Arena<PaymentId, Payment>,
    pub(crate) rel: Relations,
    pub(crate) client_numbers: UniqueIndex<ClientId>,
    pub(crate) attorney_numbers: UniqueIndex<AttorneyId>,
    pub(crate) case_numbers: UniqueIndex<CaseId>,
    pub(crate) invoice_numbers: UniqueIndex<InvoiceId>,
}

impl Default for CaseGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CaseGraph {
    pub fn new() -> Self {
        Self::with_settings(GraphSettings::default())
    }

    pub fn with_settings(settings: GraphSettings) -> Self {
        Self {
            settings,
            clients: Arena::new(),
            attorneys: Arena::new(),
            cases: Arena::new(),
            time_entries: Arena::new(),
            documents: Arena::new(),
            events: Arena::new(),
            invoices: Arena::new(),
            payments: Arena::new(),
            rel: Relations::new(),
            client_numbers: UniqueIndex::new("client number"),
            attorney_numbers: UniqueIndex::new("attorney number"),
            case_numbers: UniqueIndex::new("case number"),
            invoice_numbers: UniqueIndex::new("invoice number"),
        }
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    // ── Validation ──────────────────────────────────────────────────

    /// Check a monetary amount against the graph settings.
    pub(crate) fn check_amount(
        &self,
        field: &str,
        amount: Decimal,
        allow_zero: bool,
    ) -> Result<(), AppError> {
        check_amount_in(&self.settings, field, amount, allow_zero)
    }

    pub(crate) fn check_payment_amount(&self, field: &str, amount: Decimal) -> Result<(), AppError> {
        self.check_amount(field, amount, self.settings.allow_zero_payments)
    }

    pub(crate) fn check_hours(&self, field: &str, hours: Decimal) -> Result<(), AppError> {
        if hours.is_sign_negative() && !hours.is_zero() {
            return Err(AppError::invalid_field(field, "Hours must not be negative"));
        }
        if hours > self.settings.max_hours {
            return Err(AppError::invalid_field(
                field,
                format!("Hours must not exceed {}", self.settings.max_hours),
            ));
        }
        if hours.scale() > self.settings.max_amount_scale {
            return Err(AppError::invalid_field(
                field,
                format!(
                    "Hours have more than {} decimal places",
                    self.settings.max_amount_scale
                ),
            ));
        }
        Ok(())
    }

    fn require_key(field: &str, key: &str) -> Result<(), AppError> {
        if key.trim().is_empty() {
            return Err(AppError::invalid_field(field, format!("{} is required", field)));
        }
        Ok(())
    }

    // ── Factories ───────────────────────────────────────────────────

    #[tracing::instrument(skip(self, new), fields(client_number = %new.client_number))]
    pub fn add_client(&mut self, new: NewClient) -> Result<ClientId, AppError> {
        new.validate()?;
        Self::require_key("client_number", &new.client_number)?;
        let id = ClientId::new();
        self.client_numbers.claim(&new.client_number, id)?;
        self.clients.insert(id, Client::from_new(id, new));
        Ok(id)
    }

    #[tracing::instrument(skip(self, new), fields(attorney_number = %new.attorney_number))]
    pub fn add_attorney(&mut self, new: NewAttorney) -> Result<AttorneyId, AppError> {
        new.validate()?;
        Self::require_key("attorney_number", &new.attorney_number)?;
        self.check_amount("hourly_rate", new.hourly_rate, true)?;
        let id = AttorneyId::new();
        self.attorney_numbers.claim(&new.attorney_number, id)?;
        self.attorneys.insert(id, Attorney::from_new(id, new));
        Ok(id)
    }

    /// Open a case for an existing client.
    #[tracing::instrument(skip(self, new), fields(case_number = %new.case_number))]
    pub fn add_case(&mut self, new: NewCase) -> Result<CaseId, AppError> {
        new.validate()?;
        Self::require_key("case_number", &new.case_number)?;
        let client_id = new.client_id;
        if !self.clients.contains(&client_id) {
            return Err(AppError::not_found(format!("client {} not found", client_id)));
        }
        let id = CaseId::new();
        self.case_numbers.claim(&new.case_number, id)?;
        self.cases.insert(id, Case::from_new(id, new));
        self.rel.client_cases.link(client_id, id);
        Ok(id)
    }

    /// Create an unattached time entry; see [`CaseGraph::attach_time_entry`].
    pub fn add_time_entry(&mut self, new: NewTimeEntry) -> Result<TimeEntryId, AppError> {
        new.validate()?;
        self.check_hours("hours", new.hours)?;
        if let Some(rate) = new.rate {
            self.check_amount("rate", rate, true)?;
        }
        let id = TimeEntryId::new();
        self.time_entries.insert(id, TimeEntry::from_new(id, new));
        Ok(id)
    }

    pub fn add_document(&mut self, new: NewDocument) -> Result<DocumentId, AppError> {
        new.validate()?;
        let id = DocumentId::new();
        self.documents.insert(id, Document::from_new(id, new));
        Ok(id)
    }

    pub fn add_event(&mut self, new: NewEvent) -> Result<EventId, AppError> {
        new.validate()?;
        let id = EventId::new();
        self.events.insert(id, Event::from_new(id, new));
        Ok(id)
    }

    /// Issue an invoice to an existing client.
    #[tracing::instrument(skip(self, new), fields(invoice_number = %new.invoice_number))]
    pub fn add_invoice(&mut self, new: NewInvoice) -> Result<InvoiceId, AppError> {
        new.validate()?;
        Self::require_key("invoice_number", &new.invoice_number)?;
        self.check_amount("total_amount", new.total_amount, true)?;
        let client_id = new.client_id;
        if !self.clients.contains(&client_id) {
            return Err(AppError::not_found(format!("client {} not found", client_id)));
        }
        let id = InvoiceId::new();
        self.invoice_numbers.claim(&new.invoice_number, id)?;
        self.invoices.insert(id, Invoice::from_new(id, new));
        self.rel.client_invoices.link(client_id, id);
        Ok(id)
    }

    /// Record a payment against an existing invoice and refresh the
    /// invoice's `amount_paid`.
    #[tracing::instrument(skip(self, new), fields(invoice = %new.invoice_id, amount = %new.amount))]
    pub fn add_payment(&mut self, new: NewPayment) -> Result<PaymentId, AppError> {
        new.validate()?;
        self.check_payment_amount("amount", new.amount)?;
        let invoice_id = new.invoice_id;
        if !self.invoices.contains(&invoice_id) {
            return Err(AppError::not_found(format!("invoice {} not found", invoice_id)));
        }
        let id = PaymentId::new();
        self.payments.insert(id, Payment::from_new(id, new));
        self.rel.invoice_payments.link(invoice_id, id);
        self.recalculate_invoice_amount_paid(invoice_id);
        Ok(id)
    }

    // ── Entity lookups ──────────────────────────────────────────────

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn attorney(&self, id: AttorneyId) -> Option<&Attorney> {
        self.attorneys.get(&id)
    }

    pub fn case(&self, id: CaseId) -> Option<&Case> {
        self.cases.get(&id)
    }

    pub fn time_entry(&self, id: TimeEntryId) -> Option<&TimeEntry> {
        self.time_entries.get(&id)
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    pub fn invoice(&self, id: InvoiceId) -> Option<&Invoice> {
        self.invoices.get(&id)
    }

    pub fn payment(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.get(&id)
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> + '_ {
        self.clients.values()
    }

    pub fn attorneys(&self) -> impl Iterator<Item = &Attorney> + '_ {
        self.attorneys.values()
    }

    pub fn cases(&self) -> impl Iterator<Item = &Case> + '_ {
        self.cases.values()
    }

    pub fn time_entries(&self) -> impl Iterator<Item = &TimeEntry> + '_ {
        self.time_entries.values()
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ {
        self.documents.values()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.values()
    }

    pub fn invoices(&self) -> impl Iterator<Item = &Invoice> + '_ {
        self.invoices.values()
    }

    pub fn payments(&self) -> impl Iterator<Item = &Payment> + '_ {
        self.payments.values()
    }

    pub fn find_client_by_number(&self, number: &str) -> Option<&Client> {
        self.client_numbers.lookup(number).and_then(|id| self.client(id))
    }

    pub fn find_attorney_by_number(&self, number: &str) -> Option<&Attorney> {
        self.attorney_numbers.lookup(number).and_then(|id| self.attorney(id))
    }

    pub fn find_case_by_number(&self, number: &str) -> Option<&Case> {
        self.case_numbers.lookup(number).and_then(|id| self.case(id))
    }

    pub fn find_invoice_by_number(&self, number: &str) -> Option<&Invoice> {
        self.invoice_numbers.lookup(number).and_then(|id| self.invoice(id))
    }

    // ── Association queries (read-only views) ───────────────────────

    pub fn client_cases(&self, client: ClientId) -> &[CaseId] {
        self.rel.client_cases.children(&client)
    }

    pub fn case_client(&self, case: CaseId) -> Option<ClientId> {
        self.rel.client_cases.parent(&case)
    }

    pub fn case_attorneys(&self, case: CaseId) -> &[AttorneyId] {
        self.rel.case_attorneys.rights_of(&case)
    }

    pub fn attorney_cases(&self, attorney: AttorneyId) -> &[CaseId] {
        self.rel.case_attorneys.lefts_of(&attorney)
    }

    pub fn case_time_entries(&self, case: CaseId) -> &[TimeEntryId] {
        self.rel.case_time_entries.children(&case)
    }

    pub fn case_documents(&self, case: CaseId) -> &[DocumentId] {
        self.rel.case_documents.children(&case)
    }

    pub fn case_events(&self, case: CaseId) -> &[EventId] {
        self.rel.case_events.children(&case)
    }

    pub fn time_entry_case(&self, entry: TimeEntryId) -> Option<CaseId> {
        self.rel.case_time_entries.parent(&entry)
    }

    pub fn document_case(&self, document: DocumentId) -> Option<CaseId> {
        self.rel.case_documents.parent(&document)
    }

    pub fn event_case(&self, event: EventId) -> Option<CaseId> {
        self.rel.case_events.parent(&event)
    }

    pub fn client_invoices(&self, client: ClientId) -> &[InvoiceId] {
        self.rel.client_invoices.children(&client)
    }

    pub fn invoice_client(&self, invoice: InvoiceId) -> Option<ClientId> {
        self.rel.client_invoices.parent(&invoice)
    }

    pub fn invoice_payments(&self, invoice: InvoiceId) -> &[PaymentId] {
        self.rel.invoice_payments.children(&invoice)
    }

    pub fn payment_invoice(&self, payment: PaymentId) -> Option<InvoiceId> {
        self.rel.invoice_payments.parent(&payment)
    }

    /// The paying client, derived from the payment's current invoice.
    pub fn payment_client(&self, payment: PaymentId) -> Option<ClientId> {
        self.payment_invoice(payment)
            .and_then(|invoice| self.invoice_client(invoice))
    }

    // ── Attribute updates ───────────────────────────────────────────

    /// Edit a client's plain attributes.
    pub fn update_client(
        &mut self,
        id: ClientId,
        edit: impl FnOnce(&mut Client),
    ) -> Result<(), AppError> {
        let client = self
            .clients
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("client {} not found", id)))?;
        edit(client);
        Ok(())
    }

    /// Edit an attorney's plain attributes. An invalid hourly rate is
    /// rejected and the edit rolled back.
    pub fn update_attorney(
        &mut self,
        id: AttorneyId,
        edit: impl FnOnce(&mut Attorney),
    ) -> Result<(), AppError> {
        let settings = &self.settings;
        let attorney = self
            .attorneys
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("attorney {} not found", id)))?;
        let before = attorney.clone();
        edit(attorney);
        if let Err(err) = check_amount_in(settings, "hourly_rate", attorney.hourly_rate, true) {
            *attorney = before;
            return Err(err);
        }
        Ok(())
    }

    pub fn update_case(
        &mut self,
        id: CaseId,
        edit: impl FnOnce(&mut Case),
    ) -> Result<(), AppError> {
        let case = self
            .cases
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("case {} not found", id)))?;
        edit(case);
        Ok(())
    }

    pub fn update_document(
        &mut self,
        id: DocumentId,
        edit: impl FnOnce(&mut Document),
    ) -> Result<(), AppError> {
        let document = self
            .documents
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("document {} not found", id)))?;
        edit(document);
        Ok(())
    }

    pub fn update_event(
        &mut self,
        id: EventId,
        edit: impl FnOnce(&mut Event),
    ) -> Result<(), AppError> {
        let event = self
            .events
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("event {} not found", id)))?;
        edit(event);
        Ok(())
    }

    /// Edit an invoice's dates. Totals go through [`CaseGraph::set_invoice_total`].
    pub fn update_invoice(
        &mut self,
        id: InvoiceId,
        edit: impl FnOnce(&mut Invoice),
    ) -> Result<(), AppError> {
        let invoice = self
            .invoices
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("invoice {} not found", id)))?;
        edit(invoice);
        Ok(())
    }

    /// Edit a payment's date, method or reference. Amounts go through
    /// [`CaseGraph::set_payment_amount`].
    pub fn update_payment(
        &mut self,
        id: PaymentId,
        edit: impl FnOnce(&mut Payment),
    ) -> Result<(), AppError> {
        let payment = self
            .payments
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("payment {} not found", id)))?;
        edit(payment);
        Ok(())
    }

    pub fn update_time_entry(
        &mut self,
        id: TimeEntryId,
        edit: impl FnOnce(&mut TimeEntry),
    ) -> Result<(), AppError> {
        let entry = self
            .time_entries
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("time entry {} not found", id)))?;
        edit(entry);
        Ok(())
    }

    /// Change a payment's amount and refresh its invoice's `amount_paid`.
    #[tracing::instrument(skip(self))]
    pub fn set_payment_amount(&mut self, id: PaymentId, amount: Decimal) -> Result<(), AppError> {
        self.check_payment_amount("amount", amount)?;
        let payment = self
            .payments
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("payment {} not found", id)))?;
        payment.set_amount(amount);
        if let Some(invoice) = self.payment_invoice(id) {
            self.recalculate_invoice_amount_paid(invoice);
        }
        Ok(())
    }

    pub fn set_invoice_total(&mut self, id: InvoiceId, total: Decimal) -> Result<(), AppError> {
        self.check_amount("total_amount", total, true)?;
        let invoice = self
            .invoices
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("invoice {} not found", id)))?;
        invoice.set_total_amount(total);
        Ok(())
    }

    /// Change the hours on a time entry. Case totals are computed on
    /// query, so the next read reflects the change.
    pub fn set_time_entry_hours(&mut self, id: TimeEntryId, hours: Decimal) -> Result<(), AppError> {
        self.check_hours("hours", hours)?;
        let entry = self
            .time_entries
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("time entry {} not found", id)))?;
        entry.set_hours(hours);
        Ok(())
    }

    pub fn set_time_entry_rate(
        &mut self,
        id: TimeEntryId,
        rate: Option<Decimal>,
    ) -> Result<(), AppError> {
        if let Some(rate) = rate {
            self.check_amount("rate", rate, true)?;
        }
        let entry = self
            .time_entries
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("time entry {} not found", id)))?;
        entry.set_rate(rate);
        Ok(())
    }

    // ── Business-key changes ────────────────────────────────────────

    pub fn rename_client(&mut self, id: ClientId, number: &str) -> Result<(), AppError> {
        Self::require_key("client_number", number)?;
        let old = self
            .client(id)
            .map(|c| c.client_number().to_string())
            .ok_or_else(|| AppError::not_found(format!("client {} not found", id)))?;
        self.client_numbers.check(number, id)?;
        self.client_numbers.release(&old);
        self.client_numbers.claim(number, id)?;
        if let Some(client) = self.clients.get_mut(&id) {
            client.set_client_number(number);
        }
        Ok(())
    }

    pub fn rename_attorney(&mut self, id: AttorneyId, number: &str) -> Result<(), AppError> {
        Self::require_key("attorney_number", number)?;
        let old = self
            .attorney(id)
            .map(|a| a.attorney_number().to_string())
            .ok_or_else(|| AppError::not_found(format!("attorney {} not found", id)))?;
        self.attorney_numbers.check(number, id)?;
        self.attorney_numbers.release(&old);
        self.attorney_numbers.claim(number, id)?;
        if let Some(attorney) = self.attorneys.get_mut(&id) {
            attorney.set_attorney_number(number);
        }
        Ok(())
    }

    pub fn rename_case(&mut self, id: CaseId, number: &str) -> Result<(), AppError> {
        Self::require_key("case_number", number)?;
        let old = self
            .case(id)
            .map(|c| c.case_number().to_string())
            .ok_or_else(|| AppError::not_found(format!("case {} not found", id)))?;
        self.case_numbers.check(number, id)?;
        self.case_numbers.release(&old);
        self.case_numbers.claim(number, id)?;
        if let Some(case) = self.cases.get_mut(&id) {
            case.set_case_number(number);
        }
        Ok(())
    }

    pub fn rename_invoice(&mut self, id: InvoiceId, number: &str) -> Result<(), AppError> {
        Self::require_key("invoice_number", number)?;
        let old = self
            .invoice(id)
            .map(|i| i.invoice_number().to_string())
            .ok_or_else(|| AppError::not_found(format!("invoice {} not found", id)))?;
        self.invoice_numbers.check(number, id)?;
        self.invoice_numbers.release(&old);
        self.invoice_numbers.claim(number, id)?;
        if let Some(invoice) = self.invoices.get_mut(&id) {
            invoice.set_invoice_number(number);
        }
        Ok(())
    }
}

/// Amounts are non-negative, within `max_amount` and at most
/// `max_amount_scale` decimal places. The bound keeps every aggregate sum
/// far inside `Decimal` range.
fn check_amount_in(
    settings: &GraphSettings,
    field: &str,
    amount: Decimal,
    allow_zero: bool,
) -> Result<(), AppError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::invalid_field(field, "Amount must not be negative"));
    }
    if amount.is_zero() && !allow_zero {
        return Err(AppError::invalid_field(field, "Amount must be greater than 0"));
    }
    if amount > settings.max_amount {
        return Err(AppError::invalid_field(
            field,
            format!("Amount must not exceed {}", settings.max_amount),
        ));
    }
    if amount.scale() > settings.max_amount_scale {
        return Err(AppError::invalid_field(
            field,
            format!(
                "Amount has more than {} decimal places",
                settings.max_amount_scale
            ),
        ));
    }
    Ok(())
}
