//! Loading a graph from flat records and saving it back.
//!
//! Import validates the whole record set up front and either builds a
//! complete graph or returns one `ValidationError` listing every problem.
//! Nothing is repaired and nothing is partially loaded.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use shared_types::{
    AppError, ClientId, GraphRecords, GraphSettings, InvoiceId, NewAttorney, NewCase, NewClient,
    NewDocument, NewEvent,
};
use validator::Validate;

use crate::entity::{Attorney, Case, Client, Document, Event, Invoice, Payment, TimeEntry};
use crate::graph::CaseGraph;

/// Collects per-record problems keyed by `collection[index].field`.
struct Problems(HashMap<String, String>);

impl Problems {
    fn new() -> Self {
        Self(HashMap::new())
    }

    fn add(&mut self, collection: &str, index: usize, field: &str, message: impl Into<String>) {
        self.0
            .entry(format!("{}[{}].{}", collection, index, field))
            .or_insert_with(|| message.into());
    }

    fn add_error(&mut self, collection: &str, index: usize, err: AppError) {
        if err.field_errors.is_empty() {
            self.add(collection, index, "record", err.message);
        } else {
            for (field, message) in err.field_errors {
                self.add(collection, index, &field, message);
            }
        }
    }
}

fn check_unique_ids<K: Eq + Hash>(
    problems: &mut Problems,
    collection: &str,
    ids: impl Iterator<Item = K>,
) -> HashSet<K> {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if !seen.insert(id) {
            problems.add(collection, index, "id", "duplicate id");
        }
    }
    seen
}

fn check_unique_keys<'a>(
    problems: &mut Problems,
    collection: &str,
    field: &str,
    keys: impl Iterator<Item = &'a str>,
) {
    let mut seen = HashSet::new();
    for (index, key) in keys.enumerate() {
        let key = key.trim();
        if key.is_empty() {
            problems.add(collection, index, field, format!("{} is required", field));
        } else if !seen.insert(key.to_string()) {
            problems.add(collection, index, field, format!("duplicate {} '{}'", field, key));
        }
    }
}

/// Apply the field rules of the matching `New*` request to one record.
fn check_fields(problems: &mut Problems, collection: &str, index: usize, request: impl Validate) {
    if let Err(errors) = request.validate() {
        problems.add_error(collection, index, errors.into());
    }
}

fn check_parent<K: Eq + Hash>(
    problems: &mut Problems,
    collection: &str,
    index: usize,
    field: &str,
    parent: Option<&K>,
    known: &HashSet<K>,
) {
    match parent {
        None => problems.add(collection, index, field, "missing owner reference"),
        Some(id) if !known.contains(id) => {
            problems.add(collection, index, field, "references an unknown record")
        }
        Some(_) => {}
    }
}

impl CaseGraph {
    /// Build a graph from a record set supplied by the data-access layer.
    ///
    /// Every owned record must name an existing owner: cases a client, time
    /// entries / documents / events a case, invoices a client, payments an
    /// invoice. Ids and business keys must be unique. Names, titles, emails,
    /// amounts and hours must pass the same checks as the graph's factories.
    /// `amount_paid` values in the records are ignored and recomputed from
    /// payments.
    #[tracing::instrument(skip(records, settings), fields(cases = records.cases.len(), payments = records.payments.len()))]
    pub fn import(records: &GraphRecords, settings: GraphSettings) -> Result<Self, AppError> {
        let mut graph = CaseGraph::with_settings(settings);
        let mut problems = Problems::new();

        let client_ids = check_unique_ids(&mut problems, "clients", records.clients.iter().map(|r| r.id));
        let attorney_ids =
            check_unique_ids(&mut problems, "attorneys", records.attorneys.iter().map(|r| r.id));
        let case_ids = check_unique_ids(&mut problems, "cases", records.cases.iter().map(|r| r.id));
        check_unique_ids(&mut problems, "time_entries", records.time_entries.iter().map(|r| r.id));
        check_unique_ids(&mut problems, "documents", records.documents.iter().map(|r| r.id));
        check_unique_ids(&mut problems, "events", records.events.iter().map(|r| r.id));
        let invoice_ids: HashSet<InvoiceId> =
            check_unique_ids(&mut problems, "invoices", records.invoices.iter().map(|r| r.id));
        check_unique_ids(&mut problems, "payments", records.payments.iter().map(|r| r.id));

        check_unique_keys(
            &mut problems,
            "clients",
            "client_number",
            records.clients.iter().map(|r| r.client_number.as_str()),
        );
        check_unique_keys(
            &mut problems,
            "attorneys",
            "attorney_number",
            records.attorneys.iter().map(|r| r.attorney_number.as_str()),
        );
        check_unique_keys(
            &mut problems,
            "cases",
            "case_number",
            records.cases.iter().map(|r| r.case_number.as_str()),
        );
        check_unique_keys(
            &mut problems,
            "invoices",
            "invoice_number",
            records.invoices.iter().map(|r| r.invoice_number.as_str()),
        );

        for (i, r) in records.clients.iter().enumerate() {
            let request = NewClient {
                client_number: r.client_number.clone(),
                name: r.name.clone(),
                client_type: r.client_type,
                email: r.email.clone(),
                phone: r.phone.clone(),
            };
            check_fields(&mut problems, "clients", i, request);
        }
        for (i, r) in records.attorneys.iter().enumerate() {
            let request = NewAttorney {
                attorney_number: r.attorney_number.clone(),
                first_name: r.first_name.clone(),
                last_name: r.last_name.clone(),
                specialization: r.specialization.clone(),
                hourly_rate: r.hourly_rate,
                email: r.email.clone(),
            };
            check_fields(&mut problems, "attorneys", i, request);
            if let Err(err) = graph.check_amount("hourly_rate", r.hourly_rate, true) {
                problems.add_error("attorneys", i, err);
            }
        }
        for (i, r) in records.cases.iter().enumerate() {
            check_parent(&mut problems, "cases", i, "client_id", r.client_id.as_ref(), &client_ids);
            // Field rules never look at the owner, which check_parent covers.
            let request = NewCase {
                client_id: r.client_id.unwrap_or_else(ClientId::new),
                case_number: r.case_number.clone(),
                title: r.title.clone(),
                description: r.description.clone(),
                status: r.status.clone(),
                opened_on: r.opened_on,
            };
            check_fields(&mut problems, "cases", i, request);
            let mut assigned = HashSet::new();
            for attorney in &r.attorney_ids {
                if !attorney_ids.contains(attorney) {
                    problems.add("cases", i, "attorney_ids", "references an unknown attorney");
                } else if !assigned.insert(*attorney) {
                    problems.add("cases", i, "attorney_ids", "attorney listed twice");
                }
            }
        }
        for (i, r) in records.time_entries.iter().enumerate() {
            check_parent(&mut problems, "time_entries", i, "case_id", r.case_id.as_ref(), &case_ids);
            if let Err(err) = graph.check_hours("hours", r.hours) {
                problems.add_error("time_entries", i, err);
            }
            if let Some(rate) = r.rate {
                if let Err(err) = graph.check_amount("rate", rate, true) {
                    problems.add_error("time_entries", i, err);
                }
            }
        }
        for (i, r) in records.documents.iter().enumerate() {
            check_parent(&mut problems, "documents", i, "case_id", r.case_id.as_ref(), &case_ids);
            let request = NewDocument {
                title: r.title.clone(),
                file_name: r.file_name.clone(),
                filed_on: r.filed_on,
            };
            check_fields(&mut problems, "documents", i, request);
        }
        for (i, r) in records.events.iter().enumerate() {
            check_parent(&mut problems, "events", i, "case_id", r.case_id.as_ref(), &case_ids);
            let request = NewEvent {
                title: r.title.clone(),
                event_type: r.event_type.clone(),
                scheduled_at: r.scheduled_at,
                location: r.location.clone(),
            };
            check_fields(&mut problems, "events", i, request);
        }
        for (i, r) in records.invoices.iter().enumerate() {
            check_parent(&mut problems, "invoices", i, "client_id", r.client_id.as_ref(), &client_ids);
            if let Err(err) = graph.check_amount("total_amount", r.total_amount, true) {
                problems.add_error("invoices", i, err);
            }
        }
        for (i, r) in records.payments.iter().enumerate() {
            check_parent(&mut problems, "payments", i, "invoice_id", r.invoice_id.as_ref(), &invoice_ids);
            if let Err(err) = graph.check_payment_amount("amount", r.amount) {
                problems.add_error("payments", i, err);
            }
        }

        if !problems.0.is_empty() {
            tracing::warn!(problems = problems.0.len(), "graph import rejected");
            return Err(AppError::validation(
                format!("graph import failed validation ({} problems)", problems.0.len()),
                problems.0,
            ));
        }

        for r in &records.clients {
            graph.client_numbers.claim(&r.client_number, r.id)?;
            graph.clients.insert(r.id, Client::from_record(r));
        }
        for r in &records.attorneys {
            graph.attorney_numbers.claim(&r.attorney_number, r.id)?;
            graph.attorneys.insert(r.id, Attorney::from_record(r));
        }
        for r in &records.cases {
            graph.case_numbers.claim(&r.case_number, r.id)?;
            graph.cases.insert(r.id, Case::from_record(r));
            if let Some(client) = r.client_id {
                graph.rel.client_cases.link(client, r.id);
            }
            for attorney in &r.attorney_ids {
                graph.rel.case_attorneys.link(r.id, *attorney);
            }
        }
        for r in &records.time_entries {
            graph.time_entries.insert(r.id, TimeEntry::from_record(r));
            if let Some(case) = r.case_id {
                graph.rel.case_time_entries.link(case, r.id);
            }
        }
        for r in &records.documents {
            graph.documents.insert(r.id, Document::from_record(r));
            if let Some(case) = r.case_id {
                graph.rel.case_documents.link(case, r.id);
            }
        }
        for r in &records.events {
            graph.events.insert(r.id, Event::from_record(r));
            if let Some(case) = r.case_id {
                graph.rel.case_events.link(case, r.id);
            }
        }
        for r in &records.invoices {
            graph.invoice_numbers.claim(&r.invoice_number, r.id)?;
            graph.invoices.insert(r.id, Invoice::from_record(r));
            if let Some(client) = r.client_id {
                graph.rel.client_invoices.link(client, r.id);
            }
        }
        for r in &records.payments {
            graph.payments.insert(r.id, Payment::from_record(r));
            if let Some(invoice) = r.invoice_id {
                graph.rel.invoice_payments.link(invoice, r.id);
            }
        }
        graph.recalculate_all();
        tracing::info!(
            clients = graph.clients.len(),
            cases = graph.cases.len(),
            invoices = graph.invoices.len(),
            "graph imported"
        );
        Ok(graph)
    }

    /// Flatten the graph into records for the data-access layer to save.
    /// Orphaned children are exported with an empty owner reference.
    pub fn export(&self) -> GraphRecords {
        GraphRecords {
            clients: self.clients.values().map(Client::to_record).collect(),
            attorneys: self.attorneys.values().map(Attorney::to_record).collect(),
            cases: self
                .cases
                .values()
                .map(|c| c.to_record(self.case_client(c.id()), self.case_attorneys(c.id()).to_vec()))
                .collect(),
            time_entries: self
                .time_entries
                .values()
                .map(|t| t.to_record(self.time_entry_case(t.id())))
                .collect(),
            documents: self
                .documents
                .values()
                .map(|d| d.to_record(self.document_case(d.id())))
                .collect(),
            events: self
                .events
                .values()
                .map(|e| e.to_record(self.event_case(e.id())))
                .collect(),
            invoices: self
                .invoices
                .values()
                .map(|i| i.to_record(self.invoice_client(i.id())))
                .collect(),
            payments: self
                .payments
                .values()
                .map(|p| p.to_record(self.payment_invoice(p.id())))
                .collect(),
        }
    }
}
