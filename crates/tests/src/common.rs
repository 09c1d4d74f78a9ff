use case_graph::CaseGraph;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use shared_types::{
    AttorneyId, CaseId, ClientId, ClientType, DocumentId, EventId, InvoiceId, NewAttorney,
    NewCase, NewClient, NewDocument, NewEvent, NewInvoice, NewPayment, NewTimeEntry,
    PaymentId, PaymentMethod, TimeEntryId,
};

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub fn create_client(graph: &mut CaseGraph, number: &str, name: &str) -> ClientId {
    graph
        .add_client(NewClient {
            client_number: number.into(),
            name: name.into(),
            client_type: ClientType::Individual,
            email: None,
            phone: None,
        })
        .unwrap()
}

pub fn create_attorney(graph: &mut CaseGraph, number: &str, first: &str, last: &str) -> AttorneyId {
    graph
        .add_attorney(NewAttorney {
            attorney_number: number.into(),
            first_name: first.into(),
            last_name: last.into(),
            specialization: "Litigation".into(),
            hourly_rate: Decimal::from(250),
            email: None,
        })
        .unwrap()
}

pub fn create_case(graph: &mut CaseGraph, client: ClientId, number: &str, title: &str) -> CaseId {
    graph
        .add_case(NewCase {
            client_id: client,
            case_number: number.into(),
            title: title.into(),
            description: String::new(),
            status: Default::default(),
            opened_on: date(1, 15),
        })
        .unwrap()
}

/// Create a time entry and attach it to `case`.
pub fn log_hours(graph: &mut CaseGraph, case: CaseId, hours: Decimal) -> TimeEntryId {
    let entry = graph
        .add_time_entry(NewTimeEntry {
            hours,
            description: "Research".into(),
            worked_on: date(2, 1),
            rate: None,
        })
        .unwrap();
    assert!(graph.attach_time_entry(case, entry));
    entry
}

pub fn file_document(graph: &mut CaseGraph, case: CaseId, title: &str) -> DocumentId {
    let document = graph
        .add_document(NewDocument {
            title: title.into(),
            file_name: format!("{}.pdf", title.to_lowercase().replace(' ', "_")),
            filed_on: date(2, 2),
        })
        .unwrap();
    assert!(graph.attach_document(case, document));
    document
}

pub fn schedule_event(graph: &mut CaseGraph, case: CaseId, title: &str) -> EventId {
    let event = graph
        .add_event(NewEvent {
            title: title.into(),
            event_type: "Hearing".into(),
            scheduled_at: Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap(),
            location: Some("Courtroom 4".into()),
        })
        .unwrap();
    assert!(graph.attach_event(case, event));
    event
}

pub fn create_invoice(
    graph: &mut CaseGraph,
    client: ClientId,
    number: &str,
    total: Decimal,
) -> InvoiceId {
    graph
        .add_invoice(NewInvoice {
            client_id: client,
            invoice_number: number.into(),
            issued_on: date(3, 1),
            due_on: Some(date(3, 31)),
            total_amount: total,
        })
        .unwrap()
}

pub fn pay(graph: &mut CaseGraph, invoice: InvoiceId, amount: Decimal) -> PaymentId {
    graph
        .add_payment(NewPayment {
            invoice_id: invoice,
            amount,
            paid_on: date(3, 10),
            method: PaymentMethod::Check,
            reference: None,
        })
        .unwrap()
}

/// A small firm: two clients, two attorneys, a case with children, and one
/// partly paid invoice per client.
pub struct Firm {
    pub graph: CaseGraph,
    pub acme: ClientId,
    pub baker: ClientId,
    pub stone: AttorneyId,
    pub vale: AttorneyId,
    pub case: CaseId,
    pub entry: TimeEntryId,
    pub document: DocumentId,
    pub event: EventId,
    pub acme_invoice: InvoiceId,
    pub baker_invoice: InvoiceId,
    pub payment: PaymentId,
}

pub fn firm() -> Firm {
    let mut graph = CaseGraph::new();
    let acme = create_client(&mut graph, "C-001", "Acme Corp");
    let baker = create_client(&mut graph, "C-002", "Baker & Sons");
    let stone = create_attorney(&mut graph, "A-01", "Ada", "Stone");
    let vale = create_attorney(&mut graph, "A-02", "Cy", "Vale");
    let case = create_case(&mut graph, acme, "24-CV-100", "Acme v. Widget");
    assert!(graph.link_attorney_to_case(stone, case));
    assert!(graph.link_attorney_to_case(vale, case));
    let entry = log_hours(&mut graph, case, Decimal::new(25, 1));
    let document = file_document(&mut graph, case, "Complaint");
    let event = schedule_event(&mut graph, case, "Initial hearing");
    let acme_invoice = create_invoice(&mut graph, acme, "INV-100", Decimal::from(1000));
    let baker_invoice = create_invoice(&mut graph, baker, "INV-200", Decimal::from(400));
    let payment = pay(&mut graph, acme_invoice, Decimal::new(30000, 2));
    Firm {
        graph,
        acme,
        baker,
        stone,
        vale,
        case,
        entry,
        document,
        event,
        acme_invoice,
        baker_invoice,
        payment,
    }
}
