use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use shared_types::{CaseId, ClientId, EntityRef};

use crate::common::{create_case, firm};

#[test]
fn deleting_case_detaches_everything_it_touched() {
    let mut f = firm();
    let affected = f.graph.delete_case(f.case).unwrap();

    assert_eq!(
        affected,
        vec![
            EntityRef::Client(f.acme),
            EntityRef::Attorney(f.stone),
            EntityRef::Attorney(f.vale),
            EntityRef::Document(f.document),
            EntityRef::Event(f.event),
            EntityRef::TimeEntry(f.entry),
        ]
    );
    assert!(f.graph.case(f.case).is_none());
    assert!(!f.graph.client_cases(f.acme).contains(&f.case));
    assert!(f.graph.attorney_cases(f.stone).is_empty());
    assert!(f.graph.attorney_cases(f.vale).is_empty());
    assert_eq!(f.graph.time_entry_case(f.entry), None);
    assert_eq!(f.graph.document_case(f.document), None);
    assert_eq!(f.graph.event_case(f.event), None);
}

#[test]
fn children_survive_case_deletion() {
    let mut f = firm();
    f.graph.delete_case(f.case).unwrap();
    assert!(f.graph.time_entry(f.entry).is_some());
    assert!(f.graph.document(f.document).is_some());
    assert!(f.graph.event(f.event).is_some());
    assert_eq!(f.graph.compute_case_total_hours(f.case), Decimal::ZERO);
}

#[test]
fn deleting_case_frees_its_number() {
    let mut f = firm();
    f.graph.delete_case(f.case).unwrap();
    assert!(f.graph.find_case_by_number("24-CV-100").is_none());
    let again = create_case(&mut f.graph, f.baker, "24-CV-100", "Refiled");
    assert_eq!(f.graph.find_case_by_number("24-CV-100").unwrap().id(), again);
}

#[test]
fn deleting_missing_case_returns_none() {
    let mut f = firm();
    assert_eq!(f.graph.delete_case(CaseId::new()), None);
    assert_eq!(f.graph.delete_client(ClientId::new()), None);
    assert_eq!(f.graph.cases().count(), 1);
}

#[test]
fn deleting_client_removes_cases_and_invoices() {
    let mut f = firm();
    let affected = f.graph.delete_client(f.acme).unwrap();

    assert!(affected.contains(&EntityRef::Case(f.case)));
    assert!(affected.contains(&EntityRef::Invoice(f.acme_invoice)));
    assert!(affected.contains(&EntityRef::Payment(f.payment)));
    assert!(!affected.contains(&EntityRef::Client(f.acme)));

    assert!(f.graph.client(f.acme).is_none());
    assert!(f.graph.case(f.case).is_none());
    assert!(f.graph.invoice(f.acme_invoice).is_none());
    assert_eq!(f.graph.payment_invoice(f.payment), None);
    assert!(f.graph.find_client_by_number("C-001").is_none());

    assert_eq!(f.graph.clients().count(), 1);
    assert_eq!(f.graph.client_invoices(f.baker), &[f.baker_invoice]);
}
