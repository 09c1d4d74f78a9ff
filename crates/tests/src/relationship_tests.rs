use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use shared_types::{AttorneyId, CaseId, ClientId, EntityRef, TimeEntryId};

use crate::common::{create_attorney, create_case, create_client, firm, log_hours};

fn symmetric(graph: &case_graph::CaseGraph, attorney: AttorneyId, case: CaseId) -> bool {
    graph.case_attorneys(case).contains(&attorney) == graph.attorney_cases(attorney).contains(&case)
}

#[test]
fn attorney_links_stay_symmetric_through_any_sequence() {
    let mut f = firm();
    let other = create_case(&mut f.graph, f.acme, "24-CV-101", "Acme v. Gadget");
    let pairs = [(f.stone, f.case), (f.vale, other), (f.stone, other)];

    // link, relink, unlink, unlink twice, with stale ids mixed in
    let steps: Vec<(bool, AttorneyId, CaseId)> = vec![
        (true, f.stone, other),
        (true, f.stone, other),
        (false, f.stone, f.case),
        (false, f.stone, f.case),
        (true, f.vale, other),
        (true, AttorneyId::new(), other),
        (false, f.vale, CaseId::new()),
        (false, f.vale, other),
        (true, f.stone, f.case),
    ];
    for (link, attorney, case) in steps {
        if link {
            f.graph.link_attorney_to_case(attorney, case);
        } else {
            f.graph.unlink_attorney_from_case(attorney, case);
        }
        for (a, c) in pairs {
            assert!(symmetric(&f.graph, a, c));
        }
    }
    assert_eq!(f.graph.case_attorneys(f.case), &[f.vale, f.stone]);
    assert_eq!(f.graph.attorney_cases(f.stone), &[other, f.case]);
}

#[test]
fn linking_same_attorney_twice_keeps_one_entry() {
    let mut f = firm();
    assert!(f.graph.link_attorney_to_case(f.stone, f.case));
    assert_eq!(f.graph.case_attorneys(f.case).len(), 2);
    assert_eq!(f.graph.attorney_cases(f.stone), &[f.case]);
}

#[test]
fn moving_a_case_between_clients_updates_both_sides() {
    let mut f = firm();
    assert!(f.graph.link_case_to_client(f.case, f.baker));

    assert!(f.graph.client_cases(f.acme).is_empty());
    assert_eq!(f.graph.client_cases(f.baker), &[f.case]);
    assert_eq!(f.graph.case_client(f.case), Some(f.baker));
}

#[test]
fn unlinking_case_from_wrong_client_is_noop() {
    let mut f = firm();
    assert!(!f.graph.unlink_case_from_client(f.case, f.baker));
    assert_eq!(f.graph.case_client(f.case), Some(f.acme));

    assert!(f.graph.unlink_case_from_client(f.case, f.acme));
    assert_eq!(f.graph.case_client(f.case), None);
    assert!(f.graph.client_cases(f.acme).is_empty());
}

#[test]
fn stale_references_return_false() {
    let mut f = firm();
    assert!(!f.graph.link_case_to_client(CaseId::new(), f.acme));
    assert!(!f.graph.link_case_to_client(f.case, ClientId::new()));
    assert!(!f.graph.attach_time_entry(f.case, TimeEntryId::new()));
    assert!(!f.graph.detach_child(f.case, EntityRef::Client(f.acme)));
    assert_eq!(f.graph.case_client(f.case), Some(f.acme));
}

#[test]
fn attaching_child_to_another_case_moves_it() {
    let mut f = firm();
    let other = create_case(&mut f.graph, f.baker, "24-CV-300", "Baker estate");
    assert!(f.graph.attach_child(other, EntityRef::Document(f.document)));

    assert!(f.graph.case_documents(f.case).is_empty());
    assert_eq!(f.graph.case_documents(other), &[f.document]);
    assert_eq!(f.graph.document_case(f.document), Some(other));
}

#[test]
fn detaching_from_non_owner_is_noop() {
    let mut f = firm();
    let other = create_case(&mut f.graph, f.baker, "24-CV-300", "Baker estate");
    assert!(!f.graph.detach_event(other, f.event));
    assert_eq!(f.graph.event_case(f.event), Some(f.case));

    assert!(f.graph.detach_event(f.case, f.event));
    assert_eq!(f.graph.event_case(f.event), None);
    assert!(f.graph.event(f.event).is_some());
}

#[test]
fn total_hours_follow_attach_detach_and_edits() {
    let mut f = firm();
    assert_eq!(f.graph.compute_case_total_hours(f.case), dec!(2.5));

    log_hours(&mut f.graph, f.case, dec!(1.25));
    assert_eq!(f.graph.compute_case_total_hours(f.case), dec!(3.75));

    f.graph.set_time_entry_hours(f.entry, dec!(0.5)).unwrap();
    assert_eq!(f.graph.compute_case_total_hours(f.case), dec!(1.75));

    assert!(f.graph.detach_time_entry(f.case, f.entry));
    assert_eq!(f.graph.compute_case_total_hours(f.case), dec!(1.25));
}

#[test]
fn deleting_attorney_clears_case_assignments() {
    let mut f = firm();
    let extra = create_attorney(&mut f.graph, "A-03", "Di", "Moss");
    assert!(f.graph.link_attorney_to_case(extra, f.case));

    let affected = f.graph.delete_attorney(extra).unwrap();
    assert_eq!(affected, vec![EntityRef::Case(f.case)]);
    assert_eq!(f.graph.case_attorneys(f.case), &[f.stone, f.vale]);
    assert!(f.graph.find_attorney_by_number("A-03").is_none());
}

#[test]
fn new_client_has_no_cases() {
    let mut f = firm();
    let fresh = create_client(&mut f.graph, "C-003", "Cole LLC");
    assert!(f.graph.client_cases(fresh).is_empty());
    assert!(f.graph.client_invoices(fresh).is_empty());
}
