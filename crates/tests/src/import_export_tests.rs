use case_graph::CaseGraph;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use shared_types::{AppErrorKind, GraphRecords, GraphSettings, PaymentId};

use crate::common::firm;

fn reload(records: &GraphRecords) -> Result<CaseGraph, shared_types::AppError> {
    CaseGraph::import(records, GraphSettings::default())
}

#[test]
fn export_then_import_reproduces_graph() {
    let f = firm();
    let exported = f.graph.export();

    let json = serde_json::to_string(&exported).unwrap();
    let parsed: GraphRecords = serde_json::from_str(&json).unwrap();
    let restored = reload(&parsed).unwrap();

    assert_eq!(restored.export(), exported);
    assert_eq!(restored.case_client(f.case), Some(f.acme));
    assert_eq!(restored.case_attorneys(f.case), &[f.stone, f.vale]);
    assert_eq!(restored.payment_client(f.payment), Some(f.acme));
    assert_eq!(restored.compute_case_total_hours(f.case), dec!(2.5));
    assert_eq!(restored.invoice(f.acme_invoice).unwrap().amount_paid(), dec!(300));
}

#[test]
fn stored_amount_paid_is_recomputed() {
    let f = firm();
    let mut records = f.graph.export();
    for invoice in &mut records.invoices {
        invoice.amount_paid = dec!(12345);
    }
    let restored = reload(&records).unwrap();
    assert_eq!(restored.invoice(f.acme_invoice).unwrap().amount_paid(), dec!(300));
    assert_eq!(restored.invoice(f.baker_invoice).unwrap().amount_paid(), dec!(0));
}

#[test]
fn payment_with_missing_invoice_names_the_record() {
    let f = firm();
    let mut records = f.graph.export();
    records.payments[0].invoice_id = None;

    let err = reload(&records).unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(
        err.field_errors.get("payments[0].invoice_id").map(String::as_str),
        Some("missing owner reference")
    );
}

#[test]
fn payment_pointing_at_unknown_invoice_is_rejected() {
    let f = firm();
    let mut records = f.graph.export();
    records.invoices.retain(|i| i.id != f.acme_invoice);

    let err = reload(&records).unwrap_err();
    assert!(err.field_errors.contains_key("payments[0].invoice_id"));
}

#[test]
fn every_problem_is_reported_at_once() {
    let f = firm();
    let mut records = f.graph.export();
    records.cases[0].client_id = None;
    let attorney = records.cases[0].attorney_ids[0];
    records.cases[0].attorney_ids.push(attorney);
    records.clients[1].client_number = records.clients[0].client_number.clone();
    records.time_entries[0].hours = dec!(-1);

    let err = reload(&records).unwrap_err();
    let mut keys: Vec<&str> = err.field_errors.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "cases[0].attorney_ids",
            "cases[0].client_id",
            "clients[1].client_number",
            "time_entries[0].hours",
        ]
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let f = firm();
    let mut records = f.graph.export();
    let copy = records.payments[0].clone();
    records.payments.push(copy);

    let err = reload(&records).unwrap_err();
    assert!(err.field_errors.contains_key("payments[1].id"));
}

#[test]
fn zero_payment_accepted_only_when_configured() {
    let f = firm();
    let mut records = f.graph.export();
    let mut zero = records.payments[0].clone();
    zero.id = PaymentId::new();
    zero.amount = dec!(0);
    records.payments.push(zero);

    assert!(reload(&records).is_err());
    let lenient = GraphSettings {
        allow_zero_payments: true,
        ..GraphSettings::default()
    };
    let graph = CaseGraph::import(&records, lenient).unwrap();
    assert_eq!(graph.invoice_payments(f.acme_invoice).len(), 2);
}

#[test]
fn empty_record_set_gives_empty_graph() {
    let graph = reload(&GraphRecords::default()).unwrap();
    assert_eq!(graph.clients().count(), 0);
    assert!(graph.export().is_empty());
}
