use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared_types::{AppErrorKind, EntityRef, InvoiceId, PaymentId, PaymentStatus};

use crate::common::{create_client, create_invoice, firm, pay};

#[test]
fn amount_paid_is_exact_sum_after_every_change() {
    let mut f = firm();
    let invoice = f.acme_invoice;
    assert_eq!(f.graph.invoice(invoice).unwrap().amount_paid(), dec!(300.00));

    let a = pay(&mut f.graph, invoice, dec!(0.10));
    let b = pay(&mut f.graph, invoice, dec!(0.20));
    assert_eq!(f.graph.invoice(invoice).unwrap().amount_paid(), dec!(300.30));

    f.graph.set_payment_amount(a, dec!(0.01)).unwrap();
    assert_eq!(f.graph.invoice(invoice).unwrap().amount_paid(), dec!(300.21));

    assert!(f.graph.remove_payment(b));
    assert_eq!(f.graph.invoice(invoice).unwrap().amount_paid(), dec!(300.01));
    assert_eq!(f.graph.invoice_payments(invoice), &[f.payment, a]);
}

#[test]
fn reassigning_payment_moves_amount_and_client() {
    let mut f = firm();
    assert!(f.graph.link_payment_to_invoice(f.payment, f.baker_invoice));

    let acme_invoice = f.graph.invoice(f.acme_invoice).unwrap();
    let baker_invoice = f.graph.invoice(f.baker_invoice).unwrap();
    assert_eq!(acme_invoice.amount_paid(), Decimal::ZERO);
    assert_eq!(baker_invoice.amount_paid(), dec!(300));
    assert_eq!(f.graph.payment_client(f.payment), Some(f.baker));
    assert!(f.graph.invoice_payments(f.acme_invoice).is_empty());
}

#[test]
fn reassigning_to_same_invoice_changes_nothing() {
    let mut f = firm();
    assert!(f.graph.link_payment_to_invoice(f.payment, f.acme_invoice));
    assert_eq!(f.graph.invoice(f.acme_invoice).unwrap().amount_paid(), dec!(300));
    assert_eq!(f.graph.invoice_payments(f.acme_invoice), &[f.payment]);
}

#[test]
fn reassigning_to_missing_invoice_is_noop() {
    let mut f = firm();
    assert!(!f.graph.link_payment_to_invoice(f.payment, InvoiceId::new()));
    assert!(!f.graph.link_payment_to_invoice(PaymentId::new(), f.acme_invoice));
    assert_eq!(f.graph.payment_invoice(f.payment), Some(f.acme_invoice));
}

#[test]
fn moving_invoice_carries_payment_client() {
    let mut f = firm();
    assert!(f.graph.link_invoice_to_client(f.acme_invoice, f.baker));
    assert_eq!(f.graph.payment_client(f.payment), Some(f.baker));
    assert_eq!(f.graph.client_invoices(f.baker), &[f.baker_invoice, f.acme_invoice]);
    assert_eq!(f.graph.compute_client_outstanding_balance(f.acme), Decimal::ZERO);
    assert_eq!(f.graph.compute_client_outstanding_balance(f.baker), dec!(1100));
}

#[test]
fn deleting_invoice_orphans_payments() {
    let mut f = firm();
    let affected = f.graph.delete_invoice(f.acme_invoice).unwrap();
    assert_eq!(
        affected,
        vec![EntityRef::Client(f.acme), EntityRef::Payment(f.payment)]
    );
    assert!(f.graph.payment(f.payment).is_some());
    assert_eq!(f.graph.payment_invoice(f.payment), None);
    assert_eq!(f.graph.payment_client(f.payment), None);
    assert!(f.graph.find_invoice_by_number("INV-100").is_none());

    // an orphan can be billed again
    assert!(f.graph.link_payment_to_invoice(f.payment, f.baker_invoice));
    assert_eq!(f.graph.invoice(f.baker_invoice).unwrap().amount_paid(), dec!(300));
}

#[rstest]
#[case(dec!(0), PaymentStatus::Unpaid)]
#[case(dec!(99.99), PaymentStatus::PartiallyPaid)]
#[case(dec!(100.00), PaymentStatus::Paid)]
#[case(dec!(150), PaymentStatus::Overpaid)]
fn payment_status_tracks_payments(#[case] paid: Decimal, #[case] expected: PaymentStatus) {
    let mut f = firm();
    let client = create_client(&mut f.graph, "C-050", "Dale Doe");
    let invoice = create_invoice(&mut f.graph, client, "INV-050", dec!(100));
    if !paid.is_zero() {
        pay(&mut f.graph, invoice, paid);
    }
    let invoice = f.graph.invoice(invoice).unwrap();
    assert_eq!(invoice.payment_status(), expected);
    assert_eq!(invoice.balance_due(), dec!(100) - paid);
}

#[test]
fn recalculate_client_refreshes_all_its_invoices() {
    let mut f = firm();
    assert!(f.graph.recalculate(EntityRef::Client(f.acme)));
    assert!(f.graph.recalculate(EntityRef::Payment(f.payment)));
    assert!(!f.graph.recalculate(EntityRef::Case(f.case)));
    assert_eq!(f.graph.invoice(f.acme_invoice).unwrap().amount_paid(), dec!(300));
}

#[test]
fn duplicate_invoice_number_conflicts() {
    let mut f = firm();
    let err = f
        .graph
        .add_invoice(shared_types::NewInvoice {
            client_id: f.baker,
            invoice_number: "INV-100".into(),
            issued_on: crate::common::date(4, 1),
            due_on: None,
            total_amount: dec!(10),
        })
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Conflict);
    assert_eq!(f.graph.client_invoices(f.baker), &[f.baker_invoice]);
}

#[test]
fn non_positive_payment_is_rejected() {
    let mut f = firm();
    let err = f.graph.set_payment_amount(f.payment, dec!(-1)).unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(f.graph.payment(f.payment).unwrap().amount(), dec!(300));
}
