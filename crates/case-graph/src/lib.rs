//! In-memory entity graph for a law practice: clients, attorneys, cases and
//! their time entries, documents and events, invoices and payments.
//!
//! [`CaseGraph`] owns every entity and every association. Links are changed
//! only through its relationship operations, which keep both directions
//! consistent and refresh derived aggregates before returning.

pub mod entity;
pub mod graph;
pub mod import;
pub mod manager;
pub mod recalc;
pub(crate) mod relations;
pub mod rows;
pub(crate) mod store;

pub use entity::*;
pub use graph::CaseGraph;
pub use rows::{
    ATTORNEY_COLUMNS, CASE_COLUMNS, CLIENT_COLUMNS, INVOICE_COLUMNS, PAYMENT_COLUMNS,
    TIME_ENTRY_COLUMNS,
};
