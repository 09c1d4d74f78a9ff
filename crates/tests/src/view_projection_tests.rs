use case_graph::{ATTORNEY_COLUMNS, CASE_COLUMNS};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use shared_types::{AppConfig, CellValue, MatchMode, SortDirection, TableSettings};
use view_table::ViewTable;

use crate::common::{create_attorney, create_case, firm, log_hours};

#[test]
fn case_listing_loads_into_view() {
    let mut f = firm();
    let other = create_case(&mut f.graph, f.baker, "24-CV-050", "Baker estate");
    log_hours(&mut f.graph, other, dec!(7));

    let mut table = ViewTable::from_listing(f.graph.case_rows(), TableSettings::default()).unwrap();
    assert_eq!(table.columns(), CASE_COLUMNS);
    assert_eq!(table.visible_row_count(), 2);

    table.set_sort(6, SortDirection::Descending).unwrap();
    assert_eq!(*table.get_cell(0, 0).unwrap(), CellValue::from("24-CV-050"));
    assert_eq!(*table.get_cell(1, 5).unwrap(), CellValue::from("Ada Stone, Cy Vale"));
}

#[test]
fn attorney_search_across_name_or_specialization() {
    let mut f = firm();
    let tax = create_attorney(&mut f.graph, "A-03", "Di", "Moss");
    f.graph
        .update_attorney(tax, |a| a.specialization = "Tax".into())
        .unwrap();

    let mut table = ViewTable::new(ATTORNEY_COLUMNS.iter().copied());
    table.load(f.graph.attorney_rows().rows).unwrap();

    table.add_filter_any(&[1, 2], "tax").unwrap();
    assert_eq!(table.visible_row_count(), 1);
    assert_eq!(*table.get_cell(0, 1).unwrap(), CellValue::from("Di Moss"));

    table.clear_filters();
    table.add_filter_any(&[1, 2], "stone").unwrap();
    assert_eq!(*table.get_cell(0, 0).unwrap(), CellValue::from("A-01"));
}

#[test]
fn snapshot_is_unaffected_by_graph_reload() {
    let mut f = firm();
    let mut table = ViewTable::from_listing(f.graph.invoice_rows(), TableSettings::default()).unwrap();
    let before = table.snapshot();

    f.graph.set_payment_amount(f.payment, dec!(1000)).unwrap();
    table.load(f.graph.invoice_rows().rows).unwrap();

    assert_eq!(before.rows[0][7], CellValue::from("Partially Paid"));
    assert_eq!(table.snapshot().rows[0][7], CellValue::from("Paid"));
    assert_eq!(
        before.to_text_rows()[0],
        vec!["INV-100", "Acme Corp", "2024-03-01", "2024-03-31", "1000", "300.00", "700.00", "Partially Paid"]
    );
}

#[test]
fn configured_regex_mode_reaches_the_view() {
    let config = AppConfig::from_toml_str(
        r#"
        [table]
        match_mode = "regex"
        "#,
    )
    .unwrap();
    assert_eq!(config.table.match_mode, MatchMode::Regex);
    assert_eq!(config.graph.max_amount_scale, 4);

    let f = firm();
    let mut table = ViewTable::from_listing(f.graph.client_rows(), config.table).unwrap();
    table.add_filter(0, r"^C-00[2-9]$").unwrap();
    assert_eq!(table.visible_row_count(), 1);
    assert_eq!(*table.get_cell(0, 1).unwrap(), CellValue::from("Baker & Sons"));
}

#[test]
fn removing_visible_row_uses_view_coordinates() {
    let f = firm();
    let mut table = ViewTable::from_listing(f.graph.client_rows(), TableSettings::default()).unwrap();
    table.set_sort(0, SortDirection::Descending).unwrap();

    let removed = table.remove_row(0).unwrap();
    assert_eq!(removed[0], CellValue::from("C-002"));
    assert_eq!(table.backing_row_count(), 1);
    assert!(table.get_cell(1, 0).unwrap_err().is_out_of_range());
}
