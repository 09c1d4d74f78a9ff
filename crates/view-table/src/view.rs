use shared_types::{
    AppError, CellValue, Listing, Row, Snapshot, SortDirection, SortKey, TableSettings,
};

use crate::filter::{Filter, FilterSpec};
use crate::sort::sort_indices;

/// A filtered, sorted projection over a backing set of rows.
///
/// Callers address rows by their position in the current view. The view is
/// rebuilt from the full backing data after every change to filters, sort
/// or data, so it never drifts from what a fresh projection would give.
#[derive(Debug, Clone)]
pub struct ViewTable {
    settings: TableSettings,
    columns: Vec<String>,
    rows: Vec<Row>,
    filters: Vec<Filter>,
    sort: Option<SortKey>,
    /// Backing indices of visible rows, in view order.
    visible: Vec<usize>,
}

impl ViewTable {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self::with_settings(columns, TableSettings::default())
    }

    pub fn with_settings<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        settings: TableSettings,
    ) -> Self {
        Self {
            settings,
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            filters: Vec::new(),
            sort: None,
            visible: Vec::new(),
        }
    }

    /// A table with the listing's headers and rows already loaded.
    pub fn from_listing(listing: Listing, settings: TableSettings) -> Result<Self, AppError> {
        let mut table = Self::with_settings(listing.columns, settings);
        table.load(listing.rows)?;
        Ok(table)
    }

    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    // ── Data ────────────────────────────────────────────────────────

    /// Replace the backing rows. Every row must be as wide as the table; on
    /// a mismatch nothing is replaced.
    #[tracing::instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn load(&mut self, rows: Vec<Row>) -> Result<(), AppError> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.columns.len())
        {
            return Err(AppError::bad_request(format!(
                "row {} has {} cells, expected {}",
                index,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows = rows;
        self.rebuild();
        Ok(())
    }

    pub fn append_row(&mut self, row: Row) -> Result<(), AppError> {
        self.check_width(&row)?;
        self.rows.push(row);
        self.rebuild();
        Ok(())
    }

    /// Overwrite one cell of a visible row. The row may leave the view, or
    /// move within it, once filters and sort are reapplied.
    pub fn set_cell(
        &mut self,
        view_row: usize,
        column: usize,
        value: CellValue,
    ) -> Result<(), AppError> {
        let backing = self.backing_index(view_row)?;
        self.check_column(column)?;
        self.rows[backing][column] = value;
        self.rebuild();
        Ok(())
    }

    /// Remove a visible row from the backing data and return it.
    pub fn remove_row(&mut self, view_row: usize) -> Result<Row, AppError> {
        let backing = self.backing_index(view_row)?;
        let row = self.rows.remove(backing);
        self.rebuild();
        Ok(row)
    }

    // ── Filters ─────────────────────────────────────────────────────

    /// Add a predicate on one column using the configured match mode.
    /// Filters combine by AND.
    pub fn add_filter(&mut self, column: usize, text: &str) -> Result<(), AppError> {
        self.add_filter_any(&[column], text)
    }

    /// Add a predicate that passes when any of `columns` matches. The group
    /// as a whole combines by AND with the other filters.
    #[tracing::instrument(skip(self))]
    pub fn add_filter_any(&mut self, columns: &[usize], text: &str) -> Result<(), AppError> {
        if columns.is_empty() {
            return Err(AppError::bad_request("filter needs at least one column"));
        }
        for &column in columns {
            self.check_column(column)?;
        }
        let filter = Filter::compile(columns.to_vec(), text, self.settings.match_mode)?;
        self.filters.push(filter);
        self.rebuild();
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.rebuild();
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn filters(&self) -> impl Iterator<Item = &FilterSpec> + '_ {
        self.filters.iter().map(Filter::spec)
    }

    // ── Sort ────────────────────────────────────────────────────────

    pub fn set_sort(&mut self, column: usize, direction: SortDirection) -> Result<(), AppError> {
        self.check_column(column)?;
        self.sort = Some(SortKey { column, direction });
        self.rebuild();
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.rebuild();
    }

    pub fn sort_state(&self) -> Option<SortKey> {
        self.sort
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn backing_row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_row_count(&self) -> usize {
        self.visible.len()
    }

    pub fn get_cell(&self, view_row: usize, column: usize) -> Result<&CellValue, AppError> {
        let backing = self.backing_index(view_row)?;
        self.check_column(column)?;
        Ok(&self.rows[backing][column])
    }

    pub fn row(&self, view_row: usize) -> Result<&[CellValue], AppError> {
        let backing = self.backing_index(view_row)?;
        Ok(&self.rows[backing])
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &[CellValue]> + '_ {
        self.visible.iter().map(|&i| self.rows[i].as_slice())
    }

    /// Owned copy of the headers and visible rows in view order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            columns: self.columns.clone(),
            rows: self.visible.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    // ── Internals ───────────────────────────────────────────────────

    fn backing_index(&self, view_row: usize) -> Result<usize, AppError> {
        self.visible
            .get(view_row)
            .copied()
            .ok_or_else(|| AppError::out_of_range("row", view_row, self.visible.len()))
    }

    fn check_column(&self, column: usize) -> Result<(), AppError> {
        if column >= self.columns.len() {
            return Err(AppError::out_of_range("column", column, self.columns.len()));
        }
        Ok(())
    }

    fn check_width(&self, row: &Row) -> Result<(), AppError> {
        if row.len() != self.columns.len() {
            return Err(AppError::bad_request(format!(
                "row has {} cells, expected {}",
                row.len(),
                self.columns.len()
            )));
        }
        Ok(())
    }

    fn rebuild(&mut self) {
        let filters = &self.filters;
        let mut visible: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| filters.iter().all(|f| f.matches(row)))
            .map(|(i, _)| i)
            .collect();
        if let Some(key) = self.sort {
            sort_indices(&self.rows, &mut visible, key);
        }
        tracing::debug!(
            visible = visible.len(),
            backing = self.rows.len(),
            filters = self.filters.len(),
            "view rebuilt"
        );
        self.visible = visible;
    }
}
