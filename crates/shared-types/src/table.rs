use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single typed table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Empty,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Date(NaiveDate),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Integer(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Bool(_) => 1,
            Self::Integer(_) | Self::Decimal(_) => 2,
            Self::Date(_) => 3,
            Self::Text(_) => 4,
        }
    }

    /// Total order used by table sorting.
    ///
    /// Numbers compare numerically across `Integer`/`Decimal`, text compares
    /// case-insensitively with a case-sensitive tiebreak, and `Empty` sorts
    /// before everything. Mismatched types fall back to a fixed type rank.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Empty, Self::Empty) => Ordering::Equal,
            _ => match (self.as_decimal(), other.as_decimal()) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => self.type_rank().cmp(&other.type_rank()),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Decimal(d) => write!(f, "{}", d),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Bool(b) => f.write_str(if *b { "Yes" } else { "No" }),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<Decimal> for CellValue {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// One fixed-width table row.
pub type Row = Vec<CellValue>;

/// Build a [`Row`] from heterogeneous cell values.
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($crate::CellValue::from($cell)),*]
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort key of a table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: usize,
    pub direction: SortDirection,
}

/// Immutable point-in-time copy of a table view's visible rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Snapshot {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows rendered to display text, as an exporter would write them.
    pub fn to_text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }
}

/// Column headers plus rows produced by a list screen's data source, ready
/// to be loaded into a table view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Listing {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }
}
