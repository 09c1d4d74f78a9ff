use regex::{Regex, RegexBuilder};
use serde::Serialize;
use shared_types::{AppError, CellValue, MatchMode};

/// What a filter was created from, as shown back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    /// A row passes when any of these columns matches.
    pub columns: Vec<usize>,
    pub text: String,
    pub mode: MatchMode,
}

/// A compiled column predicate. Matching is always case-insensitive and
/// runs against the cell's display text.
#[derive(Debug, Clone)]
pub(crate) struct Filter {
    spec: FilterSpec,
    pattern: Regex,
}

impl Filter {
    pub fn compile(columns: Vec<usize>, text: &str, mode: MatchMode) -> Result<Self, AppError> {
        let source = match mode {
            MatchMode::Substring => regex::escape(text),
            MatchMode::Regex => text.to_string(),
        };
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::bad_request(format!("invalid filter pattern: {}", e)))?;
        Ok(Self {
            spec: FilterSpec {
                columns,
                text: text.to_string(),
                mode,
            },
            pattern,
        })
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn matches(&self, row: &[CellValue]) -> bool {
        self.spec.columns.iter().any(|&column| {
            row.get(column)
                .is_some_and(|cell| self.pattern.is_match(&cell.to_string()))
        })
    }
}
