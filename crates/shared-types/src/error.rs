use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of core errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    OutOfRange,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::OutOfRange => write!(f, "OutOfRange"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Structured error shared by the graph and the table engine.
///
/// Stale references in relationship operations are *not* errors; those
/// return `false`. `AppError` is reserved for caller mistakes the UI layer
/// should surface: colliding business keys, malformed input, indices
/// outside the current view, and graphs that fail load-time validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::NotFound,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::BadRequest,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    /// Validation failure for a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut field_errors = HashMap::new();
        field_errors.insert(field.into(), message.clone());
        Self::validation(message, field_errors)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Conflict,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    /// An index outside the bounds the caller was allowed to use.
    pub fn out_of_range(what: &str, index: usize, len: usize) -> Self {
        Self {
            kind: AppErrorKind::OutOfRange,
            message: format!("{} index {} out of range (len {})", what, index, len),
            field_errors: HashMap::new(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::InternalError,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        self.kind == AppErrorKind::OutOfRange
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Validation failed", field_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error_has_correct_kind() {
        let err = AppError::not_found("missing case");
        assert_eq!(err.kind, AppErrorKind::NotFound);
        assert_eq!(err.message, "missing case");
        assert!(err.field_errors.is_empty());
    }

    #[test]
    fn invalid_field_records_single_field() {
        let err = AppError::invalid_field("amount", "Amount must be positive");
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(err.field_errors.get("amount").unwrap(), "Amount must be positive");
    }

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let err = AppError::out_of_range("row", 5, 3);
        assert!(err.is_out_of_range());
        assert_eq!(err.message, "row index 5 out of range (len 3)");
    }

    #[test]
    fn display_impl_formats_correctly() {
        let err = AppError::conflict("case number 24-001 already exists");
        assert_eq!(format!("{}", err), "Conflict: case number 24-001 already exists");
    }

    #[test]
    fn error_roundtrip_through_json() {
        let mut fields = HashMap::new();
        fields.insert("payments[0].invoice_id".to_string(), "missing".to_string());
        let err = AppError::validation("Import failed", fields);
        let json = serde_json::to_string(&err).unwrap();
        let parsed: AppError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, parsed);
    }
}
