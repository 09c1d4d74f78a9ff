use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a client is a person or an organization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ClientType {
    #[default]
    Individual,
    Organization,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Organization => "Organization",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "individual" => Some(Self::Individual),
            "organization" | "organisation" => Some(Self::Organization),
            _ => None,
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case status. The well-known values get their own variants; anything a
/// firm types into the status field is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaseStatus {
    #[default]
    Open,
    Pending,
    Closed,
    Other(String),
}

impl CaseStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "Open",
            Self::Pending => "Pending",
            Self::Closed => "Closed",
            Self::Other(s) => s.as_str(),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl From<String> for CaseStatus {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "open" => Self::Open,
            "pending" => Self::Pending,
            "closed" => Self::Closed,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl From<&str> for CaseStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<CaseStatus> for String {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement state of an invoice, derived from `amount_paid` against
/// `total_amount`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
    Overpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "Unpaid",
            Self::PartiallyPaid => "Partially Paid",
            Self::Paid => "Paid",
            Self::Overpaid => "Overpaid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Check,
    Card,
    BankTransfer,
    Trust,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Check => "Check",
            Self::Card => "Card",
            Self::BankTransfer => "Bank Transfer",
            Self::Trust => "Trust",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
