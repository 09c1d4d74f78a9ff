use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Allocate a fresh random identity.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Identity of a client.
    ClientId
);
entity_id!(
    /// Identity of an attorney.
    AttorneyId
);
entity_id!(
    /// Identity of a case.
    CaseId
);
entity_id!(InvoiceId);
entity_id!(PaymentId);
entity_id!(DocumentId);
entity_id!(EventId);
entity_id!(TimeEntryId);

/// Discriminant for the entity types held in a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Client,
    Attorney,
    Case,
    Invoice,
    Payment,
    Document,
    Event,
    TimeEntry,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Attorney => "attorney",
            Self::Case => "case",
            Self::Invoice => "invoice",
            Self::Payment => "payment",
            Self::Document => "document",
            Self::Event => "event",
            Self::TimeEntry => "time_entry",
        }
    }
}

/// A typed reference to any entity in a graph.
///
/// Cascading operations report the counterparts they touched as a list of
/// these so the caller knows which screens to refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    Client(ClientId),
    Attorney(AttorneyId),
    Case(CaseId),
    Invoice(InvoiceId),
    Payment(PaymentId),
    Document(DocumentId),
    Event(EventId),
    TimeEntry(TimeEntryId),
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Client(_) => EntityKind::Client,
            Self::Attorney(_) => EntityKind::Attorney,
            Self::Case(_) => EntityKind::Case,
            Self::Invoice(_) => EntityKind::Invoice,
            Self::Payment(_) => EntityKind::Payment,
            Self::Document(_) => EntityKind::Document,
            Self::Event(_) => EntityKind::Event,
            Self::TimeEntry(_) => EntityKind::TimeEntry,
        }
    }
}

macro_rules! entity_ref_from {
    ($($id:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$id> for EntityRef {
                fn from(id: $id) -> Self {
                    EntityRef::$variant(id)
                }
            }
        )*
    };
}

entity_ref_from!(
    ClientId => Client,
    AttorneyId => Attorney,
    CaseId => Case,
    InvoiceId => Invoice,
    PaymentId => Payment,
    DocumentId => Document,
    EventId => Event,
    TimeEntryId => TimeEntry,
);
