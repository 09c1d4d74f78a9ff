//! Live entity types held by a [`CaseGraph`](crate::CaseGraph).
//!
//! Entities carry attributes only. Identity and business keys are read-only
//! once assigned, and fields that feed a derived aggregate can only be
//! changed through the graph.

mod attorney;
mod case;
mod client;
mod document;
mod event;
mod invoice;
mod time_entry;

pub use attorney::Attorney;
pub use case::Case;
pub use client::Client;
pub use document::Document;
pub use event::Event;
pub use invoice::{Invoice, Payment};
pub use time_entry::TimeEntry;
