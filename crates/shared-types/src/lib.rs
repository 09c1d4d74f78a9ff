pub mod error;

pub mod common;
pub mod config;
pub mod ids;
pub mod records;
pub mod requests;
pub mod table;

pub use error::*;

pub use common::*;
pub use config::*;
pub use ids::*;
pub use records::*;
pub use requests::*;
pub use table::*;
