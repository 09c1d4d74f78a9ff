//! Filtered, sorted table views over typed rows, for list screens and
//! export.

mod filter;
mod sort;
mod view;

pub use filter::FilterSpec;
pub use view::ViewTable;
