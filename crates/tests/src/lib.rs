#[cfg(test)]
mod common;

#[cfg(test)]
mod relationship_tests;

#[cfg(test)]
mod billing_tests;

#[cfg(test)]
mod cascade_delete_tests;

#[cfg(test)]
mod import_export_tests;

#[cfg(test)]
mod view_projection_tests;
