//! Domain models for catalog data.

mod catalog;
pub(crate) mod catalog_entry;

pub use catalog::Catalog;
pub use catalog_entry::{CatalogEntry, ContentType};
