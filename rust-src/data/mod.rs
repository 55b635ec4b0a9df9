//! Data access layer for catalog datasets.

mod cache;
mod csv_loader;
mod error;

pub use cache::CatalogCache;
pub use error::CatalogError;
