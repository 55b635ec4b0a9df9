//! The loaded catalog: cleaned entries plus load bookkeeping.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::catalog_entry::{CatalogEntry, ContentType};


/// All complete entries read from one dataset file.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    source: PathBuf,
    dropped_rows: usize,
}


impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>, source: impl Into<PathBuf>, dropped_rows: usize) -> Self {
        Self {
            entries,
            source: source.into(),
            dropped_rows,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Rows discarded at load time because a field was missing or unparseable.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Distinct content types in first-seen order.
    pub fn content_types(&self) -> Vec<ContentType> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.content_type) {
                seen.push(entry.content_type);
            }
        }
        seen
    }

    /// Distinct raw country values in first-seen order.
    pub fn countries(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut index = std::collections::HashSet::new();
        for country in self.entries.iter().filter_map(|e| e.country.as_deref()) {
            if index.insert(country) {
                seen.push(country.to_string());
            }
        }
        seen
    }

    /// Smallest and largest release year, if any entries exist.
    pub fn release_year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.entries.iter().map(|e| e.release_year).min()?;
        let max = self.entries.iter().map(|e| e.release_year).max()?;
        Some((min, max))
    }

    /// Earliest and latest `date_added`.
    pub fn date_added_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.entries.iter().map(|e| e.date_added).min()?;
        let max = self.entries.iter().map(|e| e.date_added).max()?;
        Some((min, max))
    }
}
