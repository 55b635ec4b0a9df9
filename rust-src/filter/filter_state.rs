//! Sidebar filter selections and their application to a catalog.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::config::{DEFAULT_COUNTRY_COUNT, DEFAULT_YEAR_RANGE};
use crate::models::{Catalog, CatalogEntry, ContentType};


/// Current filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub content_types: BTreeSet<ContentType>,
    /// Raw country values, matched exactly against `CatalogEntry::country`.
    pub countries: BTreeSet<String>,
    /// Inclusive release-year range.
    pub year_range: (i32, i32),
    /// Catalog release-year bounds the range is clamped to.
    #[serde(skip)]
    bounds: (i32, i32),
}


impl FilterState {
    /// Startup selection: every type, the first few countries, a clamped year range.
    pub fn defaults(catalog: &Catalog) -> Self {
        let bounds = catalog
            .release_year_bounds()
            .unwrap_or(DEFAULT_YEAR_RANGE);

        let mut state = Self {
            content_types: catalog.content_types().into_iter().collect(),
            countries: catalog
                .countries()
                .into_iter()
                .take(DEFAULT_COUNTRY_COUNT)
                .collect(),
            year_range: DEFAULT_YEAR_RANGE,
            bounds,
        };
        state.set_year_range(DEFAULT_YEAR_RANGE.0, DEFAULT_YEAR_RANGE.1);
        state
    }

    pub fn bounds(&self) -> (i32, i32) {
        self.bounds
    }

    /// Whether a single entry passes every filter.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        let (from, to) = self.year_range;

        self.content_types.contains(&entry.content_type)
            && entry
                .country
                .as_ref()
                .map_or(false, |c| self.countries.contains(c))
            && (from..=to).contains(&entry.release_year)
    }

    /// Entries passing every filter, in catalog order.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a CatalogEntry> {
        catalog
            .entries()
            .iter()
            .filter(|entry| self.matches(entry))
            .collect()
    }

    pub fn toggle_type(&mut self, content_type: ContentType) {
        if !self.content_types.remove(&content_type) {
            self.content_types.insert(content_type);
        }
    }

    pub fn toggle_country(&mut self, country: &str) {
        if !self.countries.remove(country) {
            self.countries.insert(country.to_string());
        }
    }

    pub fn select_all_countries(&mut self, catalog: &Catalog) {
        self.countries = catalog.countries().into_iter().collect();
    }

    pub fn clear_countries(&mut self) {
        self.countries.clear();
    }

    /// Set the range, clamped to the catalog bounds and ordered.
    pub fn set_year_range(&mut self, from: i32, to: i32) {
        let (lo, hi) = self.bounds;
        let from = from.clamp(lo, hi);
        let to = to.clamp(lo, hi);
        self.year_range = if from <= to { (from, to) } else { (to, from) };
    }

    /// Adopt the release-year bounds of a reloaded catalog and re-clamp the range.
    pub fn rebase(&mut self, catalog: &Catalog) {
        self.bounds = catalog.release_year_bounds().unwrap_or(DEFAULT_YEAR_RANGE);
        let (from, to) = self.year_range;
        self.set_year_range(from, to);
    }

    /// Move the range start; it never passes the end.
    pub fn shift_start(&mut self, delta: i32) {
        let (from, to) = self.year_range;
        let from = (from + delta).clamp(self.bounds.0, to);
        self.year_range = (from, to);
    }

    /// Move the range end; it never passes the start.
    pub fn shift_end(&mut self, delta: i32) {
        let (from, to) = self.year_range;
        let to = (to + delta).clamp(from, self.bounds.1);
        self.year_range = (from, to);
    }
}


impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<&str> = self.content_types.iter().map(|t| t.label()).collect();
        write!(
            f,
            "types: {} | countries: {} selected | years: {}-{}",
            if types.is_empty() { "none".to_string() } else { types.join(", ") },
            self.countries.len(),
            self.year_range.0,
            self.year_range.1,
        )
    }
}
