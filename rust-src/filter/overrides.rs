//! Startup filter choices given on the command line.

use super::filter_state::FilterState;
use crate::models::{Catalog, ContentType};


/// Selections that replace parts of the default filter.
#[derive(Debug, Clone, Default)]
pub struct FilterOverrides {
    pub content_types: Vec<ContentType>,
    pub countries: Vec<String>,
    pub all_countries: bool,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
}


impl FilterOverrides {
    /// Build the startup filter: defaults first, then any explicit choices.
    pub fn resolve(&self, catalog: &Catalog) -> FilterState {
        let mut state = FilterState::defaults(catalog);

        if !self.content_types.is_empty() {
            state.content_types = self.content_types.iter().copied().collect();
        }

        if self.all_countries {
            state.select_all_countries(catalog);
        } else if !self.countries.is_empty() {
            state.countries = self.countries.iter().cloned().collect();
        }

        if self.from_year.is_some() || self.to_year.is_some() {
            let (from, to) = state.year_range;
            state.set_year_range(self.from_year.unwrap_or(from), self.to_year.unwrap_or(to));
        }

        state
    }
}
