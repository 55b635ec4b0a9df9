//! Whole-dataset summary figures.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Catalog, ContentType};


#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub source: String,
    pub rows: usize,
    pub dropped_rows: usize,
    pub movies: usize,
    pub tv_shows: usize,
    pub release_years: Option<(i32, i32)>,
    pub date_added: Option<(NaiveDate, NaiveDate)>,
    pub directors: usize,
    pub countries: usize,
    pub ratings: usize,
    pub genres: usize,
}


/// Compute summary figures for a loaded catalog.
pub fn summarize(catalog: &Catalog) -> DatasetSummary {
    let entries = catalog.entries();

    let count_type = |t: ContentType| entries.iter().filter(|e| e.content_type == t).count();

    let directors: HashSet<&str> = entries.iter().filter_map(|e| e.director.as_deref()).collect();
    let countries: HashSet<&str> = entries.iter().flat_map(|e| e.countries()).collect();
    let ratings: HashSet<&str> = entries.iter().map(|e| e.rating.as_str()).collect();
    let genres: HashSet<&str> = entries.iter().flat_map(|e| e.genres()).collect();

    DatasetSummary {
        source: catalog.source().display().to_string(),
        rows: catalog.len(),
        dropped_rows: catalog.dropped_rows(),
        movies: count_type(ContentType::Movie),
        tv_shows: count_type(ContentType::TvShow),
        release_years: catalog.release_year_bounds(),
        date_added: catalog.date_added_bounds(),
        directors: directors.len(),
        countries: countries.len(),
        ratings: ratings.len(),
        genres: genres.len(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog_entry::tests::entry;

    #[test]
    fn test_summarize_counts_individual_countries() {
        let catalog = Catalog::new(
            vec![
                entry(ContentType::Movie, "United States, India", 2010),
                entry(ContentType::TvShow, "India", 2012),
                entry(ContentType::Movie, "Japan", 1999),
            ],
            "catalog.csv",
            2,
        );

        let summary = summarize(&catalog);

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.dropped_rows, 2);
        assert_eq!(summary.movies, 2);
        assert_eq!(summary.tv_shows, 1);
        assert_eq!(summary.release_years, Some((1999, 2012)));
        assert_eq!(summary.countries, 3);
        assert_eq!(summary.directors, 1);
        assert_eq!(summary.genres, 2);
        assert_eq!(summary.ratings, 1);
    }
}
