//! One filter-and-aggregate pass producing everything a front end renders.

use chrono::NaiveDate;
use serde::Serialize;

use super::charts::{
    content_type_distribution,
    monthly_additions,
    movie_duration_histogram,
    rating_distribution,
    top_countries,
    top_directors,
    top_genres,
    yearly_additions_by_type,
    MonthlyCount,
    TypeShare,
    YearlyTypeCount,
};
use super::duration::DurationHistogram;
use super::value_counts::CountRow;
use crate::config::{DENSITY_POINTS, DURATION_BINS, TOP_COUNTRIES, TOP_DIRECTORS, TOP_GENRES};
use crate::filter::FilterState;
use crate::models::{Catalog, CatalogEntry};


/// All chart data for one filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub filter: FilterState,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub date_added_range: Option<(NaiveDate, NaiveDate)>,

    // Filtered view
    pub type_distribution: Vec<TypeShare>,
    pub rating_distribution: Vec<CountRow>,

    // Whole catalog
    pub top_directors: Vec<CountRow>,
    pub yearly_additions: Vec<YearlyTypeCount>,
    pub monthly_additions: Vec<MonthlyCount>,
    pub top_countries: Vec<CountRow>,
    pub movie_durations: DurationHistogram,
    pub top_genres: Vec<CountRow>,

    #[serde(skip)]
    pub preview: Vec<CatalogEntry>,
}


impl Dashboard {
    /// Filter the catalog and compute every chart.
    pub fn build(catalog: &Catalog, filter: &FilterState) -> Self {
        let filtered = filter.apply(catalog);
        let all = catalog.entries();

        tracing::debug!(
            filtered = filtered.len(),
            total = all.len(),
            "rebuilding dashboard"
        );

        Self {
            filter: filter.clone(),
            total_rows: all.len(),
            filtered_rows: filtered.len(),
            date_added_range: catalog.date_added_bounds(),
            type_distribution: content_type_distribution(&filtered),
            rating_distribution: rating_distribution(&filtered),
            top_directors: top_directors(all, TOP_DIRECTORS),
            yearly_additions: yearly_additions_by_type(all),
            monthly_additions: monthly_additions(all),
            top_countries: top_countries(all, TOP_COUNTRIES),
            movie_durations: movie_duration_histogram(all, DURATION_BINS, DENSITY_POINTS),
            top_genres: top_genres(all, TOP_GENRES),
            preview: filtered.into_iter().cloned().collect(),
        }
    }

    /// Human readable `date_added` span.
    pub fn date_range_label(&self) -> Option<String> {
        self.date_added_range
            .map(|(from, to)| format!("{} to {}", from.format("%Y-%m-%d"), to.format("%Y-%m-%d")))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog_entry::tests::entry;
    use crate::models::ContentType;

    #[test]
    fn test_filtered_and_unfiltered_views() {
        let catalog = Catalog::new(
            vec![
                entry(ContentType::Movie, "India", 2010),
                entry(ContentType::TvShow, "India", 2012),
                entry(ContentType::Movie, "Japan", 1980),
            ],
            "test.csv",
            0,
        );
        let mut filter = FilterState::defaults(&catalog);
        filter.toggle_type(ContentType::TvShow);

        let dashboard = Dashboard::build(&catalog, &filter);

        assert_eq!(dashboard.total_rows, 3);
        assert_eq!(dashboard.filtered_rows, 1);
        assert_eq!(dashboard.preview.len(), 1);

        // Filtered charts only see the matching movie
        assert_eq!(dashboard.type_distribution.len(), 1);
        assert_eq!(dashboard.rating_distribution[0].count, 1);

        // Unfiltered charts see the whole catalog
        assert_eq!(dashboard.top_countries[0], CountRow::new("India", 2));
        assert_eq!(dashboard.movie_durations.samples, 2);
        assert_eq!(dashboard.top_directors[0].count, 3);
        assert_eq!(dashboard.yearly_additions.iter().map(|r| r.count).sum::<usize>(), 3);
        assert_eq!(
            dashboard.date_range_label().as_deref(),
            Some("2021-09-25 to 2021-09-25")
        );
    }
}
