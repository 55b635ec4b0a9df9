//! The dashboard's chart aggregations.
//!
//! Each function is stateless and takes either the filtered rows or the whole
//! catalog, depending on which view the chart describes.

use std::collections::BTreeMap;

use serde::Serialize;

use super::duration::DurationHistogram;
use super::value_counts::{top_counts, value_counts, CountRow};
use crate::models::{CatalogEntry, ContentType};


/// Count and share of one content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    pub content_type: ContentType,
    pub count: usize,
    pub share: f64,
}


/// Titles added in one year for one content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTypeCount {
    pub year: i32,
    pub content_type: ContentType,
    pub count: usize,
}


/// Titles added in one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
}


/// Content type distribution, most common type first.
pub fn content_type_distribution(entries: &[&CatalogEntry]) -> Vec<TypeShare> {
    let total = entries.len();

    value_counts(entries.iter().map(|e| e.content_type))
        .into_iter()
        .map(|(content_type, count)| TypeShare {
            content_type,
            count,
            share: if total > 0 { count as f64 / total as f64 * 100.0 } else { 0.0 },
        })
        .collect()
}


/// Directors with the most titles.
pub fn top_directors(entries: &[CatalogEntry], n: usize) -> Vec<CountRow> {
    top_counts(entries.iter().filter_map(|e| e.director.as_deref()), n)
}


/// Titles added per year, split by content type, ordered by year then type.
pub fn yearly_additions_by_type(entries: &[CatalogEntry]) -> Vec<YearlyTypeCount> {
    let mut grouped: BTreeMap<(i32, ContentType), usize> = BTreeMap::new();
    for entry in entries {
        *grouped.entry((entry.added_year(), entry.content_type)).or_insert(0) += 1;
    }

    grouped
        .into_iter()
        .map(|((year, content_type), count)| YearlyTypeCount {
            year,
            content_type,
            count,
        })
        .collect()
}


/// Titles added per month in chronological order.
pub fn monthly_additions(entries: &[CatalogEntry]) -> Vec<MonthlyCount> {
    let mut grouped: BTreeMap<String, usize> = BTreeMap::new();
    for entry in entries {
        *grouped.entry(entry.added_month()).or_insert(0) += 1;
    }

    grouped
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}


/// Raw country values with the most titles.
pub fn top_countries(entries: &[CatalogEntry], n: usize) -> Vec<CountRow> {
    top_counts(entries.iter().filter_map(|e| e.country.as_deref()), n)
}


/// Titles per rating, most common first.
pub fn rating_distribution(entries: &[&CatalogEntry]) -> Vec<CountRow> {
    top_counts(entries.iter().map(|e| e.rating.as_str()), usize::MAX)
}


/// Histogram of movie running times in minutes.
pub fn movie_duration_histogram(
    entries: &[CatalogEntry],
    bins: usize,
    density_points: usize,
) -> DurationHistogram {
    let minutes: Vec<f64> = entries
        .iter()
        .filter(|e| e.is_movie())
        .filter_map(|e| e.duration_value())
        .collect();

    DurationHistogram::build(&minutes, bins, density_points)
}


/// Most common genres after splitting the genre lists.
pub fn top_genres(entries: &[CatalogEntry], n: usize) -> Vec<CountRow> {
    top_counts(entries.iter().flat_map(|e| e.genres()), n)
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::catalog_entry::tests::entry;

    fn added(mut e: CatalogEntry, y: i32, m: u32) -> CatalogEntry {
        e.date_added = NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        e
    }

    fn sample() -> Vec<CatalogEntry> {
        let mut a = added(entry(ContentType::Movie, "India", 2019), 2019, 5);
        a.director = Some("Rajiv Chilaka".to_string());
        a.listed_in = "Children & Family Movies, Comedies".to_string();
        a.rating = "TV-Y7".to_string();
        a.duration = "60 min".to_string();

        let mut b = added(entry(ContentType::TvShow, "Japan", 2020), 2020, 1);
        b.director = Some("Hayao Miyazaki".to_string());
        b.listed_in = "Anime Series, International TV Shows".to_string();

        let mut c = added(entry(ContentType::Movie, "India", 2021), 2020, 1);
        c.director = Some("Rajiv Chilaka".to_string());
        c.listed_in = "Comedies".to_string();
        c.duration = "120 min".to_string();

        let d = added(entry(ContentType::Movie, "United States", 2015), 2021, 12);

        vec![a, b, c, d]
    }

    #[test]
    fn test_content_type_distribution() {
        let entries = sample();
        let refs: Vec<&CatalogEntry> = entries.iter().collect();
        let dist = content_type_distribution(&refs);

        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].content_type, ContentType::Movie);
        assert_eq!(dist[0].count, 3);
        assert!((dist[0].share - 75.0).abs() < 1e-9);
        assert!((dist[1].share - 25.0).abs() < 1e-9);

        assert!(content_type_distribution(&[]).is_empty());
    }

    #[test]
    fn test_top_directors() {
        let rows = top_directors(&sample(), 10);
        assert_eq!(rows[0], CountRow::new("Rajiv Chilaka", 2));
        assert_eq!(rows.len(), 3);

        assert_eq!(top_directors(&sample(), 1).len(), 1);
    }

    #[test]
    fn test_yearly_additions_by_type() {
        let rows = yearly_additions_by_type(&sample());
        let flat: Vec<(i32, ContentType, usize)> =
            rows.iter().map(|r| (r.year, r.content_type, r.count)).collect();

        assert_eq!(
            flat,
            vec![
                (2019, ContentType::Movie, 1),
                (2020, ContentType::Movie, 1),
                (2020, ContentType::TvShow, 1),
                (2021, ContentType::Movie, 1),
            ]
        );
    }

    #[test]
    fn test_monthly_additions() {
        let rows = monthly_additions(&sample());
        let flat: Vec<(&str, usize)> = rows.iter().map(|r| (r.month.as_str(), r.count)).collect();
        assert_eq!(flat, vec![("2019-05", 1), ("2020-01", 2), ("2021-12", 1)]);
    }

    #[test]
    fn test_top_countries_uses_raw_values() {
        let mut entries = sample();
        entries[3].country = Some("United States, India".to_string());

        let rows = top_countries(&entries, 10);
        assert_eq!(rows[0], CountRow::new("India", 2));
        assert!(rows.iter().any(|r| r.label == "United States, India"));
    }

    #[test]
    fn test_rating_distribution() {
        let entries = sample();
        let refs: Vec<&CatalogEntry> = entries.iter().collect();
        let rows = rating_distribution(&refs);
        assert_eq!(rows, vec![CountRow::new("TV-MA", 3), CountRow::new("TV-Y7", 1)]);
    }

    #[test]
    fn test_movie_duration_histogram_skips_shows() {
        let hist = movie_duration_histogram(&sample(), 20, 10);
        assert_eq!(hist.samples, 3);
        assert_eq!(hist.bins.first().map(|b| b.start), Some(60.0));
        assert_eq!(hist.bins.last().map(|b| b.end), Some(120.0));
    }

    #[test]
    fn test_top_genres_explodes_lists() {
        let rows = top_genres(&sample(), 15);
        assert_eq!(rows[0], CountRow::new("Comedies", 2));
        assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), 7);

        assert_eq!(top_genres(&sample(), 2).len(), 2);
    }
}
