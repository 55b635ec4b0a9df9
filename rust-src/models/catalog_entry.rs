//! Catalog entry model for a single title.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};


/// Separator used by multi-valued text columns (`country`, `listed_in`).
const LIST_SEPARATOR: &str = ", ";


/// Kind of catalog content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}


impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Movie, ContentType::TvShow];

    /// Label as it appears in the dataset.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }

    /// Exact dataset label; unlike `FromStr`, no aliases or case folding.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label.trim())
    }
}


impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}


impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "movie" => Ok(ContentType::Movie),
            "tv show" | "tvshow" | "tv" => Ok(ContentType::TvShow),
            other => Err(format!("unknown content type: {other}")),
        }
    }
}


/// A single title from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub content_type: ContentType,
    pub title: String,
    pub director: Option<String>,
    pub country: Option<String>,
    pub date_added: NaiveDate,
    pub release_year: i32,
    pub rating: String,
    pub duration: String,
    pub listed_in: String,
}


impl CatalogEntry {
    /// Numeric part of the duration ("90 min" -> 90, "2 Seasons" -> 2).
    pub fn duration_value(&self) -> Option<f64> {
        static DIGITS: OnceLock<Regex> = OnceLock::new();
        let re = DIGITS.get_or_init(|| Regex::new(r"(\d+)").expect("valid duration regex"));

        re.captures(&self.duration)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    }

    /// Genres listed for this title.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        split_list(&self.listed_in)
    }

    /// Individual countries; empty when the country is unknown.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        split_list(self.country.as_deref().unwrap_or(""))
    }

    /// Year the title was added to the catalog.
    pub fn added_year(&self) -> i32 {
        self.date_added.year()
    }

    /// `YYYY-MM` key of the month the title was added.
    pub fn added_month(&self) -> String {
        self.date_added.format("%Y-%m").to_string()
    }

    pub fn is_movie(&self) -> bool {
        self.content_type == ContentType::Movie
    }
}


fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}


#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn entry(content_type: ContentType, country: &str, release_year: i32) -> CatalogEntry {
        CatalogEntry {
            content_type,
            title: format!("Title {release_year}"),
            director: Some("Jane Doe".to_string()),
            country: Some(country.to_string()),
            date_added: NaiveDate::from_ymd_opt(2021, 9, 25).unwrap(),
            release_year,
            rating: "TV-MA".to_string(),
            duration: match content_type {
                ContentType::Movie => "90 min".to_string(),
                ContentType::TvShow => "2 Seasons".to_string(),
            },
            listed_in: "Dramas, International Movies".to_string(),
        }
    }

    #[test]
    fn test_content_type_parse() {
        assert_eq!("Movie".parse::<ContentType>().unwrap(), ContentType::Movie);
        assert_eq!("TV Show".parse::<ContentType>().unwrap(), ContentType::TvShow);
        assert_eq!("tv-show".parse::<ContentType>().unwrap(), ContentType::TvShow);
        assert!("Podcast".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_from_label_is_exact() {
        assert_eq!(ContentType::from_label("Movie"), Some(ContentType::Movie));
        assert_eq!(ContentType::from_label(" TV Show "), Some(ContentType::TvShow));
        assert_eq!(ContentType::from_label("tv"), None);
        assert_eq!(ContentType::from_label("tv-show"), None);
        assert_eq!(ContentType::from_label("movie"), None);
    }

    #[test]
    fn test_duration_value() {
        let mut e = entry(ContentType::Movie, "India", 2019);
        assert_eq!(e.duration_value(), Some(90.0));

        e.duration = "1 Season".to_string();
        assert_eq!(e.duration_value(), Some(1.0));

        e.duration = "unknown".to_string();
        assert_eq!(e.duration_value(), None);
    }

    #[test]
    fn test_genres_and_countries() {
        let mut e = entry(ContentType::Movie, "United States, India", 2019);
        assert_eq!(e.genres().collect::<Vec<_>>(), vec!["Dramas", "International Movies"]);
        assert_eq!(e.countries().collect::<Vec<_>>(), vec!["United States", "India"]);

        e.country = None;
        assert_eq!(e.countries().count(), 0);
    }

    #[test]
    fn test_added_keys() {
        let e = entry(ContentType::TvShow, "Japan", 2020);
        assert_eq!(e.added_year(), 2021);
        assert_eq!(e.added_month(), "2021-09");
    }
}
