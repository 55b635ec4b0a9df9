//! CSV loader for catalog datasets.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, info};

use super::error::CatalogError;
use crate::models::{Catalog, CatalogEntry, ContentType};


/// Accepted layouts for `date_added`.
const DATE_FORMATS: [&str; 3] = ["%B %d, %Y", "%Y-%m-%d", "%d-%b-%y"];


/// Columns read from the dataset; anything else is ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    director: Option<String>,
    #[serde(default)]
    country: Option<String>,
    date_added: String,
    release_year: String,
    rating: String,
    duration: String,
    listed_in: String,
}


/// Load a catalog file, dropping every incomplete row.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (entries, dropped) = read_entries(file).map_err(|source| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    if entries.is_empty() {
        return Err(CatalogError::Empty {
            path: path.to_path_buf(),
            dropped,
        });
    }

    info!(
        path = %path.display(),
        rows = entries.len(),
        dropped,
        "loaded catalog"
    );

    Ok(Catalog::new(entries, path, dropped))
}


/// Parse all rows from a CSV reader; returns kept entries and the dropped count.
fn read_entries<R: Read>(reader: R) -> Result<(Vec<CatalogEntry>, usize), csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut entries = Vec::new();
    let mut dropped = 0usize;

    for (row_num, result) in csv_reader.records().enumerate() {
        let record = result?;

        match parse_record(&record, &headers) {
            Some(entry) => entries.push(entry),
            None => {
                debug!(row = row_num + 2, "dropping incomplete row");
                dropped += 1;
            }
        }
    }

    Ok((entries, dropped))
}


/// Convert one CSV record; `None` when any column is empty or a field fails to parse.
fn parse_record(record: &StringRecord, headers: &StringRecord) -> Option<CatalogEntry> {
    if record.len() < headers.len() || record.iter().any(|field| field.trim().is_empty()) {
        return None;
    }

    let raw: RawRow = record.deserialize(Some(headers)).ok()?;

    let content_type = ContentType::from_label(&raw.content_type)?;
    let date_added = parse_date(&raw.date_added)?;
    let release_year = raw.release_year.trim().parse::<i32>().ok()?;

    Some(CatalogEntry {
        content_type,
        title: raw.title.trim().to_string(),
        director: non_empty(raw.director),
        country: non_empty(raw.country),
        date_added,
        release_year,
        rating: raw.rating.trim().to_string(),
        duration: raw.duration.trim().to_string(),
        listed_in: raw.listed_in.trim().to_string(),
    })
}


/// Parse `date_added` in any of the supported layouts.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}


fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}


#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description\n";

    fn read(body: &str) -> (Vec<CatalogEntry>, usize) {
        let csv = format!("{HEADER}{body}");
        read_entries(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("September 25, 2021"), NaiveDate::from_ymd_opt(2021, 9, 25));
        assert_eq!(parse_date(" April 1, 2019 "), NaiveDate::from_ymd_opt(2019, 4, 1));
        assert_eq!(parse_date("2020-01-15"), NaiveDate::from_ymd_opt(2020, 1, 15));
        assert_eq!(parse_date("15-Jan-20"), NaiveDate::from_ymd_opt(2020, 1, 15));
        assert_eq!(parse_date("someday"), None);
    }

    #[test]
    fn test_complete_row_is_kept() {
        let (entries, dropped) = read(
            "s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,Cast A,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries,A film\n",
        );

        assert_eq!(dropped, 0);
        assert_eq!(entries.len(), 1);

        let e = &entries[0];
        assert_eq!(e.content_type, ContentType::Movie);
        assert_eq!(e.title, "Dick Johnson Is Dead");
        assert_eq!(e.director.as_deref(), Some("Kirsten Johnson"));
        assert_eq!(e.country.as_deref(), Some("United States"));
        assert_eq!(e.release_year, 2020);
        assert_eq!(e.duration_value(), Some(90.0));
    }

    #[test]
    fn test_rows_with_any_missing_field_are_dropped() {
        let (entries, dropped) = read(concat!(
            // no director
            "s2,TV Show,Blood & Water,,Cast B,South Africa,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, TV Dramas\",Desc\n",
            // no cast
            "s3,Movie,Sankofa,Haile Gerima,,United States,\"September 24, 2021\",1993,TV-MA,125 min,Dramas,Desc\n",
            // kept
            "s4,TV Show,Kota Factory,Raghav Subbu,Cast C,India,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, TV Comedies\",Desc\n",
        ));

        assert_eq!(dropped, 2);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Kota Factory");
    }

    #[test]
    fn test_unparseable_fields_are_dropped() {
        let (entries, dropped) = read(concat!(
            "s5,Movie,Bad Date,Someone,Cast,Japan,yesterday,2019,R,100 min,Dramas,Desc\n",
            "s6,Movie,Bad Year,Someone,Cast,Japan,\"May 1, 2020\",nineteen,R,100 min,Dramas,Desc\n",
            "s7,Podcast,Bad Type,Someone,Cast,Japan,\"May 1, 2020\",2019,R,100 min,Dramas,Desc\n",
        ));

        assert!(entries.is_empty());
        assert_eq!(dropped, 3);
    }

    #[test]
    fn test_type_aliases_are_not_data_values() {
        let (entries, dropped) = read(concat!(
            "s9,tv,Alias,Someone,Cast,Japan,\"May 1, 2020\",2019,TV-MA,1 Season,Anime,Desc\n",
            "s10,movie,Lowercase,Someone,Cast,Japan,\"May 1, 2020\",2019,R,100 min,Dramas,Desc\n",
            "s11,TV Show,Exact,Someone,Cast,Japan,\"May 1, 2020\",2019,TV-MA,1 Season,Anime,Desc\n",
        ));

        assert_eq!(dropped, 2);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content_type, ContentType::TvShow);
    }

    #[test]
    fn test_short_rows_are_dropped() {
        let (entries, dropped) = read("s8,Movie,Truncated\n");
        assert!(entries.is_empty());
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_catalog(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_load_all_incomplete_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::write(&path, format!("{HEADER}s1,Movie,X,,,,,,,,,\n")).unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Empty { dropped: 1, .. }));
    }
}
