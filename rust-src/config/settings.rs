//! Application settings and dashboard constants.

use std::path::PathBuf;


/// Dataset file looked up in the working directory when `--data` is not given.
pub const DEFAULT_DATA_FILE: &str = "netflix_data.csv";

/// Environment variable overriding the dataset path.
pub const DATA_ENV_VAR: &str = "CATX_DATA";

/// Release-year range selected on startup, clamped to the data.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (2000, 2022);

/// Number of distinct countries pre-selected on startup.
pub const DEFAULT_COUNTRY_COUNT: usize = 10;

/// Ranking sizes.
pub const TOP_DIRECTORS: usize = 10;
pub const TOP_COUNTRIES: usize = 10;
pub const TOP_GENRES: usize = 15;

/// Histogram bins for movie durations.
pub const DURATION_BINS: usize = 20;

/// Points sampled along the duration density curve.
pub const DENSITY_POINTS: usize = 100;

/// Rows shown in the text report's data preview.
pub const PREVIEW_ROWS: usize = 10;


/// Resolve the dataset path from an explicit argument or the default file name.
pub fn resolve_data_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}


/// Default output path for chart exports.
pub fn default_export_path(svg: bool) -> PathBuf {
    let ext = if svg { "svg" } else { "png" };
    PathBuf::from(format!("catalog-dashboard.{ext}"))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_YEAR_RANGE, (2000, 2022));
        assert_eq!(TOP_DIRECTORS, 10);
        assert_eq!(TOP_COUNTRIES, 10);
        assert_eq!(TOP_GENRES, 15);
        assert_eq!(DURATION_BINS, 20);
    }

    #[test]
    fn test_resolve_data_path() {
        assert_eq!(resolve_data_path(None), PathBuf::from("netflix_data.csv"));
        assert_eq!(
            resolve_data_path(Some(PathBuf::from("/tmp/other.csv"))),
            PathBuf::from("/tmp/other.csv")
        );
    }

    #[test]
    fn test_default_export_path() {
        assert_eq!(default_export_path(true), PathBuf::from("catalog-dashboard.svg"));
        assert_eq!(default_export_path(false), PathBuf::from("catalog-dashboard.png"));
    }
}
