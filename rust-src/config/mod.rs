//! Configuration and settings for catalog-explorer.

mod settings;

pub use settings::{
    default_export_path,
    resolve_data_path,
    DATA_ENV_VAR,
    DEFAULT_COUNTRY_COUNT,
    DEFAULT_YEAR_RANGE,
    DENSITY_POINTS,
    DURATION_BINS,
    PREVIEW_ROWS,
    TOP_COUNTRIES,
    TOP_DIRECTORS,
    TOP_GENRES,
};
