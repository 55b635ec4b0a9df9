//! Shared load-and-filter setup for every command.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::DATA_ENV_VAR;
use crate::data::{CatalogCache, CatalogError};
use crate::filter::{FilterOverrides, FilterState};
use crate::models::Catalog;


/// A loaded catalog with the startup filter resolved.
pub struct Session {
    pub catalog: Arc<Catalog>,
    pub filter: FilterState,
}


impl Session {
    pub fn open(cache: &mut CatalogCache, data: &Path, overrides: &FilterOverrides) -> Result<Self> {
        let catalog = load(cache, data)?;

        let filter = overrides.resolve(&catalog);
        tracing::debug!(%filter, "resolved startup filter");

        Ok(Self { catalog, filter })
    }
}


/// Load `data` through the shared cache, turning a missing file into a usage hint.
pub fn load(cache: &mut CatalogCache, data: &Path) -> Result<Arc<Catalog>> {
    let catalog = cache
        .load(data)
        .map_err(|e| match e {
            CatalogError::NotFound(path) => anyhow::anyhow!(
                "dataset not found at {}. Pass --data <PATH> or set {} to point at a catalog CSV.",
                path.display(),
                DATA_ENV_VAR
            ),
            other => anyhow::Error::new(other),
        })
        .with_context(|| format!("Failed to load catalog from {}", data.display()))?;

    if catalog.dropped_rows() > 0 {
        tracing::info!(dropped = catalog.dropped_rows(), "dropped incomplete rows");
    }

    Ok(catalog)
}


#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "type,title,director,country,date_added,release_year,rating,duration,listed_in\n\
        Movie,A,Dir,India,\"May 1, 2020\",2019,R,100 min,Dramas\n\
        TV Show,B,Dir,Japan,\"May 2, 2020\",2018,TV-MA,1 Season,Anime\n";

    #[test]
    fn test_sessions_share_one_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = CatalogCache::new();
        let first = Session::open(&mut cache, &path, &FilterOverrides::default()).unwrap();
        let second = load(&mut cache, &path).unwrap();

        assert!(Arc::ptr_eq(&first.catalog, &second));
        assert_eq!(first.filter.countries.len(), 2);
    }

    #[test]
    fn test_missing_file_has_hint() {
        let mut cache = CatalogCache::new();
        let err = load(&mut cache, Path::new("/no/such/catalog.csv")).unwrap_err();
        let message = format!("{err:#}");

        assert!(message.contains("dataset not found"));
        assert!(message.contains("--data"));
        assert!(message.contains(DATA_ENV_VAR));
    }
}
