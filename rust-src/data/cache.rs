//! Per-session memoization of catalog loads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use super::csv_loader::load_catalog;
use super::error::CatalogError;
use crate::models::Catalog;


#[derive(Debug)]
struct CachedCatalog {
    modified: Option<SystemTime>,
    catalog: Arc<Catalog>,
}


/// Memoizes [`load_catalog`] by file path and modification time.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: HashMap<PathBuf, CachedCatalog>,
}


impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached catalog for `path`, reloading only if the file changed.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Catalog>, CatalogError> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let modified = std::fs::metadata(&key).and_then(|m| m.modified()).ok();

        if let Some(cached) = self.entries.get(&key) {
            if cached.modified == modified {
                debug!(path = %key.display(), "catalog cache hit");
                return Ok(Arc::clone(&cached.catalog));
            }
        }

        let catalog = Arc::new(load_catalog(path)?);
        self.entries.insert(
            key,
            CachedCatalog {
                modified,
                catalog: Arc::clone(&catalog),
            },
        );

        Ok(catalog)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "type,title,director,country,date_added,release_year,rating,duration,listed_in\n\
        Movie,A,Dir,India,\"May 1, 2020\",2019,R,100 min,Dramas\n";

    #[test]
    fn test_second_load_is_memoized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = CatalogCache::new();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_changed_file_is_reloaded() {
        use std::time::Duration;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = CatalogCache::new();
        let first = cache.load(&path).unwrap();

        let extra = "TV Show,B,Dir,Japan,\"May 2, 2020\",2018,TV-MA,1 Season,Anime\n";
        std::fs::write(&path, format!("{CSV}{extra}")).unwrap();
        let later = SystemTime::now() + Duration::from_secs(60);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        let second = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);

        let third = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&second, &third));
    }

    #[test]
    fn test_errors_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let mut cache = CatalogCache::new();
        assert!(cache.load(&path).is_err());

        std::fs::write(&path, CSV).unwrap();
        assert_eq!(cache.load(&path).unwrap().len(), 1);
    }
}
