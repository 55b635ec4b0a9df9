//! Interactive dashboard command.

use std::path::Path;

use anyhow::Result;

use super::session::Session;
use crate::data::CatalogCache;
use crate::filter::FilterOverrides;
use crate::visualization::run_dashboard;


/// Run the dashboard command.
pub fn run(cache: &mut CatalogCache, data: &Path, overrides: &FilterOverrides) -> Result<()> {
    let session = Session::open(cache, data, overrides)?;
    run_dashboard(cache, session.catalog, session.filter)
}
