//! Text report command.

use std::path::Path;

use anyhow::Result;

use super::session::Session;
use crate::aggregation::Dashboard;
use crate::data::CatalogCache;
use crate::filter::FilterOverrides;
use crate::visualization::print_report;


/// Run the report command.
pub fn run(cache: &mut CatalogCache, data: &Path, overrides: &FilterOverrides) -> Result<()> {
    let session = Session::open(cache, data, overrides)?;
    let dashboard = Dashboard::build(&session.catalog, &session.filter);

    print_report(&dashboard);

    Ok(())
}
