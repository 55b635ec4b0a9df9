//! Export command for chart images.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::session::Session;
use crate::aggregation::Dashboard;
use crate::config::default_export_path;
use crate::data::CatalogCache;
use crate::filter::FilterOverrides;
use crate::visualization::{export_dashboard_png, export_dashboard_svg, open_file};


/// Run the export command.
pub fn run(
    cache: &mut CatalogCache,
    data: &Path,
    overrides: &FilterOverrides,
    svg: bool,
    should_open: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(cache, data, overrides)?;

    let format_type = if svg { "svg" } else { "png" };
    let output_path = output.unwrap_or_else(|| default_export_path(svg));

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let dashboard = Dashboard::build(&session.catalog, &session.filter);

    println!("Exporting to {}...", format_type.to_uppercase());

    if svg {
        export_dashboard_svg(&dashboard, &output_path)?;
    } else {
        export_dashboard_png(&dashboard, &output_path)?;
    }

    println!("\x1b[32m+ Exported to: {}\x1b[0m", output_path.display());

    if should_open {
        println!("Opening {}...", format_type.to_uppercase());
        open_file(&output_path)?;
    }

    Ok(())
}
