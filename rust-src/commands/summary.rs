//! Summary command - dataset overview.

use std::path::Path;

use anyhow::Result;

use super::session;
use crate::aggregation::summarize;
use crate::data::CatalogCache;
use crate::visualization::format_number;


/// Run the summary command.
pub fn run(cache: &mut CatalogCache, data: &Path, json: bool) -> Result<()> {
    let catalog = session::load(cache, data)?;
    let summary = summarize(&catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    // Header
    println!("\n{}", "=".repeat(60));
    println!("{:^60}", "Catalog Summary");
    println!("{}\n", "=".repeat(60));

    println!("DATASET");
    println!("{}", "-".repeat(40));
    println!("  Source:              {}", summary.source);
    println!("  Rows Kept:           {:>15}", format_number(summary.rows));
    println!("  Rows Dropped:        {:>15}", format_number(summary.dropped_rows));

    println!("\nCONTENT");
    println!("{}", "-".repeat(40));
    println!("  Movies:              {:>15}", format_number(summary.movies));
    println!("  TV Shows:            {:>15}", format_number(summary.tv_shows));
    println!("  Directors:           {:>15}", format_number(summary.directors));
    println!("  Countries:           {:>15}", format_number(summary.countries));
    println!("  Ratings:             {:>15}", format_number(summary.ratings));
    println!("  Genres:              {:>15}", format_number(summary.genres));

    println!("\nTIMELINE");
    println!("{}", "-".repeat(40));
    if let Some((from, to)) = summary.release_years {
        println!("  Release Years:       {} to {}", from, to);
    }
    if let Some((from, to)) = summary.date_added {
        println!("  Date Added:          {} to {}", from, to);
    }

    Ok(())
}
