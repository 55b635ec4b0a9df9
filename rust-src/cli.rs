//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands;
use crate::config::resolve_data_path;
use crate::data::CatalogCache;
use crate::filter::FilterOverrides;
use crate::models::ContentType;


/// catx - explore a video catalog dataset from the terminal
#[derive(Parser, Debug)]
#[command(name = "catx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog CSV file (default: ./netflix_data.csv)
    #[arg(long, global = true, env = "CATX_DATA", value_name = "PATH")]
    data: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    filters: FilterArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}


/// Startup filter selection shared by every chart command.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Content type to include: "Movie" or "TV Show" (repeatable; default: all)
    #[arg(long = "type", value_name = "TYPE", global = true)]
    content_types: Vec<ContentType>,

    /// Country value to include (repeatable; default: first 10 in the dataset)
    #[arg(long = "country", value_name = "NAME", global = true)]
    countries: Vec<String>,

    /// Include every country
    #[arg(long, global = true, conflicts_with = "countries")]
    all_countries: bool,

    /// First release year to include (default: 2000)
    #[arg(long, value_name = "YEAR", global = true)]
    from_year: Option<i32>,

    /// Last release year to include (default: 2022)
    #[arg(long, value_name = "YEAR", global = true)]
    to_year: Option<i32>,
}


impl From<FilterArgs> for FilterOverrides {
    fn from(args: FilterArgs) -> Self {
        FilterOverrides {
            content_types: args.content_types,
            countries: args.countries,
            all_countries: args.all_countries,
            from_year: args.from_year,
            to_year: args.to_year,
        }
    }
}


#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive dashboard with sidebar filters (default)
    Dashboard,

    /// Print every chart as a text report
    Report,

    /// Export all charts as a PNG or SVG image
    Export {
        /// Export as SVG instead of PNG
        #[arg(long)]
        svg: bool,

        /// Open file after export
        #[arg(long)]
        open: bool,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show dataset summary figures
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}


/// Install the stderr log subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8, interactive: bool) {
    let level = match (interactive, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Dashboard));
    init_logging(cli.verbose, interactive);

    let data = resolve_data_path(cli.data);
    let overrides = FilterOverrides::from(cli.filters);
    let mut cache = CatalogCache::new();

    match cli.command {
        None | Some(Commands::Dashboard) => commands::dashboard::run(&mut cache, &data, &overrides),
        Some(Commands::Report) => commands::report::run(&mut cache, &data, &overrides),
        Some(Commands::Export { svg, open, output }) => {
            commands::export::run(&mut cache, &data, &overrides, svg, open, output)
        }
        Some(Commands::Summary { json }) => commands::summary::run(&mut cache, &data, json),
    }
}
