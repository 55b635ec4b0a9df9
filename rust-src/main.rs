//! catalog-explorer CLI
//!
//! Load a video catalog CSV, filter it and explore it through a fixed set of
//! charts in the terminal or as an exported image.

mod aggregation;
mod cli;
mod commands;
mod config;
mod data;
mod filter;
mod models;
mod visualization;


fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
