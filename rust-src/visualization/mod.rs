//! Visualization layer: interactive dashboard, text report and image export.

mod export;
mod report;
mod tui;

pub use export::{export_dashboard_png, export_dashboard_svg, open_file};
pub use report::{format_number, print_report};
pub use tui::run_dashboard;
