//! Interactive terminal dashboard.
//!
//! Sidebar filters on the left, chart tabs on the right. Every filter change
//! re-runs the filter and aggregation pass before the next frame.

mod app;
mod ui;

pub use app::run_dashboard;
