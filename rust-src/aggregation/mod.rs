//! Aggregation layer: chart data and dataset summaries.

mod charts;
mod dashboard;
mod duration;
mod summary;
mod value_counts;

pub use dashboard::Dashboard;
pub use summary::summarize;
pub use value_counts::CountRow;
