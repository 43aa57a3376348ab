pub mod app;

pub use app::error::SummaryError;
pub use app::filter::FilterEngine;
pub use app::models::{FilterConfig, RunCounters};
pub use app::scanner::create_summary;
