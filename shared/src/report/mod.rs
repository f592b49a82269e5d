//! Dashboard reports
//!
//! Everything here is computed client-side from lists the backend returns.

mod date_filter;
mod painters;
mod summary;

pub use date_filter::{DateFilter, DateRange};
pub use painters::PainterStats;
pub use summary::{FreightTotals, OrderSummary, recent_sales};
