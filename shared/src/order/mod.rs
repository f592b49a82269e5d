//! Order-level computations shared by the board and the forms

mod deadline;
mod draft;

pub use deadline::{DisplayStatusInfo, Severity, days_remaining, display_status_info};
pub use draft::{OrderDraft, PdfExtraction};
