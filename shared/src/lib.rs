//! Shared types for the toy-art order console
//!
//! Domain models exchanged with the order backend, plus the pure
//! computations the console derives from them (delivery countdowns,
//! pt-BR formatting, dashboard reports).

pub mod client;
pub mod de;
pub mod error;
pub mod format;
pub mod models;
pub mod order;
pub mod report;
pub mod response;

// Re-exports
pub use error::{ValidationError, ValidationResult};
pub use models::{Attachment, Feedback, FeedbackSubmission, Order, OrderStatus};
pub use serde::{Deserialize, Serialize};
