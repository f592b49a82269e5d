//! Data models
//!
//! Wire names follow the backend (Portuguese field names, camelCase);
//! Rust field names are English.

pub mod attachment;
pub mod feedback;
pub mod order;
pub mod painter;

// Re-exports
pub use attachment::*;
pub use feedback::*;
pub use order::*;
pub use painter::*;
