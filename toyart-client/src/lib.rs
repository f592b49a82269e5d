//! Toy-art order console client
//!
//! HTTP access to the order backend, the local order cache, the kanban
//! board view model and the confirm-then-commit status transition workflow.

pub mod api;
pub mod board;
pub mod cache;
pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod logger;
pub mod transition;

pub use api::{BackofficeApi, Notification, OrderApi};
pub use board::{Board, Card, Column};
pub use cache::{OrderCache, SharedOrderCache};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::NetworkHttpClient;
pub use transition::{
    Confirmation, ConfirmationDialog, DialogOutcome, DragEnd, Resolution, TransitionController,
    TransitionError,
};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, UserInfo};
pub use shared::{Order, OrderStatus};
