//! Order status transitions
//!
//! A drop on another board column becomes a pending transition. The
//! operator confirms it in a [`ConfirmationDialog`], and the
//! [`TransitionController`] commits it in two steps: the customer e-mail
//! first, then the status change. The local cache is only touched after
//! both calls succeed.

mod confirmation;
mod controller;
mod dialog;

use std::fmt;

use shared::OrderStatus;
use thiserror::Error;

use crate::ClientError;

pub use confirmation::Confirmation;
pub use controller::{ControllerState, DragEnd, Resolution, TransitionController, TransitionReceipt};
pub use dialog::{ConfirmationDialog, DOCUMENT_ACCEPT, DialogOutcome, DialogSeed, IMAGE_ACCEPT};

/// Notice shown when a commit fails, whatever the cause
pub const FAILURE_NOTICE: &str = "Failed to send data";

/// Commit step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStage {
    /// `POST /orders/{id}/enviar-email`
    Notify,
    /// `PATCH /orders/{id}` or `PATCH /orders/{id}/enviar`
    Mutate,
}

impl fmt::Display for CommitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Notify => "notify",
            Self::Mutate => "mutate",
        })
    }
}

/// Input rejected by the confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    #[error("Status {0} does not take attachments")]
    AttachmentsNotAccepted(OrderStatus),

    #[error("Status {0} does not take a tracking code")]
    TrackingCodeNotAccepted(OrderStatus),

    #[error("{file_name} does not match {accept}")]
    UnsupportedFile {
        file_name: String,
        accept: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("No transition is waiting for confirmation")]
    NothingPending,

    #[error("Order {order_id} already has a transition in progress")]
    InFlight { order_id: String },

    #[error("Dialog for order {order_id} ({target}) is no longer the pending transition")]
    StaleDialog {
        order_id: String,
        target: OrderStatus,
    },

    #[error("Confirmation does not match target status {target}")]
    PayloadMismatch { target: OrderStatus },

    #[error("{stage} call failed: {source}")]
    Commit {
        stage: CommitStage,
        #[source]
        source: ClientError,
    },
}

impl TransitionError {
    /// Text for the operator's toast
    pub fn notice(&self) -> String {
        match self {
            Self::Commit { .. } => FAILURE_NOTICE.to_string(),
            other => other.to_string(),
        }
    }
}
