//! Data collected by the confirmation dialog

use shared::{Attachment, OrderStatus};

use crate::api::Notification;

/// What the operator confirmed, shaped by the target status
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    /// `new`, `in_production`, `feedback_requested`
    Message { message: String },
    /// Photos of the finished piece
    Finalized {
        message: String,
        images: Vec<Attachment>,
    },
    /// Tracking code (may be empty) and invoice documents
    Shipped {
        message: String,
        tracking_code: String,
        documents: Vec<Attachment>,
    },
}

impl Confirmation {
    pub fn message(&self) -> &str {
        match self {
            Self::Message { message }
            | Self::Finalized { message, .. }
            | Self::Shipped { message, .. } => message,
        }
    }

    pub fn attachments(&self) -> &[Attachment] {
        match self {
            Self::Message { .. } => &[],
            Self::Finalized { images, .. } => images,
            Self::Shipped { documents, .. } => documents,
        }
    }

    pub fn tracking_code(&self) -> Option<&str> {
        match self {
            Self::Shipped { tracking_code, .. } => Some(tracking_code),
            _ => None,
        }
    }

    /// Whether this payload shape belongs to `target`
    pub fn accepts(&self, target: OrderStatus) -> bool {
        match self {
            Self::Message { .. } => !matches!(
                target,
                OrderStatus::Finalized | OrderStatus::Shipped
            ),
            Self::Finalized { .. } => target == OrderStatus::Finalized,
            Self::Shipped { .. } => target == OrderStatus::Shipped,
        }
    }

    /// Build the notify call for `target`, addressed to the customer
    pub fn into_notification(self, target: OrderStatus, email: Option<String>) -> Notification {
        let (message, tracking_code, attachments) = match self {
            Self::Message { message } => (message, None, Vec::new()),
            Self::Finalized { message, images } => (message, None, images),
            Self::Shipped {
                message,
                tracking_code,
                documents,
            } => (message, Some(tracking_code), documents),
        };
        Notification {
            status: target,
            message,
            email,
            tracking_code,
            attachments,
        }
    }
}
