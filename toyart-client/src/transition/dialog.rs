//! Status confirmation dialog
//!
//! Opened after a cross-column drop. Prefetches the default e-mail text
//! for the target status and collects what the target needs: images for
//! `finalized`, a tracking code and documents for `shipped`, only the
//! message otherwise. It never calls the commit endpoints; the controller
//! does that with the [`Confirmation`] it yields.

use shared::{Attachment, OrderStatus};

use super::{Confirmation, DialogError};
use crate::api::OrderApi;
use crate::files;

/// Accept hint for finalized photos
pub const IMAGE_ACCEPT: &str = "image/*";

/// Accept hint for shipping documents
pub const DOCUMENT_ACCEPT: &str = ".pdf";

/// Everything needed to open the dialog for a pending transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSeed {
    pub order_id: String,
    pub target: OrderStatus,
    /// Shown to the operator, never edited here
    pub email: Option<String>,
}

/// How the dialog was closed, tagged with the transition it was opened for
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    Confirmed {
        seed: DialogSeed,
        confirmation: Confirmation,
    },
    Cancelled {
        seed: DialogSeed,
    },
}

impl DialogOutcome {
    pub fn seed(&self) -> &DialogSeed {
        match self {
            Self::Confirmed { seed, .. } | Self::Cancelled { seed } => seed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmationDialog {
    seed: DialogSeed,
    message: String,
    attachments: Vec<Attachment>,
    tracking_code: String,
}

impl ConfirmationDialog {
    /// Open the dialog, pre-filling the message from the backend.
    ///
    /// A failed prefetch is not fatal: the message starts empty. An empty
    /// template falls back to the built-in text for the status.
    pub async fn open<A>(api: &A, seed: DialogSeed) -> Self
    where
        A: OrderApi + ?Sized,
    {
        let message = match api.default_message(seed.target).await {
            Ok(template) if template.message.trim().is_empty() => {
                seed.target.fallback_message().to_string()
            }
            Ok(template) => template.message,
            Err(e) => {
                tracing::warn!(
                    order_id = %seed.order_id,
                    target = %seed.target,
                    error = %e,
                    "Failed to fetch default message"
                );
                String::new()
            }
        };
        Self::with_message(seed, message)
    }

    /// Open the dialog with a given message, without any network call
    pub fn with_message(seed: DialogSeed, message: impl Into<String>) -> Self {
        Self {
            seed,
            message: message.into(),
            attachments: Vec::new(),
            tracking_code: String::new(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.seed.order_id
    }

    pub fn target(&self) -> OrderStatus {
        self.seed.target
    }

    pub fn email(&self) -> Option<&str> {
        self.seed.email.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// File picker hint, `None` when the target takes no files
    pub fn accept_hint(&self) -> Option<&'static str> {
        match self.seed.target {
            OrderStatus::Finalized => Some(IMAGE_ACCEPT),
            OrderStatus::Shipped => Some(DOCUMENT_ACCEPT),
            _ => None,
        }
    }

    pub fn accepts_tracking_code(&self) -> bool {
        self.seed.target == OrderStatus::Shipped
    }

    pub fn attach(&mut self, attachment: Attachment) -> Result<(), DialogError> {
        let hint = self
            .accept_hint()
            .ok_or(DialogError::AttachmentsNotAccepted(self.seed.target))?;
        if !files::accepts(hint, &attachment) {
            return Err(DialogError::UnsupportedFile {
                file_name: attachment.file_name,
                accept: hint,
            });
        }
        self.attachments.push(attachment);
        Ok(())
    }

    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        (index < self.attachments.len()).then(|| self.attachments.remove(index))
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn set_tracking_code(&mut self, code: impl Into<String>) -> Result<(), DialogError> {
        if !self.accepts_tracking_code() {
            return Err(DialogError::TrackingCodeNotAccepted(self.seed.target));
        }
        self.tracking_code = code.into().trim().to_string();
        Ok(())
    }

    pub fn tracking_code(&self) -> &str {
        &self.tracking_code
    }

    /// Close the dialog with the payload for its target
    pub fn confirm(self) -> DialogOutcome {
        let message = self.message;
        let confirmation = match self.seed.target {
            OrderStatus::Finalized => Confirmation::Finalized {
                message,
                images: self.attachments,
            },
            OrderStatus::Shipped => Confirmation::Shipped {
                message,
                tracking_code: self.tracking_code,
                documents: self.attachments,
            },
            _ => Confirmation::Message { message },
        };
        DialogOutcome::Confirmed {
            seed: self.seed,
            confirmation,
        }
    }

    pub fn cancel(self) -> DialogOutcome {
        DialogOutcome::Cancelled { seed: self.seed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(target: OrderStatus) -> DialogSeed {
        DialogSeed {
            order_id: "64f1c0ffee0001".into(),
            target,
            email: Some("ana@example.com".into()),
        }
    }

    fn dialog(target: OrderStatus) -> ConfirmationDialog {
        ConfirmationDialog::with_message(seed(target), "Olá!")
    }

    fn photo() -> Attachment {
        Attachment::new("toy.png", "image/png", vec![1])
    }

    fn invoice() -> Attachment {
        Attachment::new("nf.pdf", "application/pdf", vec![2])
    }

    #[test]
    fn test_message_only_targets() {
        let mut d = dialog(OrderStatus::InProduction);
        assert_eq!(d.accept_hint(), None);
        assert_eq!(
            d.attach(photo()),
            Err(DialogError::AttachmentsNotAccepted(OrderStatus::InProduction))
        );
        assert_eq!(
            d.set_tracking_code("BR1"),
            Err(DialogError::TrackingCodeNotAccepted(OrderStatus::InProduction))
        );
        d.set_message("Começamos!");
        assert_eq!(
            d.confirm(),
            DialogOutcome::Confirmed {
                seed: seed(OrderStatus::InProduction),
                confirmation: Confirmation::Message {
                    message: "Começamos!".into()
                },
            }
        );
    }

    #[test]
    fn test_finalized_takes_images() {
        let mut d = dialog(OrderStatus::Finalized);
        assert_eq!(d.accept_hint(), Some(IMAGE_ACCEPT));
        d.attach(photo()).unwrap();
        assert!(matches!(
            d.attach(invoice()),
            Err(DialogError::UnsupportedFile { accept: IMAGE_ACCEPT, .. })
        ));
        assert!(d.set_tracking_code("BR1").is_err());
        assert_eq!(
            d.confirm(),
            DialogOutcome::Confirmed {
                seed: seed(OrderStatus::Finalized),
                confirmation: Confirmation::Finalized {
                    message: "Olá!".into(),
                    images: vec![photo()],
                },
            }
        );
    }

    #[test]
    fn test_shipped_takes_tracking_code_and_documents() {
        let mut d = dialog(OrderStatus::Shipped);
        assert_eq!(d.accept_hint(), Some(DOCUMENT_ACCEPT));
        d.attach(invoice()).unwrap();
        d.set_tracking_code(" BR123456789 ").unwrap();
        assert_eq!(d.tracking_code(), "BR123456789");
        assert_eq!(
            d.confirm(),
            DialogOutcome::Confirmed {
                seed: seed(OrderStatus::Shipped),
                confirmation: Confirmation::Shipped {
                    message: "Olá!".into(),
                    tracking_code: "BR123456789".into(),
                    documents: vec![invoice()],
                },
            }
        );
    }

    #[test]
    fn test_empty_tracking_code_is_allowed() {
        let d = dialog(OrderStatus::Shipped);
        let DialogOutcome::Confirmed { confirmation, .. } = d.confirm() else {
            panic!("expected a confirmation");
        };
        assert_eq!(confirmation.tracking_code(), Some(""));
    }

    #[test]
    fn test_remove_attachment_and_cancel() {
        let mut d = dialog(OrderStatus::Finalized);
        d.attach(photo()).unwrap();
        assert!(d.remove_attachment(3).is_none());
        assert_eq!(d.remove_attachment(0), Some(photo()));
        assert!(d.attachments().is_empty());
        assert_eq!(d.email(), Some("ana@example.com"));
        let outcome = d.cancel();
        assert_eq!(outcome.seed(), &seed(OrderStatus::Finalized));
        assert!(matches!(outcome, DialogOutcome::Cancelled { .. }));
    }
}
