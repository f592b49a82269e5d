//! Backend API seams
//!
//! [`OrderApi`] covers what the board and the status transition workflow
//! need; [`BackofficeApi`] covers order administration, reports, feedback
//! and the sender e-mail settings. [`crate::NetworkHttpClient`] implements
//! both against the REST backend.

use async_trait::async_trait;
use shared::client::{EmailConfig, EmailConfigUpdate};
use shared::models::{MessageTemplate, OrderUpdate, PainterCount};
use shared::order::{OrderDraft, PdfExtraction};
use shared::report::DateRange;
use shared::{Attachment, Feedback, FeedbackSubmission, Order, OrderStatus};

use crate::ClientResult;

/// Customer e-mail sent before a status change (`POST /orders/{id}/enviar-email`)
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub status: OrderStatus,
    pub message: String,
    /// Customer address; sent empty when the order has none
    pub email: Option<String>,
    /// Only sent for shipped orders, and only when not empty
    pub tracking_code: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl Notification {
    /// Text fields of the multipart form, in the order the backend reads them.
    /// Attachments go under `arquivos`.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("mensagem", self.message.clone()),
            ("status", self.status.as_wire().to_string()),
            ("email", self.email.clone().unwrap_or_default()),
        ];
        if self.status == OrderStatus::Shipped
            && let Some(code) = self.tracking_code.as_deref().filter(|c| !c.is_empty())
        {
            fields.push(("codigoRastreamento", code.to_string()));
        }
        fields
    }
}

/// Calls used by the board and the transition workflow
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// `GET /orders`, optionally bounded by creation date
    async fn list_orders(&self, range: &DateRange) -> ClientResult<Vec<Order>>;

    /// `GET /orders/mensagens/{status}`
    async fn default_message(&self, status: OrderStatus) -> ClientResult<MessageTemplate>;

    /// `POST /orders/{id}/enviar-email`
    async fn notify(&self, order_id: &str, notification: &Notification) -> ClientResult<()>;

    /// `PATCH /orders/{id}` with `{status}`
    async fn patch_status(&self, order_id: &str, status: OrderStatus) -> ClientResult<()>;

    /// `PATCH /orders/{id}/enviar` with `{codigoRastreamento}`
    async fn mark_shipped(&self, order_id: &str, tracking_code: &str) -> ClientResult<()>;
}

/// Order administration, reports, feedback and settings
#[async_trait]
pub trait BackofficeApi: Send + Sync {
    /// `POST /orders/pdf` (field `file`)
    async fn extract_pdf(&self, pdf: &Attachment) -> ClientResult<PdfExtraction>;

    /// `POST /orders/com-imagem`
    async fn create_order(&self, draft: &OrderDraft, images: &[Attachment]) -> ClientResult<()>;

    /// `PATCH /orders/{id}` with the changed fields
    async fn update_order(&self, order_id: &str, update: &OrderUpdate) -> ClientResult<Order>;

    /// `DELETE /orders/{id}`
    async fn delete_order(&self, order_id: &str) -> ClientResult<()>;

    /// `GET /orders/count-all-pintores`
    async fn painter_counts(&self, range: &DateRange) -> ClientResult<Vec<PainterCount>>;

    /// `GET /avaliacao`
    async fn list_feedback(&self) -> ClientResult<Vec<Feedback>>;

    /// `POST /avaliacao`
    async fn submit_feedback(&self, submission: &FeedbackSubmission) -> ClientResult<()>;

    /// `GET /email-config`
    async fn email_config(&self) -> ClientResult<EmailConfig>;

    /// `POST /email-config`
    async fn save_email_config(&self, update: &EmailConfigUpdate) -> ClientResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(status: OrderStatus, tracking_code: Option<&str>) -> Notification {
        Notification {
            status,
            message: "Olá".into(),
            email: None,
            tracking_code: tracking_code.map(str::to_string),
            attachments: vec![],
        }
    }

    #[test]
    fn test_form_fields() {
        let fields = notification(OrderStatus::InProduction, None).form_fields();
        assert_eq!(
            fields,
            [
                ("mensagem", "Olá".to_string()),
                ("status", "producao".to_string()),
                ("email", String::new()),
            ]
        );
    }

    #[test]
    fn test_tracking_code_only_when_shipped() {
        let shipped = notification(OrderStatus::Shipped, Some("BR123")).form_fields();
        assert_eq!(shipped.last(), Some(&("codigoRastreamento", "BR123".to_string())));

        let empty = notification(OrderStatus::Shipped, Some("")).form_fields();
        assert!(empty.iter().all(|(k, _)| *k != "codigoRastreamento"));

        let finalized = notification(OrderStatus::Finalized, Some("BR123")).form_fields();
        assert!(finalized.iter().all(|(k, _)| *k != "codigoRastreamento"));
    }
}
