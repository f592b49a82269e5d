//! Order Model

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::de::{date_opt, lenient_f64, lenient_opt_f64, timestamp_opt};

/// Pipeline stage of an order.
///
/// Declaration order is the board's column order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderStatus {
    #[serde(rename = "novo")]
    New,
    #[serde(rename = "producao")]
    InProduction,
    #[serde(rename = "finalizado")]
    Finalized,
    #[serde(rename = "enviado")]
    Shipped,
    #[serde(rename = "feedback")]
    FeedbackRequested,
}

impl OrderStatus {
    /// All statuses in board display order
    pub const ALL: [OrderStatus; 5] = [
        Self::New,
        Self::InProduction,
        Self::Finalized,
        Self::Shipped,
        Self::FeedbackRequested,
    ];

    /// Value used by the backend (paths, JSON, form fields)
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::New => "novo",
            Self::InProduction => "producao",
            Self::Finalized => "finalizado",
            Self::Shipped => "enviado",
            Self::FeedbackRequested => "feedback",
        }
    }

    /// Stable snake_case name
    pub fn name(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProduction => "in_production",
            Self::Finalized => "finalized",
            Self::Shipped => "shipped",
            Self::FeedbackRequested => "feedback_requested",
        }
    }

    /// Board column title
    pub fn title(&self) -> &'static str {
        match self {
            Self::New => "New Order",
            Self::InProduction => "In Production",
            Self::Finalized => "Finalized",
            Self::Shipped => "Shipped",
            Self::FeedbackRequested => "Feedback",
        }
    }

    /// The order already left the workshop; no delivery countdown applies
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Shipped | Self::FeedbackRequested)
    }

    /// Built-in e-mail text used when the backend has no template for the status
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::New => "",
            Self::InProduction => {
                "Seu pedido já entrou na fase de produção! Estamos cuidando de cada detalhe \
                 e avisamos por aqui assim que estiver finalizado."
            }
            Self::Finalized => {
                "Seu Toy exclusivo ficou pronto! Confira a foto no anexo. \
                 Em breve enviaremos o código de rastreio."
            }
            Self::Shipped => {
                "Seu Toy art foi enviado e já está a caminho da sua coleção! \
                 A NF está anexada neste e-mail em PDF."
            }
            Self::FeedbackRequested => {
                "Seu Toy chegou e queremos saber: como foi sua experiência? \
                 Seu feedback é muito importante pra gente."
            }
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    /// Accepts both the wire value (`producao`) and the name (`in_production`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_wire() == s || status.name() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Order entity as served by `GET /orders`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    #[serde(rename = "produto")]
    pub product: String,
    #[serde(rename = "cliente")]
    pub customer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Free-text observation lines
    #[serde(rename = "observacao", default)]
    pub observations: Vec<String>,
    #[serde(rename = "pintor", default, skip_serializing_if = "Option::is_none")]
    pub painter: Option<String>,
    /// Freight in BRL
    #[serde(rename = "frete", default, deserialize_with = "lenient_f64")]
    pub freight: f64,
    /// Carrier service (SEDEX, PAC)
    #[serde(rename = "tipoFrete", default, skip_serializing_if = "Option::is_none")]
    pub freight_type: Option<String>,
    /// Unit price in BRL
    #[serde(rename = "valorUnitario", default, deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    /// Server-computed total; see [`Order::total`]
    #[serde(
        rename = "valorTotal",
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_price: Option<f64>,
    /// Legacy single image
    #[serde(rename = "imagem", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "imagens", default)]
    pub images: Vec<String>,
    #[serde(rename = "previsaoEntrega", default, with = "date_opt")]
    pub delivery_estimate: Option<NaiveDate>,
    pub status: OrderStatus,
    #[serde(rename = "urgente", default)]
    pub urgent: bool,
    #[serde(rename = "createdAt", default, with = "timestamp_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Total price: the server's value when present, else freight + unit price
    pub fn total(&self) -> f64 {
        self.total_price.unwrap_or(self.freight + self.unit_price)
    }

    /// Revenue attributable to the product itself
    pub fn net_of_freight(&self) -> f64 {
        self.total() - self.freight
    }

    /// First image to show on a card
    pub fn first_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .or(self.image.as_deref())
    }
}

/// Generic status patch (`PATCH /orders/{id}`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderStatusPatch {
    pub status: OrderStatus,
}

/// Mark-as-shipped payload (`PATCH /orders/{id}/enviar`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShipOrder {
    #[serde(rename = "codigoRastreamento")]
    pub tracking_code: String,
}

/// Editable order fields (`PATCH /orders/{id}`)
///
/// Unset fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderUpdate {
    #[serde(rename = "cliente", skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "observacao", skip_serializing_if = "Option::is_none")]
    pub observations: Option<Vec<String>>,
    #[serde(rename = "pintor", skip_serializing_if = "Option::is_none")]
    pub painter: Option<String>,
    #[serde(rename = "frete", skip_serializing_if = "Option::is_none")]
    pub freight: Option<f64>,
    #[serde(rename = "valorUnitario", skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(
        rename = "previsaoEntrega",
        with = "date_opt",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub delivery_estimate: Option<NaiveDate>,
    #[serde(rename = "urgente", skip_serializing_if = "Option::is_none")]
    pub urgent: Option<bool>,
    /// Per-status customer message overrides
    #[serde(rename = "mensagemEmail", skip_serializing_if = "Option::is_none")]
    pub email_messages: Option<BTreeMap<OrderStatus, String>>,
}

impl OrderUpdate {
    /// Observation lines from a multi-line text field
    pub fn with_observation_text(mut self, text: &str) -> Self {
        self.observations = Some(text.split('\n').map(str::to_string).collect());
        self
    }

    /// Live total while editing: freight + unit price, falling back to the
    /// order's current values for fields not being edited
    pub fn preview_total(&self, current: &Order) -> f64 {
        self.freight.unwrap_or(current.freight) + self.unit_price.unwrap_or(current.unit_price)
    }
}

/// Default notification text for a target status (`GET /orders/mensagens/{status}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageTemplate {
    #[serde(rename = "mensagem", default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "64f1c0ffee0001",
            "produto": "Toy Dunny 8\"",
            "cliente": "Ana Souza",
            "email": "ana@example.com",
            "observacao": ["base preta", "assinatura"],
            "frete": "25.50",
            "tipoFrete": "SEDEX",
            "valorUnitario": 300,
            "imagens": ["https://cdn.example.com/a.png"],
            "previsaoEntrega": "2025-03-10T00:00:00.000Z",
            "status": "producao",
            "urgente": true,
            "createdAt": "2025-03-01T14:00:00.000Z"
        }"#
    }

    #[test]
    fn test_order_deserialize() {
        let order: Order = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(order.status, OrderStatus::InProduction);
        assert_eq!(order.freight, 25.5);
        assert_eq!(order.unit_price, 300.0);
        assert_eq!(order.total(), 325.5);
        assert_eq!(order.net_of_freight(), 300.0);
        assert_eq!(
            order.delivery_estimate,
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );
        assert!(order.urgent);
        assert_eq!(order.first_image(), Some("https://cdn.example.com/a.png"));
    }

    #[test]
    fn test_order_minimal_defaults() {
        let order: Order = serde_json::from_str(
            r#"{"id": "x", "produto": "p", "cliente": "c", "status": "novo", "frete": null}"#,
        )
        .unwrap();
        assert_eq!(order.freight, 0.0);
        assert!(order.observations.is_empty());
        assert!(!order.urgent);
        assert!(order.delivery_estimate.is_none());
        assert!(order.created_at.is_none());
        assert_eq!(order.first_image(), None);
    }

    #[test]
    fn test_server_total_wins() {
        let order: Order = serde_json::from_str(
            r#"{"id": "x", "produto": "p", "cliente": "c", "status": "novo",
                "frete": 10, "valorUnitario": 90, "valorTotal": 95}"#,
        )
        .unwrap();
        assert_eq!(order.total(), 95.0);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<Order, _> = serde_json::from_str(
            r#"{"id": "x", "produto": "p", "cliente": "c", "status": "perdido"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_status_names() {
        assert_eq!(OrderStatus::InProduction.to_string(), "in_production");
        assert_eq!(OrderStatus::InProduction.as_wire(), "producao");
        assert_eq!("enviado".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!(
            "feedback_requested".parse::<OrderStatus>().unwrap(),
            OrderStatus::FeedbackRequested
        );
        assert!("lost".parse::<OrderStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&OrderStatusPatch {
                status: OrderStatus::Finalized
            })
            .unwrap(),
            r#"{"status":"finalizado"}"#
        );
    }

    #[test]
    fn test_fallback_messages() {
        assert!(OrderStatus::New.fallback_message().is_empty());
        assert!(OrderStatus::Shipped.fallback_message().contains("PDF"));
        assert!(!OrderStatus::InProduction.fallback_message().contains("  "));
    }

    #[test]
    fn test_order_update_serializes_only_set_fields() {
        let update = OrderUpdate {
            freight: Some(30.0),
            delivery_estimate: NaiveDate::from_ymd_opt(2025, 4, 1),
            ..Default::default()
        }
        .with_observation_text("linha 1\nlinha 2");
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["frete"], 30.0);
        assert_eq!(json["previsaoEntrega"], "2025-04-01");
        assert_eq!(json["observacao"][1], "linha 2");
        assert!(json.get("cliente").is_none());
    }

    #[test]
    fn test_preview_total() {
        let order: Order = serde_json::from_str(
            r#"{"id": "x", "produto": "p", "cliente": "c", "status": "novo",
                "frete": 10, "valorUnitario": 90}"#,
        )
        .unwrap();
        let update = OrderUpdate {
            unit_price: Some(120.0),
            ..Default::default()
        };
        assert_eq!(update.preview_total(&order), 130.0);
    }
}
