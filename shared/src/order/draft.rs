//! Order creation form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::de::{date_opt, lenient_f64, lenient_opt_f64};
use crate::error::{ValidationError, ValidationResult};
use crate::format::{parse_date, parse_decimal};
use crate::models::OrderStatus;

/// Fields the backend extracted from an uploaded order PDF (`POST /orders/pdf`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PdfExtraction {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub cliente: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub endereco: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub produto: Option<String>,
    #[serde(rename = "previsaoEntrega", default, with = "date_opt")]
    pub previsao_entrega: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub frete: f64,
    #[serde(rename = "tipoFrete", default)]
    pub tipo_frete: Option<String>,
    #[serde(rename = "valorUnitario", default, deserialize_with = "lenient_f64")]
    pub valor_unitario: f64,
    #[serde(rename = "valorTotal", default, deserialize_with = "lenient_opt_f64")]
    pub valor_total: Option<f64>,
    #[serde(default)]
    pub observacao: Vec<String>,
}

impl PdfExtraction {
    /// Pre-fill a creation form; the operator reviews it before submitting
    pub fn into_draft(self) -> OrderDraft {
        let mut draft = OrderDraft {
            customer: self.nome.or(self.cliente).unwrap_or_default(),
            email: self.email,
            phone: self.telefone,
            address: self.endereco,
            product: self.descricao.or(self.produto).unwrap_or_default(),
            freight: self.frete,
            freight_type: self.tipo_frete,
            unit_price: self.valor_unitario,
            total: 0.0,
            urgent: false,
            delivery_estimate: self.previsao_entrega,
            observation_text: self.observacao.join("\n"),
        };
        draft.total = self.valor_total.unwrap_or(draft.freight + draft.unit_price);
        draft
    }
}

/// Editable new-order form.
///
/// `total` tracks `freight + unit_price` as either is edited; the backend
/// has the final word once the order is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    pub customer: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub product: String,
    pub freight: f64,
    pub freight_type: Option<String>,
    pub unit_price: f64,
    pub total: f64,
    pub urgent: bool,
    pub delivery_estimate: Option<NaiveDate>,
    /// One observation per line
    pub observation_text: String,
}

impl OrderDraft {
    pub fn new(customer: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            product: product.into(),
            ..Default::default()
        }
    }

    /// Set freight from a typed value; empty input means zero
    pub fn set_freight(&mut self, raw: &str) -> ValidationResult<()> {
        self.freight = parse_amount("frete", raw)?;
        self.recompute_total();
        Ok(())
    }

    /// Set unit price from a typed value; empty input means zero
    pub fn set_unit_price(&mut self, raw: &str) -> ValidationResult<()> {
        self.unit_price = parse_amount("valorUnitario", raw)?;
        self.recompute_total();
        Ok(())
    }

    /// Set the delivery estimate from `DD/MM/YYYY` or `YYYY-MM-DD`
    pub fn set_delivery_estimate(&mut self, raw: &str) -> ValidationResult<()> {
        if raw.trim().is_empty() {
            self.delivery_estimate = None;
            return Ok(());
        }
        self.delivery_estimate =
            Some(parse_date(raw).ok_or_else(|| ValidationError::InvalidDate(raw.to_string()))?);
        Ok(())
    }

    fn recompute_total(&mut self) {
        self.total = self.freight + self.unit_price;
    }

    pub fn observations(&self) -> Vec<String> {
        self.observation_text.split('\n').map(str::to_string).collect()
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.customer.trim().is_empty() {
            return Err(ValidationError::MissingField("cliente"));
        }
        if self.product.trim().is_empty() {
            return Err(ValidationError::MissingField("produto"));
        }
        Ok(())
    }

    /// Text fields of the `POST /orders/com-imagem` multipart form.
    ///
    /// Observations repeat the `observacao` field once per line; new orders
    /// always start as `novo`.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("cliente", self.customer.clone())];
        let optional = [
            ("email", &self.email),
            ("telefone", &self.phone),
            ("endereco", &self.address),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                fields.push((name, value.clone()));
            }
        }
        fields.push(("produto", self.product.clone()));
        fields.push(("frete", self.freight.to_string()));
        if let Some(freight_type) = &self.freight_type {
            fields.push(("tipoFrete", freight_type.clone()));
        }
        fields.push(("valorUnitario", self.unit_price.to_string()));
        fields.push(("valorTotal", self.total.to_string()));
        fields.push(("urgente", self.urgent.to_string()));
        if let Some(date) = self.delivery_estimate {
            fields.push(("previsaoEntrega", date.format("%Y-%m-%d").to_string()));
        }
        for line in self.observations() {
            fields.push(("observacao", line));
        }
        fields.push(("status", OrderStatus::New.as_wire().to_string()));
        fields
    }
}

fn parse_amount(field: &'static str, raw: &str) -> ValidationResult<f64> {
    if raw.trim().is_empty() {
        return Ok(0.0);
    }
    parse_decimal(raw).ok_or_else(|| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}
