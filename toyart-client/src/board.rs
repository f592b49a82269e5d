//! Kanban board view model
//!
//! Pure projection of the cache into one column per status, in pipeline
//! order. Rendering is left to the caller.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use shared::format::{INVALID_DATE, format_currency, format_date_long, short_id};
use shared::order::{DisplayStatusInfo, display_status_info};
use shared::{Order, OrderStatus};

use crate::cache::OrderCache;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Card {
    pub id: String,
    pub short_id: String,
    pub product: String,
    pub customer: String,
    pub image: Option<String>,
    /// Long pt-BR date, or "Data inválida" when unset
    pub delivery_estimate: String,
    pub unit_price: String,
    pub urgent: bool,
    pub status_info: DisplayStatusInfo,
}

impl Card {
    pub fn from_order(order: &Order, now: NaiveDateTime) -> Self {
        Self {
            id: order.id.clone(),
            short_id: short_id(&order.id).to_string(),
            product: order.product.clone(),
            customer: order.customer.clone(),
            image: order.first_image().map(str::to_string),
            delivery_estimate: order
                .delivery_estimate
                .map(format_date_long)
                .unwrap_or_else(|| INVALID_DATE.to_string()),
            unit_price: format_currency(order.unit_price),
            urgent: order.urgent,
            status_info: display_status_info(order, now),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Column {
    pub status: OrderStatus,
    pub title: &'static str,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// Group cached orders by status; cards keep the cache's load order
    pub fn render(cache: &OrderCache, now: NaiveDateTime) -> Self {
        let columns = OrderStatus::ALL
            .into_iter()
            .map(|status| Column {
                status,
                title: status.title(),
                cards: cache
                    .by_status(status)
                    .map(|order| Card::from_order(order, now))
                    .collect(),
            })
            .collect();
        Self { columns }
    }

    pub fn column(&self, status: OrderStatus) -> Option<&Column> {
        self.columns.iter().find(|c| c.status == status)
    }

    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(Column::count).sum()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in &self.columns {
            writeln!(f, "== {} ({})", column.title, column.count())?;
            for card in &column.cards {
                write!(
                    f,
                    "  #{} {} | {} | {}",
                    card.short_id, card.customer, card.product, card.unit_price
                )?;
                if card.urgent {
                    f.write_str(" | URGENT")?;
                }
                if let Some(message) = &card.status_info.message {
                    write!(f, " | {}", message)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
