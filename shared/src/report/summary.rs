//! Overview cards: order counts, freight, revenue, recent sales

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Order, OrderStatus};

/// Freight paid per carrier service
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct FreightTotals {
    pub sedex: f64,
    pub pac: f64,
}

impl FreightTotals {
    pub fn total(&self) -> f64 {
        self.sedex + self.pac
    }

    fn add(&mut self, order: &Order) {
        let Some(kind) = order.freight_type.as_deref() else {
            return;
        };
        match kind.trim().to_uppercase().as_str() {
            "SEDEX" => self.sedex += order.freight,
            "PAC" => self.pac += order.freight,
            _ => {}
        }
    }
}

/// Figures shown on the dashboard overview
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct OrderSummary {
    pub total_orders: usize,
    pub status_counts: BTreeMap<OrderStatus, usize>,
    pub freight: FreightTotals,
    /// Sum of order totals net of freight
    pub revenue: f64,
}

impl OrderSummary {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut summary = Self {
            status_counts: OrderStatus::ALL.into_iter().map(|s| (s, 0)).collect(),
            ..Default::default()
        };
        for order in orders {
            summary.total_orders += 1;
            *summary.status_counts.entry(order.status).or_default() += 1;
            summary.freight.add(order);
            summary.revenue += order.net_of_freight();
        }
        summary
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }

    pub fn in_production(&self) -> usize {
        self.count(OrderStatus::InProduction)
    }
}

/// Orders created within the last `days` days, newest first.
///
/// Orders without a valid creation timestamp are left out.
pub fn recent_sales(orders: &[Order], days: i64, now: DateTime<Utc>) -> Vec<&Order> {
    let cutoff = now - Duration::days(days);
    let mut recent: Vec<&Order> = orders
        .iter()
        .filter(|o| o.created_at.is_some_and(|ts| ts > cutoff))
        .collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent
}
