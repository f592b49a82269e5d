//! Local order cache
//!
//! The board renders from this collection. It is replaced wholesale on
//! every load and patched in place after a successful status transition.
//! Network calls are always made outside the lock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::report::DateRange;
use shared::{Order, OrderStatus};
use tokio::sync::RwLock;

use crate::ClientResult;
use crate::api::OrderApi;

/// Cache shared between the board and the transition controller
pub type SharedOrderCache = Arc<RwLock<OrderCache>>;

/// Orders by id, iterated in the order the backend returned them
#[derive(Debug, Clone, Default)]
pub struct OrderCache {
    orders: Vec<Order>,
    index: HashMap<String, usize>,
    loaded_at: Option<DateTime<Utc>>,
}

impl OrderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedOrderCache {
        Arc::new(RwLock::new(self))
    }

    /// Replace the whole content; a repeated id keeps its first position
    /// and the last payload
    pub fn replace(&mut self, orders: Vec<Order>) {
        self.orders.clear();
        self.index.clear();
        for order in orders {
            self.upsert(order);
        }
        self.loaded_at = Some(Utc::now());
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.index.get(id).map(|&idx| &self.orders[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn by_status(&self, status: OrderStatus) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(move |o| o.status == status)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// When the content was last replaced
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Set one order's status. Returns `false` if the order is not cached.
    pub fn patch_status(&mut self, id: &str, status: OrderStatus) -> bool {
        match self.index.get(id) {
            Some(&idx) => {
                self.orders[idx].status = status;
                true
            }
            None => false,
        }
    }

    /// Insert or overwrite an order, e.g. with the backend's reply to an edit
    pub fn upsert(&mut self, order: Order) {
        match self.index.get(&order.id) {
            Some(&idx) => self.orders[idx] = order,
            None => {
                self.index.insert(order.id.clone(), self.orders.len());
                self.orders.push(order);
            }
        }
    }

    /// Drop an order after it was deleted on the backend
    pub fn remove(&mut self, id: &str) -> Option<Order> {
        let idx = self.index.remove(id)?;
        let order = self.orders.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(order)
    }
}

/// Fetch orders and replace the cache content.
///
/// On failure the previous content is kept and the error is returned.
pub async fn load<A>(cache: &SharedOrderCache, api: &A, range: &DateRange) -> ClientResult<usize>
where
    A: OrderApi + ?Sized,
{
    let orders = match api.list_orders(range).await {
        Ok(orders) => orders,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load orders");
            return Err(e);
        }
    };
    let count = orders.len();
    cache.write().await.replace(orders);
    tracing::info!(count, "Orders loaded");
    Ok(count)
}
