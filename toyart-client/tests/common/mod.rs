// toyart-client/tests/common/mod.rs
// In-memory OrderApi that records every call

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::models::MessageTemplate;
use shared::report::DateRange;
use shared::{Order, OrderStatus};
use tokio::sync::Notify;
use toyart_client::{ClientError, ClientResult, Notification, OrderApi};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListOrders,
    DefaultMessage(OrderStatus),
    Notify {
        order_id: String,
        notification: Notification,
    },
    PatchStatus {
        order_id: String,
        status: OrderStatus,
    },
    MarkShipped {
        order_id: String,
        tracking_code: String,
    },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Call::PatchStatus { .. } | Call::MarkShipped { .. })
    }
}

/// Parks `notify` until released, so a commit can be observed in flight
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct RecordingApi {
    orders: Mutex<Vec<Order>>,
    calls: Mutex<Vec<Call>>,
    templates: Mutex<Vec<(OrderStatus, String)>>,
    pub fail_list: AtomicBool,
    pub fail_prefetch: AtomicBool,
    pub fail_notify: AtomicBool,
    pub fail_mutate: AtomicBool,
    gate: Mutex<Option<Arc<Gate>>>,
}

impl RecordingApi {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        let api = Self::default();
        *api.orders.lock().unwrap() = orders;
        api
    }

    pub fn with_template(self, status: OrderStatus, message: &str) -> Self {
        self.templates
            .lock()
            .unwrap()
            .push((status, message.to_string()));
        self
    }

    pub fn gate(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made by commits (notify and status changes only)
    pub fn commit_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Notify { .. }) || c.is_mutation())
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fail(flag: &AtomicBool, what: &str) -> ClientResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(ClientError::Api {
                status: 503,
                message: format!("{what} unavailable"),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl OrderApi for RecordingApi {
    async fn list_orders(&self, _range: &DateRange) -> ClientResult<Vec<Order>> {
        self.record(Call::ListOrders);
        Self::fail(&self.fail_list, "orders")?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn default_message(&self, status: OrderStatus) -> ClientResult<MessageTemplate> {
        self.record(Call::DefaultMessage(status));
        Self::fail(&self.fail_prefetch, "templates")?;
        let message = self
            .templates
            .lock()
            .unwrap()
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, m)| m.clone())
            .unwrap_or_default();
        Ok(MessageTemplate { message })
    }

    async fn notify(&self, order_id: &str, notification: &Notification) -> ClientResult<()> {
        self.record(Call::Notify {
            order_id: order_id.to_string(),
            notification: notification.clone(),
        });
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        Self::fail(&self.fail_notify, "mail")
    }

    async fn patch_status(&self, order_id: &str, status: OrderStatus) -> ClientResult<()> {
        self.record(Call::PatchStatus {
            order_id: order_id.to_string(),
            status,
        });
        Self::fail(&self.fail_mutate, "orders")
    }

    async fn mark_shipped(&self, order_id: &str, tracking_code: &str) -> ClientResult<()> {
        self.record(Call::MarkShipped {
            order_id: order_id.to_string(),
            tracking_code: tracking_code.to_string(),
        });
        Self::fail(&self.fail_mutate, "orders")
    }
}

pub fn order(id: &str, status: OrderStatus) -> Order {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "produto": "Toy Dunny 8\"",
        "cliente": "Ana Souza",
        "email": "ana@example.com",
        "status": status,
        "valorUnitario": 300,
        "frete": 25,
    }))
    .unwrap()
}
