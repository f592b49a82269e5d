//! Drag-and-drop transition controller

use std::collections::BTreeSet;
use std::sync::Arc;

use shared::OrderStatus;
use shared::format::short_id;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use super::{
    CommitStage, Confirmation, ConfirmationDialog, DialogOutcome, DialogSeed, TransitionError,
};
use crate::api::OrderApi;
use crate::cache::SharedOrderCache;

/// A drag completion reported by the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub order_id: String,
    /// Column the card was picked up from
    pub source: OrderStatus,
    /// Column the card was dropped on; `None` when dropped outside the board
    pub destination: Option<OrderStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTransition {
    order_id: String,
    from: OrderStatus,
    target: OrderStatus,
    email: Option<String>,
}

/// Keeps an order id in the in-flight set until dropped, including when
/// the resolving future is cancelled mid-commit
struct InFlightGuard<'a> {
    set: &'a parking_lot::Mutex<BTreeSet<String>>,
    order_id: String,
}

impl<'a> InFlightGuard<'a> {
    /// `None` when the order is already committing
    fn claim(set: &'a parking_lot::Mutex<BTreeSet<String>>, order_id: &str) -> Option<Self> {
        set.lock().insert(order_id.to_string()).then(|| Self {
            set,
            order_id: order_id.to_string(),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.order_id);
    }
}

/// Observable controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    /// A dialog is open for this transition
    PendingConfirmation {
        order_id: String,
        target: OrderStatus,
    },
    /// Commits running, no dialog open
    Committing { order_ids: Vec<String> },
}

/// A committed transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionReceipt {
    pub order_id: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
    /// Success toast text
    pub notice: String,
}

/// Result of resolving the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Cancelled,
    Committed(TransitionReceipt),
}

/// Turns board drops into confirmed, committed status changes.
///
/// Methods take `&self`; the controller can be shared behind an `Arc` and
/// the board stays usable while a commit is in flight. Commits for
/// different orders may overlap, a second commit for the same order is
/// refused until the first one finishes. Nothing is retried.
pub struct TransitionController<A: OrderApi + ?Sized> {
    api: Arc<A>,
    cache: SharedOrderCache,
    pending: Mutex<Option<PendingTransition>>,
    in_flight: parking_lot::Mutex<BTreeSet<String>>,
}

impl<A: OrderApi + ?Sized> TransitionController<A> {
    pub fn new(api: Arc<A>, cache: SharedOrderCache) -> Self {
        Self {
            api,
            cache,
            pending: Mutex::new(None),
            in_flight: parking_lot::Mutex::new(BTreeSet::new()),
        }
    }

    pub fn cache(&self) -> &SharedOrderCache {
        &self.cache
    }

    pub async fn state(&self) -> ControllerState {
        if let Some(pending) = self.pending.lock().await.as_ref() {
            return ControllerState::PendingConfirmation {
                order_id: pending.order_id.clone(),
                target: pending.target,
            };
        }
        let in_flight = self.in_flight.lock();
        if in_flight.is_empty() {
            ControllerState::Idle
        } else {
            ControllerState::Committing {
                order_ids: in_flight.iter().cloned().collect(),
            }
        }
    }

    /// Handle a drag completion.
    ///
    /// Returns the seed for the confirmation dialog, or `None` when the drop
    /// is not a transition (outside the board, same column, unknown order).
    /// A new drop replaces a transition still waiting for confirmation; the
    /// dialog opened for the replaced one can then only be cancelled.
    pub async fn on_drag_end(&self, drag: DragEnd) -> Result<Option<DialogSeed>, TransitionError> {
        let Some(target) = drag.destination else {
            return Ok(None);
        };
        if target == drag.source {
            return Ok(None);
        }

        let (from, email) = {
            let cache = self.cache.read().await;
            match cache.get(&drag.order_id) {
                Some(order) => (order.status, order.email.clone()),
                None => {
                    tracing::debug!(order_id = %drag.order_id, "Dropped order is not cached");
                    return Ok(None);
                }
            }
        };

        if self.in_flight.lock().contains(&drag.order_id) {
            return Err(TransitionError::InFlight {
                order_id: drag.order_id,
            });
        }

        let pending = PendingTransition {
            order_id: drag.order_id.clone(),
            from,
            target,
            email: email.clone(),
        };
        if let Some(replaced) = self.pending.lock().await.replace(pending) {
            tracing::debug!(order_id = %replaced.order_id, "Pending transition replaced");
        }
        tracing::debug!(order_id = %drag.order_id, %from, %target, "Transition pending");

        Ok(Some(DialogSeed {
            order_id: drag.order_id,
            target,
            email,
        }))
    }

    /// Open the confirmation dialog, prefetching the default message
    pub async fn open_dialog(&self, seed: DialogSeed) -> ConfirmationDialog {
        ConfirmationDialog::open(self.api.as_ref(), seed).await
    }

    /// Resolve the pending transition with the dialog's outcome.
    ///
    /// The outcome must come from the dialog opened for the pending
    /// transition; a confirm from a replaced dialog is refused with
    /// [`TransitionError::StaleDialog`]. Cancelling drops the transition
    /// without any network call. Confirming sends the customer e-mail, then
    /// changes the status (the dedicated shipping call for `shipped`), then
    /// patches the cache. A failure at either step leaves the cache as it
    /// was. A refused confirm keeps the transition pending.
    pub async fn resolve(&self, outcome: DialogOutcome) -> Result<Resolution, TransitionError> {
        let (pending, confirmation, _in_flight) = {
            let mut slot = self.pending.lock().await;
            let pending = slot.take().ok_or(TransitionError::NothingPending)?;

            let seed = outcome.seed();
            if seed.order_id != pending.order_id || seed.target != pending.target {
                let stale = TransitionError::StaleDialog {
                    order_id: seed.order_id.clone(),
                    target: seed.target,
                };
                *slot = Some(pending);
                if matches!(outcome, DialogOutcome::Cancelled { .. }) {
                    tracing::debug!(error = %stale, "Replaced dialog closed");
                    return Ok(Resolution::Cancelled);
                }
                return Err(stale);
            }

            let confirmation = match outcome {
                DialogOutcome::Cancelled { .. } => {
                    tracing::debug!(order_id = %pending.order_id, "Transition cancelled");
                    return Ok(Resolution::Cancelled);
                }
                DialogOutcome::Confirmed { confirmation, .. } => confirmation,
            };
            if !confirmation.accepts(pending.target) {
                let target = pending.target;
                *slot = Some(pending);
                return Err(TransitionError::PayloadMismatch { target });
            }

            let Some(guard) = InFlightGuard::claim(&self.in_flight, &pending.order_id) else {
                let order_id = pending.order_id.clone();
                *slot = Some(pending);
                return Err(TransitionError::InFlight { order_id });
            };
            (pending, confirmation, guard)
        };

        let span = tracing::info_span!(
            "transition",
            order_id = %pending.order_id,
            target = %pending.target,
            attempt = %Uuid::new_v4(),
        );
        self.commit(&pending, confirmation)
            .instrument(span)
            .await
            .map(Resolution::Committed)
    }

    async fn commit(
        &self,
        pending: &PendingTransition,
        confirmation: Confirmation,
    ) -> Result<TransitionReceipt, TransitionError> {
        let order_id = pending.order_id.as_str();
        let notification = confirmation.into_notification(pending.target, pending.email.clone());

        if let Err(source) = self.api.notify(order_id, &notification).await {
            return Err(commit_failed(CommitStage::Notify, source));
        }

        let mutated = if pending.target == OrderStatus::Shipped {
            let tracking_code = notification.tracking_code.as_deref().unwrap_or_default();
            self.api.mark_shipped(order_id, tracking_code).await
        } else {
            self.api.patch_status(order_id, pending.target).await
        };
        if let Err(source) = mutated {
            return Err(commit_failed(CommitStage::Mutate, source));
        }

        if !self
            .cache
            .write()
            .await
            .patch_status(order_id, pending.target)
        {
            // Reloaded while committing; the next load shows the new status
            tracing::warn!("Committed order is no longer cached");
        }

        let notice = format!(
            "Order #{} moved to \"{}\" successfully!",
            short_id(order_id),
            pending.target
        );
        tracing::info!(from = %pending.from, "Status transition committed");

        Ok(TransitionReceipt {
            order_id: pending.order_id.clone(),
            from: pending.from,
            to: pending.target,
            notice,
        })
    }
}

fn commit_failed(stage: CommitStage, source: crate::ClientError) -> TransitionError {
    tracing::error!(%stage, error = %source, "Status transition failed");
    TransitionError::Commit { stage, source }
}
