//! Delivery countdown and urgency badge

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::Order;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Badge colour class
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// What a card shows under the delivery estimate
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DisplayStatusInfo {
    pub show_countdown: bool,
    pub message: Option<String>,
    pub severity: Severity,
}

/// Whole days until the estimate, rounded up.
///
/// The estimate counts from midnight of its day. `None` iff there is no
/// estimate; zero or negative means overdue.
pub fn days_remaining(estimate: Option<NaiveDate>, now: NaiveDateTime) -> Option<i64> {
    let due = estimate?.and_time(NaiveTime::MIN);
    let diff = (due - now).num_milliseconds();
    let days = diff.div_euclid(MILLIS_PER_DAY);
    Some(if diff.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    })
}

/// Countdown message and severity for an order card
pub fn display_status_info(order: &Order, now: NaiveDateTime) -> DisplayStatusInfo {
    if order.status.is_delivered() {
        return DisplayStatusInfo {
            show_countdown: false,
            message: Some("Delivered".to_string()),
            severity: Severity::Info,
        };
    }

    let Some(days) = days_remaining(order.delivery_estimate, now) else {
        return DisplayStatusInfo {
            show_countdown: false,
            message: None,
            severity: if order.urgent {
                Severity::Critical
            } else {
                Severity::Info
            },
        };
    };

    if days <= 0 {
        return DisplayStatusInfo {
            show_countdown: true,
            message: Some("DELIVERY OVERDUE!".to_string()),
            severity: Severity::Critical,
        };
    }

    let severity = if order.urgent || days <= 3 {
        Severity::Critical
    } else if days <= 7 {
        Severity::Warning
    } else {
        Severity::Info
    };
    let message = if days == 1 {
        "1 day remaining".to_string()
    } else {
        format!("{days} days remaining")
    };

    DisplayStatusInfo {
        show_countdown: true,
        message: Some(message),
        severity,
    }
}
