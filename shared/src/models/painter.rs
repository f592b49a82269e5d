//! Painter production counts (`GET /orders/count-all-pintores`)

use serde::{Deserialize, Serialize};

use crate::de::lenient_u64;

/// Number of orders assigned to one painter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PainterCount {
    #[serde(rename = "pintor")]
    pub painter: String,
    /// Arrives as a string from the backend; unparseable counts read as 0
    #[serde(deserialize_with = "lenient_u64")]
    pub total: u64,
}
