//! Customer feedback (`/avaliacao`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de::timestamp_opt;
use crate::error::{ValidationError, ValidationResult};

/// Lowest and highest star rating
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Label shown next to a star rating; `None` for an unrated (0) value
pub fn rating_label(rating: u8) -> Option<&'static str> {
    match rating {
        1 => Some("Ruim"),
        2 => Some("Regular"),
        3 => Some("Bom"),
        4 => Some("Muito bom"),
        5 => Some("Ótimo"),
        _ => None,
    }
}

/// The three rated aspects of a delivery
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ratings {
    #[serde(rename = "atendimento")]
    pub service: u8,
    #[serde(rename = "tempoEntrega")]
    pub delivery_time: u8,
    #[serde(rename = "qualidadeMaterial")]
    pub material_quality: u8,
}

impl Ratings {
    pub fn new(service: u8, delivery_time: u8, material_quality: u8) -> Self {
        Self {
            service,
            delivery_time,
            material_quality,
        }
    }

    /// Every aspect must be rated 1..=5
    pub fn validate(&self) -> ValidationResult<()> {
        for (field, value) in [
            ("atendimento", self.service),
            ("tempoEntrega", self.delivery_time),
            ("qualidadeMaterial", self.material_quality),
        ] {
            if !RATING_RANGE.contains(&value) {
                return Err(ValidationError::RatingOutOfRange { field, value });
            }
        }
        Ok(())
    }

    pub fn average(&self) -> f64 {
        f64::from(
            u16::from(self.service)
                + u16::from(self.delivery_time)
                + u16::from(self.material_quality),
        ) / 3.0
    }

    /// Average rounded to a whole star
    pub fn stars(&self) -> u8 {
        self.average().round() as u8
    }
}

/// Stored feedback (`GET /avaliacao`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(flatten)]
    pub ratings: Ratings,
    #[serde(rename = "comentario", default)]
    pub comment: String,
    #[serde(rename = "createdAt", default, with = "timestamp_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Feedback {
    /// Case-insensitive match on order id or comment; empty filter matches all
    pub fn matches_text(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        filter.is_empty()
            || self.order_id.to_lowercase().contains(&filter)
            || self.comment.to_lowercase().contains(&filter)
    }

    /// Match against selected star values; empty selection matches all
    pub fn matches_stars(&self, selected: &[u8]) -> bool {
        selected.is_empty() || selected.contains(&self.ratings.stars())
    }
}

/// Public rating form payload (`POST /avaliacao`)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FeedbackSubmission {
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(flatten)]
    pub ratings: Ratings,
    #[serde(rename = "comentario")]
    pub comment: String,
}

impl FeedbackSubmission {
    /// Build a validated submission; the order id comes from the link the
    /// customer received
    pub fn new(
        order_id: impl Into<String>,
        ratings: Ratings,
        comment: impl Into<String>,
    ) -> ValidationResult<Self> {
        let order_id = order_id.into();
        if order_id.trim().is_empty() {
            return Err(ValidationError::MissingField("orderId"));
        }
        ratings.validate()?;
        Ok(Self {
            order_id,
            ratings,
            comment: comment.into(),
        })
    }
}
