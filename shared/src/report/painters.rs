//! Painter production panel

use serde::Serialize;

use crate::models::PainterCount;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PainterStats {
    pub painters: usize,
    pub total_works: u64,
    /// First painter with the highest count; `None` when nobody has work
    pub top_painter: Option<String>,
    pub max_total: u64,
}

impl PainterStats {
    pub fn from_counts(counts: &[PainterCount]) -> Self {
        let mut stats = Self {
            painters: counts.len(),
            ..Default::default()
        };
        for count in counts {
            stats.total_works += count.total;
            if count.total > stats.max_total {
                stats.max_total = count.total;
                stats.top_painter = Some(count.painter.clone());
            }
        }
        stats
    }

    /// Bar length for a painter relative to the busiest one, in 0.0..=1.0
    pub fn share(&self, count: &PainterCount) -> f64 {
        if self.max_total == 0 {
            0.0
        } else {
            count.total as f64 / self.max_total as f64
        }
    }
}
