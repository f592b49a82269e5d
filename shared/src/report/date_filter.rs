//! Dashboard date filter presets

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Inclusive period sent as `startDate` / `endDate`; open ends are omitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Unbounded range, i.e. every order
    pub fn all() -> Self {
        Self::default()
    }

    /// Whole days from `start` through `end`
    pub fn days(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start_of_day(start)),
            end: Some(end_of_day(end)),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| ts >= start) && self.end.is_none_or(|end| ts <= end)
    }

    /// Query parameters in the backend's format (`2025-03-10T00:00:00.000Z`)
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(start) = self.start {
            params.push(("startDate", start.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(end) = self.end {
            params.push(("endDate", end.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        params
    }
}

/// Period presets offered by the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFilter {
    Today,
    Yesterday,
    #[default]
    Last7Days,
    Last15Days,
    /// Current calendar month
    Month,
    /// Explicit range picked by the operator
    Custom(DateRange),
}

impl DateFilter {
    /// Resolve the preset against the current time.
    ///
    /// The rolling presets start exactly N days before `now` and end at the
    /// close of today.
    pub fn range(&self, now: DateTime<Utc>) -> DateRange {
        let today = now.date_naive();
        match self {
            Self::Today => DateRange::days(today, today),
            Self::Yesterday => {
                let yesterday = today - Duration::days(1);
                DateRange::days(yesterday, yesterday)
            }
            Self::Last7Days => rolling(now, 7),
            Self::Last15Days => rolling(now, 15),
            Self::Month => {
                let first = today - Duration::days(i64::from(today.day0()));
                let last = first
                    .checked_add_months(Months::new(1))
                    .map(|next| next - Duration::days(1));
                DateRange {
                    start: Some(start_of_day(first)),
                    end: last.map(end_of_day),
                }
            }
            Self::Custom(range) => *range,
        }
    }
}

fn rolling(now: DateTime<Utc>, days: i64) -> DateRange {
    DateRange {
        start: Some(now - Duration::days(days)),
        end: Some(end_of_day(now.date_naive())),
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    // 23:59:59.999
    let last_milli = NaiveTime::MIN - Duration::milliseconds(1);
    date.and_time(last_milli).and_utc()
}
