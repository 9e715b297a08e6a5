//! Usage-statistics query parameters.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const DEFAULT_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Aggregation period for usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Minutes,
    Day,
    Month,
}

impl Period {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Day => "day",
            Self::Month => "month",
        }
    }
}

/// Time range and aggregation for a usage query.
///
/// Bounds are epoch seconds. An omitted bound defaults at call time: `to`
/// becomes "now" and `from` becomes 24 hours before it.
#[derive(Debug, Clone, Default)]
pub struct UsageQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub period: Period,
}

impl UsageQuery {
    #[must_use]
    pub fn last_day() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn range(from: i64, to: i64) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            period: Period::default(),
        }
    }

    #[must_use]
    pub fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub(crate) fn resolve(&self, now: SystemTime) -> ResolvedRange {
        let now_secs = now
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs() as i64;
        let window = DEFAULT_WINDOW.as_secs() as i64;

        ResolvedRange {
            from: self.from.unwrap_or(now_secs - window),
            to: self.to.unwrap_or(now_secs),
            period: self.period,
        }
    }
}

pub(crate) struct ResolvedRange {
    pub(crate) from: i64,
    pub(crate) to: i64,
    pub(crate) period: Period,
}
