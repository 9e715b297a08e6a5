use crate::transport::request::{ApiResponse, Request};
use crate::{Error, Imsi, UsageQuery};
use serde_json::Value;
use std::time::SystemTime;

fn usage_request(kind: &str, imsi: &Imsi, query: &UsageQuery, now: SystemTime) -> Request {
    let range = query.resolve(now);
    Request::get(["stats", kind, "subscribers", imsi.as_str()])
        .query_pair("from", range.from.to_string())
        .query_pair("to", range.to.to_string())
        .query_pair("period", range.period.as_str())
}

// Usage endpoints reply with an array of entries; anything else is kept as a
// single entry rather than discarded.
fn usage_entries(resp: ApiResponse) -> Vec<Value> {
    match resp {
        ApiResponse::NoContent => Vec::new(),
        ApiResponse::Json(Value::Array(entries)) => entries,
        ApiResponse::Json(other) => vec![other],
    }
}

/// Per-subscriber usage statistics APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct StatsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl StatsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl StatsService {
    /// `GET /stats/air/subscribers/<imsi>?from=..&to=..&period=..`
    ///
    /// An empty IMSI returns an empty list without any network round-trip.
    /// Omitted query bounds default to the 24 hours ending now.
    pub async fn air(
        &self,
        imsi: impl Into<Imsi>,
        query: &UsageQuery,
    ) -> Result<Vec<Value>, Error> {
        self.usage("air", imsi.into(), query).await
    }

    /// `GET /stats/beam/subscribers/<imsi>?from=..&to=..&period=..`
    ///
    /// Same contract as [`StatsService::air`].
    pub async fn beam(
        &self,
        imsi: impl Into<Imsi>,
        query: &UsageQuery,
    ) -> Result<Vec<Value>, Error> {
        self.usage("beam", imsi.into(), query).await
    }

    async fn usage(&self, kind: &str, imsi: Imsi, query: &UsageQuery) -> Result<Vec<Value>, Error> {
        if imsi.is_empty() {
            return Ok(Vec::new());
        }
        let req = usage_request(kind, &imsi, query, SystemTime::now());
        Ok(usage_entries(self.client.send(req).await?))
    }
}

/// Per-subscriber usage statistics APIs (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingStatsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingStatsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingStatsService {
    /// `GET /stats/air/subscribers/<imsi>?from=..&to=..&period=..`
    ///
    /// An empty IMSI returns an empty list without any network round-trip.
    /// Omitted query bounds default to the 24 hours ending now.
    pub fn air(&self, imsi: impl Into<Imsi>, query: &UsageQuery) -> Result<Vec<Value>, Error> {
        self.usage("air", imsi.into(), query)
    }

    /// `GET /stats/beam/subscribers/<imsi>?from=..&to=..&period=..`
    ///
    /// Same contract as [`BlockingStatsService::air`].
    pub fn beam(&self, imsi: impl Into<Imsi>, query: &UsageQuery) -> Result<Vec<Value>, Error> {
        self.usage("beam", imsi.into(), query)
    }

    fn usage(&self, kind: &str, imsi: Imsi, query: &UsageQuery) -> Result<Vec<Value>, Error> {
        if imsi.is_empty() {
            return Ok(Vec::new());
        }
        let req = usage_request(kind, &imsi, query, SystemTime::now());
        Ok(usage_entries(self.client.send(req)?))
    }
}
