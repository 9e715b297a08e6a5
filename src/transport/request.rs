use http::{HeaderMap, Method};
use serde_json::Value;
use std::time::Duration;

/// A verb-level request: method, percent-encoded path segments, query pairs
/// and an optional JSON body.
///
/// Bodies are kept as [`Value`] and serialized at send time, so building a
/// request never fails.
#[derive(Clone, Debug)]
pub struct Request {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    pub timeout_override: Option<Duration>,
}

impl Request {
    #[must_use]
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            timeout_override: None,
        }
    }

    #[must_use]
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    #[must_use]
    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    #[must_use]
    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PUT, segments)
    }

    #[must_use]
    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    #[must_use]
    pub fn query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_override = Some(timeout);
        self
    }
}

/// The outcome of a successful verb call.
///
/// An empty response body is a success in its own right, distinct from any
/// JSON payload (including `{}` and `null`), and surfaces as [`NoContent`].
///
/// [`NoContent`]: ApiResponse::NoContent
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse {
    /// The decoded JSON body.
    Json(Value),
    /// The server replied with an empty body: success, no content.
    NoContent,
}

impl ApiResponse {
    #[must_use]
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }

    #[must_use]
    pub fn json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::NoContent => None,
        }
    }

    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::NoContent => None,
        }
    }
}
