//! HTTP transport layers.
//!
//! A transport receives a fully-resolved [`TransportRequest`] (URL, headers,
//! query pairs, optional JSON body) and returns the raw status/headers/body.
//! Response interpretation (the empty-body sentinel and JSON decoding)
//! happens one level up, in the clients.

#[cfg(feature = "async")]
pub mod async_transport;
#[cfg(feature = "blocking")]
pub mod blocking_transport;
#[cfg(feature = "metrics")]
pub(crate) mod metrics;
pub mod request;

use http::{HeaderMap, HeaderValue, Method, StatusCode};
use std::time::Duration;
use url::Url;

/// A request as handed to a transport implementation.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<TransportBody>,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct TransportBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<HeaderValue>,
}

#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}
