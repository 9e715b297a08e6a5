//! High-level blocking SORACOM client.

use crate::{
    BodySnippetConfig, Error, api,
    auth::{AuthResponse, Credentials, Session},
    transport::{
        TransportBody, TransportRequest,
        blocking_transport::{DynBlockingTransport, UreqBlocking},
        request::{ApiResponse, Request},
    },
    util::{
        diagnostics,
        url::{endpoint_url, normalize_base_url},
    },
};
use http::{HeaderMap, HeaderValue, Method, header};
use std::{sync::Arc, time::Duration};
use url::Url;

#[cfg(feature = "tracing")]
use tracing::field;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configures and constructs [`BlockingClient`].
pub struct BlockingClientBuilder {
    base_url: Url,
    credentials: Option<Credentials>,
    insecure: bool,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    read_timeout: Duration,
    no_proxy: bool,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    transport: Option<DynBlockingTransport>,
}

impl BlockingClientBuilder {
    /// Create a builder with opinionated defaults.
    fn try_new(base: impl AsRef<str>) -> Result<Self, Error> {
        let base_url = normalize_base_url(base.as_ref())?;
        let mut default_headers = HeaderMap::new();
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Ok(Self {
            base_url,
            credentials: None,
            insecure: false,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            no_proxy: false,
            default_headers,
            body_snippet: BodySnippetConfig::default(),
            transport: None,
        })
    }

    /// Supply the operator credentials exchanged at connect time.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Ignore system proxy environment variables.
    pub fn no_system_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Accept invalid TLS certificates (**dangerous**).
    pub fn danger_accept_invalid_certs(mut self, yes: bool) -> Self {
        self.insecure = yes;
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Adjust the per-request timeout.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    /// Adjust the connection establishment timeout.
    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.connect_timeout = value;
        self
    }

    /// Adjust the response body read timeout.
    pub fn read_timeout(mut self, value: Duration) -> Self {
        self.read_timeout = value;
        self
    }

    /// Add a default header applied to every request.
    pub fn default_header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Enable/disable capturing `body_snippet` on auth and decode failures.
    pub fn capture_body_snippet(mut self, enabled: bool) -> Self {
        self.body_snippet.enabled = enabled;
        self
    }

    /// Set max bytes to keep for `body_snippet`.
    pub fn max_body_snippet_bytes(mut self, max_bytes: usize) -> Self {
        self.body_snippet.max_bytes = max_bytes;
        self
    }

    /// Swap out the underlying transport (used by tests).
    pub fn transport(mut self, transport: DynBlockingTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Authenticate and build the client.
    ///
    /// The credential exchange happens here, eagerly: a client only ever
    /// exists with a valid [`Session`] behind it.
    pub fn connect(self) -> Result<BlockingClient, Error> {
        let credentials = self.credentials.ok_or_else(|| Error::InvalidConfig {
            message: "credentials are required to connect".into(),
            source: None,
        })?;

        let transport: DynBlockingTransport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(UreqBlocking::try_new(
                self.insecure,
                &self.user_agent,
                self.timeout,
                self.connect_timeout,
                self.read_timeout,
                self.no_proxy,
            )?),
        };

        let session = authenticate(
            &transport,
            &self.base_url,
            &credentials,
            self.timeout,
            self.body_snippet,
        )?;

        Ok(BlockingClient {
            inner: Arc::new(Inner {
                base: self.base_url,
                session,
                timeout: self.timeout,
                default_headers: self.default_headers,
                body_snippet: self.body_snippet,
                transport,
            }),
        })
    }
}

/// `POST /auth`: exchange credentials for an API key / token pair.
fn authenticate(
    transport: &DynBlockingTransport,
    base: &Url,
    credentials: &Credentials,
    timeout: Duration,
    body_snippet: BodySnippetConfig,
) -> Result<Session, Error> {
    let url = endpoint_url(base, ["auth"])?;

    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    let bytes =
        serde_json::to_vec(&credentials.request_body()).map_err(|err| Error::InvalidConfig {
            message: "failed to encode authentication request".into(),
            source: Some(Box::new(err)),
        })?;

    let resp = transport
        .send(TransportRequest {
            method: Method::POST,
            url,
            headers,
            query: Vec::new(),
            body: Some(TransportBody {
                bytes,
                content_type: Some(HeaderValue::from_static("application/json")),
            }),
            timeout,
        })
        .map_err(|err| Error::Auth {
            message: "authentication request failed".into(),
            body_snippet: None,
            source: Some(Box::new(err)),
        })?;

    let auth: AuthResponse = serde_json::from_slice(&resp.body).map_err(|err| Error::Auth {
        message: "malformed authentication response".into(),
        body_snippet: diagnostics::body_snippet(&resp.body, body_snippet, None),
        source: Some(Box::new(err)),
    })?;

    Ok(Session::new(auth))
}

#[derive(Clone)]
pub struct BlockingClient {
    inner: Arc<Inner>,
}

struct Inner {
    base: Url,
    session: Session,
    timeout: Duration,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    transport: DynBlockingTransport,
}

impl BlockingClient {
    pub fn builder(base: impl AsRef<str>) -> Result<BlockingClientBuilder, Error> {
        BlockingClientBuilder::try_new(base)
    }

    /// Quick path: default settings, authenticate, done.
    pub fn connect(base: impl AsRef<str>, credentials: Credentials) -> Result<Self, Error> {
        Self::builder(base)?.credentials(credentials).connect()
    }

    #[must_use]
    pub fn subscribers(&self) -> api::BlockingSubscribersService {
        api::BlockingSubscribersService::new(self.clone())
    }

    #[must_use]
    pub fn groups(&self) -> api::BlockingGroupsService {
        api::BlockingGroupsService::new(self.clone())
    }

    #[must_use]
    pub fn stats(&self) -> api::BlockingStatsService {
        api::BlockingStatsService::new(self.clone())
    }

    /// The session captured at connect time.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        self.inner.session.api_key()
    }

    #[must_use]
    pub fn token(&self) -> &str {
        self.inner.session.token()
    }

    #[must_use]
    pub fn operator_id(&self) -> Option<&str> {
        self.inner.session.operator_id()
    }

    /// Execute a verb-level [`Request`] with session headers attached.
    pub fn send(&self, req: Request) -> Result<ApiResponse, Error> {
        self.execute_request(&req)
    }

    fn execute_request(&self, req: &Request) -> Result<ApiResponse, Error> {
        #[cfg(feature = "metrics")]
        let _inflight = crate::transport::metrics::InFlightGuard::new();

        let url = endpoint_url(&self.inner.base, req.segments.iter().map(|s| s.as_str()))?;

        let mut headers = self.inner.default_headers.clone();
        self.inner.session.apply(&mut headers)?;
        headers.extend(req.headers.clone());

        let body = match &req.body {
            Some(value) => Some(TransportBody {
                bytes: serde_json::to_vec(value).map_err(|err| Error::InvalidConfig {
                    message: "failed to encode JSON request body".into(),
                    source: Some(Box::new(err)),
                })?,
                content_type: Some(HeaderValue::from_static("application/json")),
            }),
            None => None,
        };

        #[cfg(any(feature = "tracing", feature = "metrics"))]
        let start = std::time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "soracom.request",
            http.method = %req.method,
            http.host = %self.inner.base.host_str().unwrap_or_default(),
            http.path = %url.path(),
            http.status = field::Empty,
            request_id = field::Empty,
            latency_ms = field::Empty,
            error_kind = field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let timeout = req.timeout_override.unwrap_or(self.inner.timeout);
        let resp = match self.inner.transport.send(TransportRequest {
            method: req.method.clone(),
            url: url.clone(),
            headers,
            query: req.query.clone(),
            body,
            timeout,
        }) {
            Ok(resp) => resp,
            Err(err) => {
                #[cfg(feature = "metrics")]
                crate::transport::metrics::record_outcome(
                    &req.method,
                    None,
                    start.elapsed(),
                    Some(err.kind()),
                );
                #[cfg(feature = "tracing")]
                {
                    span.record("error_kind", field::debug(err.kind()));
                    span.record("latency_ms", start.elapsed().as_millis() as i64);
                }
                return Err(err);
            }
        };

        let request_id = diagnostics::request_id(&resp.headers);

        #[cfg(feature = "tracing")]
        {
            span.record("http.status", resp.status.as_u16() as i64);
            span.record("latency_ms", start.elapsed().as_millis() as i64);
            if let Some(rid) = request_id.as_deref() {
                span.record("request_id", field::display(rid));
            }
        }

        // The status line is intentionally not inspected: responses are
        // judged by body content alone. An empty body is the "success, no
        // content" sentinel; anything else must be JSON.
        if resp.body.is_empty() {
            #[cfg(feature = "metrics")]
            crate::transport::metrics::record_outcome(
                &req.method,
                Some(resp.status),
                start.elapsed(),
                None,
            );
            return Ok(ApiResponse::NoContent);
        }

        match serde_json::from_slice(&resp.body) {
            Ok(value) => {
                #[cfg(feature = "metrics")]
                crate::transport::metrics::record_outcome(
                    &req.method,
                    Some(resp.status),
                    start.elapsed(),
                    None,
                );
                Ok(ApiResponse::Json(value))
            }
            Err(source) => {
                let err = Error::Decode {
                    status: resp.status,
                    method: req.method.clone(),
                    path: url.path().to_string().into_boxed_str(),
                    request_id,
                    body_snippet: diagnostics::body_snippet(
                        &resp.body,
                        self.inner.body_snippet,
                        Some(&self.inner.session),
                    ),
                    source: Box::new(source),
                };
                #[cfg(feature = "metrics")]
                crate::transport::metrics::record_outcome(
                    &req.method,
                    Some(resp.status),
                    start.elapsed(),
                    Some(err.kind()),
                );
                #[cfg(feature = "tracing")]
                span.record("error_kind", field::debug(err.kind()));
                Err(err)
            }
        }
    }
}
