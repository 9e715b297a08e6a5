use http::{Method, StatusCode};
use std::error::Error as StdError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy)]
pub struct BodySnippetConfig {
    pub enabled: bool,
    pub max_bytes: usize,
}

impl Default for BodySnippetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: 4096,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    Auth,
    Transport,
    Decode,
    InvalidConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

/// All errors returned by the SDK.
///
/// There is deliberately no status-code-classified variant: responses are
/// judged by body content only, so a non-2xx reply whose body is valid JSON
/// comes back as a payload, not an error. The only failure paths are the
/// credential exchange, the wire itself, and JSON decoding.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The credential exchange failed or produced a malformed response.
    #[error("Authentication failed: {message}")]
    Auth {
        message: Box<str>,
        body_snippet: Option<Box<str>>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    #[error("Transport error during {method} {path}: {source}")]
    Transport {
        method: Method,
        path: Box<str>,
        kind: TransportErrorKind,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Decode error (HTTP {status}) during {method} {path}: {source}")]
    Decode {
        status: StatusCode,
        method: Method,
        path: Box<str>,
        request_id: Option<Box<str>>,
        body_snippet: Option<Box<str>>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: Box<str>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    /// The HTTP status observed when decoding failed; auth, transport and
    /// configuration errors never carry one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Decode { status, .. } => Some(*status),
            Self::Auth { .. } | Self::Transport { .. } | Self::InvalidConfig { .. } => None,
        }
    }

    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Decode { request_id, .. } => request_id.as_deref(),
            Self::Auth { .. } | Self::Transport { .. } | Self::InvalidConfig { .. } => None,
        }
    }

    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                kind: TransportErrorKind::Timeout,
                ..
            }
        )
    }
}
