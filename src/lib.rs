//! SORACOM SDK – choose **async** *or* **blocking** at compile time.
//!
//! Connecting authenticates eagerly: [`Client::connect`] exchanges
//! credentials for a session and every later call carries the session
//! headers. Responses are interpreted by body content only: an empty body
//! is the [`ApiResponse::NoContent`] success sentinel, anything else must
//! decode as JSON.

// compile-time guard: enable at least one client kind.
#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("Enable at least one of: `async` (default) or `blocking`.");

pub mod api;
mod auth;
pub mod client;
mod error;
pub mod transport;
pub mod types;
mod util;

pub use auth::{Credentials, SecretString, Session};
pub use client::DEFAULT_BASE_URL;
pub use error::{BodySnippetConfig, Error, ErrorKind, Result, TransportErrorKind};
pub use transport::request::{ApiResponse, Request};
pub use types::*;

#[cfg(feature = "async")]
pub use client::{Client, ClientBuilder};
#[cfg(feature = "blocking")]
pub use client::{BlockingClient, BlockingClientBuilder};
