//! Client implementations (async + optional blocking).

#[cfg(feature = "async")]
pub mod async_client;
#[cfg(feature = "blocking")]
pub mod blocking_client;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.soracom.io/v1";

#[cfg(feature = "async")]
pub use async_client::{Client, ClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{BlockingClient, BlockingClientBuilder};
