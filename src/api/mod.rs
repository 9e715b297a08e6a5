//! High-level SORACOM API services.
//!
//! The primary SDK surface is exposed via service accessors on clients:
//! - `Client::subscribers()` / `BlockingClient::subscribers()`
//! - `Client::groups()` / `BlockingClient::groups()`
//! - `Client::stats()` / `BlockingClient::stats()`

pub mod groups;
pub mod stats;
pub mod subscribers;

pub use groups::*;
pub use stats::*;
pub use subscribers::*;
