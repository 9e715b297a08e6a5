//! End-to-end blocking demo: authenticate, list groups, list subscribers.
//!
//! Build with:
//! ```bash
//! cargo run --no-default-features --features blocking,rustls --example blocking_groups
//! # or: cargo run --no-default-features --features blocking,native-tls --example blocking_groups
//! ```
//!
//! Env vars:
//! - `SORACOM_EMAIL`, `SORACOM_PASSWORD`
//! - `SORACOM_URL` (default: production API)

use soracom_sdk::api::DEFAULT_LIST_LIMIT;
use soracom_sdk::{BlockingClient, Credentials, DEFAULT_BASE_URL, SubscriberFilter};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let base_url = env_or("SORACOM_URL", DEFAULT_BASE_URL);

    let client = BlockingClient::builder(&base_url)?
        .credentials(Credentials::from_env()?)
        .no_system_proxy()
        .timeout(Duration::from_secs(20))
        .connect()?;

    println!(
        "operator: {}",
        client.operator_id().unwrap_or("<unknown>")
    );

    let groups = client.groups().list()?;
    let count = groups
        .json()
        .and_then(|v| v.as_array().map(Vec::len))
        .unwrap_or(0);
    println!("groups: {count}");

    let subscribers = client
        .subscribers()
        .list(DEFAULT_LIST_LIMIT, &SubscriberFilter::default())?;
    let count = subscribers
        .json()
        .and_then(|v| v.as_array().map(Vec::len))
        .unwrap_or(0);
    println!("subscribers: {count}");

    Ok(())
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}
