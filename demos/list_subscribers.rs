//! Minimal async auth + subscriber listing example.
//!
//! ```bash
//! cargo run --example list_subscribers
//! ```
//!
//! Env vars:
//! - `SORACOM_EMAIL`, `SORACOM_PASSWORD`
//! - `SORACOM_URL` (default: production API)
//! - `SORACOM_STATUS_FILTER` (optional, e.g. `active`)

use soracom_sdk::api::DEFAULT_LIST_LIMIT;
use soracom_sdk::{
    Client, Credentials, DEFAULT_BASE_URL, SubscriberFilter, SubscriberStatus,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url = env_or("SORACOM_URL", DEFAULT_BASE_URL);
    let credentials = Credentials::from_env()?;

    let client = Client::builder(&base_url)?
        .credentials(credentials)
        .timeout(Duration::from_secs(30))
        .connect()
        .await?;

    println!(
        "operator: {}",
        client.operator_id().unwrap_or("<unknown>")
    );

    let filter = match env_opt("SORACOM_STATUS_FILTER").as_deref() {
        Some("active") => SubscriberFilter::by_status(SubscriberStatus::Active),
        Some("inactive") => SubscriberFilter::by_status(SubscriberStatus::Inactive),
        _ => SubscriberFilter::default(),
    };

    let subscribers = client
        .subscribers()
        .list(DEFAULT_LIST_LIMIT, &filter)
        .await?;
    match subscribers.json() {
        Some(list) => {
            for sub in list.as_array().into_iter().flatten().take(10) {
                let imsi = sub.get("imsi").and_then(|v| v.as_str()).unwrap_or("<none>");
                let status = sub
                    .get("status")
                    .and_then(|v| v.as_str())
                    .unwrap_or("<unknown>");
                println!("  - {imsi} ({status})");
            }
        }
        None => println!("empty reply"),
    }

    Ok(())
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
