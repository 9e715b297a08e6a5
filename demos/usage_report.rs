//! Air usage for one subscriber over the last 24 hours.
//!
//! ```bash
//! cargo run --example usage_report
//! ```
//!
//! Env vars:
//! - `SORACOM_EMAIL`, `SORACOM_PASSWORD`
//! - `SORACOM_URL` (default: production API)
//! - `SORACOM_IMSI` (required)

use soracom_sdk::{Client, Credentials, DEFAULT_BASE_URL, Period, UsageQuery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url = env_or("SORACOM_URL", DEFAULT_BASE_URL);
    let imsi = std::env::var("SORACOM_IMSI")
        .map_err(|_| anyhow::anyhow!("SORACOM_IMSI is required"))?;

    let client = Client::connect(&base_url, Credentials::from_env()?).await?;

    let entries = client
        .stats()
        .air(imsi.as_str(), &UsageQuery::last_day().period(Period::Minutes))
        .await?;

    println!("{} usage entries:", entries.len());
    for entry in entries.iter().take(20) {
        let at = entry.get("date").and_then(|v| v.as_str()).unwrap_or("?");
        let upload = entry.get("uploadByteSizeTotal").and_then(|v| v.as_i64());
        let download = entry.get("downloadByteSizeTotal").and_then(|v| v.as_i64());
        println!(
            "  {at}: up={} down={}",
            upload.unwrap_or(0),
            download.unwrap_or(0)
        );
    }

    Ok(())
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}
