//! Server Configuration
//!
//! Read from the environment (a `.env` file is loaded first by `main`). The
//! Stripe credential is read by `StripeClient::from_env`, not here.

use std::time::Duration;

use storefront_core::{Result, StorefrontError};

/// Catalog staleness ceiling: two hours
const DEFAULT_CATALOG_REVALIDATE_SECS: u64 = 60 * 60 * 2;

/// Product detail staleness ceiling: one hour
const DEFAULT_PRODUCT_REVALIDATE_SECS: u64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    /// Public origin used to build checkout return URLs
    pub base_url: String,
    /// Built WASM frontend
    pub static_dir: String,
    pub catalog_revalidate: Duration,
    pub product_revalidate: Duration,
    /// Products fetched into the detail cache at startup
    pub prerender_product_ids: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".into());

        let base_url = lookup("BASE_URL")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| "static".into());

        let catalog_revalidate = seconds(
            &lookup,
            "CATALOG_REVALIDATE_SECS",
            DEFAULT_CATALOG_REVALIDATE_SECS,
        )?;
        let product_revalidate = seconds(
            &lookup,
            "PRODUCT_REVALIDATE_SECS",
            DEFAULT_PRODUCT_REVALIDATE_SECS,
        )?;

        let prerender_product_ids = lookup("PRERENDER_PRODUCT_IDS")
            .map(|ids| {
                ids.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_addr,
            base_url,
            static_dir,
            catalog_revalidate,
            product_revalidate,
            prerender_product_ids,
        })
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<Duration> {
    match lookup(key) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| StorefrontError::Config(format!("{key} must be a number of seconds, got {raw:?}"))),
    }
}
