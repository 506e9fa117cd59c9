use std::{env, time::Duration};

/// Source of the product catalog when `CATALOG_URL` is not set.
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/MDAnwarHossen/ema-john/refs/heads/main/products.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub catalog_url: String,
    pub catalog_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);
        let catalog_url =
            env::var("CATALOG_URL").unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string());
        let catalog_timeout = env::var("CATALOG_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(8));

        if catalog_url.trim().is_empty() {
            anyhow::bail!("CATALOG_URL must not be empty");
        }

        Ok(Self {
            host,
            port,
            catalog_url,
            catalog_timeout,
        })
    }
}
