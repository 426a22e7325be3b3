use anyhow::{Context, Result};
use std::{env, net::SocketAddr, time::Duration};

pub const TVMAZE_BASE: &str = "https://api.tvmaze.com";
pub const MISSING_IMAGE_URL: &str = "/static/missing-image.svg";

const DEFAULT_ADDR: &str = "0.0.0.0:3146";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr_raw = lookup("SHOWFINDER_ADDR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_raw
            .trim()
            .parse()
            .with_context(|| format!("SHOWFINDER_ADDR is not a socket address: {}", addr_raw))?;

        let http_timeout = match lookup("SHOWFINDER_HTTP_TIMEOUT_SECS").filter(|s| !s.is_empty()) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!("SHOWFINDER_HTTP_TIMEOUT_SECS must be whole seconds: {}", raw)
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self { addr, http_timeout })
    }
}
