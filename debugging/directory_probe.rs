//! Query the TVMaze directory and print the normalized records, one JSON object per line.
//! Usage:
//!   cargo run --bin showfinder_probe -- search <term>
//!   cargo run --bin showfinder_probe -- episodes <show_id>
//! Honors SHOWFINDER_HTTP_TIMEOUT_SECS (.env supported).

use anyhow::{Context, Result};
use dotenvy::dotenv;
use showfinder::config::Config;
use showfinder::directory::{DirectoryApi, TvMazeClient};
use showfinder::normalize::{to_episodes, to_shows};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ProbeKind {
    Search,
    Episodes,
}

impl FromStr for ProbeKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "search" => Ok(ProbeKind::Search),
            "episodes" => Ok(ProbeKind::Episodes),
            _ => Err(anyhow::anyhow!("probe kind must be 'search' or 'episodes'")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let mut args = env::args().skip(1);
    let kind: ProbeKind = args
        .next()
        .context("Usage: showfinder_probe <search|episodes> <term|show_id>")?
        .parse()?;
    // An absent term searches for the empty string, like an empty form.
    let arg = args.next().unwrap_or_default();

    let config = Config::from_env()?;
    let client = TvMazeClient::new(config.http_timeout).context("Failed to build HTTP client")?;

    match kind {
        ProbeKind::Search => {
            let hits = client.search_shows(&arg).await?;
            for show in to_shows(hits) {
                println!("{}", serde_json::to_string(&show)?);
            }
        }
        ProbeKind::Episodes => {
            let id: u64 = arg
                .parse()
                .with_context(|| format!("show id must be a number, got '{}'", arg))?;
            let raw = client.list_episodes(id).await?;
            for episode in to_episodes(raw) {
                println!("{}", serde_json::to_string(&episode)?);
            }
        }
    }

    Ok(())
}
