use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use thiserror::Error;
use tracing::debug;

use crate::config::TVMAZE_BASE;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("unexpected response shape from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn search_shows(&self, term: &str) -> Result<Vec<ShowHit>, DirectoryError>;
    async fn list_episodes(&self, show_id: u64) -> Result<Vec<RawEpisode>, DirectoryError>;
}

/// One element of the search response; the show itself sits under `show`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowHit {
    pub show: RawShow,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawShow {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<RawImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub medium: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisode {
    pub id: u64,
    pub name: String,
    pub season: Label,
    pub number: Label,
}

/// Season or episode number as the service sent it: number, string, or
/// `null` (specials carry no number). Displayed verbatim, `null` included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(i64),
    Text(String),
    Null,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) => write!(f, "{}", n),
            Label::Text(s) => f.write_str(s),
            Label::Null => f.write_str("null"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TvMazeClient {
    client: Client,
    base_url: String,
}

impl TvMazeClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_base_url(TVMAZE_BASE, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let user_agent = format!("showfinder/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, DirectoryError> {
        debug!("GET {}", url);
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| DirectoryError::Request {
                url: url.to_string(),
                source,
            })?;
        let status = res.status();
        let text = res.text().await.map_err(|source| DirectoryError::Request {
            url: url.to_string(),
            source,
        })?;
        if !status.is_success() {
            return Err(DirectoryError::Status {
                url: url.to_string(),
                status,
                body: text,
            });
        }
        serde_json::from_str(&text).map_err(|source| DirectoryError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DirectoryApi for TvMazeClient {
    async fn search_shows(&self, term: &str) -> Result<Vec<ShowHit>, DirectoryError> {
        let url = format!(
            "{}/search/shows?q={}",
            self.base_url,
            urlencoding::encode(term)
        );
        self.get_json(&url).await
    }

    async fn list_episodes(&self, show_id: u64) -> Result<Vec<RawEpisode>, DirectoryError> {
        let url = format!("{}/shows/{}/episodes", self.base_url, show_id);
        self.get_json(&url).await
    }
}
