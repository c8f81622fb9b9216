//! HTTP source for the backend's `/api/live` endpoint

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{LiveError, LiveResult};
use crate::feed::SnapshotSource;
use crate::http::pool::create_polling_client;
use crate::types::{parse_snapshot, Snapshot};

const LIVE_PATH: &str = "/api/live";

pub struct HttpSnapshotSource {
    client: Client,
    url: String,
}

impl HttpSnapshotSource {
    pub fn new(client: Client, api_url: &str) -> Self {
        Self {
            client,
            url: live_url(api_url),
        }
    }

    pub fn from_config(config: &Config) -> LiveResult<Self> {
        let client = create_polling_client(config.http_timeout_ms)?;
        Ok(Self::new(client, &config.api_url))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn live_url(api_url: &str) -> String {
    format!("{}{}", api_url.trim_end_matches('/'), LIVE_PATH)
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch_snapshot(&self) -> LiveResult<Snapshot> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LiveError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        let snapshot = parse_snapshot(&body)?;
        debug!(url = %self.url, keys = snapshot.len(), "Fetched live snapshot");
        Ok(snapshot)
    }
}
