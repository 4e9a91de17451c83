//! Activity collector endpoint
//!
//! The collector receives whole batches; the batcher only knows the
//! [`ActivityCollector`] trait so tests can swap the transport out.

use crate::error::{ActivityError, Result};
use async_trait::async_trait;
use recmusic_core::ActivityEntry;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Path of the collector endpoint, relative to the API base URL
pub const USER_ACTIVITY_PATH: &str = "/api/recommender/useractivity/";

/// One delivery to the collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityBatch {
    pub user_id: i64,
    pub activity_logs: Vec<ActivityEntry>,
}

/// Destination for activity batches
#[async_trait]
pub trait ActivityCollector: Send + Sync {
    /// Deliver a batch on behalf of the bearer of `token`
    ///
    /// `Ok` means the collector accepted every entry in the batch.
    async fn submit(&self, token: &str, batch: &ActivityBatch) -> Result<()>;
}

/// Collector reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpActivityCollector {
    http: Client,
    endpoint: String,
}

impl HttpActivityCollector {
    /// Create a collector for the API at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("RecMusic/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_client(http, base_url)
    }

    /// Create a collector sharing an existing HTTP client
    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(ActivityError::InvalidUrl("URL cannot be empty".into()));
        }

        let base = base_url.trim_end_matches('/');
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ActivityError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        Ok(Self {
            http,
            endpoint: format!("{}{}", base, USER_ACTIVITY_PATH),
        })
    }

    /// Full collector URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ActivityCollector for HttpActivityCollector {
    async fn submit(&self, token: &str, batch: &ActivityBatch) -> Result<()> {
        debug!(
            url = %self.endpoint,
            user_id = batch.user_id,
            count = batch.activity_logs.len(),
            "Submitting activity batch"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(batch)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ActivityError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_normalized() {
        let collector = HttpActivityCollector::new("http://localhost:8000/").unwrap();
        assert_eq!(
            collector.endpoint(),
            "http://localhost:8000/api/recommender/useractivity/"
        );
    }

    #[test]
    fn rejects_bad_base_urls() {
        assert!(matches!(
            HttpActivityCollector::new(""),
            Err(ActivityError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpActivityCollector::new("localhost:8000"),
            Err(ActivityError::InvalidUrl(_))
        ));
    }
}
