//! Off-chain feed service REST client

use async_trait::async_trait;
use reqwest::Client;

use super::{FeedError, FeedKind, FeedService};
use crate::types::{AccountId, Activity};

/// Configuration for the feed service client
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Base URL of the off-chain service (e.g., "http://localhost:3001")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

/// `FeedService` backed by the off-chain REST API
pub struct HttpFeedService {
    client: Client,
    config: FeedClientConfig,
}

impl HttpFeedService {
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(FeedError::Request)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FeedClientConfig {
        &self.config
    }

    fn page_url(&self, kind: FeedKind, account: &AccountId, offset: u64, limit: u64) -> String {
        format!(
            "{}/v1/offchain/{}/{}?offset={}&limit={}",
            self.config.base_url.trim_end_matches('/'),
            kind.path_segment(),
            urlencoding::encode(account.as_str()),
            offset,
            limit
        )
    }
}

#[async_trait]
impl FeedService for HttpFeedService {
    async fn page(
        &self,
        kind: FeedKind,
        account: &AccountId,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Activity>, FeedError> {
        let url = self.page_url(kind, account, offset, limit);
        tracing::debug!(%url, "fetching feed page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FeedError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FeedError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let bytes = response.bytes().await.map_err(FeedError::from_transport)?;
        serde_json::from_slice(&bytes).map_err(|e| FeedError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeedClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.request_timeout_ms, 5000);
    }

    #[test]
    fn test_page_url() {
        let service = HttpFeedService::new(FeedClientConfig {
            base_url: "http://feeds.local/".to_string(),
            request_timeout_ms: 1000,
        })
        .unwrap();
        let account = AccountId::new("5Grw/x");
        assert_eq!(
            service.page_url(FeedKind::Notifications, &account, 10, 20),
            "http://feeds.local/v1/offchain/notifications/5Grw%2Fx?offset=10&limit=20"
        );
        assert_eq!(
            service.page_url(FeedKind::News, &account, 0, 5),
            "http://feeds.local/v1/offchain/feed/5Grw%2Fx?offset=0&limit=5"
        );
    }
}
