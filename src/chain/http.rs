//! Chain indexer REST client
//!
//! Reads records from an indexer that mirrors chain storage over HTTP.
//! A `404` means the record does not exist and maps to `Lookup::NotFound`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::{ChainError, ChainQuery, Lookup};
use crate::types::{Blog, BlogId, Comment, CommentId, Post, PostId, Reaction, ReactionId};

/// Configuration for the chain indexer client
#[derive(Debug, Clone)]
pub struct ChainClientConfig {
    /// Base URL of the indexer (e.g., "http://localhost:3001")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ChainClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

/// `ChainQuery` backed by the indexer REST API
pub struct HttpChainQuery {
    client: Client,
    config: ChainClientConfig,
}

impl HttpChainQuery {
    pub fn new(config: ChainClientConfig) -> Result<Self, ChainError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(ChainError::Request)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ChainClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Lookup<T>, ChainError> {
        let url = self.url(path);
        tracing::debug!(%url, "chain lookup");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ChainError::from_transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ChainError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let bytes = response.bytes().await.map_err(ChainError::from_transport)?;
        // The indexer answers `null` for ids it knows are unused
        let value: Option<T> =
            serde_json::from_slice(&bytes).map_err(|e| ChainError::Parse(e.to_string()))?;
        Ok(value.into())
    }
}

#[async_trait]
impl ChainQuery for HttpChainQuery {
    async fn post(&self, id: PostId) -> Result<Lookup<Post>, ChainError> {
        self.get_json(&format!("posts/{}", id.to_hex())).await
    }

    async fn comment(&self, id: CommentId) -> Result<Lookup<Comment>, ChainError> {
        self.get_json(&format!("comments/{}", id.to_hex())).await
    }

    async fn blog(&self, id: BlogId) -> Result<Lookup<Blog>, ChainError> {
        self.get_json(&format!("blogs/{}", id.to_hex())).await
    }

    async fn reaction(&self, id: ReactionId) -> Result<Lookup<Reaction>, ChainError> {
        self.get_json(&format!("reactions/{}", id.to_hex())).await
    }

    async fn post_reaction_ids(&self, id: PostId) -> Result<Lookup<Vec<ReactionId>>, ChainError> {
        self.get_json(&format!("posts/{}/reactions", id.to_hex())).await
    }

    async fn comment_reaction_ids(
        &self,
        id: CommentId,
    ) -> Result<Lookup<Vec<ReactionId>>, ChainError> {
        self.get_json(&format!("comments/{}/reactions", id.to_hex())).await
    }
}
