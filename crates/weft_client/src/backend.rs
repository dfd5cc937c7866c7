//! Search backend over HTTP.

use crate::ClientConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};
use weft_core::{SearchRequest, SearchResponse};
use weft_error::{ConfigError, SearchError, SearchErrorKind};
use weft_interface::SearchBackend;

/// [`SearchBackend`] that posts requests to a remote search service.
#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpSearchBackend {
    /// Creates a backend for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = config.search_url();
        debug!(url = %endpoint, "Created HTTP search backend");

        Ok(Self {
            client,
            endpoint,
            token: config.token().clone(),
        })
    }

    /// URL the requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    #[instrument(
        skip(self, request),
        fields(index = %request.index(), offset = *request.pagination().offset())
    )]
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = ?e, "HTTP request failed");
            SearchError::new(SearchErrorKind::Transport(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "Search service error");
            return Err(SearchError::new(SearchErrorKind::Status {
                status: status.as_u16(),
                message: error_text,
            }));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            SearchError::new(SearchErrorKind::Decode(format!("Failed to parse JSON: {}", e)))
        })?;

        debug!(
            items = body.items().len(),
            total = *body.total(),
            took = *body.took(),
            "Received search response"
        );
        Ok(body)
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}
