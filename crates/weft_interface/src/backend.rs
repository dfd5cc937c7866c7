//! Backend search seam.

use async_trait::async_trait;
use weft_core::{SearchRequest, SearchResponse};
use weft_error::SearchError;

/// A service that answers search requests.
///
/// Implementations perform exactly one backend call per invocation; the
/// cache layers deduplication and caching on top.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one search request.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;

    /// Name used in logs.
    fn backend_name(&self) -> &str {
        "search"
    }
}
