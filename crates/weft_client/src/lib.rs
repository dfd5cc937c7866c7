//! HTTP search backend for the Weft data-table cache.
//!
//! [`HttpSearchBackend`] sends each [`SearchRequest`](weft_core::SearchRequest)
//! as the JSON body of `POST {base_url}/search`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod backend;
mod config;

pub use backend::HttpSearchBackend;
pub use config::{
    ClientConfig, ClientConfigBuilder, ClientConfigBuilderError, DEFAULT_TIMEOUT_SECS,
    ENV_PREFIX,
};
