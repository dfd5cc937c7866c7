//! URL query-string seam.

use std::collections::BTreeMap;

/// Read and replace the query parameters of the hosting page's URL.
///
/// Writes are best effort: a navigator that cannot persist parameters
/// simply drops them.
pub trait Navigator: Send + Sync {
    /// Current query parameters.
    fn query_params(&self) -> BTreeMap<String, String>;

    /// Replace the whole query string without adding a history entry.
    fn replace_query_params(&self, params: BTreeMap<String, String>);
}

/// Navigator for hosts without a URL; reads nothing, drops every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn query_params(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn replace_query_params(&self, _params: BTreeMap<String, String>) {}
}
