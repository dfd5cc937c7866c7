//! Cache metrics.
//!
//! With the `metrics` feature, counters are exported through the global
//! OpenTelemetry meter provider. Without it every method is a no-op.

#[cfg(feature = "metrics")]
use opentelemetry::{KeyValue, global, metrics::Counter};

/// Counters describing how the table cache is used.
#[derive(Clone, Default)]
pub struct TableMetrics {
    #[cfg(feature = "metrics")]
    instruments: Option<Instruments>,
}

#[cfg(feature = "metrics")]
#[derive(Clone)]
struct Instruments {
    labels: [KeyValue; 1],
    page_hits: Counter<u64>,
    page_fetches: Counter<u64>,
    fetch_failures: Counter<u64>,
    stale_discards: Counter<u64>,
}

impl std::fmt::Debug for TableMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableMetrics").finish_non_exhaustive()
    }
}

impl TableMetrics {
    /// Metrics labelled with the searched index.
    #[cfg(feature = "metrics")]
    pub fn new(index: &str) -> Self {
        let meter = global::meter("weft_cache");
        let instruments = Instruments {
            labels: [KeyValue::new("index", index.to_string())],
            page_hits: meter
                .u64_counter("table.page_hits")
                .with_description("Page loads answered from the cache")
                .build(),
            page_fetches: meter
                .u64_counter("table.page_fetches")
                .with_description("Page requests sent to the backend")
                .build(),
            fetch_failures: meter
                .u64_counter("table.fetch_failures")
                .with_description("Page requests that failed")
                .build(),
            stale_discards: meter
                .u64_counter("table.stale_discards")
                .with_description("Responses dropped because the cache was reset")
                .build(),
        };
        Self {
            instruments: Some(instruments),
        }
    }

    /// Metrics labelled with the searched index.
    #[cfg(not(feature = "metrics"))]
    pub fn new(_index: &str) -> Self {
        Self::default()
    }

    /// A load was answered from the cache.
    pub fn record_hit(&self) {
        #[cfg(feature = "metrics")]
        if let Some(i) = &self.instruments {
            i.page_hits.add(1, &i.labels);
        }
    }

    /// A request was sent to the backend.
    pub fn record_fetch(&self) {
        #[cfg(feature = "metrics")]
        if let Some(i) = &self.instruments {
            i.page_fetches.add(1, &i.labels);
        }
    }

    /// A backend request failed.
    pub fn record_failure(&self) {
        #[cfg(feature = "metrics")]
        if let Some(i) = &self.instruments {
            i.fetch_failures.add(1, &i.labels);
        }
    }

    /// A response arrived after a reset and was dropped.
    pub fn record_stale(&self) {
        #[cfg(feature = "metrics")]
        if let Some(i) = &self.instruments {
            i.stale_discards.add(1, &i.labels);
        }
    }
}
