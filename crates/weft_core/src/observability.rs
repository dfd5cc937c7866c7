//! Tracing subscriber setup and optional OpenTelemetry metrics.

use tracing_subscriber::EnvFilter;
use weft_error::ConfigError;

/// Output format of the log subscriber.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Where metrics are pushed, chosen by the `OTEL_EXPORTER` variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MetricsExporter {
    /// Print to stdout
    #[default]
    Stdout,
    /// OTLP over HTTP to `OTEL_EXPORTER_OTLP_ENDPOINT`
    Otlp,
}

impl MetricsExporter {
    /// Exporter named by `OTEL_EXPORTER`; unset or unknown values select stdout.
    pub fn from_env() -> Self {
        match std::env::var("OTEL_EXPORTER") {
            Ok(name) => name.parse().unwrap_or_else(|_| {
                tracing::warn!(exporter = %name, "Unknown metrics exporter, using stdout");
                Self::Stdout
            }),
            Err(_) => Self::Stdout,
        }
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {}", e)))
}

/// Register a global meter provider exporting every `export_interval_secs`.
///
/// Without the `metrics` feature nothing is installed and the cache's
/// counters stay no-ops.
pub fn init_observability(
    service_name: &'static str,
    export_interval_secs: u64,
) -> Result<(), ConfigError> {
    #[cfg(feature = "metrics")]
    {
        otel::install(
            service_name,
            MetricsExporter::from_env(),
            std::time::Duration::from_secs(export_interval_secs),
        )
    }

    #[cfg(not(feature = "metrics"))]
    {
        tracing::debug!(
            service_name,
            export_interval_secs,
            "Built without the metrics feature; not exporting metrics"
        );
        Ok(())
    }
}

/// Flush and stop the meter provider installed by [`init_observability`].
pub fn shutdown_observability() {
    #[cfg(feature = "metrics")]
    otel::shutdown();
}

#[cfg(feature = "metrics")]
mod otel {
    use super::MetricsExporter;
    use opentelemetry::{KeyValue, global};
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::Resource;
    use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
    use std::sync::OnceLock;
    use std::time::Duration;
    use tracing::{info, warn};
    use weft_error::ConfigError;

    static PROVIDER: OnceLock<SdkMeterProvider> = OnceLock::new();

    pub(super) fn install(
        service_name: &'static str,
        exporter: MetricsExporter,
        interval: Duration,
    ) -> Result<(), ConfigError> {
        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", service_name)])
            .build();
        let builder = SdkMeterProvider::builder().with_resource(resource);

        let provider = match exporter {
            MetricsExporter::Otlp => {
                let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .unwrap_or_else(|_| "http://localhost:4318".to_string());
                let otlp = opentelemetry_otlp::MetricExporter::builder()
                    .with_http()
                    .with_endpoint(&endpoint)
                    .with_timeout(Duration::from_secs(10))
                    .build()
                    .map_err(|e| {
                        ConfigError::new(format!("Failed to create OTLP exporter: {}", e))
                    })?;
                info!(%endpoint, "Exporting metrics over OTLP");
                builder
                    .with_reader(PeriodicReader::builder(otlp).with_interval(interval).build())
                    .build()
            }
            MetricsExporter::Stdout => {
                info!("Exporting metrics to stdout");
                let stdout = opentelemetry_stdout::MetricExporter::default();
                builder
                    .with_reader(PeriodicReader::builder(stdout).with_interval(interval).build())
                    .build()
            }
        };

        global::set_meter_provider(provider.clone());
        if PROVIDER.set(provider).is_err() {
            warn!("Meter provider already installed; keeping the first one for shutdown");
        }
        Ok(())
    }

    pub(super) fn shutdown() {
        if let Some(provider) = PROVIDER.get() {
            if let Err(e) = provider.shutdown() {
                warn!(error = %e, "Meter provider shutdown failed");
            }
        }
    }
}
