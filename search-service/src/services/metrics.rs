//! Metrics collection for search-service.
//!
//! HTTP metrics come from the `metrics` facade (see service-core middleware)
//! and are rendered by the Prometheus recorder; provider metrics live in a
//! dedicated `prometheus` registry. Recording is a no-op until `init_metrics`.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::sync::OnceLock;
use std::time::Duration;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static PROVIDER_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static GROUNDING_SOURCES_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize metrics collection. Call once at startup.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    if METRICS_HANDLE.set(handle).is_err() {
        anyhow::bail!("metrics already initialized");
    }

    let registry = Registry::new();

    let provider_requests = IntCounterVec::new(
        Opts::new(
            "genai_provider_requests_total",
            "Grounded generation calls by provider and outcome",
        ),
        &["provider", "status"],
    )?;

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "genai_provider_latency_seconds",
            "Grounded generation latency in seconds",
        )
        .buckets(vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0, 120.0]),
        &["provider"],
    )?;

    let grounding_sources = IntCounterVec::new(
        Opts::new(
            "grounding_sources_total",
            "Web citations returned by the provider",
        ),
        &["provider"],
    )?;

    registry.register(Box::new(provider_requests.clone()))?;
    registry.register(Box::new(provider_latency.clone()))?;
    registry.register(Box::new(grounding_sources.clone()))?;

    let _ = PROMETHEUS_REGISTRY.set(registry);
    let _ = PROVIDER_REQUESTS_TOTAL.set(provider_requests);
    let _ = PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = GROUNDING_SOURCES_TOTAL.set(grounding_sources);

    Ok(())
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

pub fn record_provider_call(provider: &str, status: &str, latency: Duration) {
    if let Some(counter) = PROVIDER_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[provider, status]).inc();
    }
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider])
            .observe(latency.as_secs_f64());
    }
}

pub fn record_sources(provider: &str, count: usize) {
    if let Some(counter) = GROUNDING_SOURCES_TOTAL.get() {
        counter.with_label_values(&[provider]).inc_by(count as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_before_init_is_a_noop() {
        record_provider_call("mock", "success", Duration::from_millis(5));
        record_sources("mock", 3);
        assert!(PROVIDER_REQUESTS_TOTAL.get().is_none());
        assert!(get_metrics().starts_with("# Metrics recorder not initialized"));
    }
}
