//! Prometheus recorder for fetch and join metrics.
//!
//! The report is a short-lived job, so the recorder is rendered in-process at
//! the end of a run instead of being scraped.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing::{info, warn};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global recorder. Idempotent.
pub fn init_metrics() {
    if HANDLE.get().is_some() {
        return;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            register_metrics();
            if HANDLE.set(handle).is_err() {
                warn!("Metrics handle was already set");
            }
            info!("Prometheus recorder installed");
        }
        Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
    }
}

fn register_metrics() {
    describe_counter!("spacex_fetch_requests_total", "HTTP requests issued per URL");
    describe_counter!("spacex_fetch_errors_total", "Failed HTTP requests per URL");
    describe_histogram!(
        "spacex_fetch_duration_seconds",
        Unit::Seconds,
        "Time from request to full body per URL"
    );
    describe_counter!("spacex_launches_enriched_total", "Launches joined with rockets");
    describe_counter!("spacex_unresolved_rockets_total", "Launches whose rocket could not be resolved");
}

/// Prometheus text snapshot, if the recorder is installed
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}
