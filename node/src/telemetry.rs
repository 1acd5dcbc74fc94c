// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::OnceLock;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize telemetry (logs + metrics)
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "pixelcrush_node=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROM_HANDLE.set(handle).is_err() {
                tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
            }
        }
        Err(e) => tracing::error!("Metrics disabled: {}", e),
    }

    metrics::describe_counter!("pixelcrush_records_accepted_total", "Update records that raised a cell's hardness");
    metrics::describe_counter!("pixelcrush_records_rejected_total", "Update records that did not beat the current digest");
    metrics::describe_counter!("pixelcrush_batches_failed_total", "Batches aborted by a malformed, out-of-bounds or forged record");
    metrics::describe_counter!("pixelcrush_renders_total", "Images rendered from scratch");
    metrics::describe_counter!("pixelcrush_snapshots_saved_total", "Snapshots written by admin request");
    metrics::describe_gauge!("pixelcrush_snapshot_size_bytes", "Size of the last saved snapshot in bytes");

    metrics::gauge!("pixelcrush_node_up", 1.0);
}

/// Get the Prometheus handle to render metrics
pub fn get_metrics() -> String {
    if let Some(handle) = PROM_HANDLE.get() {
        handle.render()
    } else {
        "# metrics not initialized".to_string()
    }
}
