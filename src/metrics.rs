use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {e}"))?;

    // Pre-register counters so they appear even before the first increment.
    for endpoint in ENDPOINTS {
        counter!("api_requests_total", "endpoint" => endpoint).absolute(0);
    }
    for table in [
        "customers",
        "accounts",
        "trades",
        "corporate_actions",
        "notifications",
    ] {
        counter!("seed_rows_inserted_total", "table" => table).absolute(0);
        counter!("seed_rows_skipped_total", "table" => table).absolute(0);
    }
    for table in ["assets_under_custody", "trades_by_asset"] {
        counter!("historical_rows_inserted_total", "table" => table).absolute(0);
    }

    // Histogram is lazily created on first record; force creation.
    histogram!("dashboard_summary_seconds").record(0.0);

    Ok(handle)
}

/// `endpoint` label values for `api_requests_total`.
pub const ENDPOINTS: [&str; 9] = [
    "health",
    "dashboard_summary",
    "customers",
    "accounts",
    "trades",
    "corporate_actions",
    "assets_under_custody",
    "trades_by_asset",
    "notifications",
];

pub fn record_request(endpoint: &'static str) {
    counter!("api_requests_total", "endpoint" => endpoint).increment(1);
}
