use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static PREDICTIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PREDICTION_ROWS: OnceLock<HistogramVec> = OnceLock::new();

/// Install the Prometheus recorder and register prediction metrics.
///
/// Safe to call more than once; only the first call has any effect.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder")
    });

    PROMETHEUS_REGISTRY.get_or_init(|| {
        let registry = Registry::new();

        let predictions_counter = IntCounterVec::new(
            Opts::new(
                "predictions_total",
                "Total prediction requests by predictor and outcome",
            ),
            &["predictor", "status"],
        )
        .expect("Failed to create predictions_total metric");

        let rows_histogram = HistogramVec::new(
            HistogramOpts::new("prediction_rows", "Rows scored per prediction request")
                .buckets(vec![0.0, 1.0, 10.0, 100.0, 1000.0, 10000.0]),
            &["predictor"],
        )
        .expect("Failed to create prediction_rows metric");

        registry
            .register(Box::new(predictions_counter.clone()))
            .expect("Failed to register predictions_total");
        registry
            .register(Box::new(rows_histogram.clone()))
            .expect("Failed to register prediction_rows");

        let _ = PREDICTIONS_TOTAL.set(predictions_counter);
        let _ = PREDICTION_ROWS.set(rows_histogram);

        registry
    });
}

pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    // Append custom prometheus metrics
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

/// Record the outcome of a prediction request.
pub fn record_prediction(predictor: &str, status: &str, rows: usize) {
    if let Some(counter) = PREDICTIONS_TOTAL.get() {
        counter.with_label_values(&[predictor, status]).inc();
    }
    if let Some(histogram) = PREDICTION_ROWS.get() {
        histogram.with_label_values(&[predictor]).observe(rows as f64);
    }
}
