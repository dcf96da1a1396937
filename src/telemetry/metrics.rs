//! Prometheus metrics setup and metric definitions

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const HTTP_REQUESTS_TOTAL: &str = "farmcart_http_requests_total";
pub const HTTP_REQUEST_DURATION: &str = "farmcart_http_request_duration_seconds";
pub const HTTP_REQUESTS_IN_FLIGHT: &str = "farmcart_http_requests_in_flight";
pub const ORDERS_CREATED_TOTAL: &str = "farmcart_orders_created_total";
pub const AUTH_LOGIN_TOTAL: &str = "farmcart_auth_login_total";

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> PrometheusHandle {
    // Seconds
    let buckets = vec![
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .expect("failed to set histogram buckets")
        .install_recorder()
        .expect("failed to install Prometheus recorder")
}

/// Register metric descriptions and emit zero values so HELP/TYPE lines
/// show up before the first request.
pub fn describe_metrics() {
    describe_counter!(HTTP_REQUESTS_TOTAL, "Total number of HTTP requests");
    describe_histogram!(HTTP_REQUEST_DURATION, "HTTP request duration in seconds");
    describe_gauge!(
        HTTP_REQUESTS_IN_FLIGHT,
        "Number of HTTP requests currently being processed"
    );

    describe_counter!(ORDERS_CREATED_TOTAL, "Orders placed, by payment method");
    describe_counter!(AUTH_LOGIN_TOTAL, "Login attempts, by login kind and result");

    gauge!(HTTP_REQUESTS_IN_FLIGHT).set(0.0);
    counter!(ORDERS_CREATED_TOTAL, "payment_method" => "cod").absolute(0);
    counter!(AUTH_LOGIN_TOTAL, "kind" => "password", "result" => "success").absolute(0);
}

/// Count one login attempt
pub fn record_login(kind: &'static str, success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!(AUTH_LOGIN_TOTAL, "kind" => kind, "result" => result).increment(1);
}

/// Count one created order
pub fn record_order_created(payment_method: &'static str) {
    counter!(ORDERS_CREATED_TOTAL, "payment_method" => payment_method).increment(1);
}
