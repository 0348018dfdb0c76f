//! Prometheus metrics (lock-free atomics).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    // --- Traffic ---
    pub parent_validations: AtomicU64,
    pub template_validations: AtomicU64,
    pub futures_validations: AtomicU64,
    pub invalid_results: AtomicU64,
    pub bad_requests: AtomicU64,

    // --- Latency (μs, updated via CAS) ---
    pub validation_duration_us_sum: AtomicU64,
    pub validation_duration_us_max: AtomicU64,

    // --- Upstream ---
    pub rpc_errors: AtomicU64,
    pub rpc_failovers: AtomicU64,
    pub subgraph_errors: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            parent_validations: AtomicU64::new(0),
            template_validations: AtomicU64::new(0),
            futures_validations: AtomicU64::new(0),
            invalid_results: AtomicU64::new(0),
            bad_requests: AtomicU64::new(0),
            validation_duration_us_sum: AtomicU64::new(0),
            validation_duration_us_max: AtomicU64::new(0),
            rpc_errors: AtomicU64::new(0),
            rpc_failovers: AtomicU64::new(0),
            subgraph_errors: AtomicU64::new(0),
        }
    }

    /// Count one finished validation and its wall time.
    pub fn record_validation(&self, start: Instant, is_valid: bool) {
        if !is_valid {
            self.invalid_results.fetch_add(1, Ordering::Relaxed);
        }
        let us = start.elapsed().as_micros() as u64;
        self.validation_duration_us_sum.fetch_add(us, Ordering::Relaxed);
        let mut cur = self.validation_duration_us_max.load(Ordering::Relaxed);
        while us > cur {
            match self.validation_duration_us_max.compare_exchange_weak(
                cur,
                us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let parent = self.parent_validations.load(Ordering::Relaxed);
        let template = self.template_validations.load(Ordering::Relaxed);
        let futures = self.futures_validations.load(Ordering::Relaxed);
        let invalid = self.invalid_results.load(Ordering::Relaxed);
        let bad_requests = self.bad_requests.load(Ordering::Relaxed);
        let dur_sum = self.validation_duration_us_sum.load(Ordering::Relaxed);
        let dur_max = self.validation_duration_us_max.swap(0, Ordering::Relaxed);
        let rpc_errors = self.rpc_errors.load(Ordering::Relaxed);
        let rpc_failovers = self.rpc_failovers.load(Ordering::Relaxed);
        let subgraph_errors = self.subgraph_errors.load(Ordering::Relaxed);

        let dur_sum_s = dur_sum as f64 / 1_000_000.0;
        let dur_max_s = dur_max as f64 / 1_000_000.0;

        format!(
            "\
# HELP fgo_validations_total Validation requests handled, by kind.\n\
# TYPE fgo_validations_total counter\n\
fgo_validations_total{{kind=\"parent\"}} {parent}\n\
fgo_validations_total{{kind=\"template\"}} {template}\n\
fgo_validations_total{{kind=\"futures\"}} {futures}\n\
# HELP fgo_invalid_results_total Validations that returned isValid=false.\n\
# TYPE fgo_invalid_results_total counter\n\
fgo_invalid_results_total {invalid}\n\
# HELP fgo_bad_requests_total Requests rejected before validation.\n\
# TYPE fgo_bad_requests_total counter\n\
fgo_bad_requests_total {bad_requests}\n\
# HELP fgo_validation_duration_seconds_sum Total validation time (seconds).\n\
# TYPE fgo_validation_duration_seconds_sum counter\n\
fgo_validation_duration_seconds_sum {dur_sum_s:.6}\n\
# HELP fgo_validation_duration_seconds_max Max validation time since last scrape (seconds).\n\
# TYPE fgo_validation_duration_seconds_max gauge\n\
fgo_validation_duration_seconds_max {dur_max_s:.6}\n\
# HELP fgo_rpc_errors_total Failed eth_call transports.\n\
# TYPE fgo_rpc_errors_total counter\n\
fgo_rpc_errors_total {rpc_errors}\n\
# HELP fgo_rpc_failovers_total RPC primary-to-fallback failovers.\n\
# TYPE fgo_rpc_failovers_total counter\n\
fgo_rpc_failovers_total {rpc_failovers}\n\
# HELP fgo_subgraph_errors_total Failed futures-credit lookups.\n\
# TYPE fgo_subgraph_errors_total counter\n\
fgo_subgraph_errors_total {subgraph_errors}\n"
        )
    }
}
