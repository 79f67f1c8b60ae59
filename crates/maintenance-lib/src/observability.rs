//! Observability infrastructure for the maintenance service
//!
//! Provides:
//! - Prometheus metrics (evaluation latency, prediction counters,
//!   secondary-effect failures, status escalations)
//! - Structured logging helpers with consistent event fields

use prometheus::{register_histogram, register_int_counter, register_int_gauge, Histogram, IntCounter, IntGauge};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ServiceMetricsInner> = OnceLock::new();

struct ServiceMetricsInner {
    evaluation_latency_seconds: Histogram,
    predictions_total: IntCounter,
    prediction_failures_total: IntCounter,
    secondary_effect_failures_total: IntCounter,
    status_escalations_total: IntCounter,
    events_emitted_total: IntCounter,
    equipment_registered: IntGauge,
}

impl ServiceMetricsInner {
    fn new() -> Self {
        Self {
            evaluation_latency_seconds: register_histogram!(
                "maintenance_service_evaluation_latency_seconds",
                "Time spent evaluating sensor readings against the rule table",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register evaluation_latency_seconds"),

            predictions_total: register_int_counter!(
                "maintenance_service_predictions_total",
                "Total number of predictions persisted"
            )
            .expect("Failed to register predictions_total"),

            prediction_failures_total: register_int_counter!(
                "maintenance_service_prediction_failures_total",
                "Total number of prediction runs that failed hard"
            )
            .expect("Failed to register prediction_failures_total"),

            secondary_effect_failures_total: register_int_counter!(
                "maintenance_service_secondary_effect_failures_total",
                "Status updates or audit events that failed and were swallowed"
            )
            .expect("Failed to register secondary_effect_failures_total"),

            status_escalations_total: register_int_counter!(
                "maintenance_service_status_escalations_total",
                "Equipment status escalations driven by prediction urgency"
            )
            .expect("Failed to register status_escalations_total"),

            events_emitted_total: register_int_counter!(
                "maintenance_service_events_emitted_total",
                "Audit events appended to the system event log"
            )
            .expect("Failed to register events_emitted_total"),

            equipment_registered: register_int_gauge!(
                "maintenance_service_equipment_registered",
                "Number of equipment entries in the registry"
            )
            .expect("Failed to register equipment_registered"),
        }
    }
}

/// Service metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct ServiceMetrics {
    _private: (),
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServiceMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record an evaluation latency observation
    pub fn observe_evaluation_latency(&self, duration_secs: f64) {
        self.inner().evaluation_latency_seconds.observe(duration_secs);
    }

    pub fn inc_predictions(&self) {
        self.inner().predictions_total.inc();
    }

    pub fn inc_prediction_failures(&self) {
        self.inner().prediction_failures_total.inc();
    }

    pub fn inc_secondary_effect_failures(&self) {
        self.inner().secondary_effect_failures_total.inc();
    }

    pub fn inc_status_escalations(&self) {
        self.inner().status_escalations_total.inc();
    }

    pub fn inc_events_emitted(&self) {
        self.inner().events_emitted_total.inc();
    }

    pub fn set_equipment_registered(&self, count: i64) {
        self.inner().equipment_registered.set(count);
    }
}

/// Structured logger for prediction pipeline events
///
/// Provides consistent field naming for predictions, escalations,
/// and swallowed secondary-effect failures.
#[derive(Clone)]
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    /// Log a persisted prediction
    #[allow(clippy::too_many_arguments)]
    pub fn log_prediction(
        &self,
        equipment_code: &str,
        equipment_name: &str,
        health_score: u8,
        urgency: &str,
        findings: usize,
        estimated_cost: f64,
        duration_us: u64,
    ) {
        info!(
            event = "prediction_created",
            service = %self.service_name,
            equipment_code = %equipment_code,
            equipment_name = %equipment_name,
            health_score = health_score,
            urgency = %urgency,
            findings = findings,
            estimated_cost = estimated_cost,
            duration_us = duration_us,
            "Prediction persisted"
        );
    }

    /// Log an urgency-driven equipment status change
    pub fn log_status_escalation(&self, equipment_code: &str, urgency: &str, new_status: &str) {
        warn!(
            event = "status_escalated",
            service = %self.service_name,
            equipment_code = %equipment_code,
            urgency = %urgency,
            new_status = %new_status,
            "Equipment status escalated"
        );
    }

    /// Log a swallowed secondary-effect failure
    ///
    /// The prediction record is already saved; status sync and audit
    /// bookkeeping may lag behind it.
    pub fn log_secondary_effect_failure(&self, equipment_code: &str, effect: &str, error: &str) {
        warn!(
            event = "secondary_effect_failed",
            service = %self.service_name,
            equipment_code = %equipment_code,
            effect = %effect,
            error = %error,
            "Secondary effect failed, prediction record unaffected"
        );
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str, equipment_count: usize) {
        info!(
            event = "service_started",
            service = %self.service_name,
            version = %version,
            equipment_count = equipment_count,
            "Maintenance service started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service_name,
            reason = %reason,
            "Maintenance service shutting down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_metrics_creation() {
        // Metrics live in the process-wide Prometheus registry, so this
        // exercises registration and basic observations once.
        let metrics = ServiceMetrics::new();

        metrics.observe_evaluation_latency(0.001);
        metrics.inc_predictions();
        metrics.inc_status_escalations();
        metrics.inc_events_emitted();
        metrics.set_equipment_registered(4);
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("test-service");
        assert_eq!(logger.service_name, "test-service");
    }
}
