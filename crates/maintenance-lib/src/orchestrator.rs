//! Prediction orchestration
//!
//! Sequences one prediction run: equipment lookup, engine evaluation,
//! persistence, urgency-driven status escalation, audit event. The
//! persisted prediction is authoritative: lookup and persistence
//! failures are hard errors, the status write and the audit event are
//! best-effort and only logged.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::engine::PredictionEngine;
use crate::error::PredictionError;
use crate::models::{
    EquipmentStatus, PredictionRecord, SensorReadings, SystemEvent, Urgency,
    EVENT_PREDICTION_CREATED,
};
use crate::observability::{ServiceMetrics, StructuredLogger};
use crate::store::MaintenanceStore;

/// Runs predictions and applies their side effects exactly once per call
pub struct PredictionOrchestrator {
    engine: PredictionEngine,
    store: Arc<dyn MaintenanceStore>,
    /// Advisory per-equipment locks. The source system let concurrent
    /// runs for one equipment race on the status write; serializing per
    /// code removes that race without coordinating across codes.
    /// Entries are evicted after the last holder releases, so the map
    /// is empty whenever no run is in flight.
    locks: DashMap<String, Arc<Mutex<()>>>,
    logger: StructuredLogger,
    metrics: ServiceMetrics,
}

impl PredictionOrchestrator {
    pub fn new(
        engine: PredictionEngine,
        store: Arc<dyn MaintenanceStore>,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            engine,
            store,
            locks: DashMap::new(),
            logger,
            metrics: ServiceMetrics::new(),
        }
    }

    /// Run a single prediction for the given equipment code
    ///
    /// Missing sensor data is passed to the engine as an empty reading
    /// set; whether that synthesizes values depends on the engine's
    /// `simulate_if_missing` option.
    pub async fn run_prediction(
        &self,
        equipment_code: &str,
        sensor_data: Option<&SensorReadings>,
    ) -> Result<PredictionRecord, PredictionError> {
        let lock = {
            let entry = self.locks.entry(equipment_code.to_string()).or_default();
            entry.value().clone()
        };
        let guard = lock.lock().await;
        let result = self.run_locked(equipment_code, sensor_data).await;
        drop(guard);
        drop(lock);

        // Evict the map entry once no other task holds a clone. The
        // count check runs under the shard lock, so a concurrent
        // entry() cannot obtain a clone in between. Without eviction
        // every code ever submitted, valid or not, stays resident.
        self.locks
            .remove_if(equipment_code, |_, lock| Arc::strong_count(lock) == 1);

        result
    }

    async fn run_locked(
        &self,
        equipment_code: &str,
        sensor_data: Option<&SensorReadings>,
    ) -> Result<PredictionRecord, PredictionError> {
        let equipment = self
            .store
            .equipment_by_code(equipment_code)
            .await
            .map_err(PredictionError::Lookup)?
            .ok_or_else(|| PredictionError::NotFound(equipment_code.to_string()))?;

        let start = Instant::now();
        let empty = SensorReadings::new();
        let readings = sensor_data.unwrap_or(&empty);
        let result = self.engine.evaluate(&equipment, readings);
        self.metrics
            .observe_evaluation_latency(start.elapsed().as_secs_f64());

        let record = PredictionRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            result,
        };

        if let Err(e) = self.store.insert_prediction(&record).await {
            self.metrics.inc_prediction_failures();
            return Err(PredictionError::Persistence(e));
        }
        self.metrics.inc_predictions();
        self.logger.log_prediction(
            equipment_code,
            &record.result.equipment_name,
            record.result.health_score,
            &record.result.urgency.to_string(),
            record.result.findings.len(),
            record.result.estimated_cost,
            start.elapsed().as_micros() as u64,
        );

        self.escalate_status(equipment_code, equipment.id, record.result.urgency)
            .await;
        self.emit_event(equipment_code, &record).await;

        Ok(record)
    }

    /// Escalate equipment status when urgency demands it
    ///
    /// Critical urgency forces `critical`, high forces `warning`, lower
    /// tiers never touch the status. There is no auto-healing path:
    /// resetting to operational is a human workflow.
    async fn escalate_status(&self, equipment_code: &str, equipment_id: Uuid, urgency: Urgency) {
        let new_status = match urgency {
            Urgency::Critical => EquipmentStatus::Critical,
            Urgency::High => EquipmentStatus::Warning,
            Urgency::Medium | Urgency::Low => return,
        };

        match self
            .store
            .update_equipment_status(equipment_id, new_status)
            .await
        {
            Ok(()) => {
                self.metrics.inc_status_escalations();
                self.logger.log_status_escalation(
                    equipment_code,
                    &urgency.to_string(),
                    &new_status.to_string(),
                );
            }
            Err(e) => {
                self.metrics.inc_secondary_effect_failures();
                self.logger.log_secondary_effect_failure(
                    equipment_code,
                    "status_update",
                    &e.to_string(),
                );
            }
        }
    }

    /// Append the audit event for a persisted prediction
    async fn emit_event(&self, equipment_code: &str, record: &PredictionRecord) {
        let event = SystemEvent {
            id: Uuid::new_v4(),
            event_type: EVENT_PREDICTION_CREATED.to_string(),
            source_id: record.id,
            event_data: serde_json::to_value(record).unwrap_or(serde_json::Value::Null),
            created_at: Utc::now(),
        };

        match self.store.append_event(&event).await {
            Ok(()) => self.metrics.inc_events_emitted(),
            Err(e) => {
                self.metrics.inc_secondary_effect_failures();
                self.logger.log_secondary_effect_failure(
                    equipment_code,
                    "audit_event",
                    &e.to_string(),
                );
            }
        }
    }
}
