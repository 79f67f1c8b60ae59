//! Data store abstraction
//!
//! The orchestrator receives a store handle as an explicit dependency,
//! never a module-level singleton, so tests can substitute fakes and
//! failure-injecting wrappers.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Equipment, EquipmentStatus, PredictionRecord, SystemEvent};

/// Persistence operations needed by the prediction pipeline
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    /// Resolve equipment by its human-facing code
    async fn equipment_by_code(&self, code: &str) -> Result<Option<Equipment>, StoreError>;

    /// List all registered equipment
    async fn list_equipment(&self) -> Result<Vec<Equipment>, StoreError>;

    /// Append a prediction to the equipment's history
    async fn insert_prediction(&self, record: &PredictionRecord) -> Result<(), StoreError>;

    /// Prediction history for one equipment, newest first
    async fn predictions_for_equipment(
        &self,
        equipment_id: Uuid,
        limit: usize,
    ) -> Result<Vec<PredictionRecord>, StoreError>;

    /// Overwrite the equipment status field
    async fn update_equipment_status(
        &self,
        equipment_id: Uuid,
        status: EquipmentStatus,
    ) -> Result<(), StoreError>;

    /// Append an audit event
    async fn append_event(&self, event: &SystemEvent) -> Result<(), StoreError>;

    /// Recent audit events, newest first
    async fn recent_events(&self, limit: usize) -> Result<Vec<SystemEvent>, StoreError>;
}
