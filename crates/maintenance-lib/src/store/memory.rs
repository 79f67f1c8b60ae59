//! In-memory store for tests and demo deployments

use std::sync::RwLock;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::MaintenanceStore;
use crate::error::StoreError;
use crate::models::{Equipment, EquipmentStatus, PredictionRecord, SystemEvent};

/// Thread-safe in-memory implementation of [`MaintenanceStore`]
#[derive(Default)]
pub struct InMemoryStore {
    equipment: DashMap<Uuid, Equipment>,
    /// equipment_code -> equipment id
    codes: DashMap<String, Uuid>,
    /// equipment id -> prediction history, oldest first
    predictions: DashMap<Uuid, Vec<PredictionRecord>>,
    events: RwLock<Vec<SystemEvent>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register equipment; used by seeding and tests
    pub fn insert_equipment(&self, equipment: Equipment) {
        self.codes
            .insert(equipment.equipment_code.clone(), equipment.id);
        self.equipment.insert(equipment.id, equipment);
    }

    /// Total prediction records across all equipment
    pub fn prediction_count(&self) -> usize {
        self.predictions.iter().map(|entry| entry.value().len()).sum()
    }

    /// Total audit events recorded
    pub fn event_count(&self) -> usize {
        self.events.read().map(|events| events.len()).unwrap_or(0)
    }
}

#[async_trait]
impl MaintenanceStore for InMemoryStore {
    async fn equipment_by_code(&self, code: &str) -> Result<Option<Equipment>, StoreError> {
        let id = match self.codes.get(code) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.equipment.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_equipment(&self) -> Result<Vec<Equipment>, StoreError> {
        let mut all: Vec<Equipment> = self
            .equipment
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.equipment_code.cmp(&b.equipment_code));
        Ok(all)
    }

    async fn insert_prediction(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        self.predictions
            .entry(record.result.equipment_id)
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn predictions_for_equipment(
        &self,
        equipment_id: Uuid,
        limit: usize,
    ) -> Result<Vec<PredictionRecord>, StoreError> {
        let history = match self.predictions.get(&equipment_id) {
            Some(entry) => entry.value().clone(),
            None => return Ok(Vec::new()),
        };
        Ok(history.into_iter().rev().take(limit).collect())
    }

    async fn update_equipment_status(
        &self,
        equipment_id: Uuid,
        status: EquipmentStatus,
    ) -> Result<(), StoreError> {
        match self.equipment.get_mut(&equipment_id) {
            Some(mut entry) => {
                entry.value_mut().status = status;
                Ok(())
            }
            None => Err(StoreError::Write(format!(
                "equipment {} does not exist",
                equipment_id
            ))),
        }
    }

    async fn append_event(&self, event: &SystemEvent) -> Result<(), StoreError> {
        self.events
            .write()
            .map_err(|_| StoreError::Write("event log lock poisoned".to_string()))?
            .push(event.clone());
        Ok(())
    }

    async fn recent_events(&self, limit: usize) -> Result<Vec<SystemEvent>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::Read("event log lock poisoned".to_string()))?;
        Ok(events.iter().rev().take(limit).cloned().collect())
    }
}
