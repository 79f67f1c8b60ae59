//! Core data models for the maintenance service

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type recorded for every persisted prediction
pub const EVENT_PREDICTION_CREATED: &str = "prediction_created";

/// Named sensor channels mapped to readings
///
/// A `BTreeMap` keeps channel order stable so serialized output is
/// reproducible for identical input.
pub type SensorReadings = BTreeMap<String, f64>;

/// Lifecycle status of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    Operational,
    Warning,
    Critical,
    Maintenance,
    Decommissioned,
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquipmentStatus::Operational => write!(f, "operational"),
            EquipmentStatus::Warning => write!(f, "warning"),
            EquipmentStatus::Critical => write!(f, "critical"),
            EquipmentStatus::Maintenance => write!(f, "maintenance"),
            EquipmentStatus::Decommissioned => write!(f, "decommissioned"),
        }
    }
}

/// Severity of a single detected failure condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Maintenance urgency tier derived from the health score
///
/// Ordered from least to most urgent so tiers compare with `<`/`>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::High => write!(f, "high"),
            Urgency::Critical => write!(f, "critical"),
        }
    }
}

/// A single detected abnormal-channel condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureFinding {
    /// Failure category, e.g. "Motor Overheating"
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
}

/// Equipment registry entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: Uuid,
    /// Human-facing code used by callers, e.g. "SP-001"
    pub equipment_code: String,
    pub name: String,
    pub equipment_type: String,
    pub status: EquipmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Equipment {
    /// Create a new operational equipment entry
    pub fn new(
        equipment_code: impl Into<String>,
        name: impl Into<String>,
        equipment_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            equipment_code: equipment_code.into(),
            name: name.into(),
            equipment_type: equipment_type.into(),
            status: EquipmentStatus::Operational,
            created_at: Utc::now(),
        }
    }
}

/// Health assessment computed by the prediction engine
///
/// Contains no id or timestamp; those are injected by the orchestrator
/// when the record is persisted, so identical input produces identical
/// output here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub equipment_id: Uuid,
    pub equipment_name: String,
    /// 0-100, 100 = no detected issues
    pub health_score: u8,
    pub findings: Vec<FailureFinding>,
    pub urgency: Urgency,
    pub time_to_failure_hours: u32,
    pub estimated_cost: f64,
    pub sensor_data: SensorReadings,
    pub recommendation: String,
}

/// Persisted prediction, immutable once written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: PredictionResult,
}

/// Append-only audit record emitted after a prediction is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemEvent {
    pub id: Uuid,
    pub event_type: String,
    /// Id of the record that triggered the event
    pub source_id: Uuid,
    pub event_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_ordering() {
        assert!(Urgency::Low < Urgency::Medium);
        assert!(Urgency::Medium < Urgency::High);
        assert!(Urgency::High < Urgency::Critical);
    }

    #[test]
    fn test_finding_serializes_type_field() {
        let finding = FailureFinding {
            kind: "Motor Overheating".to_string(),
            severity: Severity::Critical,
        };

        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["type"], "Motor Overheating");
        assert_eq!(json["severity"], "critical");
    }

    #[test]
    fn test_prediction_record_flattens_result() {
        let equipment = Equipment::new("SP-001", "Solar Pump A", "solar_pump");
        let record = PredictionRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            result: PredictionResult {
                equipment_id: equipment.id,
                equipment_name: equipment.name.clone(),
                health_score: 100,
                findings: vec![],
                urgency: Urgency::Low,
                time_to_failure_hours: 720,
                estimated_cost: 0.0,
                sensor_data: SensorReadings::new(),
                recommendation: "ok".to_string(),
            },
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["health_score"], 100);
        assert_eq!(json["urgency"], "low");
        assert!(json["id"].is_string());
    }
}
