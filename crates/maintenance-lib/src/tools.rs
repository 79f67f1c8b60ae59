//! Typed tool-dispatch seam for the chat assistant
//!
//! The LLM dispatch loop resolves a tool by string name; that string
//! handling stops here. Names parse into [`ToolName`] once, and the
//! router matches on the enum, so the core never branches on raw
//! strings.
//!
//! Domain failures (unknown equipment, bad readings) come back as the
//! `{ "error": ... }` JSON shape callers pattern-match on. Persistence
//! failures propagate as [`ToolError`] so the transport can surface a
//! hard error.

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::error::PredictionError;
use crate::models::SensorReadings;
use crate::orchestrator::PredictionOrchestrator;

/// Tools the assistant can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    RunPrediction,
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolName::RunPrediction => write!(f, "run_prediction"),
        }
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "run_prediction" => Ok(ToolName::RunPrediction),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

/// Hard failure of a tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(#[from] serde_json::Error),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

/// Arguments for the `run_prediction` tool
#[derive(Debug, Deserialize)]
pub struct RunPredictionArgs {
    pub equipment_code: String,
    #[serde(default)]
    pub sensor_data: Option<SensorReadings>,
}

/// Routes parsed tool calls to their handlers
pub struct ToolRouter {
    orchestrator: Arc<PredictionOrchestrator>,
}

impl ToolRouter {
    pub fn new(orchestrator: Arc<PredictionOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Dispatch one tool call
    ///
    /// `Ok` carries the JSON the assistant surfaces to the user, which
    /// is either the prediction record or the `{ "error": ... }` shape.
    /// `Err` means the invocation failed hard and nothing user-facing
    /// was produced.
    pub async fn dispatch(&self, tool: ToolName, args: Value) -> Result<Value, ToolError> {
        match tool {
            ToolName::RunPrediction => self.run_prediction(args).await,
        }
    }

    async fn run_prediction(&self, args: Value) -> Result<Value, ToolError> {
        // JSON cannot encode non-finite numbers, so deserializing into
        // f64 readings already guarantees every channel value is finite.
        let args: RunPredictionArgs = serde_json::from_value(args)?;

        match self
            .orchestrator
            .run_prediction(&args.equipment_code, args.sensor_data.as_ref())
            .await
        {
            Ok(record) => Ok(serde_json::to_value(&record)?),
            Err(err) if err.is_domain_error() => Ok(json!({ "error": err.to_string() })),
            Err(err) => Err(err.into()),
        }
    }
}
