//! Predictive maintenance library for agricultural equipment
//!
//! This crate provides the core functionality for:
//! - Rule-based failure prediction from sensor readings
//! - Orchestration of prediction persistence and status escalation
//! - Typed tool dispatch for the chat assistant
//! - Health checks and observability

pub mod engine;
pub mod error;
pub mod health;
pub mod models;
pub mod observability;
pub mod orchestrator;
pub mod store;
pub mod tools;

pub use error::{PredictionError, StoreError};
pub use models::*;
pub use observability::{ServiceMetrics, StructuredLogger};
pub use orchestrator::PredictionOrchestrator;
pub use tools::{ToolName, ToolRouter};
