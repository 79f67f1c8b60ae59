//! Rule-based failure prediction engine
//!
//! Pure scoring: sensor readings in, health assessment out. No clocks,
//! no ids, no storage. The orchestrator layers those on top.

mod rules;
mod simulate;

pub use rules::{
    time_to_failure_hours, urgency_for_score, ChannelRule, Polarity, CHANNEL_RULES,
    PER_FINDING_COST, SEVERITY_COST_RATE,
};
pub use simulate::simulated_readings;

use crate::models::{Equipment, FailureFinding, PredictionResult, SensorReadings};

/// Engine behavior options
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    /// Synthesize readings when the caller supplies none
    ///
    /// Off by default: with no readings the engine reports a clean
    /// bill of health instead of inventing data.
    pub simulate_if_missing: bool,
}

/// Deterministic threshold-based health scorer
///
/// Holds no mutable state, so a single instance is safe to share
/// across concurrent evaluations.
#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    options: EngineOptions,
}

impl PredictionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Compute a health assessment for one piece of equipment
    ///
    /// Rules run in the fixed order of [`CHANNEL_RULES`]; channels
    /// absent from `readings` skip their rule entirely. Each channel
    /// contributes at most one finding, critical taking precedence
    /// over warning.
    pub fn evaluate(&self, equipment: &Equipment, readings: &SensorReadings) -> PredictionResult {
        let sensor_data = if readings.is_empty() && self.options.simulate_if_missing {
            simulate::simulated_readings()
        } else {
            readings.clone()
        };

        let mut health = 100i32;
        let mut findings = Vec::new();

        for rule in &rules::CHANNEL_RULES {
            let Some(value) = sensor_data.get(rule.channel) else {
                continue;
            };
            if let Some(severity) = rule.breach(*value) {
                findings.push(FailureFinding {
                    kind: rule.label.to_string(),
                    severity,
                });
                health -= i32::from(rule.penalty(severity));
            }
        }

        // Penalties can overshoot below zero
        let health_score = health.clamp(0, 100) as u8;
        let urgency = rules::urgency_for_score(health_score);
        let time_to_failure = rules::time_to_failure_hours(urgency);

        let estimated_cost = findings.len() as f64 * rules::PER_FINDING_COST
            + f64::from(100 - health_score) * rules::SEVERITY_COST_RATE;

        let recommendation = if findings.is_empty() {
            "Equipment operation continues normally. No maintenance action required.".to_string()
        } else {
            format!(
                "{} issue(s) detected. Schedule maintenance within {} hours.",
                findings.len(),
                time_to_failure
            )
        };

        PredictionResult {
            equipment_id: equipment.id,
            equipment_name: equipment.name.clone(),
            health_score,
            findings,
            urgency,
            time_to_failure_hours: time_to_failure,
            estimated_cost,
            sensor_data,
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, Urgency};

    fn test_equipment() -> Equipment {
        Equipment::new("SP-001", "Solar Pump A", "solar_pump")
    }

    fn readings(pairs: &[(&str, f64)]) -> SensorReadings {
        pairs
            .iter()
            .map(|(channel, value)| (channel.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_critical_motor_temp() {
        let engine = PredictionEngine::new();
        let result = engine.evaluate(&test_equipment(), &readings(&[("motor_temp", 90.0)]));

        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].kind, "Motor Overheating");
        assert_eq!(result.findings[0].severity, Severity::Critical);
        assert!(result.health_score <= 65);
        assert_eq!(result.urgency, Urgency::Critical);
        assert_eq!(result.time_to_failure_hours, 24);
    }

    #[test]
    fn test_warning_motor_temp() {
        let engine = PredictionEngine::new();
        let result = engine.evaluate(&test_equipment(), &readings(&[("motor_temp", 75.0)]));

        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].severity, Severity::Warning);
        assert_eq!(result.health_score, 85);
    }

    #[test]
    fn test_empty_readings_without_simulation() {
        let engine = PredictionEngine::new();
        let result = engine.evaluate(&test_equipment(), &SensorReadings::new());

        assert!(result.findings.is_empty());
        assert_eq!(result.health_score, 100);
        assert_eq!(result.urgency, Urgency::Low);
        assert!(result.sensor_data.is_empty());
        assert_eq!(result.estimated_cost, 0.0);
    }

    #[test]
    fn test_empty_readings_with_simulation() {
        let engine = PredictionEngine::with_options(EngineOptions {
            simulate_if_missing: true,
        });
        let result = engine.evaluate(&test_equipment(), &SensorReadings::new());

        assert_eq!(result.sensor_data.len(), CHANNEL_RULES.len());
    }

    #[test]
    fn test_simulation_flag_ignored_when_readings_present() {
        let engine = PredictionEngine::with_options(EngineOptions {
            simulate_if_missing: true,
        });
        let input = readings(&[("motor_temp", 60.0)]);
        let result = engine.evaluate(&test_equipment(), &input);

        assert_eq!(result.sensor_data, input);
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let engine = PredictionEngine::new();
        let equipment = test_equipment();
        let input = readings(&[("motor_temp", 88.0), ("vibration", 9.5), ("flow_rate", 12.0)]);

        let first = engine.evaluate(&equipment, &input);
        let second = engine.evaluate(&equipment, &input);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_at_most_one_finding_per_channel() {
        let engine = PredictionEngine::new();
        // Breaches both thresholds; only the critical finding may appear
        let result = engine.evaluate(&test_equipment(), &readings(&[("motor_temp", 120.0)]));

        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].severity, Severity::Critical);
    }

    #[test]
    fn test_score_floor_at_zero() {
        let engine = PredictionEngine::new();
        // Every channel critically breached: penalties total 145
        let result = engine.evaluate(
            &test_equipment(),
            &readings(&[
                ("motor_temp", 150.0),
                ("vibration", 40.0),
                ("power_output", 5.0),
                ("flow_rate", 1.0),
                ("pressure", 14.0),
            ]),
        );

        assert_eq!(result.health_score, 0);
        assert_eq!(result.findings.len(), 5);
        assert_eq!(result.urgency, Urgency::Critical);
        assert_eq!(
            result.estimated_cost,
            5.0 * PER_FINDING_COST + 100.0 * SEVERITY_COST_RATE
        );
    }

    #[test]
    fn test_findings_follow_rule_declaration_order() {
        let engine = PredictionEngine::new();
        // Supply channels in an order different from the rule table
        let result = engine.evaluate(
            &test_equipment(),
            &readings(&[("pressure", 10.0), ("motor_temp", 90.0), ("vibration", 20.0)]),
        );

        let kinds: Vec<&str> = result.findings.iter().map(|f| f.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec!["Motor Overheating", "Excessive Vibration", "Pressure Overload"]
        );
    }

    #[test]
    fn test_unknown_channels_ignored() {
        let engine = PredictionEngine::new();
        let result = engine.evaluate(
            &test_equipment(),
            &readings(&[("bearing_temperature_c", 200.0), ("motor_temp", 60.0)]),
        );

        assert!(result.findings.is_empty());
        assert_eq!(result.health_score, 100);
    }

    #[test]
    fn test_cost_formula() {
        let engine = PredictionEngine::new();
        // One warning finding: health 85
        let result = engine.evaluate(&test_equipment(), &readings(&[("motor_temp", 75.0)]));

        assert_eq!(
            result.estimated_cost,
            PER_FINDING_COST + 15.0 * SEVERITY_COST_RATE
        );
    }

    #[test]
    fn test_recommendation_mentions_finding_count() {
        let engine = PredictionEngine::new();

        let clean = engine.evaluate(&test_equipment(), &SensorReadings::new());
        assert!(clean.recommendation.contains("continues normally"));

        let degraded = engine.evaluate(
            &test_equipment(),
            &readings(&[("motor_temp", 90.0), ("vibration", 9.0)]),
        );
        assert!(degraded.recommendation.contains("2 issue(s)"));
    }
}
