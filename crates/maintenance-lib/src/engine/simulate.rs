//! Synthetic sensor readings for callers that supply none
//!
//! This reproduces the legacy behavior of inventing plausible values
//! when a prediction is requested without data. It conflates "no data"
//! with "synthetic healthy-ish data", so it only runs when the engine
//! is explicitly configured with `simulate_if_missing`.

use rand::Rng;

use super::rules::CHANNEL_RULES;
use crate::models::SensorReadings;

/// Generate one reading per configured channel
///
/// Values are drawn uniformly from each rule's documented simulated
/// range. Ranges lean healthy but overlap the warning thresholds, so a
/// simulated run can still surface findings.
pub fn simulated_readings() -> SensorReadings {
    let mut rng = rand::thread_rng();
    CHANNEL_RULES
        .iter()
        .map(|rule| {
            let (lo, hi) = rule.simulated_range;
            (rule.channel.to_string(), rng.gen_range(lo..=hi))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_all_channels_within_range() {
        let readings = simulated_readings();
        assert_eq!(readings.len(), CHANNEL_RULES.len());

        for rule in &CHANNEL_RULES {
            let value = readings
                .get(rule.channel)
                .unwrap_or_else(|| panic!("missing channel {}", rule.channel));
            let (lo, hi) = rule.simulated_range;
            assert!(*value >= lo && *value <= hi, "{} out of range", rule.channel);
            assert!(value.is_finite());
        }
    }
}
