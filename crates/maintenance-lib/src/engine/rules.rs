//! Canonical channel rule table and derived lookup tables
//!
//! One rule per sensor channel, evaluated in declaration order. Each
//! rule is one-sided: depending on polarity either high or low values
//! breach the thresholds. A channel produces at most one finding per
//! evaluation because the critical check takes precedence.

use crate::models::{Severity, Urgency};

/// Flat cost added per finding
pub const PER_FINDING_COST: f64 = 1800.0;

/// Cost added per point of lost health
pub const SEVERITY_COST_RATE: f64 = 100.0;

/// Which direction of a channel is unhealthy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    AboveIsBad,
    BelowIsBad,
}

/// Threshold rule for a single sensor channel
#[derive(Debug, Clone)]
pub struct ChannelRule {
    pub channel: &'static str,
    /// Failure category reported in findings
    pub label: &'static str,
    pub polarity: Polarity,
    pub warning_threshold: f64,
    pub critical_threshold: f64,
    pub warning_penalty: u8,
    pub critical_penalty: u8,
    /// Range used when synthesizing readings (opt-in only)
    pub simulated_range: (f64, f64),
}

impl ChannelRule {
    /// Classify a reading against this rule
    ///
    /// Returns at most one severity: critical if the critical threshold
    /// is breached, otherwise warning if the warning threshold is
    /// breached, otherwise `None`.
    pub fn breach(&self, value: f64) -> Option<Severity> {
        match self.polarity {
            Polarity::AboveIsBad => {
                if value > self.critical_threshold {
                    Some(Severity::Critical)
                } else if value > self.warning_threshold {
                    Some(Severity::Warning)
                } else {
                    None
                }
            }
            Polarity::BelowIsBad => {
                if value < self.critical_threshold {
                    Some(Severity::Critical)
                } else if value < self.warning_threshold {
                    Some(Severity::Warning)
                } else {
                    None
                }
            }
        }
    }

    /// Penalty for a given breach severity
    pub fn penalty(&self, severity: Severity) -> u8 {
        match severity {
            Severity::Warning => self.warning_penalty,
            Severity::Critical => self.critical_penalty,
        }
    }
}

/// The canonical rule table, in fixed evaluation order
///
/// Findings are appended in this order, which is the order surfaced to
/// the user.
pub const CHANNEL_RULES: [ChannelRule; 5] = [
    ChannelRule {
        channel: "motor_temp",
        label: "Motor Overheating",
        polarity: Polarity::AboveIsBad,
        warning_threshold: 70.0,
        critical_threshold: 85.0,
        warning_penalty: 15,
        critical_penalty: 35,
        simulated_range: (55.0, 80.0),
    },
    ChannelRule {
        channel: "vibration",
        label: "Excessive Vibration",
        polarity: Polarity::AboveIsBad,
        warning_threshold: 8.0,
        critical_threshold: 15.0,
        warning_penalty: 10,
        critical_penalty: 30,
        simulated_range: (2.0, 10.0),
    },
    ChannelRule {
        channel: "power_output",
        label: "Power Degradation",
        polarity: Polarity::BelowIsBad,
        warning_threshold: 60.0,
        critical_threshold: 40.0,
        warning_penalty: 10,
        critical_penalty: 25,
        simulated_range: (50.0, 95.0),
    },
    ChannelRule {
        channel: "flow_rate",
        label: "Low Flow Rate",
        polarity: Polarity::BelowIsBad,
        warning_threshold: 30.0,
        critical_threshold: 15.0,
        warning_penalty: 10,
        critical_penalty: 25,
        simulated_range: (20.0, 55.0),
    },
    ChannelRule {
        channel: "pressure",
        label: "Pressure Overload",
        polarity: Polarity::AboveIsBad,
        warning_threshold: 6.0,
        critical_threshold: 9.0,
        warning_penalty: 10,
        critical_penalty: 30,
        simulated_range: (3.0, 7.0),
    },
];

/// Map a clamped health score to an urgency tier
///
/// Breakpoints are monotonic and exhaustive: a single critical finding
/// (score 65) already lands in the critical tier.
pub fn urgency_for_score(score: u8) -> Urgency {
    if score < 70 {
        Urgency::Critical
    } else if score < 85 {
        Urgency::High
    } else if score < 95 {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

/// Estimated hours until failure for each urgency tier
pub fn time_to_failure_hours(urgency: Urgency) -> u32 {
    match urgency {
        Urgency::Critical => 24,
        Urgency::High => 72,
        Urgency::Medium => 168,
        Urgency::Low => 720,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_penalty_below_critical_penalty() {
        for rule in &CHANNEL_RULES {
            assert!(
                rule.warning_penalty < rule.critical_penalty,
                "channel {} has warning penalty >= critical penalty",
                rule.channel
            );
        }
    }

    #[test]
    fn test_breach_above_polarity() {
        let rule = &CHANNEL_RULES[0]; // motor_temp
        assert_eq!(rule.breach(60.0), None);
        assert_eq!(rule.breach(70.0), None); // boundary is not a breach
        assert_eq!(rule.breach(75.0), Some(Severity::Warning));
        assert_eq!(rule.breach(85.0), Some(Severity::Warning));
        assert_eq!(rule.breach(90.0), Some(Severity::Critical));
    }

    #[test]
    fn test_breach_below_polarity() {
        let rule = &CHANNEL_RULES[2]; // power_output
        assert_eq!(rule.breach(80.0), None);
        assert_eq!(rule.breach(60.0), None);
        assert_eq!(rule.breach(50.0), Some(Severity::Warning));
        assert_eq!(rule.breach(30.0), Some(Severity::Critical));
    }

    #[test]
    fn test_urgency_breakpoints_exhaustive_and_monotone() {
        let mut previous = Urgency::Critical;
        for score in 0..=100u8 {
            let urgency = urgency_for_score(score);
            // Urgency never increases as the score improves
            assert!(urgency <= previous, "urgency rose at score {}", score);
            previous = urgency;
        }
        assert_eq!(urgency_for_score(0), Urgency::Critical);
        assert_eq!(urgency_for_score(69), Urgency::Critical);
        assert_eq!(urgency_for_score(70), Urgency::High);
        assert_eq!(urgency_for_score(84), Urgency::High);
        assert_eq!(urgency_for_score(85), Urgency::Medium);
        assert_eq!(urgency_for_score(94), Urgency::Medium);
        assert_eq!(urgency_for_score(95), Urgency::Low);
        assert_eq!(urgency_for_score(100), Urgency::Low);
    }

    #[test]
    fn test_time_to_failure_decreases_with_urgency() {
        assert!(time_to_failure_hours(Urgency::Critical) < time_to_failure_hours(Urgency::High));
        assert!(time_to_failure_hours(Urgency::High) < time_to_failure_hours(Urgency::Medium));
        assert!(time_to_failure_hours(Urgency::Medium) < time_to_failure_hours(Urgency::Low));
    }

    #[test]
    fn test_channel_names_unique() {
        for (i, a) in CHANNEL_RULES.iter().enumerate() {
            for b in CHANNEL_RULES.iter().skip(i + 1) {
                assert_ne!(a.channel, b.channel);
            }
        }
    }
}
