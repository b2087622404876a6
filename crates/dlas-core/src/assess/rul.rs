//! Remaining-useful-life estimation and confidence banding.
//!
//! A closed-form point estimate is penalized by age, battery wear, charge
//! cycles, frame drops, and repair history, then widened into a min/max
//! window whose margin grows as confidence shrinks. The three largest
//! contribution ratios become the `key_drivers` list for direct UI
//! labeling.

use serde::{Deserialize, Serialize};

use crate::domain::payload::InputPayload;
use crate::score::round2;

/// Confidence band for a RUL estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Confidence {
    Medium,
    MediumHigh,
    High,
}

/// Estimated remaining useful life in months.
///
/// Invariants: `rul_months_min <= rul_months_max`, both in `[1, 30]`;
/// `confidence_score` in `[0.35, 0.9]`; at most 3 key drivers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RulEstimate {
    pub rul_months_min: i64,
    pub rul_months_max: i64,
    pub confidence: Confidence,
    pub confidence_score: f64,
    pub key_drivers: Vec<String>,
}

/// Compute the RUL estimate for a validated payload.
pub fn estimate_rul(payload: &InputPayload) -> RulEstimate {
    let age = f64::from(payload.device.age_months);
    let battery = f64::from(payload.signals.battery_health_percent);
    let cycles = f64::from(payload.signals.charge_cycles);
    let frame_drop = payload.signals.frame_drop_rate;
    let repairs = f64::from(payload.signals.repair_history_count);

    let mut rul_point = 24.0;
    rul_point -= (age / 6.0).clamp(0.0, 12.0);
    rul_point -= (100.0 - battery) / 10.0;
    rul_point -= cycles / 400.0;
    rul_point -= frame_drop * 10.0;
    rul_point -= repairs * 1.5;
    let rul_point = rul_point.clamp(1.0, 30.0);

    let risk = age / 48.0
        + (100.0 - battery) / 60.0
        + cycles / 1200.0
        + frame_drop / 0.4
        + repairs / 4.0;
    let confidence_score = (1.0 - risk / 5.0).clamp(0.35, 0.9);

    let confidence = if confidence_score >= 0.8 {
        Confidence::High
    } else if confidence_score >= 0.6 {
        Confidence::MediumHigh
    } else {
        Confidence::Medium
    };

    let margin = 2.0 + (1.0 - confidence_score) * 4.0;
    let rul_min = ((rul_point - margin).floor() as i64).max(1);
    let rul_max = ((rul_point + margin).ceil() as i64).min(30);

    // Contribution ratios in declared order; the stable sort keeps that
    // order for equal contributions.
    let mut contributions = [
        ("battery_health_percent", (100.0 - battery) / 60.0),
        ("charge_cycles", cycles / 1200.0),
        ("frame_drop_rate", frame_drop / 0.4),
        ("repair_history_count", repairs / 4.0),
        ("device_age_months", age / 48.0),
    ];
    contributions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let key_drivers = contributions
        .iter()
        .take(3)
        .map(|(name, _)| (*name).to_string())
        .collect();

    RulEstimate {
        rul_months_min: rul_min,
        rul_months_max: rul_max,
        confidence,
        confidence_score: round2(confidence_score),
        key_drivers,
    }
}
