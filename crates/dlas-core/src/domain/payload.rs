//! Typed input payload for the advisory pipelines.
//!
//! Payloads arrive as untyped JSON and are validated before being
//! deserialized into these structs; from then on they are read-only and
//! only echoed back in responses.

use serde::{Deserialize, Serialize};

/// The device under assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    pub brand: String,
    pub model: String,
    pub age_months: u32,
}

/// Telemetry signals collected from the device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signals {
    pub battery_health_percent: u32,
    pub charge_cycles: u32,
    pub frame_drop_rate: f64,
    pub repair_history_count: u32,
}

/// User preference weights steering the option scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    pub budget_priority: Priority,
    pub sustainability_priority: Priority,
    pub performance_priority: Priority,
    pub prefers_financing: bool,
}

/// Fully validated assess input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputPayload {
    pub device: Device,
    pub signals: Signals,
    pub user_preferences: UserPreferences,
}

/// Textual priority level for a user preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric weight used by both scoring pipelines (low 1, medium 2, high 3).
    pub fn weight(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High => 3.0,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// The three lifecycle options the assess pipeline scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionId {
    RepairBattery,
    RefurbBuy,
    TradeinNew,
}

impl OptionId {
    /// Winner tie-break order: when overall scores are equal, the option
    /// appearing earlier here wins.
    pub const TIE_BREAK: [OptionId; 3] = [Self::RefurbBuy, Self::RepairBattery, Self::TradeinNew];

    /// Wire identifier for this option.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RepairBattery => "repair_battery",
            Self::RefurbBuy => "refurb_buy",
            Self::TradeinNew => "tradein_new",
        }
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
