//! The incentive pipeline: price the trade-in incentive package set.
//!
//! Runs over the same payload shape as assess but only reads usage signals
//! and preferences, so a client may submit an empty `device` section. The
//! seed covers both the payload and the selected option, and the draw
//! sequence below is fixed: every branch that skips a draw would shift all
//! later values, so adjustments draw unconditionally only where noted.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::contract::verify_incentive_response;
use crate::digest::stable_seed;
use crate::domain::error::{Result, ValidationError};
use crate::domain::payload::{Priority, UserPreferences};
use crate::domain::validation::{validate_payload, ValidationScope};
use crate::domain::Disclaimer;
use crate::rng::DrawStream;
use crate::score::round2;
use crate::MODEL_VERSION;

/// Non-monetary sweetener attached to a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perk {
    Donation,
    Tree,
    ExtraData,
    None,
}

/// Monetary content of one package.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PackageValue {
    pub cash_amount_try: Option<i64>,
    pub carbon_points: Option<i64>,
    pub perk: Perk,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageUi {
    pub badge: String,
    pub cta_label: String,
}

/// One priced incentive package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncentivePackage {
    pub package_id: String,
    pub title: String,
    pub description: String,
    pub value: PackageValue,
    pub ui: PackageUi,
}

/// Full incentive response. Field order matches the published contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncentiveResponse {
    pub request_id: String,
    pub model_version: String,
    pub selected_option_id: String,
    pub packages: Vec<IncentivePackage>,
    pub accept_score: f64,
    pub impact_score: f64,
    pub notes: Vec<String>,
    pub disclaimer: Disclaimer,
}

/// The subset of `signals` the incentive pipeline reads.
#[derive(Debug, Clone, Deserialize)]
struct UsageSignals {
    charge_cycles: u32,
    frame_drop_rate: f64,
    repair_history_count: u32,
}

/// Run the incentive pipeline over a raw JSON payload.
pub fn run_incentive(payload: &Value, selected_option_id: &str) -> Result<IncentiveResponse> {
    validate_payload(payload, ValidationScope::Incentive)?;
    if selected_option_id.trim().is_empty() {
        return Err(ValidationError::EmptyOptionId.into());
    }

    let signals: UsageSignals = serde_json::from_value(payload["signals"].clone())?;
    let prefs: UserPreferences = serde_json::from_value(payload["user_preferences"].clone())?;

    let budget_weight = prefs.budget_priority.weight();
    let sustainability_weight = prefs.sustainability_priority.weight();
    let sustain_bias = sustainability_weight - budget_weight;
    let sustainability_high = prefs.sustainability_priority == Priority::High;
    let heavy_usage = signals.charge_cycles >= 850
        || signals.frame_drop_rate >= 0.15
        || signals.repair_history_count >= 2;
    let wipe_anxiety = !prefs.prefers_financing && sustainability_high;

    let seed = stable_seed(&json!({
        "input_payload": payload,
        "selected_option_id": selected_option_id,
    }))?;
    let mut stream = DrawStream::from_seed(seed);

    // Base draws. Carbon-leaning users see the carbon package drawn first
    // and richer; budget-leaning users the opposite.
    let (mut cash_amount, mut carbon_points) = if sustain_bias > 0.0 {
        let carbon = stream.randint(16_000, 22_000);
        let cash = stream.randint(7_500, 12_000);
        (cash, carbon)
    } else if sustain_bias < 0.0 {
        let cash = stream.randint(13_000, 17_000);
        let carbon = stream.randint(7_000, 12_000);
        (cash, carbon)
    } else {
        let cash = stream.randint(10_000, 14_500);
        let carbon = stream.randint(11_000, 17_000);
        (cash, carbon)
    };

    let mut hybrid_cash = stream.randint(8_500, 12_000);
    let mut hybrid_carbon = stream.randint(6_000, 10_000);
    if sustain_bias > 0.0 {
        hybrid_carbon += stream.randint(400, 1_200);
        hybrid_cash -= stream.randint(300, 900);
    } else if sustain_bias < 0.0 {
        hybrid_cash += stream.randint(400, 1_200);
        hybrid_carbon -= stream.randint(300, 900);
    }
    hybrid_cash = hybrid_cash.max(7_000);
    hybrid_carbon = hybrid_carbon.max(5_000);

    if heavy_usage {
        cash_amount += stream.randint(600, 1_600);
        hybrid_cash += stream.randint(300, 800);
    }
    if sustainability_high {
        carbon_points += stream.randint(600, 1_800);
        hybrid_carbon += stream.randint(200, 800);
    }

    let cash_amount = cash_amount.clamp(7_000, 18_000);
    let carbon_points = carbon_points.clamp(6_000, 24_000);
    let hybrid_cash = hybrid_cash.clamp(7_000, 13_000);
    let hybrid_carbon = hybrid_carbon.clamp(5_000, 12_000);

    let cash_perk = if heavy_usage || prefs.prefers_financing {
        Perk::ExtraData
    } else {
        Perk::None
    };
    let carbon_perk = if sustainability_high {
        Perk::Tree
    } else {
        Perk::Donation
    };
    let hybrid_perk = if sustainability_high {
        Perk::Donation
    } else {
        Perk::None
    };

    let mut accept_score = 0.45
        + 0.22 * (budget_weight / 3.0)
        + 0.18 * (cash_amount as f64 / 17_000.0).min(1.0);
    if prefs.prefers_financing {
        accept_score += 0.07;
    }
    if heavy_usage {
        accept_score += 0.04;
    }

    let mut impact_score = 0.40
        + 0.30 * (sustainability_weight / 3.0)
        + 0.22 * (carbon_points as f64 / 22_000.0).min(1.0);
    if sustainability_high {
        impact_score += 0.05;
    }

    let mut notes = Vec::new();
    if wipe_anxiety {
        notes.push(
            "Every hand-in includes a certified data wipe with a verifiable receipt."
                .to_string(),
        );
    }
    if heavy_usage {
        notes.push(
            "Usage signals indicate heavy wear, so the cash offers are raised to keep \
             hand-in attractive."
                .to_string(),
        );
    }
    if sustainability_high {
        notes.push(
            "Carbon point offers are boosted to match the stated sustainability priority."
                .to_string(),
        );
    }
    if prefs.budget_priority == Priority::High {
        notes.push("Cash-forward packages are listed first in value for budget-focused users."
            .to_string());
    }
    if notes.is_empty() {
        notes.push("Standard incentive mix applied; no priority-specific adjustments."
            .to_string());
    }

    tracing::debug!(
        seed,
        selected_option_id,
        heavy_usage,
        sustain_bias,
        "incentive pipeline resolved"
    );

    let response = IncentiveResponse {
        request_id: format!("req_{seed:08x}_INC"),
        model_version: MODEL_VERSION.to_string(),
        selected_option_id: selected_option_id.to_string(),
        packages: vec![
            IncentivePackage {
                package_id: "cash".to_string(),
                title: "Instant Cash".to_string(),
                description: format!(
                    "{cash_amount} TRY paid out after the device is handed in."
                ),
                value: PackageValue {
                    cash_amount_try: Some(cash_amount),
                    carbon_points: None,
                    perk: cash_perk,
                },
                ui: PackageUi {
                    badge: "Fastest payout".to_string(),
                    cta_label: "Accept cash offer".to_string(),
                },
            },
            IncentivePackage {
                package_id: "carbon_points".to_string(),
                title: "Carbon Points".to_string(),
                description: format!(
                    "{carbon_points} carbon points credited to your sustainability account."
                ),
                value: PackageValue {
                    cash_amount_try: None,
                    carbon_points: Some(carbon_points),
                    perk: carbon_perk,
                },
                ui: PackageUi {
                    badge: "Greenest choice".to_string(),
                    cta_label: "Collect points".to_string(),
                },
            },
            IncentivePackage {
                package_id: "hybrid".to_string(),
                title: "Hybrid".to_string(),
                description: format!(
                    "{hybrid_cash} TRY in cash plus {hybrid_carbon} carbon points."
                ),
                value: PackageValue {
                    cash_amount_try: Some(hybrid_cash),
                    carbon_points: Some(hybrid_carbon),
                    perk: hybrid_perk,
                },
                ui: PackageUi {
                    badge: "Best of both".to_string(),
                    cta_label: "Choose hybrid".to_string(),
                },
            },
        ],
        accept_score: round2(accept_score.clamp(0.0, 1.0)),
        impact_score: round2(impact_score.clamp(0.0, 1.0)),
        notes,
        disclaimer: Disclaimer::advisory(
            "Incentive values are illustrative and confirmed at checkout; final offers \
             depend on device inspection.",
        ),
    };

    verify_incentive_response(&serde_json::to_value(&response)?)?;
    Ok(response)
}
