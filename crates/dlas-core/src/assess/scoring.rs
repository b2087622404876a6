//! Per-option scoring for the three lifecycle paths.
//!
//! Each option gets cost, sustainability, and performance components from
//! closed-form curves over two usage aggregates, then an overall score as
//! the preference-weighted blend of the UNROUNDED components. Rounding
//! happens once per published number, so the overall score is not
//! recomputable from the rounded components.

use serde::{Deserialize, Serialize};

use crate::domain::payload::{InputPayload, OptionId, UserPreferences};
use crate::score::round2;

/// Published component scores for one option.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OptionScores {
    pub cost_score: f64,
    pub sustainability_score: f64,
    pub performance_score: f64,
    pub overall_score: f64,
}

/// Preference weights normalized to sum to 1.
#[derive(Debug, Clone, Copy)]
struct PreferenceWeights {
    cost: f64,
    sustainability: f64,
    performance: f64,
}

impl PreferenceWeights {
    fn from_preferences(prefs: &UserPreferences) -> Self {
        let cost = prefs.budget_priority.weight();
        let sustainability = prefs.sustainability_priority.weight();
        let performance = prefs.performance_priority.weight();
        let total = cost + sustainability + performance;
        Self {
            cost: cost / total,
            sustainability: sustainability / total,
            performance: performance / total,
        }
    }

    fn blend(&self, cost: f64, sustainability: f64, performance: f64) -> f64 {
        cost * self.cost + sustainability * self.sustainability + performance * self.performance
    }
}

/// Scores for all three options.
#[derive(Debug, Clone, Copy)]
pub struct OptionScoreSet {
    pub repair_battery: OptionScores,
    pub refurb_buy: OptionScores,
    pub tradein_new: OptionScores,
}

impl OptionScoreSet {
    pub fn get(&self, option: OptionId) -> OptionScores {
        match option {
            OptionId::RepairBattery => self.repair_battery,
            OptionId::RefurbBuy => self.refurb_buy,
            OptionId::TradeinNew => self.tradein_new,
        }
    }

    /// The option with the highest overall score. Ties resolve in the
    /// fixed `OptionId::TIE_BREAK` order.
    pub fn winner(&self) -> OptionId {
        let mut best = OptionId::RefurbBuy;
        let mut best_score = f64::NEG_INFINITY;
        for option in OptionId::TIE_BREAK {
            let score = self.get(option).overall_score;
            if score > best_score {
                best = option;
                best_score = score;
            }
        }
        best
    }
}

/// Usage pressure in `[0, 1.2]`, averaged over cycles, frame drops, and
/// repair count against their saturation points.
pub fn heavy_usage_factor(payload: &InputPayload) -> f64 {
    let cycles = f64::from(payload.signals.charge_cycles);
    let frame_drop = payload.signals.frame_drop_rate;
    let repairs = f64::from(payload.signals.repair_history_count);
    ((cycles / 1200.0 + frame_drop / 0.4 + repairs / 4.0) / 3.0).clamp(0.0, 1.2)
}

/// Battery wear in `[0, 1]`.
pub fn battery_degradation_factor(payload: &InputPayload) -> f64 {
    let battery = f64::from(payload.signals.battery_health_percent);
    ((100.0 - battery) / 100.0).clamp(0.0, 1.0)
}

/// Score all three options for a validated payload.
pub fn score_options(payload: &InputPayload) -> OptionScoreSet {
    let weights = PreferenceWeights::from_preferences(&payload.user_preferences);
    let heavy_usage = heavy_usage_factor(payload);
    let degradation = battery_degradation_factor(payload);
    let age = f64::from(payload.device.age_months);
    let repairs = f64::from(payload.signals.repair_history_count);
    let financing_bonus = if payload.user_preferences.prefers_financing {
        0.10
    } else {
        0.0
    };

    let repair_cost = (0.90 - (age - 24.0).max(0.0) * 0.002).clamp(0.75, 0.95);
    let repair_sust = (0.90 - (repairs - 1.0).max(0.0) * 0.03).clamp(0.75, 0.95);
    let repair_perf = (0.66 - heavy_usage * 0.10 - degradation * 0.06).clamp(0.42, 0.74);

    let refurb_cost = (0.72 - heavy_usage * 0.04).clamp(0.58, 0.80);
    let refurb_sust = (0.78 - heavy_usage * 0.03).clamp(0.65, 0.85);
    let refurb_perf = (0.81 + heavy_usage * 0.07).clamp(0.70, 0.92);

    let tradein_cost = (0.48 + financing_bonus - heavy_usage * 0.02).clamp(0.35, 0.68);
    let tradein_sust = (0.58 - heavy_usage * 0.04).clamp(0.40, 0.70);
    let tradein_perf = (0.93 + heavy_usage * 0.03).clamp(0.90, 0.99);

    let publish = |cost: f64, sust: f64, perf: f64| OptionScores {
        cost_score: round2(cost),
        sustainability_score: round2(sust),
        performance_score: round2(perf),
        overall_score: round2(weights.blend(cost, sust, perf)),
    };

    OptionScoreSet {
        repair_battery: publish(repair_cost, repair_sust, repair_perf),
        refurb_buy: publish(refurb_cost, refurb_sust, refurb_perf),
        tradein_new: publish(tradein_cost, tradein_sust, tradein_perf),
    }
}
