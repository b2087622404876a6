//! Drawn impact estimates attached to each recommendation card.
//!
//! All values come from the shared draw stream in one fixed sequence:
//! the six RUL-gain bounds first (repair, refurb, trade-in), then the six
//! environment scores in the same option order. Reordering any draw shifts
//! every later value for the same payload.

use serde::{Deserialize, Serialize};

use crate::rng::DrawStream;
use crate::score::round2;

/// Drawn impact figures for one option.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EstimatedImpact {
    pub rul_gain_months_min: i64,
    pub rul_gain_months_max: i64,
    pub co2_impact_score: f64,
    pub ewaste_reduction_score: f64,
}

/// Impacts for all three options.
#[derive(Debug, Clone, Copy)]
pub struct ImpactSet {
    pub repair_battery: EstimatedImpact,
    pub refurb_buy: EstimatedImpact,
    pub tradein_new: EstimatedImpact,
}

/// Draw the impact set. Consumes exactly 12 draws.
pub fn draw_impacts(stream: &mut DrawStream) -> ImpactSet {
    let repair_min = stream.randint(8, 12);
    let repair_max = (repair_min + stream.randint(4, 6)).min(16);
    let refurb_min = stream.randint(16, 22);
    let refurb_max = (refurb_min + stream.randint(6, 9)).min(30);
    let tradein_min = stream.randint(28, 35);
    let tradein_max = (tradein_min + stream.randint(8, 12)).min(45);

    let repair_co2 = round2(stream.uniform(0.82, 0.93));
    let repair_ewaste = round2(stream.uniform(0.80, 0.92));
    let refurb_co2 = round2(stream.uniform(0.69, 0.82));
    let refurb_ewaste = round2(stream.uniform(0.62, 0.78));
    let tradein_co2 = round2(stream.uniform(0.45, 0.62));
    let tradein_ewaste = round2(stream.uniform(0.35, 0.55));

    ImpactSet {
        repair_battery: EstimatedImpact {
            rul_gain_months_min: repair_min,
            rul_gain_months_max: repair_max,
            co2_impact_score: repair_co2,
            ewaste_reduction_score: repair_ewaste,
        },
        refurb_buy: EstimatedImpact {
            rul_gain_months_min: refurb_min,
            rul_gain_months_max: refurb_max,
            co2_impact_score: refurb_co2,
            ewaste_reduction_score: refurb_ewaste,
        },
        tradein_new: EstimatedImpact {
            rul_gain_months_min: tradein_min,
            rul_gain_months_max: tradein_max,
            co2_impact_score: tradein_co2,
            ewaste_reduction_score: tradein_ewaste,
        },
    }
}
