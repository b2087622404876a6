//! Recommendation card assembly.
//!
//! Cards are always emitted in the fixed order repair, refurb, trade-in,
//! regardless of which option wins. Only the trade-in card carries the
//! `open_incentive_flow` trigger.

use serde::{Deserialize, Serialize};

use crate::assess::impacts::{EstimatedImpact, ImpactSet};
use crate::assess::rul::RulEstimate;
use crate::assess::scoring::{OptionScoreSet, OptionScores};
use crate::domain::payload::{InputPayload, OptionId, Priority};

/// Note attached to every decision summary.
pub const PARETO_NOTE: &str =
    "No single option dominates on every axis; the ranking reflects the stated priorities.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardUi {
    pub cta_label: String,
    pub badge: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CardTriggers {
    pub open_incentive_flow: bool,
}

/// One lifecycle option rendered for the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationCard {
    pub option_id: OptionId,
    pub title: String,
    pub tagline: String,
    pub category: String,
    /// Ordered list of sentences, same shape as `assumptions` and
    /// `next_steps`.
    pub why_this: Vec<String>,
    pub scores: OptionScores,
    pub estimated_impacts: EstimatedImpact,
    pub assumptions: Vec<String>,
    pub next_steps: Vec<String>,
    pub ui: CardUi,
    pub triggers: CardTriggers,
}

/// Build the three cards in their fixed order.
pub fn build_cards(
    payload: &InputPayload,
    rul: &RulEstimate,
    scores: &OptionScoreSet,
    impacts: &ImpactSet,
    winner: OptionId,
) -> Vec<RecommendationCard> {
    let sustainability_high =
        payload.user_preferences.sustainability_priority == Priority::High;
    let battery = payload.signals.battery_health_percent;

    let repair_badge = if sustainability_high {
        "Lowest CO2"
    } else {
        "Lowest cost"
    };
    let refurb_badge = if winner == OptionId::RefurbBuy {
        "Top choice"
    } else {
        "Balanced"
    };

    vec![
        RecommendationCard {
            option_id: OptionId::RepairBattery,
            title: "Battery Replacement".to_string(),
            tagline: "Extend what you already own".to_string(),
            category: "repair".to_string(),
            why_this: vec![
                format!(
                    "Battery health is at {battery}%, the largest recoverable drag on \
                     remaining life."
                ),
                format!(
                    "Estimated remaining life is {}-{} months; a battery swap is the \
                     cheapest way to recover most of it.",
                    rul.rul_months_min, rul.rul_months_max
                ),
            ],
            scores: scores.repair_battery,
            estimated_impacts: impacts.repair_battery,
            assumptions: vec![
                "A genuine replacement battery is available for this model".to_string(),
                "No board-level faults are found during service intake".to_string(),
            ],
            next_steps: vec![
                "Book a service slot".to_string(),
                "Back up your data".to_string(),
                "Drop off or ship the device".to_string(),
            ],
            ui: CardUi {
                cta_label: "Schedule service".to_string(),
                badge: repair_badge.to_string(),
                icon: "battery-charging".to_string(),
            },
            triggers: CardTriggers {
                open_incentive_flow: false,
            },
        },
        RecommendationCard {
            option_id: OptionId::RefurbBuy,
            title: "Buy Refurbished".to_string(),
            tagline: "Newer hardware without the new-device footprint".to_string(),
            category: "refurb".to_string(),
            why_this: vec![
                "Certified refurbished hardware balances cost, sustainability, and \
                 performance."
                    .to_string(),
                "It absorbs heavy use better than a repaired unit of the same age."
                    .to_string(),
            ],
            scores: scores.refurb_buy,
            estimated_impacts: impacts.refurb_buy,
            assumptions: vec![
                "Certified refurbished stock is available in your region".to_string(),
                "The current device retains trade-in value".to_string(),
            ],
            next_steps: vec![
                "Compare refurbished listings".to_string(),
                "Check warranty coverage".to_string(),
                "Trade in the current device".to_string(),
            ],
            ui: CardUi {
                cta_label: "Browse refurbished".to_string(),
                badge: refurb_badge.to_string(),
                icon: "refresh-ccw".to_string(),
            },
            triggers: CardTriggers {
                open_incentive_flow: false,
            },
        },
        RecommendationCard {
            option_id: OptionId::TradeinNew,
            title: "Trade In, Go New".to_string(),
            tagline: "Maximum performance, offset by incentives".to_string(),
            category: "trade_in".to_string(),
            why_this: vec![
                "The strongest performance path across every usage profile.".to_string(),
                "The environmental cost is partly offset by returning the current \
                 device through trade-in."
                    .to_string(),
            ],
            scores: scores.tradein_new,
            estimated_impacts: impacts.tradein_new,
            assumptions: vec![
                "The trade-in valuation holds at the stated device condition".to_string(),
                "Financing is subject to eligibility".to_string(),
            ],
            next_steps: vec![
                "Get a trade-in quote".to_string(),
                "Review incentive packages".to_string(),
                "Pick a new model".to_string(),
            ],
            ui: CardUi {
                cta_label: "View incentives".to_string(),
                badge: "Max performance".to_string(),
                icon: "rocket".to_string(),
            },
            triggers: CardTriggers {
                open_incentive_flow: true,
            },
        },
    ]
}

/// Plain-language explanation of why the winning option leads.
pub fn build_rationale(
    winner: OptionId,
    payload: &InputPayload,
    rul: &RulEstimate,
    scores: &OptionScoreSet,
) -> String {
    let winner_score = scores.get(winner).overall_score;
    match winner {
        OptionId::RepairBattery => {
            let mut rationale = format!(
                "Battery replacement leads at {winner_score:.2}: battery health is \
                 {}% and remaining life without service is {}-{} months, so a low-cost \
                 service recovers the most value.",
                payload.signals.battery_health_percent,
                rul.rul_months_min,
                rul.rul_months_max
            );
            if payload.user_preferences.sustainability_priority == Priority::High
                && !payload.user_preferences.prefers_financing
            {
                rationale.push_str(
                    " Keeping the current device also avoids handing it over, which \
                     sidesteps the data-wipe step entirely.",
                );
            }
            rationale
        }
        OptionId::RefurbBuy => format!(
            "Certified refurbished leads at {winner_score:.2}: it offers the best \
             balance of cost, sustainability, and performance for this usage profile."
        ),
        OptionId::TradeinNew => format!(
            "Trade-in leads at {winner_score:.2} under the stated priorities: the \
             performance gains outweigh the higher cost and footprint."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assess::impacts::draw_impacts;
    use crate::assess::rul::estimate_rul;
    use crate::assess::scoring::score_options;
    use crate::domain::payload::{Device, Signals, UserPreferences};
    use crate::rng::DrawStream;

    fn payload(sustainability: Priority, financing: bool) -> InputPayload {
        InputPayload {
            device: Device {
                brand: "Samsung".to_string(),
                model: "Galaxy S22".to_string(),
                age_months: 31,
            },
            signals: Signals {
                battery_health_percent: 76,
                charge_cycles: 702,
                frame_drop_rate: 0.09,
                repair_history_count: 1,
            },
            user_preferences: UserPreferences {
                budget_priority: Priority::Medium,
                sustainability_priority: sustainability,
                performance_priority: Priority::Medium,
                prefers_financing: financing,
            },
        }
    }

    fn cards_for(payload: &InputPayload) -> Vec<RecommendationCard> {
        let rul = estimate_rul(payload);
        let scores = score_options(payload);
        let mut stream = DrawStream::from_seed(1);
        let impacts = draw_impacts(&mut stream);
        build_cards(payload, &rul, &scores, &impacts, scores.winner())
    }

    #[test]
    fn test_cards_fixed_order_and_trigger() {
        let cards = cards_for(&payload(Priority::High, false));
        let ids: Vec<OptionId> = cards.iter().map(|c| c.option_id).collect();
        assert_eq!(
            ids,
            vec![
                OptionId::RepairBattery,
                OptionId::RefurbBuy,
                OptionId::TradeinNew,
            ]
        );
        assert!(!cards[0].triggers.open_incentive_flow);
        assert!(!cards[1].triggers.open_incentive_flow);
        assert!(cards[2].triggers.open_incentive_flow);
    }

    #[test]
    fn test_card_text_fields_are_sentence_lists() {
        let cards = cards_for(&payload(Priority::High, false));
        for card in &cards {
            assert!(
                card.why_this.len() >= 2,
                "{} needs at least two why_this sentences",
                card.option_id
            );
            let value = serde_json::to_value(card).unwrap();
            for key in ["why_this", "assumptions", "next_steps"] {
                assert!(value[key].is_array(), "{key} must serialize as a list");
            }
        }
        assert!(cards[0].why_this[0].contains("76%"));
        assert!(cards[0].why_this[1].contains("8-16 months"));
    }

    #[test]
    fn test_repair_badge_follows_sustainability_priority() {
        let high = cards_for(&payload(Priority::High, false));
        assert_eq!(high[0].ui.badge, "Lowest CO2");

        let low = cards_for(&payload(Priority::Low, false));
        assert_eq!(low[0].ui.badge, "Lowest cost");
    }

    #[test]
    fn test_repair_rationale_mentions_battery_and_window() {
        let payload = payload(Priority::High, false);
        let rul = estimate_rul(&payload);
        let scores = score_options(&payload);
        let rationale = build_rationale(OptionId::RepairBattery, &payload, &rul, &scores);

        assert!(rationale.contains("76%"));
        assert!(rationale.contains("8-16 months"));
        assert!(rationale.contains("data-wipe"));
    }

    #[test]
    fn test_repair_rationale_omits_wipe_clause_with_financing() {
        let payload = payload(Priority::High, true);
        let rul = estimate_rul(&payload);
        let scores = score_options(&payload);
        let rationale = build_rationale(OptionId::RepairBattery, &payload, &rul, &scores);
        assert!(!rationale.contains("data-wipe"));
    }
}
