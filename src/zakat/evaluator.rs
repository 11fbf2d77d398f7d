use serde::{Deserialize, Serialize};

use crate::models::{WealthAssessment, ZakatResult};

fn default_gold_grams() -> f64 {
    87.48
}
fn default_gold_price() -> f64 {
    65.0
}
fn default_silver_grams() -> f64 {
    612.36
}
fn default_silver_price() -> f64 {
    0.8
}
fn default_rate() -> f64 {
    0.025
}

/// Nisab weights, per-gram prices (USD) and the zakat rate.
/// Doubles as the `[zakat]` section of config.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NisabPolicy {
    #[serde(default = "default_gold_grams")]
    pub gold_grams: f64,
    #[serde(default = "default_gold_price")]
    pub gold_price_per_gram: f64,
    #[serde(default = "default_silver_grams")]
    pub silver_grams: f64,
    #[serde(default = "default_silver_price")]
    pub silver_price_per_gram: f64,
    #[serde(default = "default_rate")]
    pub rate: f64,
}

impl Default for NisabPolicy {
    fn default() -> Self {
        Self {
            gold_grams: default_gold_grams(),
            gold_price_per_gram: default_gold_price(),
            silver_grams: default_silver_grams(),
            silver_price_per_gram: default_silver_price(),
            rate: default_rate(),
        }
    }
}

impl NisabPolicy {
    pub fn gold_nisab(&self) -> f64 {
        self.gold_grams * self.gold_price_per_gram
    }

    pub fn silver_nisab(&self) -> f64 {
        self.silver_grams * self.silver_price_per_gram
    }

    /// The lower of the two thresholds applies.
    pub fn threshold(&self) -> f64 {
        self.gold_nisab().min(self.silver_nisab())
    }
}

pub fn evaluate(wealth: &WealthAssessment, policy: &NisabPolicy) -> ZakatResult {
    let total_assets = wealth.total_assets();
    let net_wealth = total_assets - wealth.debts;
    let nisab_threshold = policy.threshold();
    let is_eligible = net_wealth >= nisab_threshold;
    let zakat_due = if is_eligible {
        net_wealth * policy.rate
    } else {
        0.0
    };

    ZakatResult {
        total_assets,
        total_debts: wealth.debts,
        net_wealth,
        nisab_threshold,
        zakat_due,
        is_eligible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_silver_nisab() {
        let p = NisabPolicy::default();
        assert!((p.gold_nisab() - 5686.2).abs() < 0.01);
        assert!((p.silver_nisab() - 489.888).abs() < 0.001);
        assert_eq!(p.threshold(), p.silver_nisab());
    }

    #[test]
    fn mixed_portfolio() {
        let wealth = WealthAssessment {
            cash: 10_000.0,
            savings: 20_000.0,
            gold: 5_000.0,
            silver: 2_000.0,
            business: 15_000.0,
            investments: 8_000.0,
            debts: 3_000.0,
        };
        let r = evaluate(&wealth, &NisabPolicy::default());
        assert_eq!(r.total_assets, 60_000.0);
        assert_eq!(r.total_debts, 3_000.0);
        assert_eq!(r.net_wealth, 57_000.0);
        assert!(r.is_eligible);
        assert!((r.zakat_due - 1425.0).abs() < 0.01);
    }

    #[test]
    fn nothing_owned_nothing_due() {
        let r = evaluate(&WealthAssessment::default(), &NisabPolicy::default());
        assert_eq!(r.total_assets, 0.0);
        assert_eq!(r.net_wealth, 0.0);
        assert!(!r.is_eligible);
        assert_eq!(r.zakat_due, 0.0);
    }

    #[test]
    fn debts_can_pull_below_nisab() {
        let wealth = WealthAssessment {
            cash: 1_000.0,
            debts: 800.0,
            ..Default::default()
        };
        let r = evaluate(&wealth, &NisabPolicy::default());
        assert_eq!(r.net_wealth, 200.0);
        assert!(!r.is_eligible);
        assert_eq!(r.zakat_due, 0.0);
    }

    #[test]
    fn threshold_is_inclusive() {
        let policy = NisabPolicy::default();
        let wealth = WealthAssessment {
            savings: policy.threshold(),
            ..Default::default()
        };
        let r = evaluate(&wealth, &policy);
        assert!(r.is_eligible);
        assert!((r.zakat_due - policy.threshold() * 0.025).abs() < 0.01);
    }

    #[test]
    fn due_matches_rule_across_amounts() {
        let policy = NisabPolicy::default();
        for step in 0..200 {
            let cash = step as f64 * 7.5;
            let r = evaluate(
                &WealthAssessment {
                    cash,
                    ..Default::default()
                },
                &policy,
            );
            if r.net_wealth < r.nisab_threshold {
                assert_eq!(r.zakat_due, 0.0);
                assert!(!r.is_eligible);
            } else {
                assert!((r.zakat_due - r.net_wealth * 0.025).abs() < 0.01);
            }
        }
    }

    #[test]
    fn custom_prices_change_threshold() {
        let policy = NisabPolicy {
            silver_price_per_gram: 1.0,
            ..Default::default()
        };
        assert!((policy.threshold() - 612.36).abs() < 1e-9);
    }
}
