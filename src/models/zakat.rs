use serde::{Deserialize, Serialize};

use crate::error::InputError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WealthAssessment {
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub savings: f64,
    #[serde(default)]
    pub gold: f64,
    #[serde(default)]
    pub silver: f64,
    #[serde(default)]
    pub business: f64,
    #[serde(default)]
    pub investments: f64,
    #[serde(default)]
    pub debts: f64,
}

impl WealthAssessment {
    pub fn total_assets(&self) -> f64 {
        self.cash + self.savings + self.gold + self.silver + self.business + self.investments
    }

    /// Every amount must be a finite, non-negative number.
    pub fn validate(&self) -> Result<(), InputError> {
        let fields = [
            ("cash", self.cash),
            ("savings", self.savings),
            ("gold", self.gold),
            ("silver", self.silver),
            ("business", self.business),
            ("investments", self.investments),
            ("debts", self.debts),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(InputError::NegativeAmount { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZakatResult {
    pub total_assets: f64,
    pub total_debts: f64,
    pub net_wealth: f64,
    pub nisab_threshold: f64,
    pub zakat_due: f64,
    pub is_eligible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_flags_first_bad_field() {
        let ok = WealthAssessment {
            cash: 100.0,
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let bad = WealthAssessment {
            silver: -1.0,
            ..Default::default()
        };
        match bad.validate() {
            Err(InputError::NegativeAmount { field, .. }) => assert_eq!(field, "silver"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let w: WealthAssessment = serde_json::from_str(r#"{"cash": 250.5}"#).unwrap();
        assert_eq!(w.cash, 250.5);
        assert_eq!(w.debts, 0.0);
        assert_eq!(w.total_assets(), 250.5);
    }
}
