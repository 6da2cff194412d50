//! Bank ranking
//!
//! Scores are only used to order eligible banks; the default weights are a
//! simple preference for same-day value and shared charges.

use crate::{BankCapability, CapabilityQuery, ChargeTypes};
use serde::{Deserialize, Serialize};

/// Scores an eligible bank for a query
pub trait ScoringStrategy: Send + Sync {
    /// Higher is better
    fn score(&self, bank: &BankCapability, query: &CapabilityQuery) -> i32;
}

impl<F> ScoringStrategy for F
where
    F: Fn(&BankCapability, &CapabilityQuery) -> i32 + Send + Sync,
{
    fn score(&self, bank: &BankCapability, query: &CapabilityQuery) -> i32 {
        self(bank, query)
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Added when the query asks for same-day and the bank offers it
    pub same_day_bonus: i32,

    /// Added when the bank's acceptable charges for the query include SHA
    pub shared_charge_bonus: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            same_day_bonus: 10,
            shared_charge_bonus: 5,
        }
    }
}

/// Default scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScorer {
    config: ScoringConfig,
}

impl DefaultScorer {
    /// Create scorer with custom weights
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Scoring weights
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }
}

impl ScoringStrategy for DefaultScorer {
    fn score(&self, bank: &BankCapability, query: &CapabilityQuery) -> i32 {
        let mut score = 0;

        if bank.same_day_transfer() && query.require_same_day {
            score += self.config.same_day_bonus;
        }

        if (bank.bearer_charge_types() & query.allowed_charges).contains(ChargeTypes::SHA) {
            score += self.config.shared_charge_bonus;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(same_day: bool, charges: ChargeTypes) -> BankCapability {
        BankCapability::new("BANKAXXX", ["USD"], same_day, charges)
    }

    #[test]
    fn test_default_weights() {
        let scorer = DefaultScorer::default();
        let query = CapabilityQuery::new("USD", true, ChargeTypes::SHA | ChargeTypes::OWN);

        assert_eq!(scorer.score(&bank(true, ChargeTypes::SHA), &query), 15);
        assert_eq!(scorer.score(&bank(true, ChargeTypes::OWN), &query), 10);
        assert_eq!(scorer.score(&bank(false, ChargeTypes::SHA), &query), 5);
        assert_eq!(scorer.score(&bank(false, ChargeTypes::OWN), &query), 0);
    }

    #[test]
    fn test_same_day_bonus_needs_requirement() {
        let scorer = DefaultScorer::default();
        let query = CapabilityQuery::new("USD", false, ChargeTypes::OWN);

        assert_eq!(scorer.score(&bank(true, ChargeTypes::SHA | ChargeTypes::OWN), &query), 0);
    }

    #[test]
    fn test_custom_weights() {
        let scorer = DefaultScorer::new(ScoringConfig {
            same_day_bonus: 1,
            shared_charge_bonus: 100,
        });
        let query = CapabilityQuery::new("USD", true, ChargeTypes::SHA);

        assert_eq!(scorer.score(&bank(true, ChargeTypes::SHA), &query), 101);
    }

    #[test]
    fn test_closure_strategy() {
        let by_currency_count = |bank: &BankCapability, _: &CapabilityQuery| bank.currencies().len() as i32;
        let query = CapabilityQuery::new("USD", false, ChargeTypes::SHA);

        assert_eq!(by_currency_count.score(&bank(false, ChargeTypes::SHA), &query), 1);
    }
}
