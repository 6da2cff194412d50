//! Capability matching engine
//!
//! Filters and projects the configured store's snapshot per query. The
//! engine holds one piece of mutable state, the store slot, which may be
//! replaced at any time (last writer wins). Queries clone the store handle
//! out of the slot and run lock-free against the returned snapshot.

use crate::{
    scoring::{DefaultScorer, ScoringStrategy},
    types::*,
    CapabilityStore, Error, Result,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Capability engine
pub struct CapabilityEngine {
    /// Active store
    store: RwLock<Option<Arc<dyn CapabilityStore>>>,

    /// Strategy used by [`CapabilityEngine::rank_eligible_banks`]
    scorer: Arc<dyn ScoringStrategy>,
}

impl CapabilityEngine {
    /// Create engine over `store` with the default scorer
    pub fn new(store: Arc<dyn CapabilityStore>) -> Self {
        Self {
            store: RwLock::new(Some(store)),
            scorer: Arc::new(DefaultScorer::default()),
        }
    }

    /// Create engine with no store; queries fail until one is installed
    pub fn unconfigured() -> Self {
        Self {
            store: RwLock::new(None),
            scorer: Arc::new(DefaultScorer::default()),
        }
    }

    /// Replace the ranking strategy
    pub fn with_scorer(mut self, scorer: impl ScoringStrategy + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    /// Install or replace the store
    pub fn configure(&self, store: Arc<dyn CapabilityStore>) {
        *self.store.write() = Some(store);
        debug!("Capability store installed");
    }

    /// Install or replace the store; `None` is rejected and leaves the
    /// current store in place
    pub fn set_store(&self, store: Option<Arc<dyn CapabilityStore>>) -> Result<()> {
        let store = store.ok_or_else(|| Error::InvalidArgument("store must be provided".to_string()))?;
        self.configure(store);
        Ok(())
    }

    /// Check if a store is installed
    pub fn is_configured(&self) -> bool {
        self.store.read().is_some()
    }

    fn snapshot(&self) -> Result<Arc<[BankCapability]>> {
        let store = self.store.read().clone().ok_or(Error::NotConfigured)?;
        store.get_all()
    }

    /// Banks supporting the query currency, same-day requirement and at
    /// least one allowed charge arrangement, in store order
    pub fn find_eligible_banks(&self, query: &CapabilityQuery) -> Result<Vec<BankCapability>> {
        let records = self.snapshot()?;

        let eligible: Vec<BankCapability> = records
            .iter()
            .filter(|bank| is_eligible(bank, query))
            .cloned()
            .collect();

        debug!(
            currency = %query.currency,
            scanned = records.len(),
            matched = eligible.len(),
            "Eligible banks resolved"
        );

        Ok(eligible)
    }

    /// Eligible banks scored by the engine's strategy, highest first
    pub fn rank_eligible_banks(&self, query: &CapabilityQuery) -> Result<Vec<RankedBank>> {
        self.rank_eligible_banks_with(query, self.scorer.as_ref())
    }

    /// Eligible banks scored by `scorer`, highest first; ties keep store order
    pub fn rank_eligible_banks_with<S>(&self, query: &CapabilityQuery, scorer: &S) -> Result<Vec<RankedBank>>
    where
        S: ScoringStrategy + ?Sized,
    {
        let mut ranked: Vec<RankedBank> = self
            .find_eligible_banks(query)?
            .into_iter()
            .map(|bank| {
                let score = scorer.score(&bank, query);
                RankedBank { bank, score }
            })
            .collect();

        // Stable sort
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        Ok(ranked)
    }

    /// Currencies each bank can serve under the query's same-day and charge
    /// constraints, optionally restricted to `restrict_to`.
    ///
    /// The query currency is not applied. `None` means no restriction;
    /// `Some(&[])` restricts to nothing. Banks left with no currency are
    /// dropped.
    pub fn eligible_currencies_per_bank<S: AsRef<str>>(
        &self,
        query: &CapabilityQuery,
        restrict_to: Option<&[S]>,
    ) -> Result<Vec<BankCurrencies>> {
        let projected = self.project(query, restrict_to)?;

        Ok(projected
            .into_iter()
            .map(|(bank, currencies)| BankCurrencies { bank, currencies })
            .collect())
    }

    /// Same filtering as [`CapabilityEngine::eligible_currencies_per_bank`],
    /// with the bank's same-day flag and charge arrangements alongside
    pub fn capabilities_per_bank<S: AsRef<str>>(
        &self,
        query: &CapabilityQuery,
        restrict_to: Option<&[S]>,
    ) -> Result<Vec<BankCapabilitySnapshot>> {
        let projected = self.project(query, restrict_to)?;

        Ok(projected
            .into_iter()
            .map(|(bank, currencies)| BankCapabilitySnapshot {
                same_day_transfer: bank.same_day_transfer(),
                bearer_charge_types: bank.bearer_charge_types(),
                bank,
                currencies,
            })
            .collect())
    }

    fn project<S: AsRef<str>>(
        &self,
        query: &CapabilityQuery,
        restrict_to: Option<&[S]>,
    ) -> Result<Vec<(BankCapability, Vec<String>)>> {
        let records = self.snapshot()?;
        let restriction: Option<CurrencySet> = restrict_to.map(|codes| codes.iter().collect());

        let projected: Vec<(BankCapability, Vec<String>)> = records
            .iter()
            .filter(|bank| {
                bank.supports_same_day(query.require_same_day)
                    && bank.supports_any_charge(query.allowed_charges)
            })
            .filter_map(|bank| {
                // CurrencySet iterates in case-insensitive order
                let currencies = match &restriction {
                    Some(restriction) => bank.currencies().intersection(restriction),
                    None => bank.currencies().to_sorted_vec(),
                };
                (!currencies.is_empty()).then(|| (bank.clone(), currencies))
            })
            .collect();

        debug!(
            scanned = records.len(),
            matched = projected.len(),
            restricted = restriction.is_some(),
            "Per-bank capabilities projected"
        );

        Ok(projected)
    }
}

fn is_eligible(bank: &BankCapability, query: &CapabilityQuery) -> bool {
    // Cheap bit and flag tests before the set lookup
    bank.supports_any_charge(query.allowed_charges)
        && bank.supports_same_day(query.require_same_day)
        && bank.supports_currency(&query.currency)
}

impl fmt::Debug for CapabilityEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityEngine")
            .field("store", &*self.store.read())
            .finish_non_exhaustive()
    }
}
