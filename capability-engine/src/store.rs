//! Capability stores
//!
//! A store hands the engine an immutable snapshot of every known bank
//! record. The engine re-reads the store on every query.

use crate::{BankCapability, ChargeTypes, Result};
use std::fmt;
use std::sync::Arc;

/// Source of bank capability records
pub trait CapabilityStore: Send + Sync + fmt::Debug {
    /// All records currently known, in a stable order for this snapshot
    fn get_all(&self) -> Result<Arc<[BankCapability]>>;
}

/// Fixed in-memory snapshot
///
/// Records are copied at construction, so later changes to the caller's
/// collection are never observed.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    records: Arc<[BankCapability]>,
}

impl InMemoryStore {
    /// Create store from records
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = BankCapability>,
    {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Built-in correspondent set used by the demo and as the default store
    pub fn sample() -> Self {
        Self::new([
            BankCapability::new(
                "DEUTDEFF",
                ["EUR", "USD", "GBP", "CHF"],
                true,
                ChargeTypes::SHA | ChargeTypes::OWN,
            ),
            BankCapability::new(
                "CHASUS33",
                ["USD", "EUR", "JPY"],
                true,
                ChargeTypes::SHA | ChargeTypes::OWN | ChargeTypes::BEN,
            ),
            BankCapability::new(
                "BARCGB22",
                ["GBP", "EUR", "USD"],
                false,
                ChargeTypes::SHA | ChargeTypes::BEN,
            ),
            BankCapability::new(
                "NBADAEAA",
                ["AED", "USD", "INR"],
                true,
                ChargeTypes::OWN,
            ),
            BankCapability::new(
                "SBININBB",
                ["INR", "USD"],
                false,
                ChargeTypes::SHA,
            ),
        ])
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CapabilityStore for InMemoryStore {
    fn get_all(&self) -> Result<Arc<[BankCapability]>> {
        Ok(Arc::clone(&self.records))
    }
}
