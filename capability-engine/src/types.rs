//! Core types for the capability engine

use crate::ChargeTypes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonical form of a currency code: trimmed and uppercased.
///
/// Every insertion into and lookup against a [`CurrencySet`] goes through
/// here. Blank codes have no canonical form.
pub fn normalize_currency(code: &str) -> Option<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Case-insensitive set of currency codes
///
/// Keyed by the normalized form, so iteration yields codes in
/// case-insensitive lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CurrencySet(BTreeSet<String>);

impl CurrencySet {
    /// Create empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a code; blank codes are ignored
    pub fn insert(&mut self, code: &str) -> bool {
        match normalize_currency(code) {
            Some(normalized) => self.0.insert(normalized),
            None => false,
        }
    }

    /// Case-insensitive membership; blank codes are never members
    pub fn contains(&self, code: &str) -> bool {
        normalize_currency(code).map_or(false, |c| self.0.contains(&c))
    }

    /// Number of codes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Codes in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Codes present in both sets, sorted
    pub fn intersection(&self, other: &CurrencySet) -> Vec<String> {
        self.0.intersection(&other.0).cloned().collect()
    }

    /// All codes, sorted
    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CurrencySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = CurrencySet::new();
        for code in iter {
            set.insert(code.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for CurrencySet {
    fn from(codes: Vec<String>) -> Self {
        codes.into_iter().collect()
    }
}

impl From<CurrencySet> for Vec<String> {
    fn from(set: CurrencySet) -> Self {
        set.0.into_iter().collect()
    }
}

/// One correspondent bank's capability matrix
///
/// Immutable once built; all accessors are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankCapability {
    /// Bank identifier (BIC)
    bank_code: String,

    /// Supported currencies
    currencies: CurrencySet,

    /// Same-day value available
    same_day_transfer: bool,

    /// Accepted bearer-charge arrangements
    bearer_charge_types: ChargeTypes,
}

impl BankCapability {
    /// Create new capability record, normalizing currency codes
    pub fn new<I, S>(
        bank_code: impl Into<String>,
        currencies: I,
        same_day_transfer: bool,
        bearer_charge_types: ChargeTypes,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            bank_code: bank_code.into(),
            currencies: currencies.into_iter().collect(),
            same_day_transfer,
            bearer_charge_types,
        }
    }

    /// Bank identifier
    pub fn bank_code(&self) -> &str {
        &self.bank_code
    }

    /// Supported currencies
    pub fn currencies(&self) -> &CurrencySet {
        &self.currencies
    }

    /// Same-day flag
    pub fn same_day_transfer(&self) -> bool {
        self.same_day_transfer
    }

    /// Accepted charge arrangements
    pub fn bearer_charge_types(&self) -> ChargeTypes {
        self.bearer_charge_types
    }

    /// Check currency support (case-insensitive, blank never supported)
    pub fn supports_currency(&self, code: &str) -> bool {
        self.currencies.contains(code)
    }

    /// Check support for every code; `None` is never supported
    pub fn supports_all_currencies<S: AsRef<str>>(&self, codes: Option<&[S]>) -> bool {
        match codes {
            Some(codes) => codes.iter().all(|c| self.supports_currency(c.as_ref())),
            None => false,
        }
    }

    /// Passes unless same-day is required and not offered
    pub fn supports_same_day(&self, require: bool) -> bool {
        !require || self.same_day_transfer
    }

    /// Check full containment of `charge`
    pub fn supports_charge(&self, charge: ChargeTypes) -> bool {
        self.bearer_charge_types.supports(charge)
    }

    /// Check overlap with `charges`
    pub fn supports_any_charge(&self, charges: ChargeTypes) -> bool {
        self.bearer_charge_types.supports_any(charges)
    }
}

/// Routing constraints for an eligibility query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityQuery {
    /// Payment currency
    pub currency: String,

    /// Only same-day banks qualify
    pub require_same_day: bool,

    /// Acceptable charge arrangements (any one suffices)
    pub allowed_charges: ChargeTypes,
}

impl CapabilityQuery {
    /// Create new query
    pub fn new(currency: impl Into<String>, require_same_day: bool, allowed_charges: ChargeTypes) -> Self {
        Self {
            currency: currency.into(),
            require_same_day,
            allowed_charges,
        }
    }
}

/// Eligible bank with its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedBank {
    /// Bank record
    pub bank: BankCapability,

    /// Score assigned by the scoring strategy
    pub score: i32,
}

/// Bank with the currencies it can serve for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankCurrencies {
    /// Bank record
    pub bank: BankCapability,

    /// Currencies, sorted case-insensitively, never empty
    pub currencies: Vec<String>,
}

/// Capability snapshot of a bank for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankCapabilitySnapshot {
    /// Bank record
    pub bank: BankCapability,

    /// Same-day flag
    pub same_day_transfer: bool,

    /// Accepted charge arrangements
    pub bearer_charge_types: ChargeTypes,

    /// Currencies, sorted case-insensitively, never empty
    pub currencies: Vec<String>,
}
