//! Correspondent capability engine for DelTran
//!
//! Answers routing eligibility questions against a set of correspondent
//! banks: which banks can carry a payment in a given currency, with or
//! without same-day value, under an acceptable bearer-charge arrangement.
//!
//! # Architecture
//!
//! - **Records**: [`BankCapability`] holds one bank's capability matrix
//! - **Stores**: [`CapabilityStore`] supplies an immutable snapshot of records
//!   ([`InMemoryStore`], [`JsonFileStore`])
//! - **Engine**: [`CapabilityEngine`] filters and projects a snapshot per query
//! - **Scoring**: [`ScoringStrategy`] ranks eligible banks, replaceable per call
//!
//! # Example
//!
//! ```no_run
//! use capability_engine::{CapabilityEngine, CapabilityQuery, ChargeTypes, InMemoryStore};
//! use std::sync::Arc;
//!
//! fn main() -> capability_engine::Result<()> {
//!     let engine = CapabilityEngine::new(Arc::new(InMemoryStore::sample()));
//!
//!     let query = CapabilityQuery::new("USD", true, ChargeTypes::SHA);
//!     for bank in engine.find_eligible_banks(&query)? {
//!         println!("{} can route USD same-day", bank.bank_code());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod charges;
pub mod config;
pub mod engine;
pub mod error;
pub mod json_store;
pub mod scoring;
pub mod store;
pub mod types;

// Re-exports
pub use charges::ChargeTypes;
pub use config::{Config, StoreConfig, StoreKind};
pub use engine::CapabilityEngine;
pub use error::{Error, Result};
pub use json_store::JsonFileStore;
pub use scoring::{DefaultScorer, ScoringConfig, ScoringStrategy};
pub use store::{CapabilityStore, InMemoryStore};
pub use types::*;
