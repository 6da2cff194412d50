//! Capability engine demo binary
//!
//! Usage: `capability-demo [CONFIG.toml]`. Without a config file the
//! environment is used (`CAPABILITY_STORE_PATH`, ...).

use anyhow::Context;
use capability_engine::{CapabilityQuery, ChargeTypes, Config};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(&path).with_context(|| format!("loading config {}", path))?,
        None => Config::from_env().context("loading config from environment")?,
    };

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        store = ?config.store.kind,
        "Starting capability demo"
    );

    let engine = config.build_engine().context("building capability engine")?;

    let same_day_usd = CapabilityQuery::new("USD", true, ChargeTypes::SHA);
    let any_eur = CapabilityQuery::new("eur", false, ChargeTypes::SHA | ChargeTypes::OWN);
    let beneficiary_pays = CapabilityQuery::new("USD", false, ChargeTypes::BEN);

    let eligible = engine.find_eligible_banks(&same_day_usd)?;
    print_section("Same-day USD, shared charges", &eligible)?;

    let eligible = engine.find_eligible_banks(&any_eur)?;
    print_section("EUR, shared or payer charges", &eligible)?;

    let ranked = engine.rank_eligible_banks(&any_eur)?;
    print_section("EUR ranked", &ranked)?;

    let currencies = engine.eligible_currencies_per_bank(&beneficiary_pays, None::<&[&str]>)?;
    print_section("Currencies per bank, beneficiary charges", &currencies)?;

    let capabilities = engine.capabilities_per_bank(&any_eur, Some(&["EUR", "GBP"][..]))?;
    print_section("EUR/GBP capabilities per bank", &capabilities)?;

    Ok(())
}

fn print_section<T: serde::Serialize>(title: &str, value: &T) -> anyhow::Result<()> {
    println!("== {}", title);
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
