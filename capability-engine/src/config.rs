//! Configuration for the capability engine

use crate::{
    scoring::{DefaultScorer, ScoringConfig},
    CapabilityEngine, CapabilityStore, Error, InMemoryStore, JsonFileStore, Result,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Capability engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Capability store configuration
    pub store: StoreConfig,

    /// Ranking weights
    pub scoring: ScoringConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "capability-engine".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            store: StoreConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

/// Which store backs the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Built-in sample snapshot
    Memory,

    /// JSON file
    File,
}

/// Capability store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store kind
    pub kind: StoreKind,

    /// JSON file path (required for `file`)
    pub path: Option<PathBuf>,

    /// Re-read the file on every query instead of caching
    pub reload_on_read: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::Memory,
            path: None,
            reload_on_read: false,
        }
    }
}

impl StoreConfig {
    /// Build the configured store
    pub fn build(&self) -> Result<Arc<dyn CapabilityStore>> {
        match self.kind {
            StoreKind::Memory => Ok(Arc::new(InMemoryStore::sample())),
            StoreKind::File => {
                let path = self.path.clone().ok_or_else(|| {
                    Error::InvalidArgument("file store requires a path".to_string())
                })?;
                Ok(Arc::new(JsonFileStore::with_reload(path, self.reload_on_read)))
            }
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source, defaults for anything unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup("CAPABILITY_STORE_PATH") {
            config.store.kind = StoreKind::File;
            config.store.path = Some(PathBuf::from(path));
        }

        if let Some(reload) = lookup("CAPABILITY_STORE_RELOAD") {
            config.store.reload_on_read = reload.trim().parse().map_err(|_| {
                Error::Config(format!("CAPABILITY_STORE_RELOAD must be true or false, got {}", reload))
            })?;
        }

        if let Some(bonus) = lookup("CAPABILITY_SAME_DAY_BONUS") {
            config.scoring.same_day_bonus = parse_weight("CAPABILITY_SAME_DAY_BONUS", &bonus)?;
        }

        if let Some(bonus) = lookup("CAPABILITY_SHARED_CHARGE_BONUS") {
            config.scoring.shared_charge_bonus = parse_weight("CAPABILITY_SHARED_CHARGE_BONUS", &bonus)?;
        }

        Ok(config)
    }

    /// Build an engine over the configured store and scoring weights
    pub fn build_engine(&self) -> Result<CapabilityEngine> {
        let store = self.store.build()?;
        Ok(CapabilityEngine::new(store).with_scorer(DefaultScorer::new(self.scoring)))
    }
}

fn parse_weight(key: &str, value: &str) -> Result<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} must be an integer, got {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.store.kind, StoreKind::Memory);
        assert_eq!(config.scoring, ScoringConfig::default());
        assert!(config.build_engine().unwrap().is_configured());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("CAPABILITY_STORE_PATH", "/data/banks.json"),
            ("CAPABILITY_STORE_RELOAD", "true"),
            ("CAPABILITY_SAME_DAY_BONUS", "20"),
            ("CAPABILITY_SHARED_CHARGE_BONUS", " 7 "),
        ]))
        .unwrap();

        assert_eq!(config.store.kind, StoreKind::File);
        assert_eq!(config.store.path, Some(PathBuf::from("/data/banks.json")));
        assert!(config.store.reload_on_read);
        assert_eq!(config.scoring.same_day_bonus, 20);
        assert_eq!(config.scoring.shared_charge_bonus, 7);
    }

    #[test]
    fn test_invalid_env_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("CAPABILITY_STORE_RELOAD", "sometimes")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("CAPABILITY_SAME_DAY_BONUS", "ten")])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_file_store_requires_path() {
        let store = StoreConfig {
            kind: StoreKind::File,
            path: None,
            reload_on_read: false,
        };

        assert!(matches!(store.build(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_toml_partial() {
        let config: Config = toml::from_str(
            r#"
            service_name = "capability-demo"

            [store]
            kind = "file"
            path = "banks.json"

            [scoring]
            shared_charge_bonus = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.service_name, "capability-demo");
        assert_eq!(config.store.kind, StoreKind::File);
        assert!(!config.store.reload_on_read);
        assert_eq!(config.scoring.same_day_bonus, 10);
        assert_eq!(config.scoring.shared_charge_bonus, 1);
    }

    #[test]
    fn test_from_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capability.toml");
        std::fs::write(&path, "[store\nkind = ").unwrap();

        assert!(matches!(Config::from_file(&path), Err(Error::Parse(_))));
        assert!(matches!(Config::from_file(dir.path().join("missing.toml")), Err(Error::Io(_))));
    }
}
