//! JSON file-backed capability store
//!
//! # Format
//!
//! Either a top-level array of bank entries or an object holding them under
//! `banks`:
//!
//! ```json
//! [
//!   { "bankCode": "DEUTDEFF", "currencies": ["EUR", "usd"],
//!     "sameDayTransfer": true, "bearerChargeTypes": "SHA, OWN" },
//!   { "bank_code": "BARCGB22", "currencies": ["GBP"],
//!     "same_day_transfer": false, "bearer_charge_types": 5 }
//! ]
//! ```
//!
//! Field names match case-insensitively and ignore `_` and `-`. Unknown
//! fields are ignored. Charge types may be names, name lists or raw bits.

use crate::{BankCapability, CapabilityStore, ChargeTypes, Error, Result};
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Bank entry as it appears on disk, after key normalization
#[derive(Debug, Deserialize)]
struct RawBankCapability {
    #[serde(default)]
    bankcode: String,

    #[serde(default)]
    currencies: Vec<String>,

    #[serde(default)]
    samedaytransfer: bool,

    #[serde(default)]
    bearerchargetypes: ChargeTypes,
}

impl From<RawBankCapability> for BankCapability {
    fn from(raw: RawBankCapability) -> Self {
        BankCapability::new(
            raw.bankcode,
            raw.currencies,
            raw.samedaytransfer,
            raw.bearerchargetypes,
        )
    }
}

/// Capability store reading a JSON file
///
/// The parsed snapshot is cached until [`JsonFileStore::invalidate`] is
/// called. With reload enabled, every read parses the file again.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    reload_on_read: bool,
    cache: RwLock<Option<Arc<[BankCapability]>>>,
}

impl JsonFileStore {
    /// Create cached store for `path`; the file is read on first access
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_reload(path, false)
    }

    /// Create store, optionally re-reading the file on every access
    pub fn with_reload(path: impl Into<PathBuf>, reload_on_read: bool) -> Self {
        Self {
            path: path.into(),
            reload_on_read,
            cache: RwLock::new(None),
        }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop the cached snapshot; the next read reloads from disk
    pub fn invalidate(&self) {
        *self.cache.write() = None;
        debug!(path = %self.path.display(), "Capability cache invalidated");
    }

    fn load(&self) -> Result<Arc<[BankCapability]>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::SourceNotFound(self.path.clone()),
            _ => Error::Io(e),
        })?;

        let records = parse_capabilities(&content)?;
        info!(
            path = %self.path.display(),
            banks = records.len(),
            "Loaded bank capabilities"
        );

        Ok(records.into())
    }
}

impl CapabilityStore for JsonFileStore {
    fn get_all(&self) -> Result<Arc<[BankCapability]>> {
        if self.reload_on_read {
            return self.load();
        }

        if let Some(records) = self.cache.read().as_ref() {
            return Ok(Arc::clone(records));
        }

        let mut cache = self.cache.write();
        // Another reader may have loaded while we waited for the write lock
        if let Some(records) = cache.as_ref() {
            return Ok(Arc::clone(records));
        }

        let records = self.load()?;
        *cache = Some(Arc::clone(&records));
        Ok(records)
    }
}

/// Parse capability records from JSON text
pub fn parse_capabilities(content: &str) -> Result<Vec<BankCapability>> {
    let document: Value = serde_json::from_str(content)?;

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(map) => match normalize_keys(map).remove("banks") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(Error::Parse(
                    "expected an array of banks or an object with a `banks` array".to_string(),
                ))
            }
        },
        _ => {
            return Err(Error::Parse(
                "expected an array of banks or an object with a `banks` array".to_string(),
            ))
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(map) => {
                let raw: RawBankCapability = serde_json::from_value(Value::Object(normalize_keys(map)))
                    .map_err(|e| Error::Parse(format!("bank entry {}: {}", index, e)))?;
                Ok(raw.into())
            }
            other => Err(Error::Parse(format!(
                "bank entry {}: expected an object, found {}",
                index, other
            ))),
        })
        .collect()
}

// Lowercase and drop separators so `bankCode`, `BankCode` and `bank_code` agree
fn normalize_keys(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| {
            let key = key
                .chars()
                .filter(|c| *c != '_' && *c != '-')
                .flat_map(char::to_lowercase)
                .collect::<String>();
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_BANKS: &str = r#"[
        {"bankCode": "BANKAXXX", "currencies": ["usd", "EUR"], "sameDayTransfer": true,
         "bearerChargeTypes": "SHA, OWN", "region": "EMEA"},
        {"BANK_CODE": "BANKBXXX", "Currencies": ["GBP"], "same-day-transfer": false,
         "BearerChargeTypes": 4}
    ]"#;

    fn write_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_mixed_field_styles() {
        let records = parse_capabilities(TWO_BANKS).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].bank_code(), "BANKAXXX");
        assert!(records[0].supports_currency("USD"));
        assert!(records[0].same_day_transfer());
        assert_eq!(records[0].bearer_charge_types(), ChargeTypes::SHA | ChargeTypes::OWN);

        assert_eq!(records[1].bank_code(), "BANKBXXX");
        assert!(!records[1].same_day_transfer());
        assert_eq!(records[1].bearer_charge_types(), ChargeTypes::BEN);
    }

    #[test]
    fn test_parse_wrapped_document() {
        let records = parse_capabilities(
            r#"{"Banks": [{"bankCode": "BANKAXXX", "bearerChargeTypes": ["SHA", "BEN"]}]}"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].currencies().is_empty());
        assert!(!records[0].same_day_transfer());
        assert_eq!(records[0].bearer_charge_types(), ChargeTypes::SHA | ChargeTypes::BEN);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_capabilities("not json"), Err(Error::Parse(_))));
        assert!(matches!(parse_capabilities("42"), Err(Error::Parse(_))));
        assert!(matches!(parse_capabilities("[1, 2]"), Err(Error::Parse(_))));
        assert!(matches!(
            parse_capabilities(r#"[{"bankCode": "X", "bearerChargeTypes": "SHARED"}]"#),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let store = JsonFileStore::open("/nonexistent/capabilities.json");

        match store.get_all() {
            Err(Error::SourceNotFound(path)) => {
                assert_eq!(path, PathBuf::from("/nonexistent/capabilities.json"))
            }
            other => panic!("expected SourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_cache_until_invalidated() {
        let file = write_file(TWO_BANKS);
        let store = JsonFileStore::open(file.path());

        assert_eq!(store.get_all().unwrap().len(), 2);

        std::fs::write(file.path(), r#"[{"bankCode": "BANKCXXX"}]"#).unwrap();
        assert_eq!(store.get_all().unwrap().len(), 2);

        store.invalidate();
        let records = store.get_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bank_code(), "BANKCXXX");
    }

    #[test]
    fn test_reload_on_every_read() {
        let file = write_file(TWO_BANKS);
        let store = JsonFileStore::with_reload(file.path(), true);

        assert_eq!(store.get_all().unwrap().len(), 2);

        std::fs::write(file.path(), "[]").unwrap();
        assert!(store.get_all().unwrap().is_empty());
    }
}
