//! # StayHub Configuration
//!
//! Where bookings are stored and how they are priced.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STAYHUB_STORAGE=memory                                             │
//! │     STAYHUB_TAX_RATE_BPS=1200                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/stayhub/stayhub.toml (Linux)                             │
//! │     ~/Library/Application Support/com.stayhub.stayhub/stayhub.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     file storage in the platform data dir, 18% tax, ₹299 fee           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! backend = "file"          # file | memory
//! data_dir = "/var/lib/stayhub"
//! quota_bytes = 5242880     # optional, emulates the browser's 5 MB limit
//!
//! [pricing]
//! tax_rate_bps = 1800       # 18%
//! service_fee = 299
//!
//! [display]
//! currency_symbol = "₹"
//! ```

use serde::{Deserialize, Serialize};
use stayhub_core::money::CURRENCY_SYMBOL;
use stayhub_core::pricing::{DEFAULT_SERVICE_FEE, DEFAULT_TAX_RATE_BPS};
use stayhub_core::validation::validate_tax_rate_bps;
use stayhub_core::PricingPolicy;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::storage::{FileStorage, MemoryStorage, Storage};

// =============================================================================
// Storage Backend
// =============================================================================

/// Which [`Storage`] implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One JSON file per key under `data_dir`.
    #[default]
    File,

    /// Process-local map; nothing survives a restart.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "disk" => Ok(StorageBackend::File),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(StoreError::InvalidConfig(format!(
                "Unknown storage backend: '{}'. Valid options: file, memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for file storage. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Maximum bytes across all stored values; unlimited when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Tax rate in basis points (1800 = 18%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Flat fee per booking, in whole currency units.
    #[serde(default = "default_service_fee")]
    pub service_fee: i64,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

fn default_service_fee() -> i64 {
    DEFAULT_SERVICE_FEE
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate_bps: default_tax_rate_bps(),
            service_fee: default_service_fee(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    CURRENCY_SYMBOL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete StayHub configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StayConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl StayConfig {
    /// In-memory storage with default pricing. Used by tests and previews.
    pub fn in_memory() -> Self {
        let mut config = Self::default();
        config.storage.backend = StorageBackend::Memory;
        config
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`stayhub.toml`)
    /// 3. `STAYHUB_*` environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| StoreError::io(path.display().to_string(), e))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::io(parent.display().to_string(), e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| StoreError::io(path.display().to_string(), e))?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        validate_tax_rate_bps(self.pricing.tax_rate_bps)?;

        if self.pricing.service_fee < 0 {
            return Err(StoreError::InvalidConfig(format!(
                "service_fee must not be negative, got {}",
                self.pricing.service_fee
            )));
        }

        if self.storage.quota_bytes == Some(0) {
            return Err(StoreError::InvalidConfig(
                "quota_bytes must be greater than 0".into(),
            ));
        }

        if self.display.currency_symbol.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STAYHUB_*` overrides read through `lookup`.
    ///
    /// Unparsable values are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = lookup("STAYHUB_STORAGE") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring STAYHUB_STORAGE"),
            }
        }

        if let Some(dir) = lookup("STAYHUB_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(quota) = lookup("STAYHUB_QUOTA_BYTES") {
            match quota.parse::<usize>() {
                Ok(q) => self.storage.quota_bytes = Some(q),
                Err(_) => warn!(value = %quota, "Ignoring STAYHUB_QUOTA_BYTES"),
            }
        }

        if let Some(bps) = lookup("STAYHUB_TAX_RATE_BPS") {
            match bps.parse::<u32>() {
                Ok(b) => {
                    debug!(tax_rate_bps = b, "Overriding tax rate from environment");
                    self.pricing.tax_rate_bps = b;
                }
                Err(_) => warn!(value = %bps, "Ignoring STAYHUB_TAX_RATE_BPS"),
            }
        }

        if let Some(fee) = lookup("STAYHUB_SERVICE_FEE") {
            match fee.parse::<i64>() {
                Ok(f) => self.pricing.service_fee = f,
                Err(_) => warn!(value = %fee, "Ignoring STAYHUB_SERVICE_FEE"),
            }
        }

        if let Some(symbol) = lookup("STAYHUB_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("stayhub.toml"))
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "stayhub", "stayhub")
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Directory used by file storage.
    pub fn data_dir(&self) -> StoreResult<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    StoreError::InvalidConfig("No home directory; set storage.data_dir".into())
                }),
        }
    }

    /// Pricing policy from the `[pricing]` section.
    pub fn pricing_policy(&self) -> StoreResult<PricingPolicy> {
        Ok(PricingPolicy::new(
            self.pricing.tax_rate_bps,
            self.pricing.service_fee,
        )?)
    }

    /// Builds the configured storage backend.
    pub fn build_storage(&self) -> StoreResult<Storage> {
        let storage = match self.storage.backend {
            StorageBackend::Memory => {
                let memory = match self.storage.quota_bytes {
                    Some(bytes) => MemoryStorage::with_quota(bytes),
                    None => MemoryStorage::new(),
                };
                Storage::Memory(memory)
            }
            StorageBackend::File => {
                let mut file = FileStorage::new(self.data_dir()?);
                if let Some(bytes) = self.storage.quota_bytes {
                    file = file.with_quota(bytes);
                }
                Storage::File(file)
            }
        };

        info!(backend = %self.storage.backend, "Storage backend ready");
        Ok(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::TempDir;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("file".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert_eq!("MEMORY".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = StayConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.pricing.tax_rate_bps, 1800);
        assert_eq!(config.pricing.service_fee, 299);
        assert_eq!(config.display.currency_symbol, "₹");
        assert_eq!(config.pricing_policy().unwrap(), PricingPolicy::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StayConfig::default();
        assert!(config.validate().is_ok());

        config.pricing.tax_rate_bps = 10001;
        assert!(config.validate().is_err());

        config.pricing.tax_rate_bps = 1200;
        config.pricing.service_fee = -1;
        assert!(config.validate().is_err());

        config.pricing.service_fee = 0;
        config.storage.quota_bytes = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StayConfig::default();
        config.apply_overrides(lookup(&[
            ("STAYHUB_STORAGE", "memory"),
            ("STAYHUB_QUOTA_BYTES", "4096"),
            ("STAYHUB_TAX_RATE_BPS", "1200"),
            ("STAYHUB_SERVICE_FEE", "not-a-number"),
            ("STAYHUB_CURRENCY_SYMBOL", "$"),
        ]));

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.quota_bytes, Some(4096));
        assert_eq!(config.pricing.tax_rate_bps, 1200);
        assert_eq!(config.pricing.service_fee, 299);
        assert_eq!(config.display.currency_symbol, "$");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: StayConfig = toml::from_str("[pricing]\ntax_rate_bps = 1200\n").unwrap();
        assert_eq!(config.pricing.tax_rate_bps, 1200);
        assert_eq!(config.pricing.service_fee, 299);
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new();
        let path = dir.0.join("stayhub.toml");

        let mut config = StayConfig::in_memory();
        config.pricing.service_fee = 150;
        config.storage.data_dir = Some(dir.0.join("data"));
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[storage]"));
        assert!(contents.contains("[pricing]"));

        let loaded: StayConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_build_storage() {
        let dir = TempDir::new();
        let mut config = StayConfig::default();
        config.storage.data_dir = Some(dir.0.clone());
        assert!(matches!(config.build_storage().unwrap(), Storage::File(_)));

        assert!(matches!(
            StayConfig::in_memory().build_storage().unwrap(),
            Storage::Memory(_)
        ));
    }
}
