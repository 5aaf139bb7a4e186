//! # Shop Configuration
//!
//! Store, currency, tax, payment, and display settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPFRONT_STORE_NAME="Corner Mart"                                 │
//! │     SHOPFRONT_TAX_RATE=18                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shopfront/shopfront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.shopfront.register/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     "Shopfront Demo Store", INR, 18% tax                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shopfront.toml
//! [store]
//! name = "Corner Mart"
//! address = ["14 MG Road", "Bengaluru 560001"]
//!
//! [currency]
//! code = "INR"
//! symbol = "₹"
//! decimals = 2
//!
//! [tax]
//! rate_bps = 1800
//!
//! [payment]
//! delay_ms = 1500
//! description = "Purchase at Corner Mart"
//!
//! [ui]
//! page_size = 12
//! quick_search_limit = 8
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopfront_core::validation::validate_tax_rate_bps;
use shopfront_core::{Money, TaxRate};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "shopfront.toml";

// =============================================================================
// Sections
// =============================================================================

/// Store identity, printed on receipts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Address lines for receipts.
    #[serde(default)]
    pub address: Vec<String>,
}

fn default_store_name() -> String {
    "Shopfront Demo Store".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            address: Vec::new(),
        }
    }
}

/// Currency used for prices and payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// ISO 4217 code sent to the payment widget.
    #[serde(default = "default_currency_code")]
    pub code: String,

    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    /// Minor-unit digits (2 for paise/cents).
    #[serde(default = "default_currency_decimals")]
    pub decimals: u8,
}

fn default_currency_code() -> String {
    "INR".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

/// Largest minor-unit precision the register accepts.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            decimals: default_currency_decimals(),
        }
    }
}

/// Flat sales tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// Basis points; 1800 = 18%.
    #[serde(default = "default_tax_rate_bps")]
    pub rate_bps: u32,
}

fn default_tax_rate_bps() -> u32 {
    shopfront_core::DEFAULT_TAX_RATE.bps()
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings {
            rate_bps: default_tax_rate_bps(),
        }
    }
}

/// Payment widget settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// Simulated processing delay before the widget opens.
    #[serde(default = "default_payment_delay_ms")]
    pub delay_ms: u64,

    /// Merchant name shown in the widget. Falls back to the store name.
    #[serde(default)]
    pub merchant_name: Option<String>,

    /// Description line shown in the widget.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_payment_delay_ms() -> u64 {
    1500
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            delay_ms: default_payment_delay_ms(),
            merchant_name: None,
            description: None,
        }
    }
}

/// List and search sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_quick_search_limit")]
    pub quick_search_limit: usize,
}

fn default_page_size() -> usize {
    12
}

fn default_quick_search_limit() -> usize {
    8
}

impl Default for UiSettings {
    fn default() -> Self {
        UiSettings {
            page_size: default_page_size(),
            quick_search_limit: default_quick_search_limit(),
        }
    }
}

// =============================================================================
// Shop Config
// =============================================================================

/// Complete Shopfront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub tax: TaxSettings,

    #[serde(default)]
    pub payment: PaymentSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl ShopConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (shopfront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading shop config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load shop config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoPath)?;

        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(io_err)?;

        info!(?path, "Shop config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_tax_rate_bps(self.tax.rate_bps)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.ui.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be greater than 0".into(),
            ));
        }

        if self.currency.code.trim().is_empty() {
            return Err(ConfigError::Invalid("currency code must not be empty".into()));
        }

        if self.currency.decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "currency decimals must be at most {}",
                MAX_CURRENCY_DECIMALS
            )));
        }

        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store name must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `SHOPFRONT_*` overrides looked up through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("SHOPFRONT_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(rate) = lookup("SHOPFRONT_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct >= 0.0 => {
                    self.tax.rate_bps = TaxRate::from_percentage(pct).bps();
                    debug!(rate_bps = self.tax.rate_bps, "Overriding tax rate from environment");
                }
                _ => warn!(rate = %rate, "Ignoring invalid SHOPFRONT_TAX_RATE"),
            }
        }

        if let Some(code) = lookup("SHOPFRONT_CURRENCY") {
            self.currency.code = code.trim().to_uppercase();
        }

        if let Some(symbol) = lookup("SHOPFRONT_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(size) = lookup("SHOPFRONT_PAGE_SIZE") {
            match size.trim().parse::<usize>() {
                Ok(size) => self.ui.page_size = size,
                Err(_) => warn!(page_size = %size, "Ignoring invalid SHOPFRONT_PAGE_SIZE"),
            }
        }

        if let Some(delay) = lookup("SHOPFRONT_PAYMENT_DELAY_MS") {
            match delay.trim().parse::<u64>() {
                Ok(ms) => self.payment.delay_ms = ms,
                Err(_) => warn!(delay = %delay, "Ignoring invalid SHOPFRONT_PAYMENT_DELAY_MS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "register")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax.rate_bps)
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment.delay_ms)
    }

    /// Merchant name for the payment widget.
    pub fn merchant_name(&self) -> &str {
        self.payment
            .merchant_name
            .as_deref()
            .unwrap_or(&self.store.name)
    }

    /// Description for the payment widget.
    pub fn payment_description(&self) -> String {
        self.payment
            .description
            .clone()
            .unwrap_or_else(|| format!("Purchase at {}", self.store.name))
    }

    /// Formats an amount with the configured symbol and decimals.
    ///
    /// ```rust
    /// use shopfront_core::Money;
    /// use shopfront_ui::config::ShopConfig;
    ///
    /// let config = ShopConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(11800)), "₹118.00");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency.symbol, self.currency.decimals)
    }

    /// Tax label such as `"Tax (18%)"`.
    pub fn tax_label(&self) -> String {
        format!("Tax ({}%)", self.tax_rate().percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.store.name, "Shopfront Demo Store");
        assert_eq!(config.currency.code, "INR");
        assert_eq!(config.tax_rate().bps(), 1800);
        assert_eq!(config.ui.page_size, 12);
        assert_eq!(config.ui.quick_search_limit, 8);
        assert_eq!(config.payment_delay(), Duration::from_millis(1500));
        assert_eq!(config.merchant_name(), "Shopfront Demo Store");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_money() {
        let mut config = ShopConfig::default();
        assert_eq!(config.format_money(Money::from_cents(1234)), "₹12.34");
        assert_eq!(config.format_money(Money::from_cents(-1234)), "-₹12.34");

        config.currency.symbol = "$".to_string();
        assert_eq!(config.format_money(Money::from_cents(123456789)), "$1234567.89");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ShopConfig::default();
        config.apply_overrides(env(&[
            ("SHOPFRONT_STORE_NAME", "Corner Mart"),
            ("SHOPFRONT_TAX_RATE", "5"),
            ("SHOPFRONT_CURRENCY", "usd"),
            ("SHOPFRONT_CURRENCY_SYMBOL", "$"),
            ("SHOPFRONT_PAGE_SIZE", "24"),
            ("SHOPFRONT_PAYMENT_DELAY_MS", "0"),
        ]));

        assert_eq!(config.store.name, "Corner Mart");
        assert_eq!(config.tax.rate_bps, 500);
        assert_eq!(config.currency.code, "USD");
        assert_eq!(config.currency.symbol, "$");
        assert_eq!(config.ui.page_size, 24);
        assert_eq!(config.payment.delay_ms, 0);
        assert_eq!(config.merchant_name(), "Corner Mart");
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = ShopConfig::default();
        config.apply_overrides(env(&[
            ("SHOPFRONT_TAX_RATE", "eighteen"),
            ("SHOPFRONT_PAGE_SIZE", "-3"),
        ]));
        assert_eq!(config.tax.rate_bps, 1800);
        assert_eq!(config.ui.page_size, 12);
    }

    #[test]
    fn test_validation() {
        let mut config = ShopConfig::default();
        config.tax.rate_bps = 10001;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ShopConfig::default();
        config.ui.page_size = 0;
        assert!(config.validate().is_err());

        let mut config = ShopConfig::default();
        config.currency.code = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_currency_decimals_bounded() {
        let mut config = ShopConfig::default();
        config.currency.decimals = MAX_CURRENCY_DECIMALS;
        assert!(config.validate().is_ok());

        config.currency.decimals = 19;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("decimals"));

        let parsed: ShopConfig = toml::from_str("[currency]\ndecimals = 5\n").unwrap();
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ShopConfig = toml::from_str(
            r#"
            [store]
            name = "Corner Mart"

            [tax]
            rate_bps = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.store.name, "Corner Mart");
        assert_eq!(config.tax_rate().bps(), 500);
        assert_eq!(config.currency.symbol, "₹");
        assert_eq!(config.ui.page_size, 12);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("shopfront-{}", uuid::Uuid::new_v4()))
            .join(CONFIG_FILE);

        let mut config = ShopConfig::default();
        config.store.name = "Corner Mart".to_string();
        config.payment.delay_ms = 250;
        config.save(Some(path.clone())).unwrap();

        let loaded = ShopConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
