//! CLI configuration

use core_kernel::{CoreError, Currency, Timezone};
use serde::Deserialize;

/// Settings read from `INVOICE_*` environment variables
///
/// * `INVOICE_TIMEZONE` - IANA zone that decides "today" (default: UTC)
/// * `INVOICE_CURRENCY` - ISO code used to render rounded totals (default: USD)
/// * `INVOICE_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub timezone: String,
    pub currency: String,
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            currency: "USD".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("INVOICE"))
            .build()?
            .try_deserialize()
    }

    pub fn timezone(&self) -> Result<Timezone, CoreError> {
        Ok(self.timezone.parse::<Timezone>()?)
    }

    pub fn currency(&self) -> Result<Currency, CoreError> {
        Ok(self.currency.parse::<Currency>()?)
    }
}
