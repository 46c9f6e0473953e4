//! Market configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`OverstockPolicy::quantity_above`].
pub const ENV_OVERSTOCK_QUANTITY: &str = "MARKET_OVERSTOCK_QUANTITY";
/// Environment variable overriding [`OverstockPolicy::min_vendors`].
pub const ENV_OVERSTOCK_MIN_VENDORS: &str = "MARKET_OVERSTOCK_MIN_VENDORS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// When an item counts as overstocked: total quantity strictly above
/// `quantity_above` and sold by at least `min_vendors` vendors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverstockPolicy {
    pub quantity_above: i64,
    pub min_vendors: usize,
}

impl Default for OverstockPolicy {
    fn default() -> Self {
        Self {
            quantity_above: 50,
            min_vendors: 2,
        }
    }
}

impl OverstockPolicy {
    pub fn is_overstocked(&self, quantity: i64, vendor_count: usize) -> bool {
        quantity > self.quantity_above && vendor_count >= self.min_vendors
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub overstock: OverstockPolicy,
}

impl MarketConfig {
    /// Load overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides through `lookup`; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_OVERSTOCK_QUANTITY) {
            let value = parse_non_negative(ENV_OVERSTOCK_QUANTITY, &raw)?;
            config.overstock.quantity_above = value;
        }

        if let Some(raw) = lookup(ENV_OVERSTOCK_MIN_VENDORS) {
            let value = parse_non_negative(ENV_OVERSTOCK_MIN_VENDORS, &raw)?;
            config.overstock.min_vendors = usize::try_from(value).map_err(|e| ConfigError::Invalid {
                key: ENV_OVERSTOCK_MIN_VENDORS,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
        }

        tracing::debug!(
            quantity_above = config.overstock.quantity_above,
            min_vendors = config.overstock.min_vendors,
            "loaded market config"
        );
        Ok(config)
    }
}

fn parse_non_negative(key: &'static str, raw: &str) -> Result<i64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason,
    };

    let value: i64 = raw.trim().parse().map_err(|e: core::num::ParseIntError| invalid(e.to_string()))?;
    if value < 0 {
        return Err(invalid("must be >= 0".to_string()));
    }
    Ok(value)
}
