//! Storefront configuration.
//!
//! The handful of business constants the rules depend on. These were
//! hard-coded literals in earlier iterations of the storefront; they are
//! configuration here so pricing or the maturation horizon can change without
//! touching the rules that use them.

use std::time::Duration;

/// Fixed business parameters for the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Per-seedling price in currency minor units.
    pub unit_price: u32,

    /// Days from planting until a batch is presented as fully matured.
    /// Presentation only; orderability is gated by the admin readiness flag.
    pub maturation_days: i64,

    /// Species label applied when a batch is created without a name.
    pub default_batch_name: String,

    /// Upper bound on a single notification attempt. The order path never
    /// waits on this; it bounds the background task.
    pub notify_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            unit_price: 5_000,
            maturation_days: 14,
            default_batch_name: "Bibit Cabai".to_string(),
            notify_timeout: Duration::from_secs(5),
        }
    }
}

impl StoreConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// Malformed values are logged and ignored rather than failing startup.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(raw) = std::env::var("LEAFY_UNIT_PRICE") {
            match raw.parse() {
                Ok(v) => cfg.unit_price = v,
                Err(_) => tracing::warn!(value = %raw, "ignoring malformed LEAFY_UNIT_PRICE"),
            }
        }
        if let Ok(raw) = std::env::var("LEAFY_MATURATION_DAYS") {
            match raw.parse() {
                Ok(v) => cfg.maturation_days = v,
                Err(_) => tracing::warn!(value = %raw, "ignoring malformed LEAFY_MATURATION_DAYS"),
            }
        }
        if let Ok(name) = std::env::var("LEAFY_BATCH_NAME") {
            if !name.trim().is_empty() {
                cfg.default_batch_name = name;
            }
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_storefront_constants() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.unit_price, 5_000);
        assert_eq!(cfg.maturation_days, 14);
        assert_eq!(cfg.default_batch_name, "Bibit Cabai");
    }
}
