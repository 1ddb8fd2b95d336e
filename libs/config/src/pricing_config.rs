//! Pricing Configuration Module
//!
//! Loads quoter settings from an optional TOML file with `BANCOR__`
//! environment overrides, e.g. `BANCOR__ENGINE__FEE_MODEL=on_input` or
//! `BANCOR__LEDGER__SNAPSHOT=$HOME/ledger.json`.

use crate::defaults;
use anyhow::{Context, Result};
use bancor_amm::{FeeModel, WeightedMath};
use bancor_registry::{FeeScale, ResolverSettings};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main quoter configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PricingConfig {
    pub engine: EngineConfig,
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub fee_model: FeeModel,
}

/// Where reserves come from and how their fees are stored
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LedgerConfig {
    pub snapshot: PathBuf,
    pub legacy_fee_scale: FeeScale,
    pub multi_fee_scale: FeeScale,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `bancor_registry=debug`
    pub level: String,
    pub json: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from(defaults::ledger::SNAPSHOT_PATH),
            legacy_fee_scale: FeeScale::Ppm,
            multi_fee_scale: FeeScale::Ppm,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::logging::LEVEL.to_string(),
            json: false,
        }
    }
}

impl LedgerConfig {
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            legacy_fee_scale: self.legacy_fee_scale,
            multi_fee_scale: self.multi_fee_scale,
        }
    }
}

impl PricingConfig {
    /// Load configuration from a file with environment overrides
    ///
    /// An explicit `path` must exist; without one the default location is
    /// read if present and built-in defaults apply otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(
            path,
            Environment::with_prefix(defaults::ENV_PREFIX)
                .separator(defaults::ENV_SEPARATOR)
                .try_parsing(true),
        )
    }

    fn load_with(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let file = match path {
            Some(path) => {
                info!("Loading pricing config: {:?}", path);
                File::from(path).required(true)
            }
            None => File::with_name(defaults::CONFIG_PATH).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        debug!(?config, "pricing config loaded");
        Ok(config)
    }

    /// Expand environment variables and `~` in path values
    pub fn expand_env_vars(&mut self) -> Result<()> {
        let raw = self
            .ledger
            .snapshot
            .to_str()
            .context("Snapshot path is not valid UTF-8")?;
        let expanded = shellexpand::full(raw).context("Failed to expand snapshot path")?;
        self.ledger.snapshot = PathBuf::from(expanded.into_owned());
        Ok(())
    }

    pub fn math(&self) -> WeightedMath {
        WeightedMath::new(self.engine.fee_model)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Convenience function to load configuration with expanded paths
pub fn load_config(path: Option<&Path>) -> Result<PricingConfig> {
    let mut config = PricingConfig::load(path)?;
    config.expand_env_vars()?;
    Ok(config)
}
