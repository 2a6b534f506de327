//! # rawmem Configuration
//!
//! Hierarchical configuration for the process-wide pieces of `rawmem-core`:
//! which allocator is installed, whether it keeps statistics, which compare
//! strategy is used and the default log level.
//!
//! Nothing in `rawmem-core` reads configuration on its own. A host loads a
//! [`RawmemConfig`] once at startup and calls [`RawmemConfig::apply`].

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use rawmem_core::alloc::{AllocHooks, AllocStats, Allocator};
use rawmem_core::compare;
use rawmem_core::AllocError;

mod error;
mod memory;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use memory::{AllocatorConfig, CompareConfig};
pub use telemetry::TelemetryConfig;
pub use validation::validate_log_level;

const BASE_FILE: &str = "config/rawmem.yaml";
const ENV_PREFIX: &str = "RAWMEM_";

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq)]
pub struct RawmemConfig {
    /// Process-wide allocator settings.
    #[serde(default)]
    #[validate(nested)]
    pub allocator: AllocatorConfig,

    /// Buffer compare settings.
    #[serde(default)]
    #[validate(nested)]
    pub compare: CompareConfig,

    /// Logging settings.
    #[serde(default)]
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl RawmemConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default Values
    /// 2. `config/rawmem.yaml` - Base settings. If missing, defaults are used.
    /// 3. `config/<RAWMEM_ENV>.yaml` - Environment-specific overrides.
    /// 4. `RAWMEM_*` environment variables, `__` separating nested keys.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(RawmemConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        } else {
            debug!("{BASE_FILE} not found, using default configuration");
        }

        let env = std::env::var("RAWMEM_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load configuration from a specific path, then environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Self::extract(
            Figment::from(Serialized::defaults(RawmemConfig::default()))
                .merge(Yaml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Applies the settings to the process: forces the compare strategy, if
    /// one is configured, and installs a platform-heap allocator as the
    /// process-wide allocator.
    ///
    /// Returns the installed allocator. Fails without changing anything if
    /// either was already fixed to something else. Meant to be called once at
    /// startup; concurrent callers can still race each other.
    pub fn apply(&self) -> Result<Allocator, ConfigError> {
        self.install(Allocator::platform())
    }

    /// Like [`apply`](Self::apply), routing the installed allocator through
    /// `hooks`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Allocator::with_hooks`].
    #[allow(unsafe_code)]
    pub unsafe fn apply_with_hooks(&self, hooks: AllocHooks) -> Result<Allocator, ConfigError> {
        self.install(Allocator::with_hooks(hooks))
    }

    fn install(&self, mut allocator: Allocator) -> Result<Allocator, ConfigError> {
        // Both checks run before anything is fixed, so a failed apply leaves
        // the process untouched.
        if let Some(strategy) = self.compare.strategy {
            compare::can_force(strategy)?;
        }
        if Allocator::is_global_set() {
            return Err(AllocError::AlreadyInstalled.into());
        }

        if self.allocator.track_stats {
            allocator = allocator.with_stats(Arc::new(AllocStats::default()));
        }
        Allocator::install_global(allocator.clone())?;
        if let Some(strategy) = self.compare.strategy {
            compare::force_strategy(strategy)?;
        }
        info!(
            strategy = %compare::active_strategy(),
            track_stats = self.allocator.track_stats,
            "rawmem configuration applied"
        );
        Ok(allocator)
    }
}
