// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration.
//!
//! Everything has a default; a TOML file may override any subset and CLI flags are applied on
//! top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_NOTIFICATION_LIFETIME_MS: u64 = 3_000;
pub const DEFAULT_FADE_MS: u64 = 500;
pub const DEFAULT_ROW_STAGGER_MS: u64 = 100;
pub const DEFAULT_PROVIDER_LATENCY_MS: u64 = 500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("`{field}` must be greater than zero")]
    ZeroDuration { field: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub timings: Timings,
    pub provider: ProviderConfig,
    /// Enqueue an error notification when a fetch fails instead of only logging it.
    pub surface_fetch_errors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timings {
    pub debounce_ms: u64,
    pub notification_lifetime_ms: u64,
    pub fade_ms: u64,
    pub row_stagger_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            notification_lifetime_ms: DEFAULT_NOTIFICATION_LIFETIME_MS,
            fade_ms: DEFAULT_FADE_MS,
            row_stagger_ms: DEFAULT_ROW_STAGGER_MS,
        }
    }
}

impl Timings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_millis(self.notification_lifetime_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn row_stagger(&self) -> Duration {
        Duration::from_millis(self.row_stagger_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub latency_ms: u64,
    /// Fixed seed for the mock generator; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_PROVIDER_LATENCY_MS,
            seed: None,
        }
    }
}

impl ProviderConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Provider latency may be zero; every UI timing must not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timings = &self.timings;
        for (field, value) in [
            ("timings.debounce_ms", timings.debounce_ms),
            ("timings.notification_lifetime_ms", timings.notification_lifetime_ms),
            ("timings.fade_ms", timings.fade_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration { field });
            }
        }
        Ok(())
    }
}
