//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/meguru/config.toml` (XDG) or platform config dir
//! 2. Project config: `.meguru.toml`
//! 3. Environment variables: `MEGURU_*`
//!
//! Every setting has a default, so the binary runs without any config
//! file at all.
//!
//! # Intended Usage
//!
//! ```toml
//! [domain]
//! name = "technology"
//!
//! [layout]
//! ring_gap = 160.0
//! side_gap = 110.0
//! ```

use std::ops::Deref;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::layout::LayoutParams;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub domain: DomainConfig,
    #[serde(default)]
    pub layout: LayoutParams,
}

/// Active domain selection.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    /// Name of the built-in domain catalog to explore.
    #[serde(default = "default_domain_name")]
    pub name: String,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            name: default_domain_name(),
        }
    }
}

fn default_domain_name() -> String {
    "technology".to_string()
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        let user_config = Self::user_config_path();

        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(".meguru.toml"))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("MEGURU_").split("_"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/meguru/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("meguru").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("meguru").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_need_no_config_file() {
        let config = Config::default();
        assert_eq!(config.domain.name, "technology");
        assert!(config.layout.ring_gap > 0.0);
    }
}
