//! Configuration for the term bridge.
//!
//! # Configuration Presets
//!
//! - [`BridgeConfig::default()`] - every named variable is reported, any non-empty name accepted
//! - [`BridgeConfig::quiet()`] - don't-tell-me mode: `_`-prefixed variables are not reported
//! - [`BridgeConfig::strict()`] - variable names must be lexically valid
//!
//! # Examples
//!
//! ```
//! # use aingle_bridge::{BridgeConfig, NamePolicy};
//! let config = BridgeConfig::quiet();
//! assert!(config.dont_tell_me);
//!
//! let config = BridgeConfig::default().with_name_policy(NamePolicy::Lexical);
//! assert!(config.variable("foo").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::variable::{NamePolicy, Variable};

/// Environment variable toggling don't-tell-me mode (`1`/`true`/`on` or `0`/`false`/`off`).
pub const ENV_DONT_TELL_ME: &str = "AINGLE_BRIDGE_DONT_TELL_ME";

/// Environment variable selecting the name policy (`lax` or `lexical`).
pub const ENV_NAME_POLICY: &str = "AINGLE_BRIDGE_NAME_POLICY";

/// Bridge configuration.
///
/// Extraction takes the configuration as an argument. Changing it while an
/// extraction is in progress is the caller's responsibility to avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// When set, variables whose names start with `_` are left out of substitutions.
    pub dont_tell_me: bool,
    /// How explicit variable names are validated by [`BridgeConfig::variable`].
    pub name_policy: NamePolicy,
}

impl BridgeConfig {
    /// Returns a configuration with don't-tell-me mode on.
    pub fn quiet() -> Self {
        Self {
            dont_tell_me: true,
            ..Default::default()
        }
    }

    /// Returns a configuration that enforces lexical variable names.
    pub fn strict() -> Self {
        Self {
            name_policy: NamePolicy::Lexical,
            ..Default::default()
        }
    }

    /// Sets don't-tell-me mode.
    pub fn with_dont_tell_me(mut self, enabled: bool) -> Self {
        self.dont_tell_me = enabled;
        self
    }

    /// Sets the name policy.
    pub fn with_name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }

    /// Creates a variable whose name is checked against this configuration's policy.
    pub fn variable(&self, name: impl Into<String>) -> Result<Variable> {
        Variable::with_policy(name, self.name_policy)
    }

    /// Loads configuration from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Creates configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `AINGLE_BRIDGE_DONT_TELL_ME` - Enable don't-tell-me mode
    /// - `AINGLE_BRIDGE_NAME_POLICY` - `lax` or `lexical`
    ///
    /// Unset variables leave the default in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is set to a value that cannot be
    /// interpreted.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(ENV_DONT_TELL_ME) {
            config.dont_tell_me = parse_flag(ENV_DONT_TELL_ME, &value)?;
        }

        if let Ok(value) = std::env::var(ENV_NAME_POLICY) {
            config.name_policy = value.parse()?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" | "" => Ok(false),
        other => Err(Error::Config(format!("{}: expected a boolean, got '{}'", key, other))),
    }
}
