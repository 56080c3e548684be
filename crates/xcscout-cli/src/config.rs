//! CLI configuration management.
//!
//! Everything the CLI needs beyond its arguments comes from environment
//! variables; there is no config file.

use xcscout_ops::DEFAULT_BUNDLE_COMMAND;

/// Application-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bundler executable used by scheme regeneration. Overridable for
    /// rbenv/rvm setups where `bundle` is not on PATH.
    pub bundle_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bundle_command: DEFAULT_BUNDLE_COMMAND.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Ok(command) = std::env::var("XCS_BUNDLE_COMMAND") {
            if !command.is_empty() {
                config.bundle_command = command;
            }
        }
        config
    }
}
