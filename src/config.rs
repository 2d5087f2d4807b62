//! Shell configuration
//!
//! Loaded from an optional TOML file and then overridden by command-line flags.
//!
//! ```toml
//! confirm = true        # ask before drop_table / delete
//! timing = true         # print how long each command took
//! color = true
//! history_size = 1000   # in-memory line history of the REPL
//! prompt = "primdb> "
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::ShellError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Ask for confirmation before destructive commands
    pub confirm: bool,

    /// Print the execution time of every command
    pub timing: bool,

    /// Colorize headers, prompts and errors
    pub color: bool,

    /// Number of lines kept in the REPL history
    pub history_size: usize,

    pub prompt: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            confirm: true,
            timing: true,
            color: true,
            history_size: 1000,
            prompt: "primdb> ".to_string(),
        }
    }
}

impl ShellConfig {
    /// Parses a configuration document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ShellError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ShellError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShellError::Configuration(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded shell configuration from {}", path.display());
        Ok(config)
    }
}
