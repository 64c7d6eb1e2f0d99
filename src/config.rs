use std::collections::HashMap;
use std::env;
use std::fs;

use crate::clients::coindar_client::DEFAULT_BASE_URL;
use crate::error::ConfigError;
use crate::service::command::DEFAULT_PREFIX;

/// `KEY=VALUE` pairs from an optional config file; lookups fall back to the
/// process environment.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
    skip_env: bool,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self {
            values,
            skip_env: false,
        })
    }

    /// Stops lookups from falling back to the process environment.
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| (!self.skip_env).then(|| env::var(key).ok()).flatten())
            .filter(|value| !value.trim().is_empty())
    }

    fn require(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Bot,
    Cli,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub coindar_token: String,
    pub coindar_base_url: String,
    pub command_prefix: String,
    pub run_mode: RunMode,
}

impl Settings {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let run_mode = match config.get("RUN_MODE").as_deref() {
            None | Some("bot") => RunMode::Bot,
            Some("cli") => RunMode::Cli,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "RUN_MODE",
                    value: other.to_string(),
                });
            }
        };
        // The CLI never connects to Discord, so only the bot needs its token.
        let discord_token = match run_mode {
            RunMode::Bot => config.require("DISCORD_TOKEN")?,
            RunMode::Cli => config.get("DISCORD_TOKEN").unwrap_or_default(),
        };

        Ok(Self {
            discord_token,
            coindar_token: config.require("COINDAR_TOKEN")?,
            coindar_base_url: config
                .get("COINDAR_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            command_prefix: config
                .get("COMMAND_PREFIX")
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            run_mode,
        })
    }
}
