use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BotError, Result};

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ACTIVITY: &str = "Magic: The Gathering";

/// Top-level config (bot.toml + CKBOT_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub commands: CommandsConfig,
    pub card_api: CardApiConfig,
    pub discord: DiscordConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// Leading text that marks a message as a bot command.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Secret accepted by the quit command. Falls back to `discord.bot_token`.
    pub quit_token: Option<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            quit_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardApiConfig {
    /// Cards endpoint, without query string.
    pub base_url: String,
    /// Attached to every request as the `token` query parameter.
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub bot_token: String,
    /// Activity text shown under the bot name. An empty string disables it.
    #[serde(default = "default_activity_name")]
    pub activity_name: Option<String>,
    /// One of `playing`, `listening`, `watching`, `competing`, `custom`.
    pub activity_type: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_activity_name() -> Option<String> {
    Some(DEFAULT_ACTIVITY.to_string())
}
fn default_status() -> String {
    "online".to_string()
}

impl BotConfig {
    /// Load config from a TOML file with CKBOT_* env var overrides.
    ///
    /// Nested keys use a double underscore, e.g. `CKBOT_CARD_API__TOKEN`.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);
        debug!(path = %path, "reading config file");

        let figment = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CKBOT_").split("__"));

        Self::from_figment(figment)
    }

    /// Extract and validate from an already-assembled figment.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let mut config: BotConfig = figment
            .extract()
            .map_err(|e| BotError::Config(e.to_string()))?;

        config.validate()?;

        if config.commands.quit_token.is_none() {
            config.commands.quit_token = Some(config.discord.bot_token.clone());
        }

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.commands.prefix.is_empty() {
            return Err(BotError::InvalidSetting {
                key: "commands.prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.discord.bot_token.trim().is_empty() {
            return Err(BotError::InvalidSetting {
                key: "discord.bot_token",
                reason: "must not be empty".to_string(),
            });
        }
        if self.card_api.base_url.trim().is_empty() {
            return Err(BotError::InvalidSetting {
                key: "card_api.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.card_api.timeout_secs == 0 {
            return Err(BotError::InvalidSetting {
                key: "card_api.timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

pub fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.cardkingdom/bot.toml", home)
}
