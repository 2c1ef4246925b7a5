pub mod config;
pub mod error;

pub use config::{BotConfig, CardApiConfig, CommandsConfig, DiscordConfig};
pub use error::{BotError, Result};
