use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

impl BotError {
    /// Short error code string used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            BotError::Config(_) => "CONFIG_ERROR",
            BotError::InvalidSetting { .. } => "INVALID_SETTING",
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
