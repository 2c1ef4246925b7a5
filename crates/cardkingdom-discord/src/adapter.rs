use std::sync::{Arc, OnceLock};

use serenity::model::gateway::GatewayIntents;
use serenity::Client;
use tokio::sync::watch;
use tracing::info;

use cardkingdom_commands::CardApi;
use cardkingdom_core::config::{CommandsConfig, DiscordConfig};

use crate::error::DiscordError;
use crate::handler::DiscordHandler;

/// Discord channel adapter.
///
/// Wraps a serenity `Client` and drives the event loop until the gateway
/// stops or an authorized quit command arrives.
pub struct DiscordAdapter<A: CardApi + 'static> {
    api: Arc<A>,
    commands: CommandsConfig,
    config: DiscordConfig,
}

impl<A: CardApi + 'static> DiscordAdapter<A> {
    pub fn new(config: &DiscordConfig, commands: &CommandsConfig, api: Arc<A>) -> Self {
        Self {
            api,
            commands: commands.clone(),
            config: config.clone(),
        }
    }

    /// Connect to Discord and process messages.
    ///
    /// Returns `Ok(())` after a quit command has shut all shards down.
    pub async fn run(self) -> Result<(), DiscordError> {
        if self.config.bot_token.trim().is_empty() {
            return Err(DiscordError::NoToken);
        }

        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let (quit_tx, mut quit_rx) = watch::channel(false);

        let handler = DiscordHandler {
            api: self.api,
            commands: self.commands,
            config: self.config.clone(),
            bot_id: OnceLock::new(),
            quit: quit_tx,
        };

        let mut client = Client::builder(&self.config.bot_token, intents)
            .event_handler(handler)
            .await?;

        // Stop every shard once the handler reports an authorized quit.
        let shard_manager = Arc::clone(&client.shard_manager);
        tokio::spawn(async move {
            if quit_rx.wait_for(|quit| *quit).await.is_ok() {
                info!("Discord: shutting down shards");
                shard_manager.shutdown_all().await;
            }
        });

        info!("Discord: gateway connecting");
        client.start().await?;
        info!("Discord: gateway stopped");

        Ok(())
    }
}
