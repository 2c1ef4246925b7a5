use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use cardkingdom_commands::HttpCardApi;
use cardkingdom_core::config::{default_config_path, BotConfig};
use cardkingdom_discord::DiscordAdapter;

/// Discord bot answering card price queries.
#[derive(Debug, Parser)]
#[command(name = "cardkingdom-bot", version)]
struct Args {
    /// Config file. Falls back to $CKBOT_CONFIG, then ~/.cardkingdom/bot.toml.
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cardkingdom_bot=info,cardkingdom_discord=info,cardkingdom_commands=info".into()
            }),
        )
        .init();

    info!("cardkingdom-bot - discord");
    info!("Contribute on https://github.com/cardkingdom-uy/cardkingdom-bot");

    // explicit flag > CKBOT_CONFIG env > ~/.cardkingdom/bot.toml
    let args = Args::parse();
    let config_path = args
        .config
        .or_else(|| std::env::var("CKBOT_CONFIG").ok())
        .unwrap_or_else(default_config_path);
    info!(path = %config_path, "loading config");

    let config = BotConfig::load(Some(config_path.as_str()))
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))?;

    let api = HttpCardApi::new(&config.card_api).context("building card API client")?;
    let adapter = DiscordAdapter::new(&config.discord, &config.commands, Arc::new(api));

    adapter.run().await?;

    info!("cardkingdom-bot stopped");
    Ok(())
}
