use std::sync::{Arc, OnceLock};

use serenity::all::ActivityData;
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::UserId;
use serenity::model::user::OnlineStatus;
use serenity::prelude::{Context, EventHandler};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use cardkingdom_commands::{handle_message, CardApi, Response};
use cardkingdom_core::config::{CommandsConfig, DiscordConfig};

use crate::send;

/// Serenity event handler wired to the command core.
pub struct DiscordHandler<A: CardApi + 'static> {
    pub api: Arc<A>,
    pub commands: CommandsConfig,
    pub config: DiscordConfig,
    pub bot_id: OnceLock<UserId>,
    /// Flipped to `true` once an authorized quit arrives.
    pub quit: watch::Sender<bool>,
}

#[async_trait]
impl<A: CardApi + 'static> EventHandler for DiscordHandler<A> {
    async fn ready(&self, ctx: Context, ready: Ready) {
        self.bot_id.set(ready.user.id).ok();

        let status = parse_online_status(&self.config.status);
        let activity = build_activity(
            self.config.activity_name.as_deref(),
            self.config.activity_type.as_deref(),
        );
        ctx.set_presence(activity, status);

        info!(name = %ready.user.name, "Discord bot connected");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if is_own_message(self.bot_id.get(), msg.author.id) {
            return;
        }

        let response = handle_message(&msg.content, &self.commands, self.api.as_ref()).await;
        if let Some(text) = dispatch(response, &self.quit, msg.author.id) {
            if let Err(e) = send::send_chunked(&ctx.http, msg.channel_id, &text).await {
                warn!(error = %e, channel = %msg.channel_id, "Discord send failed");
            }
        }
    }
}

/// Act on a response. Returns the text to send, if any.
///
/// An authorized quit flips `quit`, which the adapter watches to stop all shards.
fn dispatch(response: Response, quit: &watch::Sender<bool>, author: UserId) -> Option<String> {
    match response {
        Response::Say(text) => Some(text),
        Response::Quit => {
            info!(author = %author, "quit authorized, stopping bot");
            quit.send_replace(true);
            None
        }
        Response::Ignore => {
            debug!(author = %author, "no reply");
            None
        }
    }
}

/// True when `author` is the bot itself. Unknown until `ready` fires.
fn is_own_message(bot_id: Option<&UserId>, author: UserId) -> bool {
    bot_id.is_some_and(|id| *id == author)
}

/// Parse a config status string into serenity's `OnlineStatus`.
fn parse_online_status(s: &str) -> OnlineStatus {
    match s.to_lowercase().as_str() {
        "idle" => OnlineStatus::Idle,
        "dnd" | "do_not_disturb" => OnlineStatus::DoNotDisturb,
        "invisible" => OnlineStatus::Invisible,
        _ => OnlineStatus::Online,
    }
}

/// Build the presence activity. No name means no activity.
fn build_activity(name: Option<&str>, kind: Option<&str>) -> Option<ActivityData> {
    let name = name.filter(|n| !n.is_empty())?;
    Some(match kind.unwrap_or("playing").to_lowercase().as_str() {
        "listening" => ActivityData::listening(name),
        "watching" => ActivityData::watching(name),
        "competing" => ActivityData::competing(name),
        "custom" => ActivityData::custom(name),
        _ => ActivityData::playing(name),
    })
}
