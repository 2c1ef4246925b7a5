use cardkingdom_core::config::CommandsConfig;
use tracing::{info, warn};

use crate::api::CardApi;
use crate::cards::{self, CardQuery};
use crate::command::Command;

pub const PROJECT_URL: &str = "https://github.com/cardkingdom-uy/cardkingdom-bot";

/// What the adapter should do with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Send this text to the originating channel.
    Say(String),
    /// An authorized quit: stop the bot without replying.
    Quit,
    /// Do nothing.
    Ignore,
}

/// Produce the response for an already-parsed command.
pub async fn respond<A>(command: &Command, settings: &CommandsConfig, api: &A) -> Response
where
    A: CardApi + ?Sized,
{
    match command {
        Command::ReportIdentity => Response::Say(identity()),
        Command::Help => Response::Say(help(&settings.prefix)),
        Command::Quit { token } => {
            if quit_authorized(token, settings.quit_token.as_deref()) {
                info!("quit requested with valid token");
                Response::Quit
            } else {
                warn!("quit rejected: token mismatch");
                Response::Ignore
            }
        }
        Command::Card { uuid } => {
            Response::Say(cards::query_cards(api, &CardQuery::ByUuid(uuid.clone())).await)
        }
        Command::Cards { query } => {
            Response::Say(cards::query_cards(api, &CardQuery::ByName(query.clone())).await)
        }
    }
}

/// An unset or empty secret never authorizes.
fn quit_authorized(supplied: &str, expected: Option<&str>) -> bool {
    match expected {
        Some(secret) if !secret.is_empty() => supplied == secret,
        _ => false,
    }
}

pub fn identity() -> String {
    format!(
        "_Reporting in!_ :wink: :flag_uy:\n\n**cardkingdom-bot** — {}",
        PROJECT_URL
    )
}

pub fn help(prefix: &str) -> String {
    format!(
        "**cardkingdom-bot** — Help\n\n\
         **Commands list**\n\
         _{p}bots_ — Bot reports itself\nUsage: `{p}bots`\n\n\
         _{p}help_ — Shows this message\nUsage: `{p}help`\n\n\
         _{p}quit_ — Bot quits (please use in private chat only)\nUsage: `{p}quit <token>`\n\n\
         _{p}card_ — Gets all the information of a single card\nUsage: `{p}card <unique uuid>`\n\n\
         _{p}cards_ — Gets all the cards matching the criteria\n\
         Usage: `{p}cards <card name>[&set=id][&page=number]`",
        p = prefix
    )
}
