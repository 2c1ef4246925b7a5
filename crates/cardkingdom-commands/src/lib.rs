//! Command parsing and reply formatting for cardkingdom-bot.
//!
//! Everything in this crate is platform-agnostic: a channel adapter hands
//! [`handle_message`] the raw message text, the command settings and a
//! [`CardApi`], and gets back a [`Response`] telling it what to do.

pub mod api;
pub mod cards;
pub mod command;
pub mod error;
pub mod pips;
pub mod reply;

use cardkingdom_core::config::CommandsConfig;
use tracing::debug;

pub use api::{ApiResponse, CardApi, HttpCardApi};
pub use cards::CardQuery;
pub use command::Command;
pub use error::QueryError;
pub use reply::Response;

/// Parse `text` and produce the bot's response to it.
///
/// Text that is not a recognized command yields [`Response::Ignore`].
pub async fn handle_message<A>(text: &str, settings: &CommandsConfig, api: &A) -> Response
where
    A: CardApi + ?Sized,
{
    let Some(command) = Command::parse(text, &settings.prefix) else {
        return Response::Ignore;
    };

    debug!(command = command.kind(), "command recognized");
    reply::respond(&command, settings, api).await
}
