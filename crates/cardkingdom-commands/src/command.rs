/// A recognized bot command.
///
/// Arguments are kept verbatim: `quit`, `card` and `cards` carry everything
/// after the single space that follows the keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `bots`: the bot reports itself.
    ReportIdentity,
    /// `help`: usage for every command.
    Help,
    /// `quit <token>`: stop the bot. The token is checked when replying.
    Quit { token: String },
    /// `card <uuid>`: full details of a single card.
    Card { uuid: String },
    /// `cards <name>[&set=id][&page=number]`: search by name.
    Cards { query: String },
}

impl Command {
    /// Parse a raw chat message.
    ///
    /// Returns `None` unless `raw` starts with `prefix` followed by one of the
    /// keywords. Keywords are case-sensitive and must match exactly: `bots`
    /// and `help` take nothing after them, while `quit`, `card` and `cards`
    /// require a single space before their (possibly empty) argument, so a
    /// bare `!card` is not a command.
    pub fn parse(raw: &str, prefix: &str) -> Option<Self> {
        let rest = raw.strip_prefix(prefix)?;

        match rest {
            "bots" => return Some(Command::ReportIdentity),
            "help" => return Some(Command::Help),
            _ => {}
        }

        if let Some(arg) = argument(rest, "quit") {
            return Some(Command::Quit {
                token: arg.to_string(),
            });
        }
        if let Some(arg) = argument(rest, "card") {
            return Some(Command::Card {
                uuid: arg.to_string(),
            });
        }
        if let Some(arg) = argument(rest, "cards") {
            return Some(Command::Cards {
                query: arg.to_string(),
            });
        }

        None
    }

    /// Keyword for log lines. Never includes the argument.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::ReportIdentity => "bots",
            Command::Help => "help",
            Command::Quit { .. } => "quit",
            Command::Card { .. } => "card",
            Command::Cards { .. } => "cards",
        }
    }
}

/// Text after `keyword` and exactly one space, or `None`.
fn argument<'a>(rest: &'a str, keyword: &str) -> Option<&'a str> {
    rest.strip_prefix(keyword)?.strip_prefix(' ')
}
