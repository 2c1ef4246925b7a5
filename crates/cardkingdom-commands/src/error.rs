use thiserror::Error;

/// Failure modes of a card query.
///
/// None of these reach the chat verbatim: [`QueryError::user_message`] maps
/// each to a fixed string carrying only a short support tag.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Host unreachable, timeout, connection reset or an unusable URL.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {status}")]
    Http { status: u16 },

    /// HTTP 200 but the payload's own `status` field is not 200.
    #[error("upstream reported status {status}")]
    Application { status: i64 },

    #[error("malformed payload: {0}")]
    Decode(String),
}

impl QueryError {
    /// Support tag shown to users as `err. NNN`.
    pub fn tag(&self) -> &'static str {
        match self {
            QueryError::Transport(_) => "001",
            QueryError::Http { .. } => "002",
            QueryError::Application { .. } | QueryError::Decode(_) => "003",
        }
    }

    pub fn user_message(&self) -> String {
        format!(
            "**Unable to get data!**\nPlease try again later (err. {})",
            self.tag()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_failure_class() {
        assert_eq!(QueryError::Transport("reset".into()).tag(), "001");
        assert_eq!(QueryError::Http { status: 404 }.tag(), "002");
        assert_eq!(QueryError::Application { status: 500 }.tag(), "003");
        assert_eq!(QueryError::Decode("eof".into()).tag(), "003");
    }

    #[test]
    fn user_message_hides_detail() {
        let msg = QueryError::Transport("dns error: no such host cards.internal".into()).user_message();
        assert_eq!(msg, "**Unable to get data!**\nPlease try again later (err. 001)");
        assert!(!msg.contains("cards.internal"));
    }
}
