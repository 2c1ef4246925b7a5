/// Maximum bytes per Discord message (2000 characters is the limit; we use 1950 for safety).
const CHUNK_MAX: usize = 1950;

/// Split `text` into chunks of at most [`CHUNK_MAX`] bytes, preferring
/// newline then space boundaries. The separator a chunk was split on is
/// dropped. Never splits inside a UTF-8 character.
pub fn split_chunks(text: &str) -> Vec<String> {
    if text.len() <= CHUNK_MAX {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while remaining.len() > CHUNK_MAX {
        let mut end = CHUNK_MAX;
        while !remaining.is_char_boundary(end) {
            end -= 1;
        }

        let window = &remaining[..end];
        match window.rfind('\n').or_else(|| window.rfind(' ')) {
            // Drop only the separator; leading indentation of the next chunk stays.
            Some(i) if i > 0 => {
                chunks.push(remaining[..i].to_string());
                remaining = &remaining[i + 1..];
            }
            _ => {
                chunks.push(remaining[..end].to_string());
                remaining = &remaining[end..];
            }
        }
    }

    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }

    chunks
}

/// Send `text` to `channel_id` in ≤1950-byte chunks.
pub async fn send_chunked(
    http: &serenity::http::Http,
    channel_id: serenity::model::id::ChannelId,
    text: &str,
) -> Result<(), serenity::Error> {
    for chunk in split_chunks(text) {
        channel_id.say(http, &chunk).await?;
    }
    Ok(())
}
