use crate::{
    wire::{ScoresResponse, WireRecord},
    FetchError, ScoreRecord,
};

/// Parses a scores endpoint body into records, preserving element order.
pub(crate) fn decode_records(body: &str) -> Result<Vec<ScoreRecord>, FetchError> {
    let response = serde_json::from_str::<ScoresResponse>(body).map_err(|err| {
        FetchError::Parse(format!(
            "invalid scores response JSON: {err}; body: {}",
            truncate(body, 200)
        ))
    })?;

    Ok(response
        .into_iter()
        .map(|WireRecord(country, score)| ScoreRecord { country, score })
        .collect())
}

/// Cuts `body` to at most `max_chars` characters for error messages.
pub(crate) fn truncate(body: &str, max_chars: usize) -> &str {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
