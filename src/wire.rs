use serde::Deserialize;

/// One `[country, score]` element of the scores endpoint body.
#[derive(Debug, Deserialize)]
pub struct WireRecord(pub String, pub i64);

pub type ScoresResponse = Vec<WireRecord>;
