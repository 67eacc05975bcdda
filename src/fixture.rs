use crate::ScoreRecord;

const SAMPLE: [(&str, i64); 14] = [
    ("England", 23),
    ("England", 127),
    ("Sri Lanka", 99),
    ("Sri Lanka", 99),
    ("New Zealand", 31),
    ("Sri Lanka", 101),
    ("New Zealand", 81),
    ("Pakistan", 23),
    ("Pakistan", 127),
    ("India", 3),
    ("India", 71),
    ("Australia", 31),
    ("India", 22),
    ("Pakistan", 81),
];

/// Bundled test dataset shown in "fixed dataset" mode.
pub fn sample_records() -> Vec<ScoreRecord> {
    SAMPLE
        .iter()
        .map(|&(country, score)| ScoreRecord::new(country, score))
        .collect()
}
