use std::fmt;

use serde::Serialize;

use crate::{ErrorKind, FetchError};

/// One (country, score) observation.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub country: String,
    pub score: i64,
}

impl ScoreRecord {
    pub fn new(country: impl Into<String>, score: i64) -> Self {
        Self {
            country: country.into(),
            score,
        }
    }
}

impl<S: Into<String>> From<(S, i64)> for ScoreRecord {
    fn from((country, score): (S, i64)) -> Self {
        Self::new(country, score)
    }
}

/// Mean score of one country, as used for chart points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CountryAverage {
    pub country: String,
    pub average: f64,
}

/// Grouped averages split into parallel label/value arrays.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Result of one acquisition run.
#[derive(Debug, PartialEq)]
pub enum FetchOutcome {
    Success {
        records: Vec<ScoreRecord>,
        /// Attempts made, the successful one included.
        attempts: usize,
    },
    Failure {
        reason: ErrorKind,
        attempts: usize,
        last_message: String,
    },
}

impl FetchOutcome {
    pub(crate) fn failure(error: &FetchError, attempts: usize) -> Self {
        Self::Failure {
            reason: error.kind(),
            attempts,
            last_message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn attempts(&self) -> usize {
        match self {
            Self::Success { attempts, .. } | Self::Failure { attempts, .. } => *attempts,
        }
    }

    /// Returns the acquired records, or `None` for a failed run.
    pub fn records(&self) -> Option<&[ScoreRecord]> {
        match self {
            Self::Success { records, .. } => Some(records),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_records(self) -> Option<Vec<ScoreRecord>> {
        match self {
            Self::Success { records, .. } => Some(records),
            Self::Failure { .. } => None,
        }
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { records, attempts } => write!(
                f,
                "loaded {} records after {attempts} attempt(s)",
                records.len()
            ),
            Self::Failure {
                attempts,
                last_message,
                ..
            } => write!(
                f,
                "failed to load data after {attempts} attempt(s): {last_message}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, FetchError, FetchOutcome, ScoreRecord};

    #[test]
    fn record_from_tuple() {
        let record: ScoreRecord = ("India", 71).into();
        assert_eq!(record, ScoreRecord::new("India", 71));
    }

    #[test]
    fn failure_carries_kind_and_message() {
        let outcome = FetchOutcome::failure(
            &FetchError::Http {
                status: 503,
                body: "busy".to_owned(),
            },
            4,
        );
        assert_eq!(
            outcome,
            FetchOutcome::Failure {
                reason: ErrorKind::Http { status: 503 },
                attempts: 4,
                last_message: "http error 503: busy".to_owned(),
            }
        );
        assert!(outcome.records().is_none());
        assert_eq!(
            outcome.to_string(),
            "failed to load data after 4 attempt(s): http error 503: busy"
        );
    }

    #[test]
    fn success_accessors() {
        let outcome = FetchOutcome::Success {
            records: vec![ScoreRecord::new("England", 23)],
            attempts: 2,
        };
        assert!(outcome.is_success());
        assert_eq!(outcome.attempts(), 2);
        assert_eq!(outcome.records().map(<[_]>::len), Some(1));
        assert_eq!(outcome.to_string(), "loaded 1 records after 2 attempt(s)");
    }
}
