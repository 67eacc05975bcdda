/// Error type returned by a single acquisition attempt.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Transport-level failure reported by a non-HTTP source.
    #[error("network error: {0}")]
    Network(String),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Response body is not a JSON array of `[country, score]` pairs.
    #[error("parse error: {0}")]
    Parse(String),
    /// Attempt exceeded its allotted duration and was cancelled.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
    /// Run was cancelled or superseded by a newer acquisition.
    #[error("acquisition cancelled")]
    Cancelled,
}

impl FetchError {
    /// Classifies this error for retry decisions.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(err) if err.is_timeout() => ErrorKind::Timeout,
            Self::Transport(_) | Self::Network(_) => ErrorKind::Network,
            Self::Http { status, .. } => ErrorKind::Http { status: *status },
            Self::Parse(_) => ErrorKind::Parse,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

/// Failure classification carried by [`crate::FetchOutcome::Failure`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    Timeout,
    Network,
    Http { status: u16 },
    Parse,
    Cancelled,
}

impl ErrorKind {
    /// Timeouts, network failures and 5xx responses are retried. Everything
    /// else, 4xx included, ends the run.
    pub fn is_retryable(self) -> bool {
        match self {
            Self::Timeout | Self::Network => true,
            Self::Http { status } => (500..600).contains(&status),
            Self::Parse | Self::Cancelled => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, FetchError};

    #[test]
    fn server_errors_are_retryable() {
        for status in [500, 502, 503, 504, 599] {
            assert!(ErrorKind::Http { status }.is_retryable(), "{status}");
        }
    }

    #[test]
    fn client_errors_are_terminal() {
        for status in [400, 401, 404, 408, 429, 499] {
            assert!(!ErrorKind::Http { status }.is_retryable(), "{status}");
        }
        assert!(!ErrorKind::Http { status: 302 }.is_retryable());
    }

    #[test]
    fn classification_of_variants() {
        assert_eq!(
            FetchError::Timeout { timeout_ms: 10 }.kind(),
            ErrorKind::Timeout
        );
        assert_eq!(
            FetchError::Network("refused".to_owned()).kind(),
            ErrorKind::Network
        );
        assert_eq!(
            FetchError::Parse("bad".to_owned()).kind(),
            ErrorKind::Parse
        );
        assert!(FetchError::Timeout { timeout_ms: 10 }.is_retryable());
        assert!(FetchError::Network("reset".to_owned()).is_retryable());
        assert!(!FetchError::Parse("bad".to_owned()).is_retryable());
        assert!(!FetchError::Cancelled.is_retryable());
    }

    #[test]
    fn http_error_message_contains_status() {
        let err = FetchError::Http {
            status: 404,
            body: "missing".to_owned(),
        };
        assert_eq!(err.to_string(), "http error 404: missing");
    }
}
