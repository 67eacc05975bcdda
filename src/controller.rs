use std::sync::{Mutex, PoisonError};

use tokio::time::{sleep, timeout, Instant};

use crate::{CancelToken, FetchConfig, FetchError, FetchOutcome, Result, ScoreRecord, ScoreSource};

/// Runs one acquisition with a fresh [`FetchController`].
pub async fn acquire<S>(config: &FetchConfig, source: &S) -> FetchOutcome
where
    S: ScoreSource + ?Sized,
{
    FetchController::new(config.clone()).acquire(source).await
}

/// Drives the retry/backoff/timeout loop around a [`ScoreSource`].
///
/// A controller tracks its in-flight run: calling [`FetchController::acquire`]
/// again cancels the previous run, which then resolves to
/// `Failure { reason: Cancelled, .. }`.
#[derive(Debug, Default)]
pub struct FetchController {
    config: FetchConfig,
    current: Mutex<Option<CancelToken>>,
}

/// Bookkeeping for one attempt, dropped once the attempt resolves.
#[derive(Debug)]
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
struct AttemptRecord {
    index: usize,
    started_at: Instant,
    timed_out: bool,
}

impl AttemptRecord {
    fn begin(index: usize) -> Self {
        Self {
            index,
            started_at: Instant::now(),
            timed_out: false,
        }
    }
}

impl FetchController {
    pub fn new(config: FetchConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Cancels the in-flight run, if any.
    pub fn cancel(&self) {
        if let Some(token) = self.slot().take() {
            token.cancel();
        }
    }

    /// Fetches records from `source`, retrying per the controller's config.
    ///
    /// Attempt `n` is preceded by [`FetchConfig::backoff_delay`] and bounded
    /// by [`FetchConfig::attempt_timeout`]. Timeouts, network errors and 5xx
    /// responses are retried while budget remains. Any other failure ends
    /// the run at once. Failures are returned as data, never as panics.
    pub async fn acquire<S>(&self, source: &S) -> FetchOutcome
    where
        S: ScoreSource + ?Sized,
    {
        let token = self.begin_run();
        let total = self.config.total_attempts();
        let mut index = 0usize;

        let outcome = loop {
            if index > 0 {
                let delay = self.config.backoff_delay(index);

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    attempt = index,
                    delay_ms = delay.as_millis() as u64,
                    "waiting before retry {} of {}",
                    index,
                    self.config.max_retries
                );

                let cancelled = tokio::select! {
                    biased;
                    _ = token.cancelled() => true,
                    _ = sleep(delay) => false,
                };
                if cancelled {
                    break FetchOutcome::failure(&FetchError::Cancelled, index);
                }
            }

            let mut attempt = AttemptRecord::begin(index);
            let result = self.run_attempt(source, &token, &mut attempt).await;
            let attempts = index + 1;

            match result {
                Ok(records) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        attempt = attempt.index,
                        records = records.len(),
                        elapsed_ms = attempt.started_at.elapsed().as_millis() as u64,
                        "fetch attempt succeeded"
                    );

                    break FetchOutcome::Success { records, attempts };
                }
                Err(err) => {
                    let retryable = err.is_retryable();

                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        attempt = attempt.index,
                        timed_out = attempt.timed_out,
                        retryable,
                        elapsed_ms = attempt.started_at.elapsed().as_millis() as u64,
                        error = %err,
                        "fetch attempt failed"
                    );

                    if !retryable || attempts >= total {
                        break FetchOutcome::failure(&err, attempts);
                    }
                }
            }

            index += 1;
        };

        self.finish_run(&token);

        #[cfg(feature = "tracing")]
        trace_outcome(&outcome);

        outcome
    }

    async fn run_attempt<S>(
        &self,
        source: &S,
        token: &CancelToken,
        attempt: &mut AttemptRecord,
    ) -> Result<Vec<ScoreRecord>>
    where
        S: ScoreSource + ?Sized,
    {
        let limit = self.config.attempt_timeout(attempt.index);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            attempt = attempt.index,
            timeout_ms = limit.as_millis() as u64,
            "fetch attempt {} started",
            attempt.index + 1
        );

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(FetchError::Cancelled),
            result = timeout(limit, source.fetch(token)) => match result {
                Ok(result) => result,
                Err(_) => {
                    attempt.timed_out = true;
                    Err(FetchError::Timeout {
                        timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                    })
                }
            },
        }
    }

    fn begin_run(&self) -> CancelToken {
        let token = CancelToken::new();
        if let Some(previous) = self.slot().replace(token.clone()) {
            #[cfg(feature = "tracing")]
            tracing::debug!("superseding in-flight acquisition");

            previous.cancel();
        }
        token
    }

    fn finish_run(&self, token: &CancelToken) {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|current| current.same_as(token)) {
            *slot = None;
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<CancelToken>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(feature = "tracing")]
fn trace_outcome(outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Success { attempts, .. } => {
            tracing::debug!(attempts, "acquisition succeeded");
        }
        FetchOutcome::Failure {
            reason,
            attempts,
            last_message,
        } => {
            tracing::warn!(?reason, attempts, %last_message, "acquisition failed");
        }
    }
}
