use std::time::Duration;

const ENV_MAX_RETRIES: &str = "CRICSCORE_MAX_RETRIES";
const ENV_BASE_TIMEOUT_MS: &str = "CRICSCORE_BASE_TIMEOUT_MS";
const ENV_BACKOFF_BASE_MS: &str = "CRICSCORE_BACKOFF_BASE_MS";
const ENV_BACKOFF_CAP_MS: &str = "CRICSCORE_BACKOFF_CAP_MS";

/// Configures per-attempt timeout and retry behavior of one acquisition run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FetchConfig {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Timeout of attempt 0 in milliseconds. Attempt `n` gets `(n + 1)` times this.
    pub base_timeout_ms: u64,
    /// Base retry backoff in milliseconds (exponential strategy).
    pub backoff_base_ms: u64,
    /// Upper bound for a single backoff delay in milliseconds.
    pub backoff_cap_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_timeout_ms: 1_000,
            backoff_base_ms: 500,
            backoff_cap_ms: 5_000,
        }
    }
}

impl FetchConfig {
    /// Builds a config from environment variables.
    ///
    /// Reads:
    /// - `CRICSCORE_MAX_RETRIES`
    /// - `CRICSCORE_BASE_TIMEOUT_MS`
    /// - `CRICSCORE_BACKOFF_BASE_MS`
    /// - `CRICSCORE_BACKOFF_CAP_MS`
    ///
    /// Unset variables keep their [`Default`] value. Returns an error if a
    /// variable is set but cannot be parsed, or if the result fails
    /// [`FetchConfig::validate`].
    pub fn from_env() -> std::result::Result<Self, String> {
        let defaults = Self::default();
        let config = Self {
            max_retries: env_or(ENV_MAX_RETRIES, defaults.max_retries)?,
            base_timeout_ms: env_or(ENV_BASE_TIMEOUT_MS, defaults.base_timeout_ms)?,
            backoff_base_ms: env_or(ENV_BACKOFF_BASE_MS, defaults.backoff_base_ms)?,
            backoff_cap_ms: env_or(ENV_BACKOFF_CAP_MS, defaults.backoff_cap_ms)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that every duration field is strictly positive.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let fields = [
            ("base_timeout_ms", self.base_timeout_ms),
            ("backoff_base_ms", self.backoff_base_ms),
            ("backoff_cap_ms", self.backoff_cap_ms),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(format!("{name} must be greater than zero"));
            }
        }
        Ok(())
    }

    /// Total attempt budget of one run.
    pub fn total_attempts(&self) -> usize {
        self.max_retries.saturating_add(1)
    }

    /// Delay inserted before attempt `attempt`: `min(base * 2^attempt, cap)`.
    ///
    /// Attempt 0 runs immediately and always gets a zero delay.
    pub fn backoff_delay(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let multiplier = u32::try_from(attempt)
            .ok()
            .and_then(|exp| 1u64.checked_shl(exp))
            .unwrap_or(u64::MAX);
        let delay_ms = self
            .backoff_base_ms
            .saturating_mul(multiplier)
            .min(self.backoff_cap_ms);
        Duration::from_millis(delay_ms)
    }

    /// Timeout enforced on attempt `attempt`: `base_timeout_ms * (attempt + 1)`.
    pub fn attempt_timeout(&self, attempt: usize) -> Duration {
        let factor = u64::try_from(attempt)
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        Duration::from_millis(self.base_timeout_ms.saturating_mul(factor))
    }
}

fn env_or<T>(name: &str, default: T) -> std::result::Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(default),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|err| format!("{name} has invalid value '{raw}': {err}")),
        Err(_) => Ok(default),
    }
}
