//! `cricscore` fetches cricket batting scores and aggregates them per country.
//!
//! Acquisition goes through [`FetchController::acquire`], which wraps a
//! [`ScoreSource`] with per-attempt timeouts, capped exponential backoff and
//! retry classification. The resulting records feed the pure helpers in
//! [`aggregate`]:
//! - [`average_for`]
//! - [`grouped_averages`]
//! - [`chart_series`]

pub mod aggregate;
mod cancel;
mod client;
mod controller;
mod decode;
mod error;
mod fixture;
mod options;
mod source;
mod types;
mod wire;

pub use aggregate::{average_for, chart_series, grouped_averages};
pub use cancel::CancelToken;
pub use client::{HttpSource, DEFAULT_ENDPOINT};
pub use controller::{acquire, FetchController};
pub use error::{ErrorKind, FetchError};
pub use fixture::sample_records;
pub use options::FetchConfig;
pub use source::{DataSource, ScoreSource, StaticSource};
pub use types::{ChartSeries, CountryAverage, FetchOutcome, ScoreRecord};

pub type Result<T> = std::result::Result<T, FetchError>;
