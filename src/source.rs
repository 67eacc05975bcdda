use std::future::Future;

use crate::{sample_records, CancelToken, HttpSource, Result, ScoreRecord};

/// Origin of score records consumed by [`crate::FetchController`].
///
/// Implementations should return promptly once `cancel` fires. The controller
/// also drops the returned future on timeout or cancellation, so sources
/// that ignore the token are still torn down.
pub trait ScoreSource {
    fn fetch(
        &self,
        cancel: &CancelToken,
    ) -> impl Future<Output = Result<Vec<ScoreRecord>>> + Send;
}

/// In-memory score list, used for the bundled fixed dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticSource {
    records: Vec<ScoreRecord>,
}

impl StaticSource {
    pub fn new<I, R>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ScoreRecord>,
    {
        Self {
            records: records.into_iter().map(Into::into).collect(),
        }
    }

    /// Source over [`sample_records`].
    pub fn sample() -> Self {
        Self {
            records: sample_records(),
        }
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }
}

impl ScoreSource for StaticSource {
    async fn fetch(&self, _cancel: &CancelToken) -> Result<Vec<ScoreRecord>> {
        Ok(self.records.clone())
    }
}

/// Selects between the fixed dataset and the live endpoint.
#[derive(Clone, Debug)]
pub enum DataSource {
    Fixed(StaticSource),
    Server(HttpSource),
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Fixed(StaticSource::sample())
    }
}

impl From<StaticSource> for DataSource {
    fn from(source: StaticSource) -> Self {
        Self::Fixed(source)
    }
}

impl From<HttpSource> for DataSource {
    fn from(source: HttpSource) -> Self {
        Self::Server(source)
    }
}

impl ScoreSource for DataSource {
    async fn fetch(&self, cancel: &CancelToken) -> Result<Vec<ScoreRecord>> {
        match self {
            Self::Fixed(source) => source.fetch(cancel).await,
            Self::Server(source) => source.fetch(cancel).await,
        }
    }
}
