pub mod spacex;

use tracing::{info, instrument};

use crate::error::Result;
use crate::types::{RawLaunch, Rocket};

/// A source of the two collections the report is built from
#[async_trait::async_trait]
pub trait LaunchSource: Send + Sync {
    /// Identifier used in logs
    fn source_name(&self) -> &'static str;

    /// Fetch the primary collection
    async fn get_launches(&self) -> Result<Vec<RawLaunch>>;

    /// Fetch the lookup collection
    async fn get_rockets(&self) -> Result<Vec<Rocket>>;
}

/// Both collections, fully materialized
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub launches: Vec<RawLaunch>,
    pub rockets: Vec<Rocket>,
}

/// Fetch launches and rockets concurrently.
///
/// Either failure aborts the whole fetch; there is no partial result.
#[instrument(skip(source), fields(source = source.source_name()))]
pub async fn fetch_all(source: &dyn LaunchSource) -> Result<SourceData> {
    let (launches, rockets) = tokio::try_join!(source.get_launches(), source.get_rockets())?;
    info!(
        "Fetched {} launches and {} rockets",
        launches.len(),
        rockets.len()
    );
    Ok(SourceData { launches, rockets })
}
