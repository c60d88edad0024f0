use crate::sources::csv::ParseOutcome;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for everything that can supply a listings dataset.
/// The bundled sample and user supplied CSV files both go through this.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Load and parse listings from the source
    async fn load(&self) -> Result<ParseOutcome>;

    /// Display name of the source, e.g. the uploaded file name
    fn source_name(&self) -> &str;
}
