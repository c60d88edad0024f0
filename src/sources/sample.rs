use crate::sources::csv::{parse_csv, ParseOutcome};
use crate::sources::traits::ListingSource;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Bundled NYC listings used until a file is loaded
pub const SAMPLE_CSV: &str = include_str!("../../data/sample_listings.csv");

/// The bundled sample dataset
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl SampleSource {
    pub fn new() -> Self {
        Self
    }

    /// Parse the sample synchronously, for callers without a runtime
    pub fn parse(&self) -> ParseOutcome {
        info!("📋 Loading bundled NYC sample listings");
        parse_csv(SAMPLE_CSV)
    }
}

#[async_trait]
impl ListingSource for SampleSource {
    async fn load(&self) -> Result<ParseOutcome> {
        Ok(self.parse())
    }

    fn source_name(&self) -> &str {
        "sample data"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses_cleanly() {
        let outcome = SampleSource::new().parse();
        assert_eq!(outcome.listings.len(), 30);
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn test_sample_covers_all_boroughs() {
        let outcome = SampleSource::new().parse();
        for borough in ["Manhattan", "Brooklyn", "Queens", "Bronx", "Staten Island"] {
            assert!(
                outcome.listings.iter().any(|l| l.neighbourhood_group == borough),
                "missing {borough}"
            );
        }
    }
}
