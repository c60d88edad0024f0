use crate::analytics::calculate_analytics;
use crate::models::{AnalyticsSummary, Listing};
use crate::sources::{ListingFilter, ListingSource, ParseOutcome, RejectedRow, UploadError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

/// Rows shown in the listings table
pub const RECENT_LISTINGS: usize = 10;

/// One loaded listings snapshot. Replaced whole, never patched.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub listings: Vec<Listing>,
    pub rejected: Vec<RejectedRow>,
}

impl Dataset {
    pub fn new(source: impl Into<String>, outcome: ParseOutcome) -> Self {
        Self {
            source: source.into(),
            loaded_at: Utc::now(),
            listings: outcome.listings,
            rejected: outcome.rejected,
        }
    }
}

/// Result of the most recent load attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UploadStatus {
    Idle,
    Success(String),
    Error(String),
}

/// Single-user dashboard session: the active dataset, the filter
/// selection, and the status of the last upload.
pub struct Dashboard {
    dataset: Dataset,
    filter: ListingFilter,
    status: UploadStatus,
}

impl Dashboard {
    /// Start a session on `default_dataset` (usually the bundled sample)
    pub fn new(default_dataset: Dataset) -> Self {
        Self {
            dataset: default_dataset,
            filter: ListingFilter::default(),
            status: UploadStatus::Idle,
        }
    }

    /// Load a new dataset from `source`.
    ///
    /// The active dataset is only replaced when the source yields at least
    /// one listing; any failure leaves it untouched.
    pub async fn load_from(&mut self, source: &dyn ListingSource) -> &UploadStatus {
        let name = source.source_name().to_string();

        self.status = match source.load().await {
            Ok(outcome) if outcome.listings.is_empty() => {
                warn!("{} contained no valid listings, keeping {}", name, self.dataset.source);
                UploadStatus::Error(format!("No valid listings found in {name}"))
            }
            Ok(outcome) => {
                let skipped = outcome.rejected.len();
                self.dataset = Dataset::new(name.clone(), outcome);
                info!(
                    "Loaded {} listings from {}",
                    self.dataset.listings.len(),
                    name
                );
                if skipped == 0 {
                    UploadStatus::Success(format!("Successfully loaded {name}"))
                } else {
                    UploadStatus::Success(format!(
                        "Successfully loaded {name} ({skipped} malformed rows skipped)"
                    ))
                }
            }
            Err(err) => {
                warn!("Upload of {} failed: {:#}", name, err);
                match err.downcast_ref::<UploadError>() {
                    Some(UploadError::NotCsv(_)) => {
                        UploadStatus::Error("Please upload a CSV file".to_string())
                    }
                    _ => UploadStatus::Error("Error reading file".to_string()),
                }
            }
        };

        &self.status
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    pub fn clear_status(&mut self) {
        self.status = UploadStatus::Idle;
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    /// Select a borough, or `"All"`
    pub fn set_borough(&mut self, borough: &str) {
        self.filter.set_borough(borough);
    }

    /// Select a room type, or `"All"`
    pub fn set_room_type(&mut self, room_type: &str) {
        self.filter.set_room_type(room_type);
    }

    /// Active listings after the current filter
    pub fn filtered(&self) -> Vec<Listing> {
        self.filter.apply(&self.dataset.listings)
    }

    /// Analytics for the filtered listings
    pub fn summary(&self) -> AnalyticsSummary {
        calculate_analytics(&self.filtered())
    }

    /// Distinct boroughs of the whole dataset, in first-seen order
    pub fn boroughs(&self) -> Vec<String> {
        distinct(&self.dataset.listings, |l| &l.neighbourhood_group)
    }

    /// Distinct room types of the whole dataset, in first-seen order
    pub fn room_types(&self) -> Vec<String> {
        distinct(&self.dataset.listings, |l| &l.room_type)
    }

    /// First rows of the filtered listings, for the listings table
    pub fn recent_listings(&self) -> Vec<Listing> {
        let mut listings = self.filtered();
        listings.truncate(RECENT_LISTINGS);
        listings
    }
}

fn distinct(listings: &[Listing], key: impl Fn(&Listing) -> &String) -> Vec<String> {
    let mut seen = HashSet::new();
    listings
        .iter()
        .map(key)
        .filter(|value| seen.insert(value.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{CsvFileSource, SampleSource, TextSource};
    use std::io::Write;

    const HEADER: &str = "id,name,host_id,host_name,neighbourhood_group,neighbourhood,latitude,longitude,room_type,price,minimum_nights,number_of_reviews,last_review,reviews_per_month,calculated_host_listings_count,availability_365";

    fn sample_dashboard() -> Dashboard {
        Dashboard::new(Dataset::new("sample data", SampleSource::new().parse()))
    }

    #[tokio::test]
    async fn test_successful_upload_replaces_dataset() {
        let mut dashboard = sample_dashboard();
        let text = format!(
            "{HEADER}\n1,Bronx room,1,H,Bronx,Fordham,40.8,-73.9,Private room,55,1,3,,,1,90\n\
             2,Bronx flat,1,H,Bronx,Fordham,40.8,-73.9,Entire home/apt,95,1,3,,,1,90"
        );

        let status = dashboard.load_from(&TextSource::new("bronx.csv", text)).await;
        assert_eq!(status, &UploadStatus::Success("Successfully loaded bronx.csv".to_string()));
        assert_eq!(dashboard.dataset().source, "bronx.csv");
        assert_eq!(dashboard.summary().total_listings, 2);
        assert_eq!(dashboard.boroughs(), vec!["Bronx".to_string()]);
    }

    #[tokio::test]
    async fn test_skipped_rows_are_reported() {
        let mut dashboard = sample_dashboard();
        let text = format!(
            "{HEADER}\n1,Bronx room,1,H,Bronx,Fordham,40.8,-73.9,Private room,55,1,3,,,1,90\n\
             2,short row"
        );

        dashboard.load_from(&TextSource::new("mixed.csv", text)).await;
        assert_eq!(
            dashboard.status(),
            &UploadStatus::Success("Successfully loaded mixed.csv (1 malformed rows skipped)".to_string())
        );
        assert_eq!(dashboard.dataset().rejected.len(), 1);
        assert_eq!(dashboard.dataset().rejected[0].line, 3);
    }

    #[tokio::test]
    async fn test_blank_lines_are_not_reported_as_skipped() {
        let mut dashboard = sample_dashboard();
        let text = format!(
            "{HEADER}\n1,Bronx room,1,H,Bronx,Fordham,40.8,-73.9,Private room,55,1,3,,,1,90\n\n\
             2,Bronx flat,1,H,Bronx,Fordham,40.8,-73.9,Entire home/apt,95,1,3,,,1,90"
        );

        let status = dashboard.load_from(&TextSource::new("gaps.csv", text)).await;
        assert_eq!(status, &UploadStatus::Success("Successfully loaded gaps.csv".to_string()));
        assert!(dashboard.dataset().rejected.is_empty());
    }

    #[tokio::test]
    async fn test_empty_upload_keeps_previous_dataset() {
        let mut dashboard = sample_dashboard();
        let status = dashboard.load_from(&TextSource::new("empty.csv", HEADER)).await;
        assert_eq!(
            status,
            &UploadStatus::Error("No valid listings found in empty.csv".to_string())
        );
        assert_eq!(dashboard.dataset().source, "sample data");
        assert_eq!(dashboard.dataset().listings.len(), 30);
    }

    #[tokio::test]
    async fn test_wrong_file_type_keeps_previous_dataset() {
        let mut dashboard = sample_dashboard();
        let status = dashboard.load_from(&CsvFileSource::new("listings.json")).await;
        assert_eq!(status, &UploadStatus::Error("Please upload a CSV file".to_string()));
        assert_eq!(dashboard.dataset().source, "sample data");
    }

    #[tokio::test]
    async fn test_read_failure_keeps_previous_dataset() {
        let mut dashboard = sample_dashboard();
        let dir = tempfile::tempdir().unwrap();
        let status = dashboard
            .load_from(&CsvFileSource::new(dir.path().join("gone.csv")))
            .await;
        assert_eq!(status, &UploadStatus::Error("Error reading file".to_string()));
        assert_eq!(dashboard.dataset().listings.len(), 30);

        dashboard.clear_status();
        assert_eq!(dashboard.status(), &UploadStatus::Idle);
    }

    #[tokio::test]
    async fn test_file_upload_round_trip() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "9,Astoria studio,1,H,Queens,Astoria,40.7,-73.9,Entire home/apt,120,2,8,2019-06-01,0.5,1,300").unwrap();

        let mut dashboard = sample_dashboard();
        let status = dashboard.load_from(&CsvFileSource::new(file.path())).await.clone();
        assert!(matches!(status, UploadStatus::Success(_)));
        assert_eq!(dashboard.filtered()[0].id, 9);
    }

    #[test]
    fn test_filters_narrow_summary_not_options() {
        let mut dashboard = sample_dashboard();
        let all_boroughs = dashboard.boroughs();

        dashboard.set_borough("Brooklyn");
        dashboard.set_room_type("Private room");
        let summary = dashboard.summary();

        assert!(summary.total_listings > 0);
        assert_eq!(summary.borough_distribution.len(), 1);
        assert_eq!(summary.borough_distribution[0].borough, "Brooklyn");
        assert_eq!(summary.room_type_distribution[0].room_type, "Private room");
        assert_eq!(dashboard.boroughs(), all_boroughs);

        assert_eq!(dashboard.filter().borough.as_deref(), Some("Brooklyn"));
        assert_eq!(dashboard.filter().room_type.as_deref(), Some("Private room"));

        dashboard.set_borough("All");
        dashboard.set_room_type("All");
        assert_eq!(dashboard.filter(), &ListingFilter::default());
        assert_eq!(dashboard.summary().total_listings, 30);
    }

    #[test]
    fn test_distinct_options_in_first_seen_order() {
        let dashboard = sample_dashboard();
        assert_eq!(
            dashboard.boroughs(),
            vec!["Brooklyn", "Manhattan", "Queens", "Staten Island", "Bronx"]
        );
        assert_eq!(
            dashboard.room_types(),
            vec!["Private room", "Entire home/apt", "Shared room"]
        );
    }

    #[test]
    fn test_recent_listings_capped() {
        let dashboard = sample_dashboard();
        let recent = dashboard.recent_listings();
        assert_eq!(recent.len(), RECENT_LISTINGS);
        assert_eq!(recent[0].id, 2539);
    }
}
