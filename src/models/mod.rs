use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One rental listing snapshot, in the column order of the listings CSV
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub host_id: i64,
    pub host_name: String,
    /// Borough
    pub neighbourhood_group: String,
    pub neighbourhood: String,
    pub latitude: f64,
    pub longitude: f64,
    pub room_type: String,
    /// Nightly price in USD. May be NaN when the source value was garbage.
    pub price: f64,
    pub minimum_nights: i32,
    pub number_of_reviews: i32,
    /// Absent when the listing was never reviewed
    pub last_review: Option<String>,
    pub reviews_per_month: Option<f64>,
    pub calculated_host_listings_count: i32,
    pub availability_365: i32,
}

impl Listing {
    /// Last review as a calendar date, if present and ISO formatted
    pub fn last_review_date(&self) -> Option<NaiveDate> {
        self.last_review
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
    }
}

/// Share of listings for one borough
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoroughShare {
    pub borough: String,
    pub count: usize,
    pub percentage: f64,
}

/// Share of listings for one room type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomTypeShare {
    #[serde(rename = "type")]
    pub room_type: String,
    pub count: usize,
    pub percentage: f64,
}

/// Listing count for one fixed price bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRangeCount {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NeighbourhoodStats {
    pub neighbourhood: String,
    pub count: usize,
    pub avg_price: f64,
}

/// Aggregate market statistics for a set of listings.
///
/// Averages are `None` when the summary was computed over zero listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_listings: usize,
    pub average_price: Option<f64>,
    pub average_reviews: Option<f64>,
    pub average_availability: Option<f64>,
    pub borough_distribution: Vec<BoroughShare>,
    pub room_type_distribution: Vec<RoomTypeShare>,
    pub price_ranges: Vec<PriceRangeCount>,
    pub top_neighbourhoods: Vec<NeighbourhoodStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_with_review(last_review: Option<&str>) -> Listing {
        Listing {
            id: 2539,
            name: "Clean & quiet apt home by the park".to_string(),
            host_id: 2787,
            host_name: "John".to_string(),
            neighbourhood_group: "Brooklyn".to_string(),
            neighbourhood: "Kensington".to_string(),
            latitude: 40.64749,
            longitude: -73.97237,
            room_type: "Private room".to_string(),
            price: 149.0,
            minimum_nights: 1,
            number_of_reviews: 9,
            last_review: last_review.map(str::to_string),
            reviews_per_month: Some(0.21),
            calculated_host_listings_count: 6,
            availability_365: 365,
        }
    }

    #[test]
    fn test_last_review_date_parses_iso() {
        let listing = listing_with_review(Some("2018-10-19"));
        assert_eq!(
            listing.last_review_date(),
            NaiveDate::from_ymd_opt(2018, 10, 19)
        );
    }

    #[test]
    fn test_last_review_date_absent_or_garbage() {
        assert_eq!(listing_with_review(None).last_review_date(), None);
        assert_eq!(listing_with_review(Some("last week")).last_review_date(), None);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = AnalyticsSummary {
            total_listings: 0,
            average_price: None,
            average_reviews: None,
            average_availability: None,
            borough_distribution: vec![],
            room_type_distribution: vec![RoomTypeShare {
                room_type: "Entire home/apt".to_string(),
                count: 1,
                percentage: 100.0,
            }],
            price_ranges: vec![],
            top_neighbourhoods: vec![],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalListings"], 0);
        assert!(json["averagePrice"].is_null());
        assert_eq!(json["roomTypeDistribution"][0]["type"], "Entire home/apt");
    }
}
