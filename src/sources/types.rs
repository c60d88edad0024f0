use crate::models::Listing;
use serde::{Deserialize, Serialize};

/// Selector value meaning "do not filter on this field"
pub const MATCH_ALL: &str = "All";

/// Borough and room type selection applied before aggregation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingFilter {
    /// Borough to keep, `None` for all boroughs
    pub borough: Option<String>,
    /// Room type to keep, `None` for all room types
    pub room_type: Option<String>,
}

impl ListingFilter {
    /// Build a filter from selector values where `"All"` means no restriction
    pub fn from_selectors(borough: &str, room_type: &str) -> Self {
        Self {
            borough: selector(borough),
            room_type: selector(room_type),
        }
    }

    pub fn set_borough(&mut self, borough: &str) {
        self.borough = selector(borough);
    }

    pub fn set_room_type(&mut self, room_type: &str) {
        self.room_type = selector(room_type);
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        let borough_match = self
            .borough
            .as_deref()
            .map_or(true, |b| listing.neighbourhood_group == b);
        let room_type_match = self
            .room_type
            .as_deref()
            .map_or(true, |r| listing.room_type == r);
        borough_match && room_type_match
    }

    /// Listings that pass the filter, in their original order
    pub fn apply(&self, listings: &[Listing]) -> Vec<Listing> {
        listings
            .iter()
            .filter(|listing| self.matches(listing))
            .cloned()
            .collect()
    }
}

fn selector(value: &str) -> Option<String> {
    (value != MATCH_ALL).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::csv::parse_csv;

    fn listings() -> Vec<Listing> {
        parse_csv(
            "id,name,host_id,host_name,neighbourhood_group,neighbourhood,latitude,longitude,room_type,price,minimum_nights,number_of_reviews,last_review,reviews_per_month,calculated_host_listings_count,availability_365\n\
             1,A,1,H,Brooklyn,Williamsburg,40.7,-73.9,Private room,80,1,5,,,1,200\n\
             2,B,1,H,Manhattan,Harlem,40.8,-73.9,Entire home/apt,150,2,9,,,1,100\n\
             3,C,1,H,Brooklyn,Bushwick,40.7,-73.9,Entire home/apt,120,3,0,,,1,0",
        )
        .listings
    }

    #[test]
    fn test_all_selectors_match_everything() {
        let filter = ListingFilter::from_selectors("All", "All");
        assert_eq!(filter, ListingFilter::default());
        assert_eq!(filter.apply(&listings()).len(), 3);
    }

    #[test]
    fn test_borough_and_room_type_combine() {
        let data = listings();

        let brooklyn = ListingFilter::from_selectors("Brooklyn", "All");
        let ids: Vec<i64> = brooklyn.apply(&data).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let brooklyn_homes = ListingFilter::from_selectors("Brooklyn", "Entire home/apt");
        let ids: Vec<i64> = brooklyn_homes.apply(&data).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_matching_is_exact() {
        let filter = ListingFilter::from_selectors("brooklyn", "all");
        assert!(filter.apply(&listings()).is_empty());
    }

    #[test]
    fn test_setters_reset_to_all() {
        let mut filter = ListingFilter::from_selectors("Brooklyn", "Private room");
        filter.set_borough(MATCH_ALL);
        filter.set_room_type("Entire home/apt");
        assert_eq!(filter.borough, None);
        assert_eq!(filter.room_type.as_deref(), Some("Entire home/apt"));
    }
}
