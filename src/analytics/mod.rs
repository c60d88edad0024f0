//! Market statistics over a set of listings.
//!
//! [`calculate_analytics`] is a pure function: it takes listings that were
//! already filtered by the caller and returns a fresh [`AnalyticsSummary`].

pub mod format;

use crate::models::{
    AnalyticsSummary, BoroughShare, Listing, NeighbourhoodStats, PriceRangeCount, RoomTypeShare,
};
use std::collections::HashMap;
use tracing::trace;

/// Number of neighbourhoods kept in the ranking
pub const TOP_NEIGHBOURHOODS: usize = 10;

/// Fixed nightly price buckets, upper bound inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBucket {
    UpTo50,
    UpTo100,
    UpTo150,
    UpTo200,
    Over200,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 5] = [
        PriceBucket::UpTo50,
        PriceBucket::UpTo100,
        PriceBucket::UpTo150,
        PriceBucket::UpTo200,
        PriceBucket::Over200,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PriceBucket::UpTo50 => "$0-50",
            PriceBucket::UpTo100 => "$51-100",
            PriceBucket::UpTo150 => "$101-150",
            PriceBucket::UpTo200 => "$151-200",
            PriceBucket::Over200 => "$201+",
        }
    }

    /// Bucket for a price. Negative prices land in the first bucket;
    /// NaN compares false everywhere and lands in none.
    pub fn classify(price: f64) -> Option<PriceBucket> {
        if price <= 50.0 {
            Some(PriceBucket::UpTo50)
        } else if price > 50.0 && price <= 100.0 {
            Some(PriceBucket::UpTo100)
        } else if price > 100.0 && price <= 150.0 {
            Some(PriceBucket::UpTo150)
        } else if price > 150.0 && price <= 200.0 {
            Some(PriceBucket::UpTo200)
        } else if price > 200.0 {
            Some(PriceBucket::Over200)
        } else {
            None
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Running totals for one group key
#[derive(Debug, Default)]
struct Group {
    count: usize,
    total_price: f64,
}

/// Groups keyed by exact string value, in first-seen order
fn group_by<'a>(listings: &'a [Listing], key: impl Fn(&'a Listing) -> &'a str) -> Vec<(&'a str, Group)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Group)> = Vec::new();

    for listing in listings {
        let k = key(listing);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push((k, Group::default()));
            groups.len() - 1
        });
        let group = &mut groups[slot].1;
        group.count += 1;
        group.total_price += listing.price;
    }

    // Stable sort keeps first-seen order between equal counts
    groups.sort_by(|a, b| b.1.count.cmp(&a.1.count));
    groups
}

fn mean(listings: &[Listing], value: impl Fn(&Listing) -> f64) -> Option<f64> {
    if listings.is_empty() {
        return None;
    }
    let sum: f64 = listings.iter().map(value).sum();
    Some(sum / listings.len() as f64)
}

fn percentage(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

/// Compute the market summary for `listings`
pub fn calculate_analytics(listings: &[Listing]) -> AnalyticsSummary {
    let total = listings.len();

    let borough_distribution = group_by(listings, |l| l.neighbourhood_group.as_str())
        .into_iter()
        .map(|(borough, group)| BoroughShare {
            borough: borough.to_string(),
            count: group.count,
            percentage: percentage(group.count, total),
        })
        .collect();

    let room_type_distribution = group_by(listings, |l| l.room_type.as_str())
        .into_iter()
        .map(|(room_type, group)| RoomTypeShare {
            room_type: room_type.to_string(),
            count: group.count,
            percentage: percentage(group.count, total),
        })
        .collect();

    let mut bucket_counts = [0usize; 5];
    for bucket in listings.iter().filter_map(|l| PriceBucket::classify(l.price)) {
        bucket_counts[bucket.index()] += 1;
    }
    let price_ranges = PriceBucket::ALL
        .iter()
        .map(|bucket| PriceRangeCount {
            range: bucket.label().to_string(),
            count: bucket_counts[bucket.index()],
        })
        .collect();

    let top_neighbourhoods = group_by(listings, |l| l.neighbourhood.as_str())
        .into_iter()
        .take(TOP_NEIGHBOURHOODS)
        .map(|(neighbourhood, group)| NeighbourhoodStats {
            neighbourhood: neighbourhood.to_string(),
            count: group.count,
            avg_price: group.total_price / group.count as f64,
        })
        .collect();

    trace!("Computed analytics over {} listings", total);

    AnalyticsSummary {
        total_listings: total,
        average_price: mean(listings, |l| l.price),
        average_reviews: mean(listings, |l| f64::from(l.number_of_reviews)),
        average_availability: mean(listings, |l| f64::from(l.availability_365)),
        borough_distribution,
        room_type_distribution,
        price_ranges,
        top_neighbourhoods,
    }
}
