//! Plain-text views over an [`AnalyticsSummary`]: stat cards, key insights,
//! the listings table and the statistical analysis report.

use crate::analytics::format::{format_currency, format_number, format_percent, or_na};
use crate::models::{AnalyticsSummary, Listing};
use serde::Serialize;
use std::fmt;

/// Number of neighbourhoods shown in the report's ranking
const REPORT_NEIGHBOURHOODS: usize = 5;

/// One headline observation about the market
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub title: &'static str,
    pub description: String,
}

/// The four key insights shown next to the charts
pub fn key_insights(summary: &AnalyticsSummary) -> Vec<Insight> {
    let leader = summary.borough_distribution.first();
    let popular_type = summary.room_type_distribution.first();
    let top_hood = summary.top_neighbourhoods.first();

    vec![
        Insight {
            title: "Market Leader",
            description: match leader {
                Some(b) => format!(
                    "{} dominates with {}% of listings",
                    b.borough,
                    format_percent(b.percentage)
                ),
                None => "n/a".to_string(),
            },
        },
        Insight {
            title: "Most Popular Type",
            description: match popular_type {
                Some(t) => format!(
                    "{} accounts for {}% of properties",
                    t.room_type,
                    format_percent(t.percentage)
                ),
                None => "n/a".to_string(),
            },
        },
        Insight {
            title: "Average Pricing",
            description: format!(
                "Market average is {} per night",
                or_na(summary.average_price, format_currency)
            ),
        },
        Insight {
            title: "Top Neighborhood",
            description: match top_hood {
                Some(n) => format!("{} leads with {} listings", n.neighbourhood, n.count),
                None => "n/a".to_string(),
            },
        },
    ]
}

/// Stat cards, distributions, price ranges, top neighbourhoods and insights
pub struct DashboardView<'a>(pub &'a AnalyticsSummary);

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;

        writeln!(f, "New York City Market Analysis")?;
        writeln!(f, "=============================")?;
        writeln!(f)?;
        writeln!(f, "  Total Listings:    {}", format_number(summary.total_listings as f64))?;
        writeln!(f, "  Average Price:     {} per night", or_na(summary.average_price, format_currency))?;
        writeln!(f, "  Average Reviews:   {} per listing", or_na(summary.average_reviews, format_number))?;
        writeln!(
            f,
            "  Avg Availability:  {} days per year",
            or_na(summary.average_availability, format_number)
        )?;
        writeln!(f)?;

        writeln!(f, "Borough Distribution")?;
        for b in &summary.borough_distribution {
            writeln!(f, "  {:<16} {:>6}  {:>5}%", b.borough, b.count, format_percent(b.percentage))?;
        }
        writeln!(f)?;

        writeln!(f, "Room Type Distribution")?;
        for t in &summary.room_type_distribution {
            writeln!(f, "  {:<16} {:>6}  {:>5}%", t.room_type, t.count, format_percent(t.percentage))?;
        }
        writeln!(f)?;

        writeln!(f, "Price Distribution")?;
        for r in &summary.price_ranges {
            writeln!(f, "  {:<16} {:>6}", r.range, r.count)?;
        }
        writeln!(f)?;

        writeln!(f, "Top 10 Neighborhoods")?;
        writeln!(f, "  {:<28} {:>8} {:>10}", "Neighborhood", "Listings", "Avg Price")?;
        for n in &summary.top_neighbourhoods {
            writeln!(
                f,
                "  {:<28} {:>8} {:>10}",
                n.neighbourhood,
                n.count,
                format_currency(n.avg_price)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Key Insights")?;
        for insight in key_insights(summary) {
            writeln!(f, "  * {}: {}", insight.title, insight.description)?;
        }
        Ok(())
    }
}

/// Listings with host, location, type, price, reviews, last review and availability
pub struct ListingTable<'a>(pub &'a [Listing]);

impl fmt::Display for ListingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recent Listings (showing {} properties)", self.0.len())?;
        writeln!(
            f,
            "  {:<36} {:<20} {:<16} {:>6} {:>14} {:>13} {:>6}",
            "Property", "Location", "Type", "Price", "Reviews", "Last Review", "Avail"
        )?;
        for l in self.0 {
            let reviews = match l.reviews_per_month {
                Some(rate) => format!("{} ({:.2}/mo)", l.number_of_reviews, rate),
                None => l.number_of_reviews.to_string(),
            };
            let last_review = l
                .last_review_date()
                .map(|date| date.format("%b %-d, %Y").to_string())
                .unwrap_or_else(|| "never".to_string());
            writeln!(
                f,
                "  {:<36} {:<20} {:<16} {:>6} {:>14} {:>13} {:>6}",
                truncate(&l.name, 36),
                truncate(&format!("{}, {}", l.neighbourhood, l.neighbourhood_group), 20),
                l.room_type,
                format!("${}", l.price),
                reviews,
                last_review,
                l.availability_365
            )?;
            writeln!(f, "    Host: {}, {} night min", l.host_name, l.minimum_nights)?;
        }
        Ok(())
    }
}

/// Long-form statistical analysis report
pub struct ReportView<'a>(pub &'a AnalyticsSummary);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        let price = or_na(summary.average_price, format_currency);
        let reviews = or_na(summary.average_reviews, format_number);
        let availability = or_na(summary.average_availability, format_number);

        writeln!(f, "Statistical Analysis Report")?;
        writeln!(f, "===========================")?;
        writeln!(f)?;

        writeln!(f, "Market Overview")?;
        writeln!(
            f,
            "  The New York City Airbnb market comprises {} active listings with an average \
             nightly rate of {}, and an average of {} reviews per listing.",
            format_number(summary.total_listings as f64),
            price,
            reviews
        )?;
        writeln!(f, "  Properties show an average availability of {availability} days per year.")?;
        writeln!(f)?;

        writeln!(f, "Geographic Distribution")?;
        if let Some(leader) = summary.borough_distribution.first() {
            writeln!(
                f,
                "  {} dominates the market with {}% of all listings.",
                leader.borough,
                format_percent(leader.percentage)
            )?;
        }
        for b in &summary.borough_distribution {
            writeln!(
                f,
                "    {:>5}%  {} ({} listings)",
                format_percent(b.percentage),
                b.borough,
                b.count
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Accommodation Types")?;
        if let Some(top) = summary.room_type_distribution.first() {
            writeln!(
                f,
                "  The market is predominantly composed of {} listings, accounting for {}% of the total inventory.",
                top.room_type,
                format_percent(top.percentage)
            )?;
        }
        for t in &summary.room_type_distribution {
            writeln!(
                f,
                "    {:>6}  {} ({}% of total)",
                t.count,
                t.room_type,
                format_percent(t.percentage)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Price Analysis")?;
        for r in &summary.price_ranges {
            writeln!(f, "    {:<10} {}", r.range, r.count)?;
        }
        writeln!(f)?;

        writeln!(f, "Top Performing Neighborhoods")?;
        if let Some(top) = summary.top_neighbourhoods.first() {
            writeln!(
                f,
                "  {} leads with {} listings and an average price of {}.",
                top.neighbourhood,
                top.count,
                format_currency(top.avg_price)
            )?;
        }
        for (rank, n) in summary
            .top_neighbourhoods
            .iter()
            .take(REPORT_NEIGHBOURHOODS)
            .enumerate()
        {
            writeln!(
                f,
                "    {}. {:<28} {:>8} {:>4} listings",
                rank + 1,
                n.neighbourhood,
                format_currency(n.avg_price),
                n.count
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Key Findings")?;
        if let Some(leader) = summary.borough_distribution.first() {
            writeln!(
                f,
                "  * Geographic concentration in {} leaves room for expansion in underserved areas",
                leader.borough
            )?;
        }
        writeln!(f, "  * Review engagement averages {reviews} reviews per listing")?;
        writeln!(f, "  * Average availability of {availability} days shapes pricing pressure")
    }
}

pub fn render_dashboard(summary: &AnalyticsSummary) -> String {
    DashboardView(summary).to_string()
}

pub fn render_listing_table(listings: &[Listing]) -> String {
    ListingTable(listings).to_string()
}

pub fn render_report(summary: &AnalyticsSummary) -> String {
    ReportView(summary).to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
