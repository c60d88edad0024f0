//! NYC short-term rental market analytics.
//!
//! Listings come in as comma separated text ([`sources::parse_csv`]), get
//! narrowed by a borough / room type [`sources::ListingFilter`], and are
//! summarised by [`analytics::calculate_analytics`]. [`dashboard::Dashboard`]
//! ties these together for a single session and [`report`] renders the
//! result as text.

pub mod analytics;
pub mod dashboard;
pub mod models;
pub mod report;
pub mod sources;
