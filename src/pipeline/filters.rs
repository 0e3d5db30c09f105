// src/pipeline/filters.rs
//
// Each filter takes the previous stage's collection and returns a new one.
// An empty collection just flows through.

use crate::domain::ParsedListing;
use crate::pipeline::stats;
use std::collections::HashSet;

/// Keeps listings whose room count equals `target`. No target, no filtering.
pub fn filter_rooms(listings: Vec<ParsedListing>, target: Option<u32>) -> Vec<ParsedListing> {
    match target {
        None => listings,
        Some(n) => listings.into_iter().filter(|l| l.rooms == Some(n)).collect(),
    }
}

/// First occurrence per link wins.
pub fn dedup_by_link(listings: Vec<ParsedListing>) -> Vec<ParsedListing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|l| seen.insert(l.raw.link.clone()))
        .collect()
}

/// Case-insensitive substring match on the location text.
pub fn filter_district(listings: Vec<ParsedListing>, district: Option<&str>) -> Vec<ParsedListing> {
    let Some(needle) = district.map(str::trim).filter(|d| !d.is_empty()) else {
        return listings;
    };
    let needle = needle.to_lowercase();

    listings
        .into_iter()
        .filter(|l| l.raw.location_text.to_lowercase().contains(&needle))
        .collect()
}

/// Keeps listings priced at or under `ceiling`. Unpriced listings never pass.
pub fn filter_budget(listings: Vec<ParsedListing>, ceiling: f64) -> Vec<ParsedListing> {
    listings
        .into_iter()
        .filter(|l| matches!(l.price, Some(p) if p as f64 <= ceiling))
        .collect()
}

pub fn filter_positive_area(listings: Vec<ParsedListing>) -> Vec<ParsedListing> {
    listings
        .into_iter()
        .filter(|l| matches!(l.area_sqm, Some(a) if a > 0.0))
        .collect()
}

/// Drops placeholder and corrupted listings whose price per area is at or
/// below `floor`.
pub fn filter_sanity_floor(listings: Vec<ParsedListing>, floor: f64) -> Vec<ParsedListing> {
    listings
        .into_iter()
        .filter(|l| matches!(l.price_per_area, Some(ppa) if ppa > floor))
        .collect()
}

/// Tukey fences on price per area: keeps values within
/// `[Q1 - k*IQR, Q3 + k*IQR]`. Fewer than two listings pass through untouched.
pub fn filter_iqr_outliers(listings: Vec<ParsedListing>, k: f64) -> Vec<ParsedListing> {
    if listings.len() < 2 {
        return listings;
    }

    let values: Vec<f64> = listings.iter().filter_map(|l| l.price_per_area).collect();
    let (Some(q1), Some(q3)) = (stats::quantile(&values, 0.25), stats::quantile(&values, 0.75))
    else {
        return listings;
    };

    let iqr = q3 - q1;
    let lower = q1 - k * iqr;
    let upper = q3 + k * iqr;

    listings
        .into_iter()
        .filter(|l| matches!(l.price_per_area, Some(ppa) if ppa >= lower && ppa <= upper))
        .collect()
}
