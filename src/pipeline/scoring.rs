// src/pipeline/scoring.rs

use crate::domain::{ParsedListing, ScoredListing};
use crate::pipeline::stats;

/// Weight of a central location in the investment score.
pub const CENTRALITY_WEIGHT: f64 = 3.0;

/// Scores every listing against the collection it arrived in.
///
/// * deviation: negated z-score of price per area, so cheaper than average is positive
/// * liquidity: `(max - ppa) / (max - min)`, 1 for the cheapest listing, 0 for the priciest.
///   Normalised over the min-max range on purpose: the plain `(max - ppa) / max` form
///   never reaches 1 for the cheapest listing.
/// * centrality: 1 when the location names one of `center_keywords`
///
/// Degenerate collections (fewer than two listings, zero spread, non-positive max)
/// score 0 on the affected component instead of dividing by zero.
pub fn score_listings(listings: Vec<ParsedListing>, center_keywords: &[String]) -> Vec<ScoredListing> {
    let values: Vec<f64> = listings
        .iter()
        .map(|l| l.price_per_area.unwrap_or(0.0))
        .collect();

    let mean = stats::mean(&values);
    let std = stats::sample_std(&values).filter(|s| s.is_finite() && *s > 0.0);
    let range = match (stats::min(&values), stats::max(&values)) {
        (Some(lo), Some(hi)) if hi.is_finite() && hi > 0.0 && hi > lo => Some((lo, hi)),
        _ => None,
    };

    let keywords: Vec<String> = center_keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    listings
        .into_iter()
        .zip(values)
        .map(|(listing, ppa)| {
            let deviation_score = match (mean, std) {
                (Some(m), Some(s)) => -((ppa - m) / s),
                _ => 0.0,
            };

            let liquidity_score = match range {
                Some((lo, hi)) => ((hi - ppa) / (hi - lo)).clamp(0.0, 1.0),
                None => 0.0,
            };

            let centrality_flag = centrality(&listing.raw.location_text, &keywords);
            let investment_score =
                deviation_score + liquidity_score + CENTRALITY_WEIGHT * f64::from(centrality_flag);

            ScoredListing {
                listing,
                deviation_score,
                liquidity_score,
                centrality_flag,
                investment_score,
            }
        })
        .collect()
}

/// `keywords` are expected lowercased.
fn centrality(location: &str, keywords: &[String]) -> u8 {
    let location = location.to_lowercase();
    u8::from(keywords.iter().any(|k| location.contains(k.as_str())))
}
