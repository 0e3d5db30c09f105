// src/pipeline/mod.rs
//
// Raw card fragments in, ranked report out. No I/O happens here.

pub mod extractor;
pub mod filters;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod stats;

pub use extractor::{extract_listings, ListingFragment};
pub use report::{render_summary, Report, StageCounts};

use crate::domain::FilterCriteria;
use serde::Deserialize;

/// Business constants of the pipeline. Defaults are tuned for Almaty.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Listings at or below this price per m² are treated as junk.
    pub sanity_floor: f64,
    pub center_keywords: Vec<String>,
    pub iqr_multiplier: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            sanity_floor: 100_000.0,
            center_keywords: ["Медеуский", "Алмалинский", "Бостандыкский", "центр"]
                .into_iter()
                .map(String::from)
                .collect(),
            iqr_multiplier: 1.5,
        }
    }
}

pub fn run<F: ListingFragment>(
    fragments: &[F],
    criteria: &FilterCriteria,
    settings: &PipelineSettings,
) -> Report {
    let mut stages = StageCounts::default();

    let extraction = extract_listings(fragments);
    stages.dropped_fragments = extraction.dropped;
    stages.extracted = extraction.listings.len();

    let parsed = parser::parse_listings(extraction.listings);

    let listings = filters::filter_rooms(parsed, criteria.rooms);
    stages.rooms = listings.len();

    let listings = filters::dedup_by_link(listings);
    stages.dedup = listings.len();

    let listings = filters::filter_district(listings, criteria.district.as_deref());
    stages.district = listings.len();

    let listings = filters::filter_budget(listings, criteria.ceiling());
    stages.budget = listings.len();

    let listings = filters::filter_positive_area(listings);
    stages.area = listings.len();

    let listings = filters::filter_sanity_floor(listings, settings.sanity_floor);
    stages.sanity_floor = listings.len();

    let listings = filters::filter_iqr_outliers(listings, settings.iqr_multiplier);
    stages.outliers = listings.len();

    tracing::debug!(?stages, "filter chain finished");

    let scored = scoring::score_listings(listings, &settings.center_keywords);
    Report::new(scored, stages)
}
