// src/pipeline/report.rs

use crate::domain::{Cell, ScoredListing};
use crate::pipeline::stats;
use std::fmt::Write;

/// How many listings the console summary shows.
pub const TOP_N: usize = 5;

pub const HEADERS: [&str; 10] = [
    "title",
    "price",
    "location",
    "link",
    "sqm",
    "price_per_m2",
    "deviation_score",
    "liquidity_score",
    "center_score",
    "investment_score",
];

/// Market averages over the final collection. Zero when it is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketSummary {
    pub count: usize,
    pub mean_price: f64,
    pub mean_area: f64,
    pub mean_price_per_area: f64,
}

/// How many listings were left after each stage of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageCounts {
    pub dropped_fragments: usize,
    pub extracted: usize,
    pub rooms: usize,
    pub dedup: usize,
    pub district: usize,
    pub budget: usize,
    pub area: usize,
    pub sanity_floor: usize,
    pub outliers: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Sorted by investment score, best first.
    pub listings: Vec<ScoredListing>,
    pub summary: MarketSummary,
    pub stages: StageCounts,
}

impl Report {
    pub fn new(scored: Vec<ScoredListing>, stages: StageCounts) -> Self {
        let listings = rank(scored);
        let summary = summarize(&listings);
        Self {
            listings,
            summary,
            stages,
        }
    }

    pub fn top_listings(&self) -> &[ScoredListing] {
        &self.listings[..self.listings.len().min(TOP_N)]
    }

    pub fn header(&self) -> &'static [&'static str] {
        &HEADERS
    }

    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.listings.iter().map(row).collect()
    }
}

/// Stable sort, best score first. Ties keep their incoming order.
pub fn rank(mut scored: Vec<ScoredListing>) -> Vec<ScoredListing> {
    scored.sort_by(|a, b| b.investment_score.total_cmp(&a.investment_score));
    scored
}

pub fn summarize(listings: &[ScoredListing]) -> MarketSummary {
    let prices: Vec<f64> = listings
        .iter()
        .map(|l| l.listing.price.unwrap_or(0) as f64)
        .collect();
    let areas: Vec<f64> = listings
        .iter()
        .map(|l| l.listing.area_sqm.unwrap_or(0.0))
        .collect();
    let ppas: Vec<f64> = listings.iter().map(ScoredListing::ppa).collect();

    MarketSummary {
        count: listings.len(),
        mean_price: stats::mean(&prices).unwrap_or(0.0),
        mean_area: stats::mean(&areas).unwrap_or(0.0),
        mean_price_per_area: stats::mean(&ppas).unwrap_or(0.0),
    }
}

fn row(l: &ScoredListing) -> Vec<Cell> {
    let raw = &l.listing.raw;
    vec![
        Cell::Text(raw.title.clone()),
        Cell::Text(raw.price_text.clone()),
        Cell::Text(raw.location_text.clone()),
        Cell::Text(raw.link.clone()),
        Cell::Number(l.listing.area_sqm.unwrap_or(0.0)),
        Cell::Number(l.ppa()),
        Cell::Number(l.deviation_score),
        Cell::Number(l.liquidity_score),
        Cell::Number(f64::from(l.centrality_flag)),
        Cell::Number(l.investment_score),
    ]
}

/// Human-readable market summary and top listings for the console.
pub fn render_summary(report: &Report) -> String {
    let s = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out, "===== MARKET SUMMARY =====");
    let _ = writeln!(out, "Listings analysed:     {}", s.count);
    let _ = writeln!(out, "Average price:         {:.0}", s.mean_price);
    let _ = writeln!(out, "Average size (m²):     {:.1}", s.mean_area);
    let _ = writeln!(out, "Average price per m²:  {:.0}", s.mean_price_per_area);

    if report.listings.is_empty() {
        let _ = writeln!(out, "\nNo listings matched your criteria.");
        return out;
    }

    let top = report.top_listings();
    let _ = writeln!(out, "\n===== TOP {} INVESTMENT OPTIONS =====", top.len());
    for (i, l) in top.iter().enumerate() {
        let _ = writeln!(out, "\n#{} {}", i + 1, l.title());
        let _ = writeln!(out, "   Price:            {}", l.listing.raw.price_text);
        let _ = writeln!(out, "   Location:         {}", l.listing.raw.location_text);
        let _ = writeln!(out, "   Size (m²):        {:.1}", l.listing.area_sqm.unwrap_or(0.0));
        let _ = writeln!(out, "   Price per m²:     {:.0}", l.ppa());
        let _ = writeln!(out, "   Investment score: {:.3}", l.investment_score);
        let _ = writeln!(out, "   {}", l.link());
    }

    out
}
