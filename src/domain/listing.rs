// src/domain/listing.rs

use serde::Serialize;

/// One scraped card, exactly as the page rendered it.
/// Only built when all five sub-values were located on the card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawListing {
    pub title: String,
    pub price_text: String,
    pub location_text: String,
    pub link: String,
    pub full_text: String,
}

/// A raw listing plus the typed fields derived from its text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedListing {
    pub raw: RawListing,

    pub rooms: Option<u32>,
    /// Currency-stripped price.
    pub price: Option<u64>,
    pub area_sqm: Option<f64>,
    /// Only present when both price and area are present and area > 0.
    pub price_per_area: Option<f64>,
}

impl ParsedListing {
    pub fn new(raw: RawListing, rooms: Option<u32>, price: Option<u64>, area_sqm: Option<f64>) -> Self {
        let price_per_area = match (price, area_sqm) {
            (Some(p), Some(a)) if a > 0.0 => Some(p as f64 / a),
            _ => None,
        };

        Self {
            raw,
            rooms,
            price,
            area_sqm,
            price_per_area,
        }
    }
}

/// A parsed listing that survived the filter chain, with its investment scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredListing {
    pub listing: ParsedListing,

    pub deviation_score: f64,
    pub liquidity_score: f64,
    pub centrality_flag: u8,
    pub investment_score: f64,
}

impl ScoredListing {
    pub fn title(&self) -> &str {
        &self.listing.raw.title
    }

    pub fn link(&self) -> &str {
        &self.listing.raw.link
    }

    /// Price per area with absent coerced to zero.
    pub fn ppa(&self) -> f64 {
        self.listing.price_per_area.unwrap_or(0.0)
    }
}

/// A single output cell. Keeps numbers numeric all the way to the sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawListing {
        RawListing {
            title: "2-комнатная квартира".to_string(),
            price_text: "30 000 000 ₸".to_string(),
            location_text: "Алматы, Медеуский р-н".to_string(),
            link: "https://krisha.kz/a/show/1".to_string(),
            full_text: "2-комнатная квартира 50 м²".to_string(),
        }
    }

    #[test]
    fn price_per_area_needs_both_fields() {
        let l = ParsedListing::new(raw(), Some(2), Some(30_000_000), Some(50.0));
        assert_eq!(l.price_per_area, Some(600_000.0));

        let no_area = ParsedListing::new(raw(), Some(2), Some(30_000_000), None);
        assert_eq!(no_area.price_per_area, None);

        let no_price = ParsedListing::new(raw(), Some(2), None, Some(50.0));
        assert_eq!(no_price.price_per_area, None);
    }

    #[test]
    fn zero_area_never_divides() {
        let l = ParsedListing::new(raw(), None, Some(30_000_000), Some(0.0));
        assert_eq!(l.price_per_area, None);
    }
}
