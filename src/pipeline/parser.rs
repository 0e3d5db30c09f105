// src/pipeline/parser.rs
//
// Turns raw card text into typed fields. Nothing here fails: a value that
// cannot be read is simply absent.

use crate::domain::{ParsedListing, RawListing};
use once_cell::sync::Lazy;
use regex::Regex;

/// Abbreviation of "комната" as krisha.kz titles use it ("3-комнатная", "2 ком.").
pub const ROOM_TOKEN: &str = "ком";

/// Latin and Cyrillic renderings of the "m" in "m²".
pub const AREA_UNIT_LATIN: char = 'm';
pub const AREA_UNIT_CYRILLIC: char = 'м';

static ROOMS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(\d+)\s*[- ]?\s*{ROOM_TOKEN}")).expect("room pattern is valid")
});

static AREA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(\d+\.?\d*)\s?[{AREA_UNIT_LATIN}{AREA_UNIT_CYRILLIC}]²"
    ))
    .expect("area pattern is valid")
});

pub fn parse_listings(raw: Vec<RawListing>) -> Vec<ParsedListing> {
    raw.into_iter().map(parse_listing).collect()
}

pub fn parse_listing(raw: RawListing) -> ParsedListing {
    let rooms = extract_rooms(&raw.title);
    let price = clean_price(&raw.price_text);
    let area = extract_area(&raw.full_text);

    ParsedListing::new(raw, rooms, price, area)
}

/// "3-комнатная квартира" -> 3
pub fn extract_rooms(title: &str) -> Option<u32> {
    ROOMS_RE
        .captures(title)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Keeps only the digits: "45 000 000 ₸" -> 45000000.
pub fn clean_price(price_text: &str) -> Option<u64> {
    let digits: String = price_text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// First "<number> m²" in the card text, fractional part kept.
pub fn extract_area(full_text: &str) -> Option<f64> {
    AREA_RE
        .captures(full_text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
