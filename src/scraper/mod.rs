mod fragment;
mod scraper;
mod scraper_error;

#[cfg(test)]
pub use fragment::{parse_cards, CardSelectors};
pub use scraper::KrishaScraper;
pub use scraper_error::ScraperError;
