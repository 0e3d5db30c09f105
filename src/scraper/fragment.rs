// src/scraper/fragment.rs

use crate::pipeline::ListingFragment;
use crate::scraper::ScraperError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Card markup on krisha.kz search pages.
pub struct CardSelectors {
    card: Selector,
    header: Selector,
    price: Selector,
    subtitle: Selector,
    link: Selector,
}

impl CardSelectors {
    pub fn new() -> Result<Self, ScraperError> {
        let parse = |css: &str| Selector::parse(css).map_err(|e| ScraperError::Selector(e.to_string()));

        Ok(Self {
            card: parse(".a-card")?,
            header: parse(".a-card__header")?,
            price: parse(".a-card__price")?,
            subtitle: parse(".a-card__subtitle")?,
            link: parse("a[href]")?,
        })
    }
}

/// One listing card, with every sub-value read eagerly so the fragment
/// outlives the parsed page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardFragment {
    pub header: Option<String>,
    pub price: Option<String>,
    pub subtitle: Option<String>,
    pub href: Option<String>,
    pub text: Option<String>,
}

impl CardFragment {
    pub fn from_element(card: ElementRef<'_>, selectors: &CardSelectors, page_url: &Url) -> Self {
        let text_of = |sel: &Selector| card.select(sel).next().map(element_text);

        let href = card
            .select(&selectors.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|h| page_url.join(h).ok())
            .map(String::from);

        Self {
            header: text_of(&selectors.header),
            price: text_of(&selectors.price),
            subtitle: text_of(&selectors.subtitle),
            href,
            text: Some(element_text(card)),
        }
    }
}

impl ListingFragment for CardFragment {
    fn title(&self) -> Option<String> {
        self.header.clone()
    }
    fn price_text(&self) -> Option<String> {
        self.price.clone()
    }
    fn location_text(&self) -> Option<String> {
        self.subtitle.clone()
    }
    fn link(&self) -> Option<String> {
        self.href.clone()
    }
    fn full_text(&self) -> Option<String> {
        self.text.clone()
    }
}

/// Every `.a-card` on the page, in document order.
pub fn parse_cards(html: &str, page_url: &Url, selectors: &CardSelectors) -> Vec<CardFragment> {
    let document = Html::parse_document(html);
    document
        .select(&selectors.card)
        .map(|card| CardFragment::from_element(card, selectors, page_url))
        .collect()
}

/// Visible text with whitespace runs collapsed to single spaces.
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
