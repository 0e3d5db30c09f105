// scraper.rs
use crate::config::{Market, ScrapeConfig};
use crate::scraper::fragment::{parse_cards, CardFragment, CardSelectors};
use crate::scraper::ScraperError;
use rand::Rng;
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

const MAX_CONSECUTIVE_FAILURES: usize = 3;
const MAX_BACKOFF_SECS: u64 = 10;
const JITTER_MAX_SECS: u64 = 2;

pub struct KrishaScraper {
    client: Client,
    config: ScrapeConfig,
    selectors: CardSelectors,
}

pub struct ScrapeResult {
    pub fragments: Vec<CardFragment>,
    pub pages_fetched: usize,
}

impl KrishaScraper {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
            selectors: CardSelectors::new()?,
        })
    }

    /// Walks the search pages for `market` until a page has no cards,
    /// `max_pages` is reached, or too many pages in a row fail.
    pub fn collect_fragments(
        &self,
        market: &Market,
        rooms: Option<u32>,
    ) -> Result<ScrapeResult, ScraperError> {
        paginate(&self.config, &market.slug, rooms, &self.selectors, |url| {
            self.fetch_html(url)
        })
    }

    pub fn fetch_html(&self, url: &Url) -> Result<String, ScraperError> {
        fetch_with_retries(
            url,
            self.config.max_attempts,
            std::thread::sleep,
            |u| self.try_fetch_html(u),
        )
    }

    fn try_fetch_html(&self, url: &Url) -> Result<String, ScraperError> {
        let resp = self.client.get(url.clone()).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp.text()?)
    }
}

/// The page loop behind `collect_fragments`, with the page fetch supplied by
/// the caller. Fails only when no page at all could be fetched; a run that
/// fetched some pages before hitting the failure limit keeps what it has.
pub fn paginate<F>(
    config: &ScrapeConfig,
    slug: &str,
    rooms: Option<u32>,
    selectors: &CardSelectors,
    mut fetch: F,
) -> Result<ScrapeResult, ScraperError>
where
    F: FnMut(&Url) -> Result<String, ScraperError>,
{
    let mut fragments = Vec::new();
    let mut pages_fetched = 0;
    let mut consecutive_failures = 0;
    let mut page = 1;

    while page <= config.max_pages {
        let page_url = page_url(&config.base_url, slug, rooms, page)?;
        tracing::info!("Scraping page {page}: {page_url}");

        match fetch(&page_url) {
            Ok(html) => {
                consecutive_failures = 0;
                pages_fetched += 1;

                let cards = parse_cards(&html, &page_url, selectors);
                if cards.is_empty() {
                    tracing::info!("No more pages.");
                    break;
                }

                tracing::info!("Page {page} parsed ({} cards)", cards.len());
                fragments.extend(cards);
                page += 1;
            }
            Err(e) => {
                consecutive_failures += 1;
                tracing::warn!("Page {page} failed (attempt {consecutive_failures}): {e}");

                if consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                    if pages_fetched == 0 {
                        tracing::error!("Too many failures, no page could be fetched");
                        return Err(e);
                    }
                    tracing::warn!(
                        "Too many failures on page {page}, keeping {} cards from {pages_fetched} pages",
                        fragments.len()
                    );
                    break;
                }
            }
        }

        if page <= config.max_pages && config.page_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(config.page_delay_ms));
        }
    }

    Ok(ScrapeResult {
        fragments,
        pages_fetched,
    })
}

/// Tries `fetch` up to `max_attempts` times, sleeping a capped linear
/// backoff plus jitter between attempts. Returns the last error.
pub fn fetch_with_retries<S, F>(
    url: &Url,
    max_attempts: u64,
    mut sleep: S,
    mut fetch: F,
) -> Result<String, ScraperError>
where
    S: FnMut(Duration),
    F: FnMut(&Url) -> Result<String, ScraperError>,
{
    let mut last_err = None;

    for attempt in 1..=max_attempts {
        let start = Instant::now();

        match fetch(url) {
            Ok(html) => {
                tracing::debug!("fetched {url} on attempt {attempt} in {:?}", start.elapsed());
                return Ok(html);
            }
            Err(e) => {
                tracing::warn!("attempt {attempt} for {url} failed in {:?}: {e}", start.elapsed());
                last_err = Some(e);

                if attempt < max_attempts {
                    let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                    let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
                    sleep(Duration::from_secs(base + jitter));
                }
            }
        }
    }

    Err(last_err.unwrap_or_else(|| ScraperError::Network("retry loop made no attempts".into())))
}

/// `{base}/prodazha/kvartiry/{slug}/?page=N`, with the room count passed
/// along as a server-side prefilter when one is wanted.
pub fn page_url(base_url: &str, slug: &str, rooms: Option<u32>, page: usize) -> Result<Url, ScraperError> {
    let base = Url::parse(base_url)?;
    let mut url = base.join(&format!("prodazha/kvartiry/{slug}/"))?;

    {
        let mut query = url.query_pairs_mut();
        if let Some(n) = rooms {
            query.append_pair("das[live.rooms]", &n.to_string());
        }
        query.append_pair("page", &page.to_string());
    }

    Ok(url)
}
