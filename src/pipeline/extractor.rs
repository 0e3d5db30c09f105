// src/pipeline/extractor.rs

use crate::domain::RawListing;

/// A handle to one listing card as handed over by the page fetcher.
/// Each accessor returns `None` when the sub-value could not be located.
pub trait ListingFragment {
    fn title(&self) -> Option<String>;
    fn price_text(&self) -> Option<String>;
    fn location_text(&self) -> Option<String>;
    fn link(&self) -> Option<String>;
    fn full_text(&self) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub listings: Vec<RawListing>,
    pub dropped: usize,
}

/// Reads the five required sub-values off each fragment. A fragment missing
/// any of them is skipped whole; order among the rest is kept.
pub fn extract_listings<F: ListingFragment>(fragments: &[F]) -> Extraction {
    let mut out = Extraction::default();

    for (i, fragment) in fragments.iter().enumerate() {
        match extract_one(fragment) {
            Some(listing) => out.listings.push(listing),
            None => {
                tracing::debug!("fragment {i} is missing a required field, skipping");
                out.dropped += 1;
            }
        }
    }

    out
}

fn extract_one<F: ListingFragment>(fragment: &F) -> Option<RawListing> {
    Some(RawListing {
        title: fragment.title()?,
        price_text: fragment.price_text()?,
        location_text: fragment.location_text()?,
        link: fragment.link()?,
        full_text: fragment.full_text()?,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory fragment for tests.
    #[derive(Debug, Clone, Default)]
    pub struct FakeFragment {
        pub title: Option<String>,
        pub price: Option<String>,
        pub location: Option<String>,
        pub link: Option<String>,
        pub text: Option<String>,
    }

    impl FakeFragment {
        pub fn complete(title: &str, price: &str, location: &str, link: &str, text: &str) -> Self {
            Self {
                title: Some(title.to_string()),
                price: Some(price.to_string()),
                location: Some(location.to_string()),
                link: Some(link.to_string()),
                text: Some(text.to_string()),
            }
        }
    }

    impl ListingFragment for FakeFragment {
        fn title(&self) -> Option<String> {
            self.title.clone()
        }
        fn price_text(&self) -> Option<String> {
            self.price.clone()
        }
        fn location_text(&self) -> Option<String> {
            self.location.clone()
        }
        fn link(&self) -> Option<String> {
            self.link.clone()
        }
        fn full_text(&self) -> Option<String> {
            self.text.clone()
        }
    }

    #[test]
    fn drops_exactly_the_incomplete_fragments() {
        let ok = |n: u32| {
            FakeFragment::complete(
                &format!("card {n}"),
                "1 ₸",
                "Алматы",
                &format!("https://krisha.kz/a/show/{n}"),
                "text",
            )
        };

        let mut no_price = ok(2);
        no_price.price = None;
        let mut no_link = ok(4);
        no_link.link = None;

        let fragments = vec![ok(1), no_price, ok(3), no_link, ok(5)];
        let extraction = extract_listings(&fragments);

        assert_eq!(extraction.dropped, 2);
        let titles: Vec<_> = extraction.listings.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["card 1", "card 3", "card 5"]);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let extraction = extract_listings::<FakeFragment>(&[]);
        assert!(extraction.listings.is_empty());
        assert_eq!(extraction.dropped, 0);
    }
}
