pub mod criteria;
pub mod listing;

pub use criteria::FilterCriteria;
pub use listing::{Cell, ParsedListing, RawListing, ScoredListing};
