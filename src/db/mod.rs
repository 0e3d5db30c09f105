pub mod connection;
pub mod scrapes;

pub use connection::{init_db, Database};
pub use scrapes::{end_scrape_run, get_recent_scrapes, start_scrape_run, RunOutcome};
