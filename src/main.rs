use crate::cli::Args;
use crate::config::{Config, Market};
use crate::db::{Database, RunOutcome};
use crate::domain::FilterCriteria;
use crate::scraper::KrishaScraper;
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod db;
mod domain;
mod errors;
mod pipeline;
mod scraper;
mod spreadsheets;


fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref()).context("loading configuration")?;

    let db = Database::new(&config.output.database_path);
    if let Err(e) = db::init_db(&db) {
        tracing::warn!("Run history disabled: {e}");
    }

    if args.history {
        return print_history(&db);
    }

    // Validate before touching the network.
    let market = Market::resolve(&args.country, &args.city)?;
    let criteria = args.criteria()?;
    tracing::info!(?criteria, city = %market.city, "Starting analysis");

    let run_id = db
        .with_conn(|conn| db::start_scrape_run(conn, &market.slug, chrono::Utc::now().timestamp()))
        .map_err(|e| tracing::warn!("Could not record run start: {e}"))
        .ok();

    let mut outcome = RunOutcome::default();
    let result = analyse(&args, &config, &market, &criteria, &mut outcome);
    if let Err(e) = &result {
        outcome.error = Some(format!("{e:#}"));
    }

    if let Some(id) = run_id {
        let recorded = db.with_conn(|conn| {
            db::end_scrape_run(conn, id, chrono::Utc::now().timestamp(), &outcome)
        });
        if let Err(e) = recorded {
            tracing::warn!("Could not record run end: {e}");
        }
    }

    result
}

fn analyse(
    args: &Args,
    config: &Config,
    market: &Market,
    criteria: &FilterCriteria,
    outcome: &mut RunOutcome,
) -> anyhow::Result<()> {
    let scraper = KrishaScraper::new(&config.scrape).context("building HTTP client")?;
    let scraped = scraper
        .collect_fragments(market, criteria.rooms)
        .context("scraping listing pages")?;

    outcome.pages_fetched = scraped.pages_fetched;
    outcome.listings_seen = scraped.fragments.len();
    tracing::info!(
        "Collected {} cards from {} pages",
        scraped.fragments.len(),
        scraped.pages_fetched
    );

    let report = pipeline::run(&scraped.fragments, criteria, &config.pipeline);
    outcome.listings_ranked = report.listings.len();

    if report.stages.dropped_fragments > 0 {
        tracing::info!(
            "Skipped {} cards with missing fields",
            report.stages.dropped_fragments
        );
    }

    println!("{}", pipeline::render_summary(&report));

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let path = spreadsheets::export_report_xlsx(&report, &config.output.directory, &today)
        .context("writing spreadsheet")?;
    tracing::info!("Wrote {} rows to {}", report.listings.len(), path.display());

    if let Some(json_path) = &args.json {
        let file = std::fs::File::create(json_path)
            .with_context(|| format!("creating {}", json_path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &report.listings)
            .context("writing JSON dump")?;
        tracing::info!("Wrote JSON dump to {}", json_path.display());
    }

    Ok(())
}

fn print_history(db: &Database) -> anyhow::Result<()> {
    let runs = db
        .with_conn(|conn| db::get_recent_scrapes(conn, 20))
        .context("reading run history")?;

    if runs.is_empty() {
        println!("No runs recorded yet.");
        return Ok(());
    }

    for run in runs {
        let started = chrono::DateTime::from_timestamp(run.started_at, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| run.started_at.to_string());
        let status = if run.success { "ok" } else { "failed" };
        let took = run
            .finished_at
            .map(|end| format!("{}s", end - run.started_at))
            .unwrap_or_else(|| "unfinished".to_string());

        println!(
            "#{:<4} {started}  {:<8} {:<6} {:>10} pages={} seen={} ranked={} {}",
            run.id,
            run.city,
            status,
            took,
            run.pages_fetched.unwrap_or(0),
            run.listings_seen.unwrap_or(0),
            run.listings_ranked.unwrap_or(0),
            run.error_message.unwrap_or_default()
        );
    }

    Ok(())
}
