use crate::errors::AppError;
use rusqlite::{params, Connection};

#[derive(Debug)]
pub struct ScrapeRun {
    pub id: i64,
    pub city: String,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub pages_fetched: Option<i64>,
    pub listings_seen: Option<i64>,
    pub listings_ranked: Option<i64>,
    pub success: bool,
    pub error_message: Option<String>,
}

/// Outcome of a finished run.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub pages_fetched: usize,
    pub listings_seen: usize,
    pub listings_ranked: usize,
    pub error: Option<String>,
}

pub fn start_scrape_run(conn: &Connection, city: &str, now: i64) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO scrape_runs (city, started_at, success) VALUES (?, ?, 0)",
        params![city, now],
    )
    .map_err(|e| AppError::DbError(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

pub fn end_scrape_run(
    conn: &Connection,
    run_id: i64,
    now: i64,
    outcome: &RunOutcome,
) -> Result<(), AppError> {
    conn.execute(
        "UPDATE scrape_runs SET finished_at = ?, pages_fetched = ?, listings_seen = ?, listings_ranked = ?, success = ?, error_message = ? WHERE id = ?",
        params![
            now,
            outcome.pages_fetched as i64,
            outcome.listings_seen as i64,
            outcome.listings_ranked as i64,
            outcome.error.is_none(),
            outcome.error,
            run_id
        ],
    )
    .map_err(|e| AppError::DbError(e.to_string()))?;
    Ok(())
}

pub fn get_recent_scrapes(conn: &Connection, limit: usize) -> Result<Vec<ScrapeRun>, AppError> {
    let mut stmt = conn
        .prepare("SELECT id, city, started_at, finished_at, pages_fetched, listings_seen, listings_ranked, success, error_message FROM scrape_runs ORDER BY started_at DESC, id DESC LIMIT ?")
        .map_err(|e| AppError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(ScrapeRun {
                id: row.get(0)?,
                city: row.get(1)?,
                started_at: row.get(2)?,
                finished_at: row.get(3)?,
                pages_fetched: row.get(4)?,
                listings_seen: row.get(5)?,
                listings_ranked: row.get(6)?,
                success: row.get(7)?,
                error_message: row.get(8)?,
            })
        })
        .map_err(|e| AppError::DbError(e.to_string()))?;

    let mut runs = Vec::new();
    for r in rows {
        runs.push(r.map_err(|e| AppError::DbError(e.to_string()))?);
    }
    Ok(runs)
}
