//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::state::PageState;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{PageRecord, RunRecord, RunStatus};
use crate::RankedCrawl;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;

const RUN_COLUMNS: &str = "id, started_at, finished_at, config_hash, status, seeds, rounds, \
                           pages_attempted, damping, iterations, converged";

const PAGE_COLUMNS: &str = "id, run_id, url, rank, out_degree, in_degree";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn set_run_status(&mut self, run_id: i64, status: RunStatus) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2 WHERE id = ?3",
            params![status.to_db_string(), now, run_id],
        )?;
        if updated == 0 {
            return Err(StorageError::RunNotFound(run_id));
        }
        Ok(())
    }
}

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<RunRecord> {
    Ok(RunRecord {
        id: row.get(0)?,
        started_at: row.get(1)?,
        finished_at: row.get(2)?,
        config_hash: row.get(3)?,
        status: RunStatus::from_db_string(&row.get::<_, String>(4)?)
            .unwrap_or(RunStatus::Running),
        seeds: row.get::<_, i64>(5)? as u64,
        rounds: row.get::<_, i64>(6)? as u64,
        pages_attempted: row.get::<_, i64>(7)? as u64,
        damping: row.get(8)?,
        iterations: row.get(9)?,
        converged: row.get(10)?,
    })
}

fn page_from_row(row: &Row<'_>) -> rusqlite::Result<PageRecord> {
    Ok(PageRecord {
        id: row.get(0)?,
        run_id: row.get(1)?,
        url: row.get(2)?,
        rank: row.get(3)?,
        out_degree: row.get(4)?,
        in_degree: row.get(5)?,
    })
}

impl Storage for SqliteStorage {
    // ===== Run Management =====

    fn create_run(&mut self, config_hash: &str) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, config_hash, status) VALUES (?1, ?2, ?3)",
            params![now, config_hash, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM runs WHERE id = ?1", RUN_COLUMNS),
                params![run_id],
                run_from_row,
            )
            .optional()?
            .ok_or(StorageError::RunNotFound(run_id))
    }

    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let run = self
            .conn
            .query_row(
                &format!("SELECT {} FROM runs ORDER BY id DESC LIMIT 1", RUN_COLUMNS),
                [],
                run_from_row,
            )
            .optional()?;
        Ok(run)
    }

    fn complete_run(&mut self, run_id: i64) -> StorageResult<()> {
        self.set_run_status(run_id, RunStatus::Completed)
    }

    fn fail_run(&mut self, run_id: i64) -> StorageResult<()> {
        self.set_run_status(run_id, RunStatus::Failed)
    }

    // ===== Graph Persistence =====

    fn save_ranked_crawl(&mut self, run_id: i64, crawl: &RankedCrawl) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut page_ids: HashMap<&str, i64> = HashMap::new();
            let mut insert_page = tx.prepare(
                "INSERT INTO pages (run_id, url, rank, out_degree, in_degree)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for url in crawl.graph.nodes() {
                let rank = crawl.ranking.score(url).unwrap_or(0.0);
                insert_page.execute(params![
                    run_id,
                    url,
                    rank,
                    crawl.graph.out_degree(url) as i64,
                    crawl.graph.in_links(url).len() as i64,
                ])?;
                page_ids.insert(url, tx.last_insert_rowid());
            }

            let mut insert_link = tx.prepare(
                "INSERT OR IGNORE INTO links (run_id, from_page_id, to_page_id)
                 VALUES (?1, ?2, ?3)",
            )?;
            for (src, dst) in crawl.graph.edges() {
                if let (Some(from_id), Some(to_id)) = (page_ids.get(src), page_ids.get(dst)) {
                    insert_link.execute(params![run_id, from_id, to_id])?;
                }
            }

            let mut insert_state = tx.prepare(
                "INSERT OR REPLACE INTO state_counts (run_id, state, count) VALUES (?1, ?2, ?3)",
            )?;
            for (state, count) in &crawl.report.state_counts {
                insert_state.execute(params![run_id, state.to_db_string(), *count as i64])?;
            }

            let updated = tx.execute(
                "UPDATE runs SET seeds = ?1, rounds = ?2, pages_attempted = ?3,
                 damping = ?4, iterations = ?5, converged = ?6 WHERE id = ?7",
                params![
                    crawl.report.seeds as i64,
                    crawl.report.rounds as i64,
                    crawl.report.pages_attempted as i64,
                    crawl.ranking.damping(),
                    crawl.ranking.iterations() as i64,
                    crawl.ranking.converged(),
                    run_id,
                ],
            )?;
            if updated == 0 {
                return Err(StorageError::RunNotFound(run_id));
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn get_page(&self, run_id: i64, url: &str) -> StorageResult<PageRecord> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM pages WHERE run_id = ?1 AND url = ?2",
                    PAGE_COLUMNS
                ),
                params![run_id, url],
                page_from_row,
            )
            .optional()?
            .ok_or_else(|| StorageError::PageNotFound(url.to_string()))
    }

    fn top_pages(&self, run_id: i64, limit: usize) -> StorageResult<Vec<PageRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM pages WHERE run_id = ?1 ORDER BY rank DESC, url ASC LIMIT ?2",
            PAGE_COLUMNS
        ))?;

        let pages = stmt
            .query_map(params![run_id, limit as i64], page_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages)
    }

    fn out_links(&self, run_id: i64, url: &str) -> StorageResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT dst.url FROM links
             JOIN pages src ON src.id = links.from_page_id
             JOIN pages dst ON dst.id = links.to_page_id
             WHERE links.run_id = ?1 AND src.url = ?2
             ORDER BY links.id",
        )?;

        let urls = stmt
            .query_map(params![run_id, url], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(urls)
    }

    // ===== Statistics =====

    fn count_pages(&self, run_id: i64) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_links(&self, run_id: i64) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM links WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn state_counts(&self, run_id: i64) -> StorageResult<HashMap<PageState, u64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT state, count FROM state_counts WHERE run_id = ?1")?;

        let rows = stmt
            .query_map(params![run_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut counts = HashMap::new();
        for (state, count) in rows {
            match PageState::from_db_string(&state) {
                Some(state) => {
                    counts.insert(state, count as u64);
                }
                None => tracing::warn!("Ignoring unknown page state '{}' in database", state),
            }
        }

        Ok(counts)
    }
}
