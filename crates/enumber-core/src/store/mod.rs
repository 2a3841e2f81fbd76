pub mod schema;
pub mod stats;
pub mod validate;

pub use stats::DatasetStatistics;
pub use validate::{ValidationFinding, ValidationReport};

use crate::error::EnumberError;
use crate::model::{Category, ClassifiedAdditive, RiskLevel};
use crate::normalize::code::AdditiveCode;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use schema::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// A row of the additives table as it is stored.
///
/// Text columns are returned verbatim so rows written by other tools can
/// still be read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredAdditive {
    pub id: i64,
    pub external_id: String,
    pub code: String,
    pub display_name: String,
    pub risk_level: String,
    pub risk_color: String,
    pub category: String,
    pub description: Option<String>,
    pub vegetarian: Option<String>,
    pub vegan: Option<String>,
    pub evaluation_text: Option<String>,
    pub evaluation_url: Option<String>,
    pub evaluation_date: Option<String>,
    pub classes: Option<String>,
    pub source_provenance: String,
    pub last_updated: String,
    pub created_at: Option<String>,
}

/// A record the batch could not write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsertFailure {
    pub external_id: String,
    pub code: String,
    pub reason: String,
}

/// Result of one committed batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpsertOutcome {
    /// Records written, whether new or replacing an existing row.
    pub inserted: usize,
    pub failures: Vec<UpsertFailure>,
    /// Row count after the batch committed.
    pub total_rows: u64,
}

impl UpsertOutcome {
    pub fn error_count(&self) -> usize {
        self.failures.len()
    }
}

/// The persistent additive store.
pub struct Repository {
    conn: Connection,
}

impl Repository {
    /// Open (or create) the store at `path`. Existing rows are kept.
    pub fn open(path: &Path) -> Result<Self, EnumberError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened additive store");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, EnumberError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, EnumberError> {
        conn.execute_batch(SCHEMA_SQL)?;
        let now = Utc::now().to_rfc3339();
        let seed = [
            (META_VERSION, SCHEMA_VERSION.to_string()),
            (META_CREATED_DATE, now.clone()),
            (META_TOTAL, "0".to_string()),
            (META_DATA_SOURCES, String::new()),
            (META_LAST_UPDATED, now),
            (META_REVISION, "0".to_string()),
        ];
        for (key, value) in seed {
            conn.execute(
                "INSERT OR IGNORE INTO metadata (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        Ok(Repository { conn })
    }

    /// Write a single record and refresh metadata, atomically.
    pub fn upsert(&mut self, additive: &ClassifiedAdditive) -> Result<(), EnumberError> {
        let tx = self.conn.transaction()?;
        write_row(&tx, additive)?;
        refresh_metadata(&tx, Utc::now())?;
        tx.commit()?;
        Ok(())
    }

    /// Write a batch in one transaction.
    ///
    /// A record that fails (e.g. a constraint violation) is rolled back to its
    /// savepoint and reported; the rest of the batch still commits. Metadata
    /// is refreshed inside the same transaction.
    pub fn upsert_batch(
        &mut self,
        additives: &[ClassifiedAdditive],
    ) -> Result<UpsertOutcome, EnumberError> {
        let mut outcome = UpsertOutcome::default();
        let mut tx = self.conn.transaction()?;

        for additive in additives {
            let sp = tx.savepoint()?;
            match write_row(&sp, additive) {
                Ok(()) => {
                    sp.commit()?;
                    outcome.inserted += 1;
                }
                Err(e) => {
                    warn!(
                        external_id = %additive.record.external_id,
                        code = %additive.record.code,
                        error = %e,
                        "failed to upsert additive"
                    );
                    outcome.failures.push(UpsertFailure {
                        external_id: additive.record.external_id.clone(),
                        code: additive.record.code.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome.total_rows = refresh_metadata(&tx, Utc::now())?;
        tx.commit()?;

        info!(
            inserted = outcome.inserted,
            errors = outcome.error_count(),
            total = outcome.total_rows,
            "upsert batch committed"
        );
        Ok(outcome)
    }

    pub fn get_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<StoredAdditive>, EnumberError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM additives WHERE external_id = ?1");
        Ok(self
            .conn
            .query_row(&sql, params![external_id], map_row)
            .optional()?)
    }

    /// Rows carrying `code`. More than one row is possible when the source
    /// lists the same code under different keys.
    pub fn find_by_code(&self, code: &AdditiveCode) -> Result<Vec<StoredAdditive>, EnumberError> {
        self.query_rows("WHERE code = ?1 ORDER BY external_id", &code.to_string())
    }

    pub fn list_by_risk_level(
        &self,
        level: RiskLevel,
    ) -> Result<Vec<StoredAdditive>, EnumberError> {
        self.query_rows("WHERE risk_level = ?1 ORDER BY code", level.as_str())
    }

    pub fn list_by_category(&self, category: Category) -> Result<Vec<StoredAdditive>, EnumberError> {
        self.query_rows("WHERE category = ?1 ORDER BY code", category.as_str())
    }

    /// Case-insensitive substring search on the display name.
    /// `%` and `_` in `fragment` match literally.
    pub fn search_by_name(&self, fragment: &str) -> Result<Vec<StoredAdditive>, EnumberError> {
        let pattern = format!("%{}%", escape_like(fragment.trim()));
        self.query_rows(
            "WHERE LOWER(display_name) LIKE LOWER(?1) ESCAPE '\\' ORDER BY code",
            &pattern,
        )
    }

    pub fn list_vegetarian(&self) -> Result<Vec<StoredAdditive>, EnumberError> {
        self.query_rows("WHERE vegetarian = ?1 ORDER BY risk_color, code", "yes")
    }

    pub fn list_vegan(&self) -> Result<Vec<StoredAdditive>, EnumberError> {
        self.query_rows("WHERE vegan = ?1 ORDER BY risk_color, code", "yes")
    }

    pub fn row_count(&self) -> Result<u64, EnumberError> {
        Ok(count_rows(&self.conn)?)
    }

    /// All metadata entries, keyed by name.
    pub fn metadata(&self) -> Result<BTreeMap<String, String>, EnumberError> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM metadata")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })?;
        let mut out = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            out.insert(key, value.unwrap_or_default());
        }
        Ok(out)
    }

    pub fn validate(&self) -> Result<ValidationReport, EnumberError> {
        validate::validate_store(&self.conn)
    }

    pub fn statistics(&self) -> Result<DatasetStatistics, EnumberError> {
        stats::collect_statistics(&self.conn)
    }

    fn query_rows(&self, clause: &str, arg: &str) -> Result<Vec<StoredAdditive>, EnumberError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM additives {clause}");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![arg], map_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn write_row(conn: &Connection, additive: &ClassifiedAdditive) -> Result<(), rusqlite::Error> {
    let rec = &additive.record;
    conn.execute(
        UPSERT_SQL,
        params![
            rec.external_id,
            rec.code.to_string(),
            rec.display_name,
            additive.risk_level.as_str(),
            additive.risk_color.as_str(),
            additive.category.as_str(),
            additive.description,
            rec.dietary.vegetarian.as_str(),
            rec.dietary.vegan.as_str(),
            rec.evaluation.text,
            rec.evaluation.url,
            rec.evaluation.date,
            rec.classes,
            rec.provenance.as_str(),
            rec.ingested_at.to_rfc3339(),
        ],
    )?;
    debug!(external_id = %rec.external_id, "upserted additive");
    Ok(())
}

fn count_rows(conn: &Connection) -> Result<u64, rusqlite::Error> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM additives", [], |row| row.get(0))?;
    Ok(n.max(0) as u64)
}

fn set_meta(conn: &Connection, key: &str, value: &str) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO metadata (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        params![key, value],
    )?;
    Ok(())
}

/// Bring the metadata in line with the table contents. Returns the row count.
fn refresh_metadata(conn: &Connection, now: DateTime<Utc>) -> Result<u64, rusqlite::Error> {
    let total = count_rows(conn)?;

    let mut stmt = conn.prepare(
        "SELECT DISTINCT source_provenance FROM additives ORDER BY source_provenance",
    )?;
    let sources = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    set_meta(conn, META_TOTAL, &total.to_string())?;
    set_meta(conn, META_DATA_SOURCES, &sources.join(", "))?;
    set_meta(conn, META_LAST_UPDATED, &now.to_rfc3339())?;
    conn.execute(
        "UPDATE metadata
         SET value = CAST(CAST(COALESCE(value, '0') AS INTEGER) + 1 AS TEXT),
             updated_at = CURRENT_TIMESTAMP
         WHERE key = ?1",
        params![META_REVISION],
    )?;
    Ok(total)
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<StoredAdditive> {
    Ok(StoredAdditive {
        id: row.get(0)?,
        external_id: row.get(1)?,
        code: row.get(2)?,
        display_name: row.get(3)?,
        risk_level: row.get(4)?,
        risk_color: row.get(5)?,
        category: row.get(6)?,
        description: row.get(7)?,
        vegetarian: row.get(8)?,
        vegan: row.get(9)?,
        evaluation_text: row.get(10)?,
        evaluation_url: row.get(11)?,
        evaluation_date: row.get(12)?,
        classes: row.get(13)?,
        source_provenance: row.get(14)?,
        last_updated: row.get(15)?,
        created_at: row.get(16)?,
    })
}
