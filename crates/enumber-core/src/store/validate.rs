use super::schema::{ADDITIVES_TABLE, METADATA_TABLE, META_TOTAL};
use crate::error::EnumberError;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// Columns the checks below read.
const REQUIRED_COLUMNS: [&str; 4] = ["external_id", "code", "display_name", "risk_level"];

/// A post-load consistency problem. None of these abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFinding {
    DuplicateExternalId { external_id: String, count: u64 },
    MissingField { external_id: String, field: String },
    UnexpectedRiskLevel { external_id: String, value: String },
    MissingColumn { column: String },
    MetadataMissing,
    TotalMismatch { recorded: Option<String>, actual: u64 },
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFinding::DuplicateExternalId { external_id, count } => {
                write!(f, "external id '{external_id}' appears {count} times")
            }
            ValidationFinding::MissingField { external_id, field } => {
                write!(f, "row '{external_id}' has an empty {field}")
            }
            ValidationFinding::UnexpectedRiskLevel { external_id, value } => {
                write!(f, "row '{external_id}' has unexpected risk level '{value}'")
            }
            ValidationFinding::MissingColumn { column } => {
                write!(f, "additives table has no '{column}' column")
            }
            ValidationFinding::MetadataMissing => write!(f, "metadata table is missing"),
            ValidationFinding::TotalMismatch { recorded, actual } => write!(
                f,
                "metadata total_additives is {} but the table holds {actual} rows",
                recorded.as_deref().unwrap_or("unset")
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub row_count: u64,
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Read-only consistency checks over a store.
///
/// Only a missing additives table is an error. Everything else is logged
/// at warn and returned as a finding.
pub fn validate_store(conn: &Connection) -> Result<ValidationReport, EnumberError> {
    if !table_exists(conn, ADDITIVES_TABLE)? {
        return Err(EnumberError::MissingRelation(ADDITIVES_TABLE.to_string()));
    }

    let mut report = ValidationReport {
        row_count: conn.query_row("SELECT COUNT(*) FROM additives", [], |row| {
            row.get::<_, i64>(0)
        })?
        .max(0) as u64,
        findings: Vec::new(),
    };

    let columns = table_columns(conn, ADDITIVES_TABLE)?;
    let has = |column: &str| columns.iter().any(|c| c == column);
    for column in REQUIRED_COLUMNS {
        if !has(column) {
            report.findings.push(ValidationFinding::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    // Rows are named by external id when the column exists, else by rowid.
    let row_label = if has("external_id") {
        "external_id"
    } else {
        "CAST(rowid AS TEXT)"
    };

    if has("external_id") {
        let mut stmt = conn.prepare(
            "SELECT external_id, COUNT(*) FROM additives
             GROUP BY external_id HAVING COUNT(*) > 1 ORDER BY external_id",
        )?;
        let duplicates = stmt.query_map([], |row| {
            Ok(ValidationFinding::DuplicateExternalId {
                external_id: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                count: row.get::<_, i64>(1)?.max(0) as u64,
            })
        })?;
        for finding in duplicates {
            report.findings.push(finding?);
        }
    }

    for field in ["code", "display_name"] {
        if !has(field) {
            continue;
        }
        let sql = format!(
            "SELECT {row_label} FROM additives
             WHERE {field} IS NULL OR TRIM({field}) = '' ORDER BY 1"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, Option<String>>(0))?;
        for external_id in rows {
            report.findings.push(ValidationFinding::MissingField {
                external_id: external_id?.unwrap_or_default(),
                field: field.to_string(),
            });
        }
    }

    if has("risk_level") {
        let sql = format!(
            "SELECT {row_label}, risk_level FROM additives
             WHERE risk_level IS NULL
                OR risk_level NOT IN ('GREEN', 'YELLOW', 'ORANGE', 'RED')
             ORDER BY 1"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                row.get::<_, Option<String>>(1)?,
            ))
        })?;
        for row in rows {
            let (external_id, value) = row?;
            report.findings.push(ValidationFinding::UnexpectedRiskLevel {
                external_id,
                value: value.unwrap_or_default(),
            });
        }
    }

    if table_exists(conn, METADATA_TABLE)? {
        let recorded: Option<String> = conn
            .query_row(
                "SELECT value FROM metadata WHERE key = ?1",
                params![META_TOTAL],
                |row| row.get(0),
            )
            .optional()?
            .flatten();
        if recorded.as_deref() != Some(report.row_count.to_string().as_str()) {
            report.findings.push(ValidationFinding::TotalMismatch {
                recorded,
                actual: report.row_count,
            });
        }
    } else {
        report.findings.push(ValidationFinding::MetadataMissing);
    }

    for finding in &report.findings {
        warn!(%finding, "validation finding");
    }
    info!(
        rows = report.row_count,
        findings = report.findings.len(),
        "validation complete"
    );
    Ok(report)
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    names.collect()
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool, rusqlite::Error> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Repository;

    /// A store written by some other tool, without constraints.
    fn loose_store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE additives (
                external_id TEXT, code TEXT, display_name TEXT, risk_level TEXT
             );
             CREATE TABLE metadata (key TEXT PRIMARY KEY, value TEXT);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_missing_relation_is_fatal() {
        let conn = Connection::open_in_memory().unwrap();
        let err = validate_store(&conn).unwrap_err();
        assert!(matches!(err, EnumberError::MissingRelation(ref t) if t == "additives"));
    }

    #[test]
    fn test_fresh_store_is_clean() {
        let repo = Repository::open_in_memory().unwrap();
        let report = repo.validate().unwrap();
        assert!(report.is_clean(), "{:?}", report.findings);
        assert_eq!(report.row_count, 0);
    }

    #[test]
    fn test_findings_are_warnings() {
        let conn = loose_store();
        conn.execute_batch(
            "INSERT INTO additives VALUES ('en:e102', 'E102', 'Tartrazine', 'RED');
             INSERT INTO additives VALUES ('en:e102', 'E102', 'Tartrazine', 'RED');
             INSERT INTO additives VALUES ('en:e999', 'E999', '', 'PURPLE');
             INSERT INTO additives VALUES ('en:e998', '', 'Thing', 'green');
             INSERT INTO metadata VALUES ('total_additives', '4');",
        )
        .unwrap();

        let report = validate_store(&conn).unwrap();
        assert_eq!(report.row_count, 4);
        assert!(report.findings.contains(&ValidationFinding::DuplicateExternalId {
            external_id: "en:e102".into(),
            count: 2,
        }));
        assert!(report.findings.contains(&ValidationFinding::MissingField {
            external_id: "en:e999".into(),
            field: "display_name".into(),
        }));
        assert!(report.findings.contains(&ValidationFinding::MissingField {
            external_id: "en:e998".into(),
            field: "code".into(),
        }));
        assert!(report.findings.contains(&ValidationFinding::UnexpectedRiskLevel {
            external_id: "en:e999".into(),
            value: "PURPLE".into(),
        }));
        assert!(report.findings.contains(&ValidationFinding::UnexpectedRiskLevel {
            external_id: "en:e998".into(),
            value: "green".into(),
        }));
        assert!(!report
            .findings
            .iter()
            .any(|f| matches!(f, ValidationFinding::TotalMismatch { .. })));
    }

    #[test]
    fn test_total_mismatch() {
        let conn = loose_store();
        conn.execute_batch(
            "INSERT INTO additives VALUES ('en:e330', 'E330', 'Citric acid', 'GREEN');
             INSERT INTO metadata VALUES ('total_additives', '7');",
        )
        .unwrap();
        let report = validate_store(&conn).unwrap();
        assert_eq!(
            report.findings,
            vec![ValidationFinding::TotalMismatch {
                recorded: Some("7".into()),
                actual: 1,
            }]
        );
    }

    #[test]
    fn test_foreign_column_layout_is_reported_not_raised() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE additives (
                id INTEGER PRIMARY KEY, e_number TEXT, name TEXT, risk_level TEXT
             );
             INSERT INTO additives (e_number, name, risk_level)
                VALUES ('E102', 'Tartrazine', 'AMBER');
             CREATE TABLE metadata (key TEXT PRIMARY KEY, value TEXT);
             INSERT INTO metadata VALUES ('total_additives', '1');",
        )
        .unwrap();

        let report = validate_store(&conn).unwrap();
        assert_eq!(report.row_count, 1);
        assert_eq!(
            report.findings,
            vec![
                ValidationFinding::MissingColumn {
                    column: "external_id".into()
                },
                ValidationFinding::MissingColumn {
                    column: "code".into()
                },
                ValidationFinding::MissingColumn {
                    column: "display_name".into()
                },
                ValidationFinding::UnexpectedRiskLevel {
                    external_id: "1".into(),
                    value: "AMBER".into(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_metadata_is_a_finding() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE additives (
                external_id TEXT, code TEXT, display_name TEXT, risk_level TEXT
             );",
        )
        .unwrap();
        let report = validate_store(&conn).unwrap();
        assert_eq!(report.findings, vec![ValidationFinding::MetadataMissing]);
    }
}
